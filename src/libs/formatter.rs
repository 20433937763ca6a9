//! Duration and score formatting for reports, tables, and exports.
//!
//! All durations display as "HH:MM"; negative values clamp to "00:00".
//! Focus scores display as whole percentages, matching the exported rows.

use chrono::Duration;

/// Formats a duration as "HH:MM", clamping negatives to zero.
pub fn format_duration(duration: &Duration) -> String {
    let hours = duration.num_hours();
    let mins = duration.num_minutes() % 60;

    format!("{:02}:{:02}", hours.max(0), mins.max(0))
}

/// Formats a minute count as "HH:MM".
pub fn format_minutes(minutes: i64) -> String {
    format_duration(&Duration::minutes(minutes))
}

/// Formats a focus score in [0, 1] as a whole percentage, e.g. "80%".
pub fn format_focus(score: f64) -> String {
    format!("{}%", (score * 100.0).round() as i64)
}
