//! Analytics aggregation over the persisted session history.
//!
//! All functions here are pure: the caller supplies the full history and the
//! reference time, and identical inputs always produce identical snapshots.
//!
//! ## Focus Score Formula
//!
//! ```text
//! focus = max(0, 1 - 0.1 * focus_loss_count)
//! ```
//!
//! Each recorded focus loss during a session subtracts 10 percentage points,
//! floored at zero. The average over a window is the arithmetic mean of
//! per-session scores, and 0.0 for an empty window.
//!
//! ## Windows
//!
//! - `week`: sessions ending in the last 7 days, 7 daily buckets
//! - `month`: last 30 days, 30 daily buckets
//! - `all`: unbounded totals, but only the most recent 90 days are bucketed
//!   for charting
//!
//! The streak always scans the entire history regardless of the requested
//! window: consecutive calendar days ending today with at least one session.
//! Today having no session yet does not break the streak; a gap on any
//! earlier day terminates the count.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::libs::session::StudySession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TimeRange {
    Week,
    Month,
    All,
}

impl TimeRange {
    /// Window length for filtering; `None` keeps the whole history.
    fn window_days(&self) -> Option<i64> {
        match self {
            TimeRange::Week => Some(7),
            TimeRange::Month => Some(30),
            TimeRange::All => None,
        }
    }

    /// Number of daily buckets charted for this range.
    fn bucket_days(&self) -> i64 {
        match self {
            TimeRange::Week => 7,
            TimeRange::Month => 30,
            TimeRange::All => 90,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::All => "all",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotal {
    pub date: NaiveDate,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SubjectTotal {
    pub subject: String,
    pub minutes: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub ended_at: NaiveDateTime,
    pub subject: String,
    pub minutes: i64,
    pub focus_score: f64,
}

/// Derived metrics for one time window; recomputed per query, never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalyticsSnapshot {
    pub total_minutes: i64,
    pub total_sessions: usize,
    pub average_focus: f64,
    pub current_streak: u32,
    pub daily: Vec<DailyTotal>,
    pub subjects: Vec<SubjectTotal>,
    pub recent: Vec<SessionSummary>,
}

/// Per-session focus score in [0, 1].
pub fn focus_score(session: &StudySession) -> f64 {
    (1.0 - session.focus_losses.len() as f64 * 0.1).max(0.0)
}

/// Computes the snapshot for a window ending at `now`.
pub fn snapshot(sessions: &[StudySession], range: TimeRange, now: NaiveDateTime) -> AnalyticsSnapshot {
    let filtered: Vec<&StudySession> = match range.window_days() {
        Some(days) => {
            let cutoff = now - Duration::days(days);
            sessions.iter().filter(|s| s.end_time >= cutoff && s.end_time <= now).collect()
        }
        None => sessions.iter().collect(),
    };

    let total_minutes: i64 = filtered.iter().map(|s| s.duration).sum();
    let total_sessions = filtered.len();

    let average_focus = if filtered.is_empty() {
        0.0
    } else {
        filtered.iter().map(|s| focus_score(s)).sum::<f64>() / filtered.len() as f64
    };

    // One bucket per local calendar day, oldest to newest.
    let today = now.date();
    let days = range.bucket_days();
    let mut daily = Vec::with_capacity(days as usize);
    for offset in (0..days).rev() {
        let date = today - Duration::days(offset);
        let minutes = filtered.iter().filter(|s| s.end_time.date() == date).map(|s| s.duration).sum();
        daily.push(DailyTotal { date, minutes });
    }

    // Subject distribution in first-seen order among the filtered set.
    let mut subjects: Vec<SubjectTotal> = Vec::new();
    for session in &filtered {
        match subjects.iter_mut().find(|t| t.subject == session.subject) {
            Some(total) => total.minutes += session.duration,
            None => subjects.push(SubjectTotal {
                subject: session.subject.clone(),
                minutes: session.duration,
            }),
        }
    }

    let recent: Vec<SessionSummary> = filtered
        .iter()
        .rev()
        .take(10)
        .map(|s| SessionSummary {
            ended_at: s.end_time,
            subject: s.subject.clone(),
            minutes: s.duration,
            focus_score: focus_score(s),
        })
        .collect();

    AnalyticsSnapshot {
        total_minutes,
        total_sessions,
        average_focus,
        current_streak: streak(sessions, today),
        daily,
        subjects,
        recent,
    }
}

/// The window-filtered sessions in chronological order, each with its focus
/// score. Used for tabular export.
pub fn filtered_summaries(sessions: &[StudySession], range: TimeRange, now: NaiveDateTime) -> Vec<SessionSummary> {
    let filtered: Vec<&StudySession> = match range.window_days() {
        Some(days) => {
            let cutoff = now - Duration::days(days);
            sessions.iter().filter(|s| s.end_time >= cutoff && s.end_time <= now).collect()
        }
        None => sessions.iter().collect(),
    };

    filtered
        .into_iter()
        .map(|s| SessionSummary {
            ended_at: s.end_time,
            subject: s.subject.clone(),
            minutes: s.duration,
            focus_score: focus_score(s),
        })
        .collect()
}

/// Consecutive calendar days ending today with at least one finalized
/// session. Computed over the entire history, not the filtered window.
pub fn streak(sessions: &[StudySession], today: NaiveDate) -> u32 {
    if sessions.is_empty() {
        return 0;
    }

    let mut streak = 0;
    for offset in 0..365 {
        let date = today - Duration::days(offset);
        let has_session = sessions.iter().any(|s| s.end_time.date() == date);

        if has_session {
            streak += 1;
        } else if offset > 0 {
            // Today is allowed to be empty; any earlier gap ends the run.
            break;
        }
    }
    streak
}
