//! Display implementation for stula application messages.
//!
//! All user-facing text lives here, so the rest of the code deals only in
//! structured [`Message`] values. Messages with dynamic content carry typed
//! parameters that are interpolated at display time.

use super::types::Message;
use crate::libs::formatter::format_minutes;
use std::fmt;

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            // === CONFIGURATION MESSAGES ===
            Message::ConfigSaved => "Configuration saved successfully".to_string(),
            Message::ConfigReadError(e) => format!("Failed to access configuration: {}", e),
            Message::ConfigParseError(e) => format!("Failed to parse configuration: {}", e),
            Message::NoActiveUser => "No active user configured. Run 'stula init' first".to_string(),

            // === TASK MESSAGES ===
            Message::TaskCreated(title) => format!("Task '{}' created", title),
            Message::TaskCompleted(title) => format!("Task '{}' marked as completed", title),
            Message::TaskReopened(title) => format!("Task '{}' reopened", title),
            Message::TaskDeleted(id) => format!("Task {} deleted", id),
            Message::TaskNotFound(id) => format!("Task {} not found", id),
            Message::NoTasks => "No tasks yet. Add one with 'stula task add'".to_string(),

            // === SESSION MESSAGES ===
            Message::SessionStarted(subject, minutes) => {
                format!("Studying {} for {} minutes. Ctrl+C stops and records elapsed time", subject, minutes)
            }
            Message::SessionStopped(subject, minutes) => format!("Session stopped: {} ({})", subject, format_minutes(*minutes)),
            Message::SessionCompleted(subject, minutes) => format!("Session complete: {} ({})", subject, format_minutes(*minutes)),
            Message::SessionConflict => "A study session is already in progress".to_string(),
            Message::NoOpenSession => "No study session is currently open".to_string(),

            // === ANALYTICS MESSAGES ===
            Message::AnalyticsHeader(range) => format!("📊 Study analytics ({})", range),
            Message::DailyHeader => "Daily study time".to_string(),
            Message::SubjectsHeader => "Time by subject".to_string(),
            Message::RecentHeader => "Recent sessions".to_string(),

            // === EXPORT MESSAGES ===
            Message::ExportingRows(count) => format!("Exporting {} session rows", count),
            Message::ExportCompleted(path) => format!("Export completed: {}", path),

            // === NOTIFICATION MESSAGES ===
            Message::NotificationDelivered(title, body) => format!("🔔 {}\n{}", title, body),
            Message::NotificationScheduled(id) => format!("Notification scheduled ({})", id),
            Message::NotificationCancelled(id) => format!("Notification {} cancelled", id),
            Message::NotificationsCancelledForUser(user) => format!("All notifications for '{}' cancelled", user),
            Message::DeadlineAlertSkipped(title) => {
                format!("Deadline for '{}' is less than 24 hours away; no alert scheduled", title)
            }
            Message::BreakReminderScheduled(minutes) => format!("Break reminder scheduled in {} minutes", minutes),
            Message::PendingNotifications(count) => format!("{} pending notification(s)", count),
            Message::QueueEmpty => "No pending notifications".to_string(),
            Message::TestNotificationSent => "Test notification delivered".to_string(),
            Message::TestNotificationDenied => "Notification permission denied".to_string(),
        };
        write!(f, "{}", text)
    }
}
