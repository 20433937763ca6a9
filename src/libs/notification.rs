//! Scheduled notification records and constructors.
//!
//! A notification lives in the durable queue from creation until it fires or
//! is cancelled. Constructors produce the four supported categories with
//! their standard titles and bodies; the deadline alert is the only one that
//! can decline to schedule (when its 24h-before moment has already passed).

use chrono::{Datelike, Duration, Local, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::libs::task::Task;

/// Owner id for broadcast notifications delivered to every user.
pub const BROADCAST_USER: &str = "all";

/// Lead time for deadline alerts.
pub const DEADLINE_ALERT_LEAD_HOURS: i64 = 24;

const MOTIVATIONAL_TIPS: [&str; 8] = [
    "🌟 Every expert was once a beginner. Keep going!",
    "💪 Small progress is still progress. You've got this!",
    "🎯 Focus on progress, not perfection.",
    "🚀 Your future self will thank you for studying today!",
    "📚 Knowledge is power. Keep building yours!",
    "⭐ Believe in yourself and your ability to learn.",
    "🔥 Consistency beats perfection every time.",
    "🌱 Growth happens outside your comfort zone.",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    StudyReminder,
    DeadlineAlert,
    MotivationalTip,
    BreakReminder,
}

impl NotificationType {
    pub fn label(&self) -> &'static str {
        match self {
            NotificationType::StudyReminder => "study_reminder",
            NotificationType::DeadlineAlert => "deadline_alert",
            NotificationType::MotivationalTip => "motivational_tip",
            NotificationType::BreakReminder => "break_reminder",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduledNotification {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub body: String,
    pub scheduled_for: NaiveDateTime,
    pub user_id: String,
    #[serde(default)]
    pub payload: serde_json::Value,
}

impl ScheduledNotification {
    fn make_id(prefix: &str) -> String {
        format!("{}_{}", prefix, Local::now().timestamp_millis())
    }

    pub fn study_reminder(subject: &str, duration_minutes: i64, scheduled_for: NaiveDateTime, user_id: &str) -> Self {
        ScheduledNotification {
            id: Self::make_id("study"),
            kind: NotificationType::StudyReminder,
            title: "📚 Study Time!".to_string(),
            body: format!("Time to study {} for {} minutes", subject, duration_minutes),
            scheduled_for,
            user_id: user_id.to_string(),
            payload: json!({ "subject": subject, "duration": duration_minutes }),
        }
    }

    /// Alert fired 24 hours before a task deadline. Returns `None` when that
    /// moment is not strictly in the future; a past alert is never enqueued.
    pub fn deadline_alert(task: &Task, user_id: &str, now: NaiveDateTime) -> Option<Self> {
        let alert_time = task.deadline - Duration::hours(DEADLINE_ALERT_LEAD_HOURS);
        if alert_time <= now {
            return None;
        }

        Some(ScheduledNotification {
            id: Self::make_id("deadline"),
            kind: NotificationType::DeadlineAlert,
            title: "⏰ Deadline Approaching!".to_string(),
            body: format!("\"{}\" is due tomorrow in {}", task.title, task.subject),
            scheduled_for: alert_time,
            user_id: user_id.to_string(),
            payload: json!({ "task_id": task.id, "title": task.title, "subject": task.subject }),
        })
    }

    pub fn break_reminder(duration_minutes: i64, now: NaiveDateTime, user_id: &str) -> Self {
        ScheduledNotification {
            id: Self::make_id("break"),
            kind: NotificationType::BreakReminder,
            title: "☕ Break Time!".to_string(),
            body: format!("You've been studying for {} minutes. Time for a well-deserved break!", duration_minutes),
            scheduled_for: now + Duration::minutes(duration_minutes),
            user_id: user_id.to_string(),
            payload: json!({ "duration": duration_minutes }),
        }
    }

    /// Broadcast motivational tip for tomorrow at 09:00 local time. The tip
    /// text is picked by day of year so repeated scheduling stays stable.
    pub fn motivational_tip(now: NaiveDateTime) -> Self {
        let tomorrow = now.date() + Duration::days(1);
        let fires_at = tomorrow.and_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        let tip = MOTIVATIONAL_TIPS[tomorrow.ordinal() as usize % MOTIVATIONAL_TIPS.len()];

        ScheduledNotification {
            id: Self::make_id("tip"),
            kind: NotificationType::MotivationalTip,
            title: "💡 Daily Study Tip".to_string(),
            body: tip.to_string(),
            scheduled_for: fires_at,
            user_id: BROADCAST_USER.to_string(),
            payload: serde_json::Value::Null,
        }
    }

    pub fn is_broadcast(&self) -> bool {
        self.user_id == BROADCAST_USER
    }
}
