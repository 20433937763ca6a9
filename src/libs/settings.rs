//! Per-user settings stored in the record store.
//!
//! Settings are a single object blob in the `settings` collection. Partial
//! updates go through [`SettingsPatch`], which shallow-merges whole named
//! sub-sections rather than spreading arbitrary fields.

use serde::{Deserialize, Serialize};

use crate::libs::notification::NotificationType;

/// Notification category toggles consumed by the scheduler at delivery time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationPreferences {
    pub enabled: bool,
    pub study_reminders: bool,
    pub deadline_alerts: bool,
    pub motivational_tips: bool,
    pub break_reminders: bool,
    pub sound: bool,
}

impl Default for NotificationPreferences {
    fn default() -> Self {
        NotificationPreferences {
            enabled: true,
            study_reminders: true,
            deadline_alerts: true,
            motivational_tips: true,
            break_reminders: true,
            sound: true,
        }
    }
}

impl NotificationPreferences {
    /// Whether a delivery of the given category should reach the user.
    pub fn allows(&self, kind: NotificationType) -> bool {
        if !self.enabled {
            return false;
        }
        match kind {
            NotificationType::StudyReminder => self.study_reminders,
            NotificationType::DeadlineAlert => self.deadline_alerts,
            NotificationType::MotivationalTip => self.motivational_tips,
            NotificationType::BreakReminder => self.break_reminders,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub notifications: NotificationPreferences,
}

/// Partial settings update. Present sub-sections replace the stored ones
/// wholesale; absent sub-sections are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub notifications: Option<NotificationPreferences>,
}

impl Settings {
    pub fn merge(&mut self, patch: SettingsPatch) {
        if let Some(notifications) = patch.notifications {
            self.notifications = notifications;
        }
    }
}
