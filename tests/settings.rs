#[cfg(test)]
mod tests {
    use stula::libs::notification::NotificationType;
    use stula::libs::settings::{NotificationPreferences, Settings, SettingsPatch};
    use stula::libs::task::{sort_for_display, Priority, Task};

    #[test]
    fn test_defaults_allow_everything() {
        let prefs = NotificationPreferences::default();
        assert!(prefs.allows(NotificationType::StudyReminder));
        assert!(prefs.allows(NotificationType::DeadlineAlert));
        assert!(prefs.allows(NotificationType::MotivationalTip));
        assert!(prefs.allows(NotificationType::BreakReminder));
    }

    #[test]
    fn test_master_switch_overrides_categories() {
        let prefs = NotificationPreferences {
            enabled: false,
            ..Default::default()
        };
        assert!(!prefs.allows(NotificationType::StudyReminder));
        assert!(!prefs.allows(NotificationType::MotivationalTip));
    }

    #[test]
    fn test_category_toggle_is_independent() {
        let prefs = NotificationPreferences {
            deadline_alerts: false,
            ..Default::default()
        };
        assert!(!prefs.allows(NotificationType::DeadlineAlert));
        assert!(prefs.allows(NotificationType::BreakReminder));
    }

    #[test]
    fn test_merge_replaces_whole_subsection() {
        let mut settings = Settings::default();
        settings.merge(SettingsPatch {
            notifications: Some(NotificationPreferences {
                sound: false,
                ..Default::default()
            }),
        });
        assert!(!settings.notifications.sound);
        assert!(settings.notifications.enabled);
    }

    #[test]
    fn test_merge_empty_patch_is_noop() {
        let mut settings = Settings::default();
        let before = settings.clone();
        settings.merge(SettingsPatch::default());
        assert_eq!(settings, before);
    }

    #[test]
    fn test_unknown_fields_in_stored_settings_are_ignored() {
        let settings: Settings = serde_json::from_str(r#"{"notifications":{"enabled":false,"theme":"dark"},"legacy":1}"#).unwrap();
        assert!(!settings.notifications.enabled);
        // Omitted fields fall back to their defaults.
        assert!(settings.notifications.sound);
    }

    #[test]
    fn test_task_display_order() {
        fn task(id: &str, completed: bool, day: u32) -> Task {
            let mut t = Task::new(
                id,
                "Math",
                chrono::NaiveDate::from_ymd_opt(2025, 6, day).unwrap().and_hms_opt(12, 0, 0).unwrap(),
                Priority::Medium,
            );
            t.id = id.to_string();
            t.completed = completed;
            t
        }

        let mut tasks = vec![task("done-early", true, 1), task("open-late", false, 20), task("open-early", false, 2)];
        sort_for_display(&mut tasks);

        let order: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(order, vec!["open-early", "open-late", "done-early"]);
    }
}
