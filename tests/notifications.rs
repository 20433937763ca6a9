#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, NaiveDate};
    use parking_lot::Mutex;
    use std::sync::Arc;
    use stula::db::queue::Queue;
    use stula::db::records::RecordStore;
    use stula::libs::data_storage::DataStorage;
    use stula::libs::notification::{NotificationType, ScheduledNotification, BROADCAST_USER};
    use stula::libs::scheduler::{DeliveryOptions, DeliverySurface, NotificationScheduler, Permission};
    use stula::libs::settings::{NotificationPreferences, SettingsPatch};
    use stula::libs::task::{Priority, Task};
    use tempfile::TempDir;
    use test_context::{test_context, AsyncTestContext};

    struct QueueTestContext {
        _temp_dir: TempDir,
    }

    impl AsyncTestContext for QueueTestContext {
        async fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            QueueTestContext { _temp_dir: temp_dir }
        }
    }

    /// Delivery surface capturing delivered titles for assertions.
    struct RecordingSurface {
        granted: bool,
        delivered: Mutex<Vec<String>>,
    }

    impl RecordingSurface {
        fn new(granted: bool) -> Arc<Self> {
            Arc::new(RecordingSurface {
                granted,
                delivered: Mutex::new(Vec::new()),
            })
        }

        fn delivered(&self) -> Vec<String> {
            self.delivered.lock().clone()
        }
    }

    impl DeliverySurface for RecordingSurface {
        fn request_permission(&self) -> Permission {
            if self.granted {
                Permission::Granted
            } else {
                Permission::Denied
            }
        }

        fn has_permission(&self) -> bool {
            self.granted
        }

        fn deliver(&self, title: &str, _body: &str, _options: &DeliveryOptions) {
            self.delivered.lock().push(title.to_string());
        }
    }

    fn reminder_at(id_hint: &str, minutes_from_now: i64, user: &str) -> ScheduledNotification {
        let mut n = ScheduledNotification::study_reminder("Math", 25, Local::now().naive_local() + Duration::minutes(minutes_from_now), user);
        n.id = format!("{}_{}", id_hint, n.id);
        n
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_queue_push_find_remove(_ctx: &mut QueueTestContext) {
        let queue = Queue::new().unwrap();
        let item = reminder_at("a", 30, "alice");

        queue.push(&item).unwrap();
        assert_eq!(queue.find(&item.id).unwrap().unwrap(), item);

        queue.remove(&item.id).unwrap();
        assert!(queue.find(&item.id).unwrap().is_none());
        // Removing a consumed id stays a no-op.
        queue.remove(&item.id).unwrap();
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_take_claims_item_exactly_once(_ctx: &mut QueueTestContext) {
        let queue = Queue::new().unwrap();
        let item = reminder_at("a", 30, "alice");
        queue.push(&item).unwrap();

        assert_eq!(queue.take(&item.id).unwrap().unwrap(), item);
        // A second claim on the same id finds nothing to deliver.
        assert!(queue.take(&item.id).unwrap().is_none());
        assert!(queue.find(&item.id).unwrap().is_none());
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_concurrent_removals_leave_queue_empty(_ctx: &mut QueueTestContext) {
        let seed = Queue::new().unwrap();
        let ids: Vec<String> = (0..200)
            .map(|i| {
                let item = reminder_at(&format!("n{}", i), 60, "alice");
                seed.push(&item).unwrap();
                item.id
            })
            .collect();

        // Two timer callbacks consuming different ids at the same time must
        // not resurrect each other's removals.
        let (left, right) = ids.split_at(100);
        let (left, right) = (left.to_vec(), right.to_vec());
        let a = std::thread::spawn(move || {
            let queue = Queue::new().unwrap();
            for id in &left {
                queue.remove(id).unwrap();
            }
        });
        let b = std::thread::spawn(move || {
            let queue = Queue::new().unwrap();
            for id in &right {
                queue.remove(id).unwrap();
            }
        });
        a.join().unwrap();
        b.join().unwrap();

        assert!(Queue::new().unwrap().all().unwrap().is_empty());
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_corrupted_queue_row_is_skipped(_ctx: &mut QueueTestContext) {
        let queue = Queue::new().unwrap();
        queue.push(&reminder_at("a", 30, "alice")).unwrap();

        let db_path = DataStorage::new().get_path("stula.db").unwrap();
        let conn = rusqlite::Connection::open(&db_path).unwrap();
        conn.execute("INSERT INTO records (key, value) VALUES ('notification-bad', '{nope')", []).unwrap();

        let items = queue.all().unwrap();
        assert_eq!(items.len(), 1);
        assert!(queue.find("bad").unwrap().is_none());
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_queue_for_user_includes_broadcasts(_ctx: &mut QueueTestContext) {
        let queue = Queue::new().unwrap();
        queue.push(&reminder_at("a", 30, "alice")).unwrap();
        queue.push(&reminder_at("b", 30, "bob")).unwrap();
        queue.push(&ScheduledNotification::motivational_tip(Local::now().naive_local())).unwrap();

        let visible = queue.for_user("alice").unwrap();
        assert_eq!(visible.len(), 2);
        assert!(visible.iter().any(|n| n.user_id == "alice"));
        assert!(visible.iter().any(|n| n.is_broadcast()));
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_queue_stats_count_by_type(_ctx: &mut QueueTestContext) {
        let queue = Queue::new().unwrap();
        queue.push(&reminder_at("a", 30, "alice")).unwrap();
        queue.push(&reminder_at("b", 45, "alice")).unwrap();
        queue
            .push(&ScheduledNotification::break_reminder(25, Local::now().naive_local(), "alice"))
            .unwrap();

        let stats = queue.stats_for_user("alice").unwrap();
        assert_eq!(stats.get("study_reminder"), Some(&2));
        assert_eq!(stats.get("break_reminder"), Some(&1));
        assert_eq!(stats.get("deadline_alert"), None);
    }

    #[test]
    fn test_deadline_alert_fires_24h_before() {
        let now = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
        let task = Task::new("Essay", "History", now + Duration::days(3), Priority::High);

        let alert = ScheduledNotification::deadline_alert(&task, "alice", now).unwrap();
        assert_eq!(alert.kind, NotificationType::DeadlineAlert);
        assert_eq!(alert.scheduled_for, task.deadline - Duration::hours(24));
        assert_eq!(alert.user_id, "alice");
    }

    #[test]
    fn test_deadline_alert_rejected_when_moment_passed() {
        let now = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();
        // Due in 10 hours: the 24h-before moment is already behind us.
        let task = Task::new("Quiz prep", "Math", now + Duration::hours(10), Priority::High);
        assert!(ScheduledNotification::deadline_alert(&task, "alice", now).is_none());
    }

    #[test]
    fn test_motivational_tip_is_stable_broadcast() {
        let now = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(22, 0, 0).unwrap();
        let tip_a = ScheduledNotification::motivational_tip(now);
        let tip_b = ScheduledNotification::motivational_tip(now);

        assert_eq!(tip_a.user_id, BROADCAST_USER);
        assert!(tip_a.is_broadcast());
        // Tomorrow at 09:00, same tip text for the same day.
        assert_eq!(tip_a.scheduled_for, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap().and_hms_opt(9, 0, 0).unwrap());
        assert_eq!(tip_a.body, tip_b.body);
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_schedule_enqueues_and_cancel_is_idempotent(_ctx: &mut QueueTestContext) {
        let scheduler = NotificationScheduler::new(RecordingSurface::new(true));
        let id = scheduler.schedule(reminder_at("a", 60, "alice")).unwrap();

        assert!(Queue::new().unwrap().find(&id).unwrap().is_some());

        scheduler.cancel(&id).unwrap();
        assert!(Queue::new().unwrap().find(&id).unwrap().is_none());
        scheduler.cancel(&id).unwrap();
        scheduler.cancel("unknown-id").unwrap();
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_init_does_not_rearm_existing_timer(_ctx: &mut QueueTestContext) {
        let scheduler = NotificationScheduler::new(RecordingSurface::new(true));
        let id = scheduler.schedule(reminder_at("a", 60, "alice")).unwrap();
        assert!(scheduler.armed(&id));

        // Replaying the queue leaves the already-armed timer in place.
        scheduler.init().unwrap();
        assert!(scheduler.armed(&id));

        scheduler.cancel(&id).unwrap();
        assert!(!scheduler.armed(&id));
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_cancel_all_for_user_spares_broadcasts(_ctx: &mut QueueTestContext) {
        let scheduler = NotificationScheduler::new(RecordingSurface::new(true));
        scheduler.schedule(reminder_at("a", 60, "alice")).unwrap();
        scheduler.schedule(reminder_at("b", 90, "alice")).unwrap();
        scheduler.schedule(reminder_at("c", 60, "bob")).unwrap();
        scheduler.schedule(ScheduledNotification::motivational_tip(Local::now().naive_local())).unwrap();

        scheduler.cancel_all_for_user("alice").unwrap();

        let remaining = Queue::new().unwrap().all().unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining.iter().all(|n| n.user_id != "alice"));
        assert!(remaining.iter().any(|n| n.is_broadcast()));
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_init_replays_overdue_once(_ctx: &mut QueueTestContext) {
        let overdue = reminder_at("late", -5, "alice");
        Queue::new().unwrap().push(&overdue).unwrap();

        let surface = RecordingSurface::new(true);
        let scheduler = NotificationScheduler::new(surface.clone());
        scheduler.init().unwrap();

        assert_eq!(surface.delivered(), vec!["📚 Study Time!".to_string()]);
        assert!(Queue::new().unwrap().find(&overdue.id).unwrap().is_none());

        // A second replay finds nothing to deliver.
        scheduler.init().unwrap();
        assert_eq!(surface.delivered().len(), 1);
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_preferences_suppress_but_consume_delivery(_ctx: &mut QueueTestContext) {
        RecordStore::for_user("alice")
            .unwrap()
            .update_settings(SettingsPatch {
                notifications: Some(NotificationPreferences {
                    study_reminders: false,
                    ..Default::default()
                }),
            })
            .unwrap();

        let overdue = reminder_at("late", -5, "alice");
        Queue::new().unwrap().push(&overdue).unwrap();

        let surface = RecordingSurface::new(true);
        NotificationScheduler::new(surface.clone()).init().unwrap();

        // Suppressed deliveries are spent, never retried.
        assert!(surface.delivered().is_empty());
        assert!(Queue::new().unwrap().find(&overdue.id).unwrap().is_none());
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_disabled_master_switch_suppresses_all(_ctx: &mut QueueTestContext) {
        RecordStore::for_user("alice")
            .unwrap()
            .update_settings(SettingsPatch {
                notifications: Some(NotificationPreferences {
                    enabled: false,
                    ..Default::default()
                }),
            })
            .unwrap();

        Queue::new().unwrap().push(&reminder_at("late", -5, "alice")).unwrap();

        let surface = RecordingSurface::new(true);
        NotificationScheduler::new(surface.clone()).init().unwrap();
        assert!(surface.delivered().is_empty());
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_broadcast_skips_preference_gating(_ctx: &mut QueueTestContext) {
        // Broadcasts are not owned by anyone, so no per-user preference
        // lookup happens before delivery.
        let mut tip = ScheduledNotification::motivational_tip(Local::now().naive_local());
        tip.scheduled_for = Local::now().naive_local() - Duration::minutes(1);
        Queue::new().unwrap().push(&tip).unwrap();

        let surface = RecordingSurface::new(true);
        NotificationScheduler::new(surface.clone()).init().unwrap();
        assert_eq!(surface.delivered().len(), 1);
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_denied_permission_drops_delivery(_ctx: &mut QueueTestContext) {
        Queue::new().unwrap().push(&reminder_at("late", -5, "alice")).unwrap();

        let surface = RecordingSurface::new(false);
        let scheduler = NotificationScheduler::new(surface.clone());
        scheduler.init().unwrap();

        assert!(surface.delivered().is_empty());
        assert!(!scheduler.ensure_permission());
        assert!(!scheduler.deliver_test());
    }

    #[test_context(QueueTestContext)]
    #[tokio::test]
    async fn test_deliver_test_bypasses_queue(_ctx: &mut QueueTestContext) {
        let surface = RecordingSurface::new(true);
        let scheduler = NotificationScheduler::new(surface.clone());

        assert!(scheduler.deliver_test());
        assert_eq!(surface.delivered().len(), 1);
        assert!(Queue::new().unwrap().all().unwrap().is_empty());
    }
}
