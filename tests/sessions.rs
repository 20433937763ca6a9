#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate};
    use stula::db::records::{Collection, RecordStore};
    use stula::libs::error::CoreError;
    use stula::libs::session::{Artifact, QuizResult, SessionManager, StudySession};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct SessionTestContext {
        _temp_dir: TempDir,
    }

    impl TestContext for SessionTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            std::env::set_var("HOME", temp_dir.path());
            std::env::set_var("LOCALAPPDATA", temp_dir.path());
            SessionTestContext { _temp_dir: temp_dir }
        }
    }

    fn manager() -> SessionManager {
        SessionManager::new(RecordStore::for_user("alice").unwrap())
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_start_rejects_second_session(_ctx: &mut SessionTestContext) {
        let mut manager = manager();
        manager.start("Math").unwrap();

        let err = manager.start("Physics").unwrap_err();
        assert!(matches!(err, CoreError::SessionConflict));
        // The original session survives the failed start.
        assert_eq!(manager.current().unwrap().subject, "Math");
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_start_rejects_blank_subject(_ctx: &mut SessionTestContext) {
        let mut manager = manager();
        assert!(matches!(manager.start("   "), Err(CoreError::Validation(_))));
        assert!(!manager.is_open());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_events_while_idle_are_ignored(_ctx: &mut SessionTestContext) {
        let mut manager = manager();
        let ts = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(10, 0, 0).unwrap();

        manager.log_focus_loss(ts);
        manager.log_focus_return(ts);
        manager.log_quiz_result(QuizResult {
            question_id: "q1".to_string(),
            correct: true,
            timestamp: ts,
        });

        assert!(!manager.is_open());
        assert!(manager.finalize_by_stop().unwrap().is_none());
        assert!(manager.history().unwrap().is_empty());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_stop_records_session_with_events(_ctx: &mut SessionTestContext) {
        let mut manager = manager();
        manager.start("Math").unwrap();

        let start = manager.current().unwrap().start_time;
        manager.log_focus_loss(start + Duration::minutes(5));
        manager.log_focus_return(start + Duration::minutes(6));

        let session = manager.finalize_by_stop().unwrap().unwrap();
        assert_eq!(session.subject, "Math");
        assert_eq!(session.focus_losses.len(), 1);
        assert_eq!(session.focus_returns.len(), 1);
        assert!(!manager.is_open());

        let history = manager.history().unwrap();
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], session);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_completion_derives_start_from_duration(_ctx: &mut SessionTestContext) {
        let mut manager = manager();
        let completed_at = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(15, 0, 0).unwrap();

        let session = manager.finalize_by_completion("Chemistry", 25, completed_at).unwrap();
        assert_eq!(session.duration, 25);
        assert_eq!(session.end_time, completed_at);
        assert_eq!(session.start_time, completed_at - Duration::minutes(25));
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_completion_carries_over_open_session_events(_ctx: &mut SessionTestContext) {
        let mut manager = manager();
        manager.start("Math").unwrap();
        let start = manager.current().unwrap().start_time;
        manager.log_focus_loss(start + Duration::minutes(1));
        manager.log_quiz_result(QuizResult {
            question_id: "q1".to_string(),
            correct: false,
            timestamp: start + Duration::minutes(2),
        });

        let session = manager.finalize_by_completion("Math", 25, start + Duration::minutes(25)).unwrap();
        assert_eq!(session.focus_losses.len(), 1);
        assert_eq!(session.quiz_results.len(), 1);
        assert!(!manager.is_open());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_completion_validates_input(_ctx: &mut SessionTestContext) {
        let mut manager = manager();
        let at = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(15, 0, 0).unwrap();

        assert!(matches!(manager.finalize_by_completion("", 25, at), Err(CoreError::Validation(_))));
        assert!(matches!(manager.finalize_by_completion("Math", 0, at), Err(CoreError::Validation(_))));
        assert!(manager.history().unwrap().is_empty());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_capture_artifact_attaches_to_open_session(_ctx: &mut SessionTestContext) {
        let mut manager = manager();
        manager.start("Biology").unwrap();

        let artifact_id = manager.capture_artifact("snapshot-bytes").unwrap();
        let session = manager.finalize_by_stop().unwrap().unwrap();
        assert_eq!(session.artifact_refs, vec![artifact_id.clone()]);

        let artifacts: Vec<Artifact> = manager.store().list(Collection::Artifacts).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert_eq!(artifacts[0].id, artifact_id);
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_capture_artifact_while_idle_still_persists(_ctx: &mut SessionTestContext) {
        let mut manager = manager();
        manager.capture_artifact("stray-snapshot").unwrap();

        let artifacts: Vec<Artifact> = manager.store().list(Collection::Artifacts).unwrap();
        assert_eq!(artifacts.len(), 1);
        assert!(manager.history().unwrap().is_empty());
    }

    #[test_context(SessionTestContext)]
    #[test]
    fn test_history_preserves_insertion_order(_ctx: &mut SessionTestContext) {
        let mut manager = manager();
        let day = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();

        manager.finalize_by_completion("Math", 25, day.and_hms_opt(10, 0, 0).unwrap()).unwrap();
        manager.finalize_by_completion("Physics", 50, day.and_hms_opt(14, 0, 0).unwrap()).unwrap();

        let history: Vec<StudySession> = manager.history().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].subject, "Math");
        assert_eq!(history[1].subject, "Physics");
    }
}
