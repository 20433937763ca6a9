//! Study session lifecycle: Idle -> Open -> Idle.
//!
//! The single open session is an explicit optional value owned by
//! [`SessionManager`], held in memory only. An interrupted process abandons
//! the open session rather than resuming it; only finalized sessions reach
//! the persisted history.
//!
//! Two finalize paths exist because a session can end either by explicit user
//! stop (trust the wall clock) or by a countdown completing (trust the
//! planned duration). Both merge any interim focus/quiz/artifact logs.

use chrono::{Duration, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::db::records::{Collection, Record, RecordStore};
use crate::libs::error::CoreError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizResult {
    pub question_id: String,
    pub correct: bool,
    pub timestamp: NaiveDateTime,
}

/// A captured study artifact (e.g. a webcam snapshot), stored in its own
/// collection and referenced by id from the owning session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Artifact {
    pub id: String,
    pub data: String,
    pub captured_at: NaiveDateTime,
}

impl Record for Artifact {
    fn id(&self) -> &str {
        &self.id
    }
}

/// A finalized, immutable study session as persisted in the history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudySession {
    pub id: String,
    pub subject: String,
    /// Minutes; derived from wall clock on the stop path, nominal on the
    /// completion path.
    pub duration: i64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub focus_losses: Vec<NaiveDateTime>,
    pub focus_returns: Vec<NaiveDateTime>,
    pub quiz_results: Vec<QuizResult>,
    pub artifact_refs: Vec<String>,
}

impl Record for StudySession {
    fn id(&self) -> &str {
        &self.id
    }
}

/// An in-flight session accumulating events; no end time or duration yet.
#[derive(Debug, Clone)]
pub struct OpenSession {
    pub id: String,
    pub subject: String,
    pub start_time: NaiveDateTime,
    pub focus_losses: Vec<NaiveDateTime>,
    pub focus_returns: Vec<NaiveDateTime>,
    pub quiz_results: Vec<QuizResult>,
    pub artifact_refs: Vec<String>,
}

pub struct SessionManager {
    store: RecordStore,
    current: Option<OpenSession>,
}

impl SessionManager {
    pub fn new(store: RecordStore) -> Self {
        SessionManager { store, current: None }
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn current(&self) -> Option<&OpenSession> {
        self.current.as_ref()
    }

    /// Opens a new session. At most one session may be open per user.
    pub fn start(&mut self, subject: &str) -> Result<(), CoreError> {
        if self.current.is_some() {
            return Err(CoreError::SessionConflict);
        }
        if subject.trim().is_empty() {
            return Err(CoreError::Validation("session subject must not be empty".to_string()));
        }

        let now = Local::now();
        self.current = Some(OpenSession {
            id: now.timestamp_millis().to_string(),
            subject: subject.to_string(),
            start_time: now.naive_local(),
            focus_losses: Vec::new(),
            focus_returns: Vec::new(),
            quiz_results: Vec::new(),
            artifact_refs: Vec::new(),
        });
        Ok(())
    }

    // Visibility events can arrive before or after a session's lifetime,
    // so event logging while idle is silently ignored.

    pub fn log_focus_loss(&mut self, timestamp: NaiveDateTime) {
        if let Some(session) = self.current.as_mut() {
            session.focus_losses.push(timestamp);
        }
    }

    pub fn log_focus_return(&mut self, timestamp: NaiveDateTime) {
        if let Some(session) = self.current.as_mut() {
            session.focus_returns.push(timestamp);
        }
    }

    pub fn log_quiz_result(&mut self, result: QuizResult) {
        if let Some(session) = self.current.as_mut() {
            session.quiz_results.push(result);
        }
    }

    /// Stores a captured artifact and, when a session is open, attaches its
    /// id to the session.
    pub fn capture_artifact(&mut self, data: &str) -> Result<String, CoreError> {
        let artifact = Artifact {
            id: Local::now().timestamp_millis().to_string(),
            data: data.to_string(),
            captured_at: Local::now().naive_local(),
        };
        self.store.append(Collection::Artifacts, &artifact)?;

        if let Some(session) = self.current.as_mut() {
            session.artifact_refs.push(artifact.id.clone());
        }
        Ok(artifact.id)
    }

    /// Finalizes the open session with end = now and wall-clock duration
    /// rounded to minutes. Returns `None` when no session is open.
    pub fn finalize_by_stop(&mut self) -> Result<Option<StudySession>, CoreError> {
        let open = match self.current.take() {
            Some(open) => open,
            None => return Ok(None),
        };

        let end_time = Local::now().naive_local();
        let duration = ((end_time - open.start_time).num_seconds() as f64 / 60.0).round() as i64;

        let session = StudySession {
            id: open.id,
            subject: open.subject,
            duration,
            start_time: open.start_time,
            end_time,
            focus_losses: open.focus_losses,
            focus_returns: open.focus_returns,
            quiz_results: open.quiz_results,
            artifact_refs: open.artifact_refs,
        };
        self.commit(&session)?;
        Ok(Some(session))
    }

    /// Finalizes with the nominal planned duration after a countdown reaches
    /// zero. The start is derived as `completed_at - duration`, not the
    /// measured wall-clock start; any events accumulated on an open session
    /// are carried over, then the open slot is cleared.
    pub fn finalize_by_completion(&mut self, subject: &str, duration_minutes: i64, completed_at: NaiveDateTime) -> Result<StudySession, CoreError> {
        if subject.trim().is_empty() {
            return Err(CoreError::Validation("session subject must not be empty".to_string()));
        }
        if duration_minutes < 1 {
            return Err(CoreError::Validation("session duration must be at least one minute".to_string()));
        }

        let open = self.current.take();
        let session = StudySession {
            id: Local::now().timestamp_millis().to_string(),
            subject: subject.to_string(),
            duration: duration_minutes,
            start_time: completed_at - Duration::minutes(duration_minutes),
            end_time: completed_at,
            focus_losses: open.as_ref().map(|o| o.focus_losses.clone()).unwrap_or_default(),
            focus_returns: open.as_ref().map(|o| o.focus_returns.clone()).unwrap_or_default(),
            quiz_results: open.as_ref().map(|o| o.quiz_results.clone()).unwrap_or_default(),
            artifact_refs: open.map(|o| o.artifact_refs).unwrap_or_default(),
        };
        self.commit(&session)?;
        Ok(session)
    }

    /// The full persisted session history in insertion order.
    pub fn history(&self) -> Result<Vec<StudySession>, CoreError> {
        self.store.list(Collection::Sessions)
    }

    fn commit(&self, session: &StudySession) -> Result<(), CoreError> {
        self.store.append(Collection::Sessions, session)
    }
}
