//! Error taxonomy for the core data and scheduling layer.
//!
//! Commands wrap these in `anyhow` for display; the core keeps them typed so
//! callers can react to specific failures (a session conflict is recoverable,
//! a validation failure means the record was never persisted).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// A study session is already open; finish or stop it first.
    #[error("a study session is already in progress")]
    SessionConflict,

    /// The record was rejected before persistence; prior state is unchanged.
    #[error("validation failed: {0}")]
    Validation(String),

    /// A namespaced store operation was attempted before `set_active_user`.
    #[error("no active user selected")]
    NoActiveUser,

    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("data storage unavailable: {0}")]
    DataStorage(String),
}
