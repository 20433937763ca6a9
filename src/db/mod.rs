//! Persistence layer for the stula application.
//!
//! Everything durable lives in one SQLite key-value table: the per-user
//! record collections (tasks, sessions, artifacts, settings) as one JSON
//! blob each, and the unnamespaced notification queue as one JSON row per
//! item. Unreadable values are recovered as empty rather than treated as
//! fatal.

/// Core database connection and initialization module.
pub mod db;

/// User-namespaced record collections and settings.
pub mod records;

/// Durable scheduled-notification queue.
pub mod queue;
