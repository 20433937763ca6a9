//! # Stula - Study Tracking, Logging and Analytics
//!
//! A command-line utility for tracking study sessions, managing study tasks,
//! and scheduling reminders.
//!
//! ## Features
//!
//! - **Session Tracking**: Timed study sessions with focus and quiz events
//! - **Task Management**: Study tasks with deadlines and priorities
//! - **Analytics**: Windowed totals, daily buckets, focus scores, streaks
//! - **Notifications**: Durable scheduled reminders with preference gating
//! - **Data Export**: Export analytics to CSV, JSON, and Excel formats
//!
//! ## Usage
//!
//! ```rust,no_run
//! use stula::commands::Cli;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     Cli::menu().await
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
