//! Core library modules for the stula application.
//!
//! Serves as the main entry point for all stula library components, providing
//! a centralized access point to the application's core functionality.
//!
//! ## Features
//!
//! - **Core Infrastructure**: Configuration, data storage, messaging
//! - **Session Tracking**: Open-session state machine with focus and quiz events
//! - **Analytics**: Pure, windowed aggregation over the session history
//! - **Reminders**: Durable notification scheduling with gated delivery
//! - **User Interface**: Console rendering, data export, formatting

pub mod analytics;
pub mod config;
pub mod data_storage;
pub mod error;
pub mod export;
pub mod formatter;
pub mod messages;
pub mod notification;
pub mod scheduler;
pub mod session;
pub mod settings;
pub mod task;
pub mod view;
