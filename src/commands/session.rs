//! Timed study session command.
//!
//! Runs a countdown for the planned duration. Letting the countdown finish
//! records the session with its nominal duration; interrupting with Ctrl+C
//! records what the wall clock actually measured. A break reminder is armed
//! for the end of the session when the user's preferences allow it, and is
//! cancelled again if the session is cut short.

use crate::{
    db::records::RecordStore,
    libs::{
        config::Config,
        messages::Message,
        notification::ScheduledNotification,
        scheduler::{ConsoleDelivery, NotificationScheduler},
        session::SessionManager,
    },
    msg_info, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Args)]
pub struct SessionArgs {
    /// Subject being studied
    subject: String,
    /// Session length in minutes (defaults to the configured value)
    #[arg(short, long)]
    duration: Option<i64>,
}

pub async fn cmd(session_args: SessionArgs) -> Result<()> {
    let config = Config::read()?;
    let user = config.require_user()?;
    let duration = session_args.duration.unwrap_or_else(|| config.session_minutes());

    let mut manager = SessionManager::new(RecordStore::for_user(&user)?);
    manager.start(&session_args.subject)?;
    msg_success!(Message::SessionStarted(session_args.subject.clone(), duration));

    let scheduler = NotificationScheduler::new(Arc::new(ConsoleDelivery));
    // Replay anything queued earlier so it can fire during the countdown,
    // before this run adds its own items.
    scheduler.init()?;

    let mut break_reminder_id = None;
    if manager.store().settings()?.notifications.break_reminders {
        let reminder = ScheduledNotification::break_reminder(duration, Local::now().naive_local(), &user);
        break_reminder_id = Some(scheduler.schedule(reminder)?);
        msg_info!(Message::BreakReminderScheduled(duration));
    }

    let countdown = tokio::time::sleep(Duration::from_secs(duration as u64 * 60));
    tokio::select! {
        _ = countdown => {
            let session = manager.finalize_by_completion(&session_args.subject, duration, Local::now().naive_local())?;
            msg_success!(Message::SessionCompleted(session.subject, session.duration));
        }
        _ = tokio::signal::ctrl_c() => {
            if let Some(id) = break_reminder_id {
                scheduler.cancel(&id)?;
            }
            match manager.finalize_by_stop()? {
                Some(session) => msg_success!(Message::SessionStopped(session.subject, session.duration)),
                None => msg_print!(Message::NoOpenSession),
            }
        }
    }

    Ok(())
}
