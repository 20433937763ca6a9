//! Scheduled notification management command.

use crate::{
    db::queue::Queue,
    libs::{
        config::Config,
        messages::Message,
        notification::ScheduledNotification,
        scheduler::{ConsoleDelivery, NotificationScheduler},
        view::View,
    },
    msg_error, msg_print, msg_success,
};
use anyhow::Result;
use chrono::Local;
use clap::{Args, Subcommand};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct NotifyArgs {
    #[command(subcommand)]
    command: NotifyCommands,
}

#[derive(Debug, Subcommand)]
enum NotifyCommands {
    /// List pending notifications for the active user (broadcasts included)
    List,
    /// Cancel one scheduled notification
    Cancel { id: String },
    /// Cancel every notification owned by the active user
    CancelAll,
    /// Deliver a test notification immediately
    Test,
    /// Queue tomorrow's motivational tip
    Tip,
    /// Stay running and deliver notifications as they come due
    Watch,
}

pub async fn cmd(notify_args: NotifyArgs) -> Result<()> {
    let user = Config::read()?.require_user()?;
    let scheduler = NotificationScheduler::new(Arc::new(ConsoleDelivery));

    match notify_args.command {
        NotifyCommands::List => {
            let queue = Queue::new()?;
            let items = queue.for_user(&user)?;
            if items.is_empty() {
                msg_print!(Message::QueueEmpty);
            } else {
                msg_print!(Message::PendingNotifications(items.len()));
                View::queue(&items);
                View::queue_stats(&queue.stats_for_user(&user)?);
            }
        }
        NotifyCommands::Cancel { id } => {
            scheduler.cancel(&id)?;
            msg_success!(Message::NotificationCancelled(id));
        }
        NotifyCommands::CancelAll => {
            scheduler.cancel_all_for_user(&user)?;
            msg_success!(Message::NotificationsCancelledForUser(user));
        }
        NotifyCommands::Test => {
            if scheduler.deliver_test() {
                msg_success!(Message::TestNotificationSent);
            } else {
                msg_error!(Message::TestNotificationDenied);
            }
        }
        NotifyCommands::Tip => {
            let tip = ScheduledNotification::motivational_tip(Local::now().naive_local());
            let id = scheduler.schedule(tip)?;
            msg_success!(Message::NotificationScheduled(id));
        }
        NotifyCommands::Watch => {
            scheduler.init()?;
            tokio::signal::ctrl_c().await?;
        }
    }

    Ok(())
}
