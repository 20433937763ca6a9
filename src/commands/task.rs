//! Study task management command.
//!
//! Tasks are user-namespaced records with a deadline and priority. Adding a
//! task with deadline alerts enabled also enqueues a notification 24 hours
//! before the deadline; the alert is skipped when that moment already passed.

use crate::{
    db::records::{Collection, RecordStore},
    libs::{
        config::Config,
        messages::Message,
        notification::ScheduledNotification,
        scheduler::{ConsoleDelivery, NotificationScheduler},
        task::{sort_for_display, Priority, Task},
        view::View,
    },
    msg_info, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use clap::{Args, Subcommand};
use std::sync::Arc;

#[derive(Debug, Args)]
pub struct TaskArgs {
    #[command(subcommand)]
    command: TaskCommands,
}

#[derive(Debug, Subcommand)]
enum TaskCommands {
    /// Create a new task
    Add {
        title: String,
        #[arg(short, long)]
        subject: String,
        /// Deadline as "YYYY-MM-DD" or "YYYY-MM-DD HH:MM"
        #[arg(short, long)]
        deadline: String,
        #[arg(short, long, value_enum, default_value = "medium")]
        priority: Priority,
    },
    /// List tasks, incomplete and earliest deadline first
    List,
    /// Toggle a task's completed flag
    Done { id: String },
    /// Delete a task
    Delete { id: String },
}

pub async fn cmd(task_args: TaskArgs) -> Result<()> {
    let user = Config::read()?.require_user()?;
    let store = RecordStore::for_user(&user)?;

    match task_args.command {
        TaskCommands::Add {
            title,
            subject,
            deadline,
            priority,
        } => {
            let task = Task::new(&title, &subject, parse_deadline(&deadline)?, priority);
            store.upsert(Collection::Tasks, &task)?;
            msg_success!(Message::TaskCreated(task.title.clone()));

            if store.settings()?.notifications.deadline_alerts {
                let now = Local::now().naive_local();
                match ScheduledNotification::deadline_alert(&task, &user, now) {
                    Some(alert) => {
                        let scheduler = NotificationScheduler::new(Arc::new(ConsoleDelivery));
                        let id = scheduler.schedule(alert)?;
                        msg_info!(Message::NotificationScheduled(id));
                    }
                    None => msg_warning!(Message::DeadlineAlertSkipped(task.title)),
                }
            }
        }
        TaskCommands::List => {
            let mut tasks: Vec<Task> = store.list(Collection::Tasks)?;
            if tasks.is_empty() {
                msg_print!(Message::NoTasks);
            } else {
                sort_for_display(&mut tasks);
                View::tasks(&tasks);
            }
        }
        TaskCommands::Done { id } => {
            let tasks: Vec<Task> = store.list(Collection::Tasks)?;
            match tasks.into_iter().find(|t| t.id == id) {
                Some(mut task) => {
                    task.completed = !task.completed;
                    let message = if task.completed {
                        Message::TaskCompleted(task.title.clone())
                    } else {
                        Message::TaskReopened(task.title.clone())
                    };
                    store.upsert(Collection::Tasks, &task)?;
                    msg_success!(message);
                }
                None => msg_warning!(Message::TaskNotFound(id)),
            }
        }
        TaskCommands::Delete { id } => {
            store.remove(Collection::Tasks, &id)?;
            msg_success!(Message::TaskDeleted(id));
        }
    }

    Ok(())
}

/// Parses a deadline; a bare date means end of that day.
fn parse_deadline(input: &str) -> Result<NaiveDateTime> {
    if let Ok(dt) = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M") {
        return Ok(dt);
    }
    let date = NaiveDate::parse_from_str(input, "%Y-%m-%d")?;
    Ok(date.and_time(NaiveTime::from_hms_opt(23, 59, 0).unwrap()))
}
