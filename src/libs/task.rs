use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::db::records::Record;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub title: String,
    pub subject: String,
    pub deadline: NaiveDateTime,
    pub priority: Priority,
    pub completed: bool,
    pub created_at: NaiveDateTime,
}

impl Task {
    pub fn new(title: &str, subject: &str, deadline: NaiveDateTime, priority: Priority) -> Self {
        let now = Local::now();
        Task {
            id: now.timestamp_millis().to_string(),
            title: title.to_string(),
            subject: subject.to_string(),
            deadline,
            priority,
            completed: false,
            created_at: now.naive_local(),
        }
    }
}

impl Record for Task {
    fn id(&self) -> &str {
        &self.id
    }
}

/// Orders tasks for display: incomplete before completed, earliest deadline
/// first within each group. Past deadlines are valid and sort to the top.
pub fn sort_for_display(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| a.completed.cmp(&b.completed).then(a.deadline.cmp(&b.deadline)));
}
