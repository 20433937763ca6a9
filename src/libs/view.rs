use chrono::Duration;
use prettytable::{row, Table};
use std::collections::HashMap;

use crate::libs::analytics::AnalyticsSnapshot;
use crate::libs::formatter::{format_duration, format_focus, format_minutes};
use crate::libs::notification::ScheduledNotification;
use crate::libs::task::Task;

pub struct View {}

impl View {
    pub fn tasks(tasks: &[Task]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "SUBJECT", "DEADLINE", "PRIORITY", "DONE"]);
        for task in tasks {
            table.add_row(row![
                task.id,
                task.title,
                task.subject,
                task.deadline.format("%Y-%m-%d %H:%M"),
                format!("{:?}", task.priority).to_lowercase(),
                if task.completed { "✔" } else { "" }
            ]);
        }
        table.printstd();
    }

    pub fn analytics(snapshot: &AnalyticsSnapshot) {
        let mut table = Table::new();
        table.add_row(row!["TOTAL TIME", "SESSIONS", "AVG FOCUS", "STREAK"]);
        table.add_row(row![
            format_duration(&Duration::minutes(snapshot.total_minutes)),
            snapshot.total_sessions,
            format_focus(snapshot.average_focus),
            format!("{} days", snapshot.current_streak)
        ]);
        table.printstd();
    }

    pub fn daily(snapshot: &AnalyticsSnapshot) {
        let mut table = Table::new();
        table.add_row(row!["DATE", "MINUTES"]);
        for bucket in &snapshot.daily {
            table.add_row(row![bucket.date.format("%b %e"), bucket.minutes]);
        }
        table.printstd();
    }

    pub fn subjects(snapshot: &AnalyticsSnapshot) {
        let mut table = Table::new();
        table.add_row(row!["SUBJECT", "TIME"]);
        for subject in &snapshot.subjects {
            table.add_row(row![subject.subject, format_minutes(subject.minutes)]);
        }
        table.printstd();
    }

    pub fn recent(snapshot: &AnalyticsSnapshot) {
        let mut table = Table::new();
        table.add_row(row!["DATE", "SUBJECT", "DURATION", "FOCUS"]);
        for session in &snapshot.recent {
            table.add_row(row![
                session.ended_at.format("%Y-%m-%d %H:%M"),
                session.subject,
                format_minutes(session.minutes),
                format_focus(session.focus_score)
            ]);
        }
        table.printstd();
    }

    pub fn queue_stats(stats: &HashMap<&'static str, usize>) {
        let mut table = Table::new();
        table.add_row(row!["TYPE", "PENDING"]);
        let mut entries: Vec<_> = stats.iter().collect();
        entries.sort();
        for (kind, count) in entries {
            table.add_row(row![kind, count]);
        }
        table.printstd();
    }

    pub fn queue(items: &[ScheduledNotification]) {
        let mut table = Table::new();
        table.add_row(row!["ID", "TYPE", "FIRES AT", "OWNER", "TITLE"]);
        for item in items {
            table.add_row(row![
                item.id,
                item.kind.label(),
                item.scheduled_for.format("%Y-%m-%d %H:%M"),
                item.user_id,
                item.title
            ]);
        }
        table.printstd();
    }
}
