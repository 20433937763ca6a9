//! Study analytics display command.

use crate::{
    db::records::RecordStore,
    libs::{
        analytics::{self, TimeRange},
        config::Config,
        messages::Message,
        session::SessionManager,
        view::View,
    },
    msg_print,
};
use anyhow::Result;
use chrono::Local;
use clap::Args;

#[derive(Debug, Args)]
pub struct AnalyticsArgs {
    /// Aggregation window
    #[arg(short, long, value_enum, default_value = "week")]
    range: TimeRange,
}

pub fn cmd(analytics_args: AnalyticsArgs) -> Result<()> {
    let user = Config::read()?.require_user()?;
    let manager = SessionManager::new(RecordStore::for_user(&user)?);

    let sessions = manager.history()?;
    let snapshot = analytics::snapshot(&sessions, analytics_args.range, Local::now().naive_local());

    msg_print!(Message::AnalyticsHeader(analytics_args.range.label().to_string()));
    View::analytics(&snapshot);

    msg_print!(Message::DailyHeader);
    View::daily(&snapshot);

    if !snapshot.subjects.is_empty() {
        msg_print!(Message::SubjectsHeader);
        View::subjects(&snapshot);
    }
    if !snapshot.recent.is_empty() {
        msg_print!(Message::RecentHeader);
        View::recent(&snapshot);
    }

    Ok(())
}
