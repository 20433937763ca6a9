//! Analytics data export command.

use crate::{
    db::records::RecordStore,
    libs::{
        analytics::{self, TimeRange},
        config::Config,
        export::{ExportFormat, Exporter},
        session::SessionManager,
    },
};
use anyhow::Result;
use chrono::Local;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ExportArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "csv")]
    format: ExportFormat,
    /// Output file path (defaults to a timestamped name)
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Aggregation window
    #[arg(short, long, value_enum, default_value = "all")]
    range: TimeRange,
}

pub fn cmd(export_args: ExportArgs) -> Result<()> {
    let user = Config::read()?.require_user()?;
    let manager = SessionManager::new(RecordStore::for_user(&user)?);

    let sessions = manager.history()?;
    let summaries = analytics::filtered_summaries(&sessions, export_args.range, Local::now().naive_local());

    Exporter::new(export_args.format, export_args.output, export_args.range).export(&summaries)
}
