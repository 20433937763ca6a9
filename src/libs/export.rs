//! Analytics export in CSV, JSON, and Excel formats.
//!
//! Exports render the window-filtered session history as tabular rows
//! `(date, subject, duration-minutes, focus-score-percent)` for spreadsheet
//! analysis or backup.

use crate::libs::analytics::{SessionSummary, TimeRange};
use crate::libs::formatter::format_focus;
use crate::libs::messages::Message;
use crate::{msg_info, msg_success};
use anyhow::Result;
use chrono::Local;
use rust_xlsxwriter::{Format, Workbook};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
    Excel,
}

impl ExportFormat {
    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
            ExportFormat::Excel => "xlsx",
        }
    }
}

/// One exported session row. String fields are pre-formatted so CSV, JSON,
/// and Excel output stay identical.
#[derive(Debug, Serialize, Deserialize)]
pub struct ExportRow {
    pub date: String,
    pub subject: String,
    pub duration_minutes: i64,
    pub focus_score: String,
}

impl From<&SessionSummary> for ExportRow {
    fn from(summary: &SessionSummary) -> Self {
        ExportRow {
            date: summary.ended_at.format("%Y-%m-%d").to_string(),
            subject: summary.subject.clone(),
            duration_minutes: summary.minutes,
            focus_score: format_focus(summary.focus_score),
        }
    }
}

pub struct Exporter {
    format: ExportFormat,
    output_path: PathBuf,
}

impl Exporter {
    /// Creates an exporter; without an explicit output path a timestamped
    /// default like `stula_analytics_week_20250115_143022.csv` is used.
    pub fn new(format: ExportFormat, output: Option<PathBuf>, range: TimeRange) -> Self {
        let output_path = output.unwrap_or_else(|| {
            let timestamp = Local::now().format("%Y%m%d_%H%M%S");
            PathBuf::from(format!("stula_analytics_{}_{}.{}", range.label(), timestamp, format.extension()))
        });

        Exporter { format, output_path }
    }

    pub fn output_path(&self) -> &std::path::Path {
        &self.output_path
    }

    pub fn export(&self, summaries: &[SessionSummary]) -> Result<()> {
        let rows: Vec<ExportRow> = summaries.iter().map(ExportRow::from).collect();
        msg_info!(Message::ExportingRows(rows.len()));

        match self.format {
            ExportFormat::Csv => self.write_csv(&rows)?,
            ExportFormat::Json => self.write_json(&rows)?,
            ExportFormat::Excel => self.write_excel(&rows)?,
        }

        msg_success!(Message::ExportCompleted(self.output_path.display().to_string()));
        Ok(())
    }

    fn write_csv(&self, rows: &[ExportRow]) -> Result<()> {
        let mut writer = csv::Writer::from_path(&self.output_path)?;
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    fn write_json(&self, rows: &[ExportRow]) -> Result<()> {
        let file = File::create(&self.output_path)?;
        serde_json::to_writer_pretty(file, rows)?;
        Ok(())
    }

    fn write_excel(&self, rows: &[ExportRow]) -> Result<()> {
        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        let header_format = Format::new().set_bold();

        worksheet.write_with_format(0, 0, "Date", &header_format)?;
        worksheet.write_with_format(0, 1, "Subject", &header_format)?;
        worksheet.write_with_format(0, 2, "Duration (minutes)", &header_format)?;
        worksheet.write_with_format(0, 3, "Focus Score", &header_format)?;

        for (i, row) in rows.iter().enumerate() {
            let r = (i + 1) as u32;
            worksheet.write(r, 0, &row.date)?;
            worksheet.write(r, 1, &row.subject)?;
            worksheet.write(r, 2, row.duration_minutes as f64)?;
            worksheet.write(r, 3, &row.focus_score)?;
        }

        workbook.save(&self.output_path)?;
        Ok(())
    }
}
