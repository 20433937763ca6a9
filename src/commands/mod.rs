pub mod analytics;
pub mod export;
pub mod init;
pub mod notify;
pub mod session;
pub mod task;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init(init::InitArgs),
    #[command(about = "Manage study tasks")]
    Task(task::TaskArgs),
    #[command(about = "Run a timed study session")]
    Session(session::SessionArgs),
    #[command(about = "Show study analytics")]
    Analytics(analytics::AnalyticsArgs),
    #[command(about = "Export analytics data")]
    Export(export::ExportArgs),
    #[command(about = "Manage scheduled notifications")]
    Notify(notify::NotifyArgs),
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub async fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Task(args) => task::cmd(args).await,
            Commands::Session(args) => session::cmd(args).await,
            Commands::Analytics(args) => analytics::cmd(args),
            Commands::Export(args) => export::cmd(args),
            Commands::Notify(args) => notify::cmd(args).await,
        }
    }
}
