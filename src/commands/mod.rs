pub mod breaks;
pub mod export;
pub mod health;
pub mod init;
pub mod start;
pub mod status;
pub mod stop;
pub mod suggest;
pub mod task;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configuration initialization")]
    Init,
    #[command(about = "Start the background daemon")]
    Start(start::StartArgs),
    #[command(about = "Stop the background daemon")]
    Stop,
    #[command(about = "Show current status and today's summary")]
    Status,
    #[command(about = "Show today's health summary")]
    Health,
    #[command(about = "Log a manually taken break")]
    Break(breaks::BreakArgs),
    #[command(about = "Create and manage tasks")]
    Task(task::TaskArgs),
    #[command(about = "Get AI suggestions based on your current state")]
    Suggest,
    #[command(about = "Export collected data for backup")]
    Export(export::ExportArgs),
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
            Commands::Init => init::cmd(),
            Commands::Start(args) => start::cmd(args).await,
            Commands::Stop => stop::cmd(),
            Commands::Status => status::cmd(),
            Commands::Health => health::cmd(),
            Commands::Break(args) => breaks::cmd(args),
            Commands::Task(args) => task::cmd(args),
            Commands::Suggest => suggest::cmd().await,
            Commands::Export(args) => export::cmd(args),
        }
    }
}
