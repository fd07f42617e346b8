use crate::libs::export::{ExportFormat, Exporter};
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

// Arguments for the export command.
#[derive(Debug, Args)]
pub struct ExportArgs {
    #[arg(long, short, value_enum, default_value = "json", help = "Export format")]
    format: ExportFormat,
    #[arg(long, short, help = "Output file path (extension is derived from the format)")]
    output: Option<PathBuf>,
}

// Runs the export command to dump all collected data for backup.
pub fn cmd(args: ExportArgs) -> Result<()> {
    Exporter::new(args.format, args.output).export()
}
