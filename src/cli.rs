use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed task manager CLI.
/// State defaults to ~/.taskdeck or a directory passed via --data-dir.
#[derive(Parser)]
#[command(name = "td", version, about = "Daily task management CLI")]
pub struct Cli {
    /// Directory holding the task and settings files.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
