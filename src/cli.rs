use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Two-section to-do board for the terminal.
/// Tasks live in memory for the session; nothing is written to disk.
#[derive(Parser)]
#[command(name = "todo", version, about = "In-memory to-do board with memos and image attachments")]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error, off). Overrides TODO_LOG.
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Directory for log files. Overrides TODO_LOG_DIR.
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Defaults to `ui` when omitted.
    #[command(subcommand)]
    pub command: Option<Commands>,
}
