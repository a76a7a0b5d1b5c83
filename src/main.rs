//! # todo - In-memory to-do board
//!
//! A two-section terminal board: tasks you still have to do on one side,
//! finished ones on the other.
//!
//! ## Key Features
//!
//! - **Two sections**: TO DO and DONE, each in the order tasks were added
//! - **Inline editing**: Fix a task's text without leaving the board
//! - **Focus view**: Open one task to edit its title, write a memo, or attach an image
//! - **Image checks**: Only plain ASCII file names (`A-Z a-z 0-9 . _ -`) up to 5MB are accepted
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the board
//! todo
//!
//! # Check an image before attaching it
//! todo check-image ~/Pictures/receipt.png
//! ```
//!
//! Tasks live only for the session. Logs are written to `~/.todo/logs`
//! (see `--log-dir` and `TODO_LOG_DIR`).

use clap::Parser;
use log::error;

pub mod attachment;
pub mod cli;
pub mod cmd;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
pub mod task;
pub mod view;
pub mod tui {
    pub mod app;
    pub mod colors;
    pub mod enums;
    pub mod input;
    pub mod run;
    pub mod text_area;
    pub mod utils;
}

use cli::Cli;
use cmd::*;
use config::Config;

fn main() {
    let cli = Cli::parse();

    let config = match Config::resolve(cli.log_level.as_deref(), cli.log_dir.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };

    // Completions go to stdout and need no log files.
    if let Some(Commands::Completions { shell }) = &cli.command {
        cmd_completions(*shell);
        return;
    }

    if let Err(e) = logging::init(&config) {
        eprintln!("Failed to start logging in {}: {e}", config.log_dir.display());
        std::process::exit(1);
    }

    let result = match cli.command.unwrap_or(Commands::Ui) {
        Commands::Ui => cmd_ui(),
        Commands::CheckImage { path, json } => cmd_check_image(&path, json),
        Commands::Completions { .. } => unreachable!("completions handled above"),
    };

    if let Err(e) = result {
        error!("event=app_exit status=error error={}", e);
        logging::flush();
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
    logging::flush();
}
