//! # preop application entry point
//!
//! Runs the command line when a subcommand is given, otherwise opens the
//! assessment window.
//!
//! ```text
//! main()
//!   │
//!   ├─> Initialise logging (console only if log files are unavailable)
//!   ├─> Parse CLI arguments (clap)
//!   │
//!   ├─> If command provided:
//!   │   └─> Run it on a current-thread Tokio runtime
//!   │
//!   └─> Otherwise:
//!       └─> Launch the eframe GUI
//! ```

#![warn(clippy::all, rust_2018_idioms)]
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod cli;
mod gui;
mod theme;

use anyhow::Result;
use clap::Parser as _;

/// # Errors
///
/// Returns error if a CLI command fails or the GUI fails to start.
fn main() -> Result<()> {
    preop::logging::init();

    let cli = cli::Cli::parse();

    if let Some(command) = cli.command {
        tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?
            .block_on(cli::run_command(command))?;
        return Ok(());
    }

    gui::run()
}
