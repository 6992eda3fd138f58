//! Command Line Interface module
//!
//! This module contains the CLI argument parsing, command implementations,
//! and the Terminal User Interface (TUI) components.

pub mod args;
pub mod commands;
pub mod tui;

pub use args::*;

use crate::cli::tui::main_app::App;
use crate::config::AppConfig;
use crate::utils::logging;
use anyhow::{Context, Result};

/// Main CLI application runner
pub async fn run() -> Result<()> {
    let cli = Cli::parse_args();

    // Interactive modes must not log to the terminal
    let interactive = cli.command.is_none() && !cli.cli;
    logging::init_logging(cli.verbose, cli.quiet, interactive)?;

    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().unwrap_or_else(|e| {
            log::warn!("failed to load configuration, using defaults: {}", e);
            AppConfig::default()
        }),
    };

    match &cli.command {
        Some(command) => commands::execute_command(command.clone(), &cli, &config).await,
        None => {
            if cli.cli {
                commands::devices::execute_devices_command(&config, false).await
            } else if cli.gui {
                crate::gui::run_gui_mode(App::new(config)?).await
            } else {
                tui::run_tui(config).await
            }
        }
    }
}
