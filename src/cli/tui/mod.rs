//! Terminal User Interface components

pub mod event_loop;
pub mod main_app;
pub mod ui;


use crate::config::AppConfig;
use anyhow::Result;

/// Run the Terminal User Interface
pub async fn run_tui(config: AppConfig) -> Result<()> {
    let app = main_app::App::new(config)?;
    event_loop::run_tui_event_loop(app).await
}
