//! GUI mode for DexView using Slint
//!
//! The window reuses the shared `App` state and business logic; callbacks
//! spawn the same background tasks the TUI uses and the window is updated
//! from the resulting `AppEvent` stream.

pub mod main_window;

use crate::cli::tui::main_app::App;
use anyhow::Result;

/// Run the application in GUI mode
pub async fn run_gui_mode(app: App) -> Result<()> {
    main_window::run_main_window(app).await
}
