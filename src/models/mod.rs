//! Data models and types used throughout DexView

pub mod device;
pub mod events;
pub mod mirror;
pub mod tui;

// Re-export commonly used types
pub use device::*;
pub use events::*;
pub use mirror::*;
pub use tui::*;
