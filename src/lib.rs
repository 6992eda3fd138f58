//! DexView - Desktop front-end for Android device mirroring
//!
//! DexView wraps the Android platform tools (`adb`) and `scrcpy` to provide
//! a Samsung-DeX-like experience on a Linux desktop: pick a connected
//! device, mirror its screen, and push/pull files, install packages, launch
//! activities and inject text, all via the external tools' CLIs.

pub mod bridge;
pub mod cli;
pub mod config;
pub mod errors;
pub mod gui;
pub mod mirror;
pub mod models;
pub mod utils;

// Re-export commonly used types
pub use errors::*;
pub use models::*;

/// DexView version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// DexView application name
pub const APP_NAME: &str = "dexview";
