//! Utility functions and helpers used throughout DexView

pub mod logging;
pub mod tools;
