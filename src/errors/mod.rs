//! Error types for DexView

pub mod types;

pub use types::*;
