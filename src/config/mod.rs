//! Configuration management for DexView

pub mod app_config;

pub use app_config::*;
