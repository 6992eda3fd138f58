//! Custom error types for DexView

use std::fmt;

/// Main error type for DexView operations
#[derive(Debug)]
pub enum DexError {
    /// Configuration related errors
    Config(String),
    /// General I/O errors
    Io(std::io::Error),
    /// Serialization errors
    Serialization(String),
}

impl fmt::Display for DexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DexError::Config(msg) => write!(f, "Configuration error: {}", msg),
            DexError::Io(err) => write!(f, "I/O error: {}", err),
            DexError::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for DexError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DexError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DexError {
    fn from(err: std::io::Error) -> Self {
        DexError::Io(err)
    }
}

impl From<toml::de::Error> for DexError {
    fn from(err: toml::de::Error) -> Self {
        DexError::Serialization(err.to_string())
    }
}

impl From<toml::ser::Error> for DexError {
    fn from(err: toml::ser::Error) -> Self {
        DexError::Serialization(err.to_string())
    }
}

/// Result type alias for DexView operations
pub type Result<T> = std::result::Result<T, DexError>;
