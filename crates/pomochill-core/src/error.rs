//! Error types for pomochill-core.
//!
//! The timer itself is total: no countdown operation can fail, a rejected
//! manual adjustment is a silent no-op, and the defensive underflow clamp is
//! logged rather than surfaced. Errors exist only at the configuration and
//! IO boundary.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for pomochill-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load the configuration file
    #[error("failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save the configuration file
    #[error("failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Failed to parse the configuration
    #[error("failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Invalid value for a known key
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Key does not exist in the configuration
    #[error("unknown configuration key: {0}")]
    UnknownKey(String),
}

/// Result type alias for CoreError.
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
