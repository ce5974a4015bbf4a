//! Core error types for swipedeck-core.
//!
//! The swipe and boost state machines never fail: wrong-phase calls are
//! ignored and malformed input degrades to a cancel. Errors only exist on
//! the outer surfaces (configuration loading and validation).

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for swipedeck-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),

    /// Home/config directory could not be prepared
    #[error("Config directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug, PartialEq)]
pub enum ValidationError {
    /// A dimension that must be strictly positive and finite was not
    #[error("Invalid dimension '{field}': {value}")]
    InvalidDimension { field: String, value: f64 },

    /// A duration that must be non-zero was zero
    #[error("Duration '{field}' must be greater than zero")]
    ZeroDuration { field: String },

    /// Threshold fraction outside (0, 1]
    #[error("Threshold fraction must be in (0, 1], got {0}")]
    ThresholdOutOfRange(f64),

    /// Tick interval longer than the boost itself
    #[error("Tick interval ({tick_ms} ms) exceeds boost total ({total_ms} ms)")]
    TickExceedsTotal { tick_ms: u64, total_ms: u64 },
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::ParseFailed(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
