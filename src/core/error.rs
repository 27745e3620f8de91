//! Error types for core module
//!
//! Settings persistence and process setup. Everything here is recoverable:
//! callers fall back to defaults and log.

use thiserror::Error;

/// Errors that can occur in the core module
#[derive(Error, Debug)]
pub enum CoreError {
    /// Settings file I/O error
    #[error("Settings I/O error: {0}")]
    SettingsIo(#[from] std::io::Error),

    /// Settings serialization/deserialization error
    #[error("Settings serialization error: {0}")]
    SettingsSerialization(#[from] serde_json::Error),

    /// Configured server URL does not parse
    #[error("Invalid server URL '{url}': {source}")]
    InvalidServerUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Tracing subscriber could not be installed
    #[error("Logging initialization failed: {message}")]
    LoggingInit { message: String },
}

/// Result type alias for core operations
pub type CoreResult<T> = Result<T, CoreError>;
