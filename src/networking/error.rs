//! Error types for the position service transport

use crate::game::error::GameError;
use thiserror::Error;

/// Errors that can occur while talking to the position service
#[derive(Error, Debug)]
pub enum NetworkError {
    /// Connection, timeout or body read failure
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("Service returned {status} for {url}")]
    Status { status: u16, url: String },

    /// Body was not the expected JSON shape
    #[error("Could not decode service response: {message}")]
    Decode { message: String },

    /// Well-formed JSON describing an impossible position
    #[error("Service sent an invalid snapshot: {0}")]
    InvalidSnapshot(#[from] GameError),

    #[error("Invalid service URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Result type alias for network operations
pub type NetworkResult<T> = Result<T, NetworkError>;
