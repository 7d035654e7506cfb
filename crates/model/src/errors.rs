//! Error types used throughout the client

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for xAPI client operations.
///
/// Server-signaled errors (`AccessDenied`, `NotFound`, `Conflict`,
/// `UnexpectedStatus`) carry the raw response body as a diagnostic message.
/// Precondition violations (`InvalidMethod`, `InvalidArgument`) are raised
/// before any network call is made.
#[derive(Error, Debug, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum XApiError {
    #[error("{0} is no valid HTTP method")]
    InvalidMethod(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Access denied (HTTP {status}): {message}")]
    AccessDenied {
        /// Raw response body returned by the LRS.
        message: String,
        /// The HTTP status code (401 or 403).
        status: u16,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unexpected status {status}: {message}")]
    UnexpectedStatus {
        /// Raw response body returned by the LRS.
        message: String,
        /// The HTTP status code outside the accepted set.
        status: u16,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for xAPI client operations
pub type Result<T> = std::result::Result<T, XApiError>;

impl XApiError {
    /// The HTTP status code carried by server-signaled errors, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::AccessDenied { status, .. } | Self::UnexpectedStatus { status, .. } => {
                Some(*status)
            }
            Self::NotFound(_) => Some(404),
            Self::Conflict(_) => Some(409),
            _ => None,
        }
    }

    /// Whether this error was detected locally, before any request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::InvalidMethod(_) | Self::InvalidArgument(_) | Self::Config(_))
    }
}
