//! Error types for Revove core

use thiserror::Error;

/// Main error type for Revove operations
#[derive(Debug, Error)]
pub enum RevoveError {
    /// Transport-level HTTP failure (connect, timeout, decode)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("API {status}: {body}")]
    Api {
        /// HTTP status code and reason
        status: String,
        /// Raw response body
        body: String,
    },

    /// A list endpoint returned neither an array nor a paginated envelope
    #[error("Unexpected list response for {0}")]
    UnexpectedResponse(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Convenient Result type using RevoveError
pub type Result<T> = std::result::Result<T, RevoveError>;

impl RevoveError {
    /// Create an API status error
    pub fn api(status: impl Into<String>, body: impl Into<String>) -> Self {
        RevoveError::Api {
            status: status.into(),
            body: body.into(),
        }
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        RevoveError::Config(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        RevoveError::Validation(msg.into())
    }
}
