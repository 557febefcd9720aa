//! Error types for the climb catalog.
//!
//! This module provides structured error handling with:
//! - `CatalogError`: Domain-specific errors for catalog operations
//! - `Result<T>`: Type alias for Results using CatalogError
//!
//! Every variant is recoverable: the caller surfaces an empty result and the
//! user re-issues the action. Nothing here should abort the process.

use thiserror::Error;

/// Domain-specific errors for catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Network/connection failure (no usable response)
    #[error("transport error: {0}")]
    Transport(String),

    /// The request did not complete within the configured deadline
    #[error("request timed out after {seconds}s")]
    Timeout { seconds: u64 },

    /// Response body did not match the expected schema
    #[error("decode error: {0}")]
    Decode(String),

    /// Local store read/write failed
    #[error("persistence error: {0}")]
    Persistence(String),

    /// Missing or invalid configuration (API key, base URL)
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CatalogError {
    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a decode error
    pub fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// Create a persistence error
    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            // The client enforces a whole-request deadline; reqwest does not
            // expose the configured value on the error, so report the default.
            Self::Timeout {
                seconds: crate::config::DEFAULT_TIMEOUT_SECS,
            }
        } else if err.is_decode() {
            Self::Decode(err.to_string())
        } else {
            Self::Transport(err.to_string())
        }
    }
}

impl From<sqlx::Error> for CatalogError {
    fn from(err: sqlx::Error) -> Self {
        Self::Persistence(err.to_string())
    }
}

impl From<sqlx::migrate::MigrateError> for CatalogError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        Self::Persistence(err.to_string())
    }
}

/// Result type alias using CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;
