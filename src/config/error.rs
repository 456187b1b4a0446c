//! Configuration error types

use thiserror::Error;

/// Errors that can occur while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Underlying config crate error (missing values, type mismatches)
    #[error("configuration error: {0}")]
    Load(#[from] config::ConfigError),
}

/// Errors that can occur while validating configuration values
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Port must be non-zero
    #[error("server port must be non-zero")]
    InvalidPort,

    /// Timeout outside the accepted range
    #[error("timeout must be between 1 and 300 seconds")]
    InvalidTimeout,

    /// Backend base URL is not an HTTP(S) URL
    #[error("backend base URL must start with http:// or https://: {0}")]
    InvalidBackendUrl(String),
}
