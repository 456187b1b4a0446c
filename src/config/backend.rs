//! Booking backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Configuration for the external cinema booking backend.
///
/// The backend is a plain-HTTP JSON API; there is no TLS, auth header or
/// API versioning to configure. Reads and the booking write carry separate
/// timeouts because the write touches several tables on the backend side.
#[derive(Debug, Clone, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the booking API (e.g. `http://localhost:3000/api`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base URL of the payment frontend used to build payment links
    #[serde(default = "default_payment_base_url")]
    pub payment_base_url: String,

    /// Timeout for read requests, in seconds
    #[serde(default = "default_read_timeout")]
    pub read_timeout_secs: u64,

    /// Timeout for the booking submission, in seconds
    #[serde(default = "default_write_timeout")]
    pub write_timeout_secs: u64,
}

impl BackendConfig {
    /// Read timeout as a [`Duration`]
    pub fn read_timeout(&self) -> Duration {
        Duration::from_secs(self.read_timeout_secs)
    }

    /// Write timeout as a [`Duration`]
    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }

    /// Validate backend configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBackendUrl(self.base_url.clone()));
        }
        if self.read_timeout_secs == 0 || self.read_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.write_timeout_secs == 0 || self.write_timeout_secs > 60 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            payment_base_url: default_payment_base_url(),
            read_timeout_secs: default_read_timeout(),
            write_timeout_secs: default_write_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "http://localhost:3000/api".to_string()
}

fn default_payment_base_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_read_timeout() -> u64 {
    5
}

fn default_write_timeout() -> u64 {
    10
}
