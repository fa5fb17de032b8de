//! Configuration management and environment variable loading
//!
//! The API base URL is read once at startup and handed to [`crate::ApiClient`]
//! by value; nothing in the crate reads it from a global afterwards.

use crate::{Result, RevoveError};
use std::env;
use std::time::Duration;

/// Environment variable holding the REST API base URL
pub const API_BASE_ENV: &str = "REVOVE_API_BASE";

/// Environment variable holding the HTTP timeout in seconds
pub const HTTP_TIMEOUT_ENV: &str = "REVOVE_HTTP_TIMEOUT_SECS";

/// Base URL used when nothing is configured
pub const DEFAULT_API_BASE: &str = "http://localhost:8000/api";

/// Default HTTP timeout in seconds
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 15;

/// Load a `.env` file from the working directory or its parents.
///
/// Returns whether a file was found. Variables already set in the process
/// environment win over the file.
pub fn load_env() -> Result<bool> {
    match dotenvy::dotenv() {
        Ok(path) => {
            tracing::debug!(path = %path.display(), "loaded .env");
            Ok(true)
        }
        Err(e) if e.not_found() => Ok(false),
        Err(e) => Err(RevoveError::config(format!("Bad .env file: {}", e))),
    }
}

/// Non-blank value of `key`, trimmed
fn env_value(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Whole seconds from `key`; unset or unparseable values fall back to `default`
fn env_secs(key: &str, default: u64) -> Duration {
    let secs = match env_value(key).map(|v| v.parse::<u64>()) {
        Some(Ok(secs)) => secs,
        Some(Err(e)) => {
            tracing::warn!("Ignoring {}: {}; using {}s", key, e, default);
            default
        }
        None => default,
    };
    Duration::from_secs(secs)
}

/// Settings for [`crate::ApiClient`], fixed for the life of the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the REST API, without trailing slash
    pub base_url: String,
    /// Whole-request timeout
    pub timeout: Duration,
}

impl ClientConfig {
    /// Build a config for the given base URL with the default timeout
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }

    /// Read `REVOVE_API_BASE` and `REVOVE_HTTP_TIMEOUT_SECS`
    pub fn from_env() -> Self {
        let base = env_value(API_BASE_ENV).unwrap_or_else(|| DEFAULT_API_BASE.to_string());
        Self::new(base).with_timeout(env_secs(HTTP_TIMEOUT_ENV, DEFAULT_HTTP_TIMEOUT_SECS))
    }

    /// Override the base URL
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Override the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Check that the base URL is usable
    pub fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(RevoveError::config("Base URL cannot be empty"));
        }

        let parsed = url::Url::parse(&self.base_url).map_err(|e| {
            RevoveError::config(format!("Invalid base URL '{}': {}", self.base_url, e))
        })?;

        if parsed.scheme() != "http" && parsed.scheme() != "https" {
            return Err(RevoveError::config(format!(
                "Invalid URL format: '{}'. Must start with http:// or https://",
                self.base_url
            )));
        }

        if self.timeout.is_zero() {
            return Err(RevoveError::config("HTTP timeout must be positive"));
        }

        Ok(())
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
