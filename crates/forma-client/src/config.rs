//! Backend endpoint configuration.

use std::env;

/// Environment variable naming the backend base URL.
pub const ENV_API_URL: &str = "FORMA_API_URL";

/// Environment variable overriding the request timeout, in seconds.
pub const ENV_API_TIMEOUT_SECS: &str = "FORMA_API_TIMEOUT_SECS";

/// Default per-request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Connection settings for the form backend API.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL of the backend (e.g. `http://localhost:8000`).
    pub base_url: String,
    /// Request timeout in seconds (default: 10).
    pub timeout_secs: u64,
}

impl BackendConfig {
    /// Create a new configuration with the default timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read the configuration from the environment.
    ///
    /// `FORMA_API_URL` is required; `FORMA_API_TIMEOUT_SECS` is optional and
    /// falls back to [`DEFAULT_TIMEOUT_SECS`] when unset.
    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = env::var(ENV_API_URL).map_err(|_| ConfigError::MissingVar {
            name: ENV_API_URL.to_string(),
        })?;
        let mut config = Self::new(base_url);
        if let Ok(raw) = env::var(ENV_API_TIMEOUT_SECS) {
            config.timeout_secs = raw.parse().map_err(|_| ConfigError::InvalidVar {
                name: ENV_API_TIMEOUT_SECS.to_string(),
                value: raw,
            })?;
        }
        Ok(config)
    }
}

/// Errors reading backend configuration from the environment.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("environment variable {name} is not set")]
    MissingVar {
        /// Name of the missing variable.
        name: String,
    },
    /// An environment variable holds a value that cannot be parsed.
    #[error("environment variable {name} has invalid value {value:?}")]
    InvalidVar {
        /// Name of the offending variable.
        name: String,
        /// The raw value found in the environment.
        value: String,
    },
}
