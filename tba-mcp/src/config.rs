//! Server configuration.
//!
//! Configuration is loaded from environment variables once at startup and
//! passed explicitly to every component; nothing re-reads the environment
//! after that.

use std::time::Duration;
use thiserror::Error;

/// Environment variable holding the TBA API key. Required.
pub const API_KEY_ENV: &str = "TBA_API_KEY";

/// Environment variable overriding the upstream base URL. Optional.
pub const BASE_URL_ENV: &str = "TBA_API_URL";

/// Environment variable overriding the request timeout in seconds. Optional.
pub const TIMEOUT_ENV: &str = "TBA_TIMEOUT_SECS";

const DEFAULT_BASE_URL: &str = "https://www.thebluealliance.com/api/v3";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Missing required environment variable.
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Environment variable present but blank.
    #[error("Environment variable {0} is set but blank")]
    BlankEnvVar(&'static str),
}

/// Configuration for the upstream TBA API.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL including the API version prefix
    /// (e.g. "https://www.thebluealliance.com/api/v3").
    pub base_url: String,

    /// API key sent with every upstream request. Never logged in full.
    pub api_key: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Config {
    /// Create a configuration with the default timeout. Used by tests to
    /// point the client at a mock server.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `TBA_API_KEY`: The Blue Alliance API key (required)
    /// - `TBA_API_URL`: upstream base URL (default: the public TBA v3 API)
    /// - `TBA_TIMEOUT_SECS`: request timeout in seconds (default: 30)
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key =
            std::env::var(API_KEY_ENV).map_err(|_| ConfigError::MissingEnvVar(API_KEY_ENV))?;
        if api_key.trim().is_empty() {
            return Err(ConfigError::BlankEnvVar(API_KEY_ENV));
        }

        Ok(Self {
            base_url: std::env::var(BASE_URL_ENV)
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            api_key,
            timeout_secs: std::env::var(TIMEOUT_ENV)
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        })
    }

    /// Build a full URL by appending a path to the base URL.
    pub fn url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    /// Get the request timeout as a Duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_join() {
        let config = Config::new("https://www.thebluealliance.com/api/v3", "key");

        assert_eq!(
            config.url("/team/frc86"),
            "https://www.thebluealliance.com/api/v3/team/frc86"
        );
        assert_eq!(
            config.url("team/frc86"),
            "https://www.thebluealliance.com/api/v3/team/frc86"
        );
    }

    #[test]
    fn test_url_join_trailing_slash() {
        let config = Config::new("http://localhost:3000/", "key");
        assert_eq!(config.url("/status"), "http://localhost:3000/status");
    }

    #[test]
    fn test_default_timeout() {
        let config = Config::new("http://localhost:3000", "key");
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    // Environment mutations are process-global, so the missing/blank/set
    // cases run inside a single test to avoid racing parallel tests.
    #[test]
    fn test_from_env() {
        std::env::remove_var(API_KEY_ENV);
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnvVar(API_KEY_ENV)));
        assert!(err.to_string().contains("TBA_API_KEY"));

        std::env::set_var(API_KEY_ENV, "   ");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::BlankEnvVar(API_KEY_ENV)));
        assert!(err.to_string().contains("TBA_API_KEY"));

        std::env::set_var(API_KEY_ENV, "test-key");
        let config = Config::from_env().unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.base_url, "https://www.thebluealliance.com/api/v3");

        std::env::remove_var(API_KEY_ENV);
    }
}
