//! Client configuration management.
//!
//! Consolidates all environment variable reads and provides validated configuration.

use connect_four::{DEFAULT_HEIGHT, DEFAULT_WIDTH, SessionConfig};
use std::time::Duration;

/// Values given on the command line. Each one wins over its environment variable.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub server_url: Option<String>,
    pub poll_ms: Option<u64>,
    pub width: Option<usize>,
    pub height: Option<usize>,
}

/// Complete client configuration loaded from environment variables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the game server
    pub server_url: String,
    /// Delay between polls while waiting on the opponent
    pub poll_interval: Duration,
    /// Timeout applied to every HTTP request
    pub request_timeout: Duration,
    /// Board width for offline games
    pub width: usize,
    /// Board height for offline games
    pub height: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: "http://localhost:5000".to_string(),
            poll_interval: Duration::from_millis(1000),
            request_timeout: Duration::from_secs(10),
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables, then apply overrides
    ///
    /// # Errors
    ///
    /// Returns error if the resulting configuration does not validate
    pub fn from_env(overrides: ConfigOverrides) -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let server_url = overrides
            .server_url
            .or_else(|| std::env::var("CONNECT_FOUR_SERVER").ok())
            .unwrap_or(defaults.server_url);

        let poll_ms = overrides.poll_ms.unwrap_or_else(|| {
            parse_env_or(
                "CONNECT_FOUR_POLL_MS",
                defaults.poll_interval.as_millis() as u64,
            )
        });

        let timeout_secs = parse_env_or(
            "CONNECT_FOUR_REQUEST_TIMEOUT_SECS",
            defaults.request_timeout.as_secs(),
        );

        let config = Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            poll_interval: Duration::from_millis(poll_ms),
            request_timeout: Duration::from_secs(timeout_secs),
            width: overrides
                .width
                .unwrap_or_else(|| parse_env_or("CONNECT_FOUR_WIDTH", defaults.width)),
            height: overrides
                .height
                .unwrap_or_else(|| parse_env_or("CONNECT_FOUR_HEIGHT", defaults.height)),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration after loading
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.server_url.starts_with("http://") || self.server_url.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                var: "CONNECT_FOUR_SERVER".to_string(),
                reason: format!("Must be an http(s) URL, got '{}'", self.server_url),
            });
        }

        if self.poll_interval.is_zero() {
            return Err(ConfigError::Invalid {
                var: "CONNECT_FOUR_POLL_MS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.request_timeout.is_zero() {
            return Err(ConfigError::Invalid {
                var: "CONNECT_FOUR_REQUEST_TIMEOUT_SECS".to_string(),
                reason: "Must be greater than 0".to_string(),
            });
        }

        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid {
                var: "CONNECT_FOUR_WIDTH/CONNECT_FOUR_HEIGHT".to_string(),
                reason: format!("Board {}x{} has no cells", self.width, self.height),
            });
        }

        Ok(())
    }

    /// Session tuning derived from this configuration
    pub fn session(&self) -> SessionConfig {
        SessionConfig {
            poll_interval: self.poll_interval,
            ..SessionConfig::default()
        }
    }
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration for {var}: {reason}")]
    Invalid { var: String, reason: String },
}

/// Helper to parse environment variable with default fallback
fn parse_env_or<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
