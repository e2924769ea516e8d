//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `KICKFLIP_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   the generic `DATABASE_URL`)
//! - `KICKFLIP_BASE_URL` - Public URL for the site
//!
//! ## Optional
//! - `KICKFLIP_HOST` - Bind address (default: 127.0.0.1)
//! - `KICKFLIP_PORT` - Listen port (default: 3000)
//! - `WEATHER_BASE_URL` - Weather API origin (default: `https://weather.tsukumijima.net`)
//! - `WEATHER_TIMEOUT_SECS` - Weather request timeout (default: 5)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;

/// Default weather API origin.
const DEFAULT_WEATHER_BASE_URL: &str = "https://weather.tsukumijima.net";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the site
    pub base_url: String,
    /// Weather lookup configuration
    pub weather: WeatherConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Weather lookup configuration.
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Origin of the weather API.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("KICKFLIP_DATABASE_URL")?;
        let host = get_env_or_default("KICKFLIP_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("KICKFLIP_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("KICKFLIP_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("KICKFLIP_PORT".to_string(), e.to_string()))?;
        let base_url = get_required_env("KICKFLIP_BASE_URL")?;
        let weather = WeatherConfig::from_env()?;
        let sentry_dsn = get_optional_env("SENTRY_DSN");

        Ok(Self {
            database_url,
            host,
            port,
            base_url,
            weather,
            sentry_dsn,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

impl WeatherConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let base_url = get_env_or_default("WEATHER_BASE_URL", DEFAULT_WEATHER_BASE_URL);
        let timeout_secs = get_env_or_default("WEATHER_TIMEOUT_SECS", "5")
            .parse::<u64>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("WEATHER_TIMEOUT_SECS".to_string(), e.to_string())
            })?;

        Ok(Self {
            base_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_socket_addr() {
        let config = AppConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            weather: WeatherConfig {
                base_url: DEFAULT_WEATHER_BASE_URL.to_string(),
                timeout: Duration::from_secs(5),
            },
            sentry_dsn: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_weather_defaults() {
        // No WEATHER_* vars set in the test environment
        let weather = WeatherConfig::from_env().unwrap();
        assert_eq!(weather.base_url, DEFAULT_WEATHER_BASE_URL);
        assert_eq!(weather.timeout, Duration::from_secs(5));
    }
}
