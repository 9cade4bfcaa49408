//! Configuration module
//!
//! Loads configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use coasters_store::{Keyspace, RedisSettings};

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Redis server URL
    pub redis_url: String,

    /// Redis logical database
    pub redis_database: i64,

    /// Redis password, if the server requires one
    pub redis_password: Option<String>,

    /// Environment (development, production)
    pub environment: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Dashboard refresh period
    pub monitor_refresh: Duration,

    /// Problem log location
    pub notifications_log: PathBuf,

    /// Pause before a lost subscription is retried
    pub listener_retry: Duration,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a variable cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let environment = lookup("APP_ENVIRONMENT").unwrap_or_else(|| "development".to_string());
        let default_database = if is_production(&environment) { "0" } else { "1" };

        let redis_url =
            lookup("REDIS_URL").unwrap_or_else(|| "redis://127.0.0.1:6379".to_string());
        let redis_database = parse(&lookup, "REDIS_DATABASE", default_database)?;
        let redis_password = lookup("REDIS_PASSWORD").filter(|p| !p.is_empty());

        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string());
        let port = parse(&lookup, "PORT", "3000")?;

        let monitor_refresh = Duration::from_secs(parse(&lookup, "MONITOR_REFRESH_SECS", "5")?);
        let notifications_log = lookup("NOTIFICATIONS_LOG")
            .map_or_else(|| PathBuf::from("logs/notifications.log"), PathBuf::from);
        let listener_retry = Duration::from_secs(parse(&lookup, "LISTENER_RETRY_SECS", "5")?);

        if monitor_refresh.is_zero() {
            return Err(ConfigError::InvalidValue("MONITOR_REFRESH_SECS"));
        }

        Ok(Self {
            redis_url,
            redis_database,
            redis_password,
            environment,
            host,
            port,
            monitor_refresh,
            notifications_log,
            listener_retry,
        })
    }

    /// Check if running in production
    #[must_use]
    pub fn is_production(&self) -> bool {
        is_production(&self.environment)
    }

    #[must_use]
    pub fn redis_settings(&self) -> RedisSettings {
        RedisSettings {
            url: self.redis_url.clone(),
            database: self.redis_database,
            password: self.redis_password.clone(),
        }
    }

    #[must_use]
    pub fn keyspace(&self) -> Keyspace {
        Keyspace::for_environment(&self.environment)
    }
}

fn is_production(environment: &str) -> bool {
    environment.eq_ignore_ascii_case("production")
}

fn parse<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    default: &str,
) -> Result<T, ConfigError> {
    lookup(key)
        .unwrap_or_else(|| default.to_string())
        .parse()
        .map_err(|_| ConfigError::InvalidValue(key))
}

/// Configuration error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(&'static str),
}
