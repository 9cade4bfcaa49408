//! Redis client construction.

use coasters_core::error::DomainError;
use redis::aio::ConnectionManager;
use redis::{Client, IntoConnectionInfo};

/// Where and how to reach the Redis server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisSettings {
    /// Server URL, e.g. `redis://127.0.0.1:6379`.
    pub url: String,
    /// Logical database selected on connect.
    pub database: i64,
    /// Password, overriding any in the URL.
    pub password: Option<String>,
}

impl RedisSettings {
    /// Builds a client for these settings. No connection is made yet.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the URL is invalid.
    pub fn client(&self) -> Result<Client, DomainError> {
        let mut info = self
            .url
            .as_str()
            .into_connection_info()
            .map_err(|e| DomainError::Infrastructure(format!("invalid redis url: {e}")))?;
        info.redis.db = self.database;
        if let Some(password) = &self.password {
            info.redis.password = Some(password.clone());
        }
        Client::open(info)
            .map_err(|e| DomainError::Infrastructure(format!("failed to create redis client: {e}")))
    }

    /// Connects a reconnecting command connection.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the server is unreachable.
    pub async fn connection_manager(&self) -> Result<ConnectionManager, DomainError> {
        ConnectionManager::new(self.client()?).await.map_err(|e| {
            DomainError::Infrastructure(format!("failed to connect to redis: {e}"))
        })
    }
}
