//! Redis-backed collaborators shared by the binaries.

use std::sync::Arc;

use coasters_store::{RedisCoasterRepository, RedisMessageBus};
use tracing::info;

use crate::config::AppConfig;
use crate::error::AppError;

/// Connected Redis adapters.
#[derive(Debug, Clone)]
pub struct Infrastructure {
    pub bus: Arc<RedisMessageBus>,
    pub coaster_repository: Arc<RedisCoasterRepository>,
}

impl Infrastructure {
    /// Opens the Redis connections described by `config`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Store` if the URL is invalid or the server is
    /// unreachable.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let settings = config.redis_settings();
        let client = settings.client()?;
        let conn = settings.connection_manager().await?;

        let bus = Arc::new(RedisMessageBus::new(client, conn.clone()));
        let coaster_repository = Arc::new(RedisCoasterRepository::new(
            conn,
            config.keyspace(),
            bus.clone(),
        ));

        info!(
            database = settings.database,
            prefix = config.keyspace().prefix(),
            "connected to redis"
        );
        Ok(Self {
            bus,
            coaster_repository,
        })
    }
}
