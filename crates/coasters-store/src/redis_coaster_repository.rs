//! Redis implementation of the `CoasterRepository` trait.

use std::sync::Arc;

use async_trait::async_trait;
use coasters_core::aggregate::AggregateRoot;
use coasters_core::bus::{MessageBus, publish_domain_events};
use coasters_core::error::DomainError;
use coasters_fleet::domain::aggregates::Coaster;
use coasters_fleet::domain::events::CoasterEvent;
use coasters_fleet::domain::identifiers::CoasterId;
use coasters_fleet::domain::repository::CoasterRepository;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use tracing::{debug, warn};

use crate::keyspace::Keyspace;

fn infra(context: &str, error: &redis::RedisError) -> DomainError {
    DomainError::Infrastructure(format!("{context}: {error}"))
}

/// Stores each coaster as a JSON snapshot and indexes its identity in a set.
#[derive(Clone)]
pub struct RedisCoasterRepository {
    conn: ConnectionManager,
    keys: Keyspace,
    bus: Arc<dyn MessageBus>,
}

impl std::fmt::Debug for RedisCoasterRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCoasterRepository")
            .field("keys", &self.keys)
            .finish_non_exhaustive()
    }
}

impl RedisCoasterRepository {
    /// Creates a repository writing under `keys` and publishing to `bus`.
    #[must_use]
    pub fn new(conn: ConnectionManager, keys: Keyspace, bus: Arc<dyn MessageBus>) -> Self {
        Self { conn, keys, bus }
    }

    fn decode(id: &str, json: &str) -> Result<Coaster, DomainError> {
        serde_json::from_str(json).map_err(|e| {
            DomainError::Infrastructure(format!("corrupt coaster record {id}: {e}"))
        })
    }
}

#[async_trait]
impl CoasterRepository for RedisCoasterRepository {
    async fn save(&self, coaster: &mut Coaster) -> Result<Vec<CoasterEvent>, DomainError> {
        let id = coaster.id().to_string();
        let json = serde_json::to_string(coaster)
            .map_err(|e| DomainError::Infrastructure(format!("failed to encode coaster: {e}")))?;

        let mut conn = self.conn.clone();
        let _: () = redis::pipe()
            .atomic()
            .set(self.keys.record_key(&id), json)
            .ignore()
            .sadd(self.keys.index_key(), &id)
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| infra("failed to save coaster", &e))?;

        let released = coaster.release_events();
        debug!(coaster_id = %id, events = released.len(), "coaster saved");
        self.publish_events(&released).await;
        Ok(released)
    }

    async fn find_by_id(&self, id: &CoasterId) -> Result<Option<Coaster>, DomainError> {
        let mut conn = self.conn.clone();
        let json: Option<String> = conn
            .get(self.keys.record_key(id.as_str()))
            .await
            .map_err(|e| infra("failed to load coaster", &e))?;

        json.map(|json| Self::decode(id.as_str(), &json)).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Coaster>, DomainError> {
        let mut conn = self.conn.clone();
        let mut ids: Vec<String> = conn
            .smembers(self.keys.index_key())
            .await
            .map_err(|e| infra("failed to read coaster index", &e))?;
        ids.sort();

        let mut coasters = Vec::with_capacity(ids.len());
        for id in ids {
            let json: Option<String> = conn
                .get(self.keys.record_key(&id))
                .await
                .map_err(|e| infra("failed to load coaster", &e))?;
            match json {
                Some(json) => coasters.push(Self::decode(&id, &json)?),
                None => warn!(coaster_id = %id, "indexed coaster has no record; skipped"),
            }
        }
        Ok(coasters)
    }

    async fn delete(&self, id: &CoasterId) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let _: () = redis::pipe()
            .atomic()
            .del(self.keys.record_key(id.as_str()))
            .ignore()
            .srem(self.keys.index_key(), id.as_str())
            .ignore()
            .query_async(&mut conn)
            .await
            .map_err(|e| infra("failed to delete coaster", &e))?;
        debug!(coaster_id = %id, "coaster deleted");
        Ok(())
    }

    async fn publish_events(&self, events: &[CoasterEvent]) {
        publish_domain_events(self.bus.as_ref(), events).await;
    }
}
