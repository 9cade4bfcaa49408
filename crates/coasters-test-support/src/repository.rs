//! Test repositories: `CoasterRepository` implementations for tests.

use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use coasters_core::aggregate::AggregateRoot;
use coasters_core::bus::{MessageBus, publish_domain_events};
use coasters_core::error::DomainError;
use coasters_fleet::domain::aggregates::Coaster;
use coasters_fleet::domain::events::CoasterEvent;
use coasters_fleet::domain::identifiers::CoasterId;
use coasters_fleet::domain::repository::CoasterRepository;

#[derive(Debug, Default)]
struct Records {
    snapshots: HashMap<String, String>,
    index: BTreeSet<String>,
}

/// A repository that keeps JSON snapshots and an identity index in memory,
/// mirroring the layout of the Redis store.
///
/// When built with a bus, released events are published exactly as the
/// production store publishes them.
#[derive(Default)]
pub struct InMemoryCoasterRepository {
    records: Mutex<Records>,
    bus: Option<Arc<dyn MessageBus>>,
}

impl std::fmt::Debug for InMemoryCoasterRepository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryCoasterRepository")
            .field("records", &self.records)
            .field("publishes", &self.bus.is_some())
            .finish()
    }
}

impl InMemoryCoasterRepository {
    /// Creates an empty repository that publishes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty repository that publishes released events to `bus`.
    #[must_use]
    pub fn with_bus(bus: Arc<dyn MessageBus>) -> Self {
        Self {
            records: Mutex::new(Records::default()),
            bus: Some(bus),
        }
    }

    /// Stores a raw record and indexes it, bypassing serialization.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn insert_raw(&self, id: &str, json: &str) {
        let mut records = self.records.lock().unwrap();
        records.snapshots.insert(id.to_owned(), json.to_owned());
        records.index.insert(id.to_owned());
    }

    /// Removes a record but leaves its identity in the index.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn drop_record(&self, id: &str) {
        self.records.lock().unwrap().snapshots.remove(id);
    }

    /// Returns the indexed identities in sorted order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn indexed_ids(&self) -> Vec<String> {
        self.records.lock().unwrap().index.iter().cloned().collect()
    }

    fn decode(json: &str) -> Result<Coaster, DomainError> {
        serde_json::from_str(json)
            .map_err(|e| DomainError::Infrastructure(format!("corrupt coaster record: {e}")))
    }
}

#[async_trait]
impl CoasterRepository for InMemoryCoasterRepository {
    async fn save(&self, coaster: &mut Coaster) -> Result<Vec<CoasterEvent>, DomainError> {
        let json = serde_json::to_string(coaster)
            .map_err(|e| DomainError::Infrastructure(e.to_string()))?;
        {
            let mut records = self.records.lock().unwrap();
            let id = coaster.id().to_string();
            records.snapshots.insert(id.clone(), json);
            records.index.insert(id);
        }

        let released = coaster.release_events();
        self.publish_events(&released).await;
        Ok(released)
    }

    async fn find_by_id(&self, id: &CoasterId) -> Result<Option<Coaster>, DomainError> {
        let json = self
            .records
            .lock()
            .unwrap()
            .snapshots
            .get(id.as_str())
            .cloned();
        json.as_deref().map(Self::decode).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Coaster>, DomainError> {
        let snapshots: Vec<String> = {
            let records = self.records.lock().unwrap();
            records
                .index
                .iter()
                .filter_map(|id| records.snapshots.get(id).cloned())
                .collect()
        };
        snapshots.iter().map(|json| Self::decode(json)).collect()
    }

    async fn delete(&self, id: &CoasterId) -> Result<(), DomainError> {
        let mut records = self.records.lock().unwrap();
        records.snapshots.remove(id.as_str());
        records.index.remove(id.as_str());
        Ok(())
    }

    async fn publish_events(&self, events: &[CoasterEvent]) {
        if let Some(bus) = &self.bus {
            publish_domain_events(bus.as_ref(), events).await;
        }
    }
}

/// A repository that always returns an infrastructure error. Useful for
/// testing error-handling paths.
#[derive(Debug)]
pub struct FailingCoasterRepository;

#[async_trait]
impl CoasterRepository for FailingCoasterRepository {
    async fn save(&self, _coaster: &mut Coaster) -> Result<Vec<CoasterEvent>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_by_id(&self, _id: &CoasterId) -> Result<Option<Coaster>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn find_all(&self) -> Result<Vec<Coaster>, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn delete(&self, _id: &CoasterId) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn publish_events(&self, _events: &[CoasterEvent]) {}
}

#[cfg(test)]
mod tests {
    use coasters_core::channels;
    use coasters_fleet::domain::aggregates::Wagon;
    use serde_json::json;

    use super::*;
    use crate::bus::RecordingMessageBus;
    use crate::clock::fixed_clock;

    fn new_coaster() -> Coaster {
        Coaster::create(16, 60_000, 1800.0, "08:00", "16:00", &fixed_clock()).unwrap()
    }

    #[tokio::test]
    async fn test_save_then_find_by_id_round_trips_wagons() {
        // Arrange
        let repo = InMemoryCoasterRepository::new();
        let mut coaster = new_coaster();
        coaster
            .add_wagon(Wagon::create(32, 2.0).unwrap(), &fixed_clock())
            .unwrap();
        coaster
            .add_wagon(Wagon::create(20, 1.5).unwrap(), &fixed_clock())
            .unwrap();

        // Act
        let released = repo.save(&mut coaster).await.unwrap();
        let loaded = repo.find_by_id(coaster.id()).await.unwrap().unwrap();

        // Assert
        assert_eq!(released.len(), 3);
        assert!(!coaster.has_pending_events());
        assert_eq!(loaded, coaster);
    }

    #[tokio::test]
    async fn test_save_publishes_envelope_and_named_topic() {
        // Arrange
        let bus = Arc::new(RecordingMessageBus::new());
        let repo = InMemoryCoasterRepository::with_bus(bus.clone());
        let mut coaster = new_coaster();

        // Act
        repo.save(&mut coaster).await.unwrap();

        // Assert
        let topics: Vec<String> = bus.published().into_iter().map(|m| m.topic).collect();
        assert_eq!(
            topics,
            vec![channels::DOMAIN_EVENTS, channels::CONFIGURATION_CHANGED]
        );
        assert_eq!(
            bus.published_to(channels::CONFIGURATION_CHANGED),
            vec![json!({ "coaster_id": coaster.id().as_str() })]
        );
    }

    #[tokio::test]
    async fn test_save_keeps_record_when_publish_fails() {
        let bus = Arc::new(RecordingMessageBus::failing_on(channels::DOMAIN_EVENTS));
        let repo = InMemoryCoasterRepository::with_bus(bus.clone());
        let mut coaster = new_coaster();

        let released = repo.save(&mut coaster).await.unwrap();

        assert_eq!(released.len(), 1);
        assert!(repo.find_by_id(coaster.id()).await.unwrap().is_some());
        assert_eq!(bus.published_to(channels::CONFIGURATION_CHANGED).len(), 1);
    }

    #[tokio::test]
    async fn test_find_all_skips_index_drift() {
        // Arrange
        let repo = InMemoryCoasterRepository::new();
        let mut kept = new_coaster();
        let mut dropped = new_coaster();
        repo.save(&mut kept).await.unwrap();
        repo.save(&mut dropped).await.unwrap();
        repo.drop_record(dropped.id().as_str());

        // Act
        let all = repo.find_all().await.unwrap();

        // Assert
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id(), kept.id());
        assert_eq!(repo.indexed_ids().len(), 2);
    }

    #[tokio::test]
    async fn test_delete_removes_record_and_index_entry() {
        let repo = InMemoryCoasterRepository::new();
        let mut coaster = new_coaster();
        repo.save(&mut coaster).await.unwrap();

        repo.delete(coaster.id()).await.unwrap();

        assert!(repo.find_by_id(coaster.id()).await.unwrap().is_none());
        assert!(repo.find_all().await.unwrap().is_empty());
        assert!(repo.indexed_ids().is_empty());
    }

    #[tokio::test]
    async fn test_find_by_id_reports_corrupt_record() {
        let repo = InMemoryCoasterRepository::new();
        repo.insert_raw("coaster_bad", "{\"id\":\"coaster_bad\"}");

        let result = repo.find_by_id(&CoasterId::from("coaster_bad")).await;

        assert!(matches!(result, Err(DomainError::Infrastructure(_))));
    }
}
