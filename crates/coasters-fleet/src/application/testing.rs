//! Test doubles shared by the application-layer tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use coasters_core::aggregate::AggregateRoot;
use coasters_core::clock::Clock;
use coasters_core::error::DomainError;

use crate::domain::aggregates::Coaster;
use crate::domain::events::CoasterEvent;
use crate::domain::identifiers::CoasterId;
use crate::domain::repository::CoasterRepository;

#[derive(Debug)]
pub(crate) struct FixedClock(DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub(crate) fn fixed_clock() -> FixedClock {
    FixedClock(Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap())
}

/// Serves preloaded coasters and records every saved snapshot.
#[derive(Debug, Default)]
pub(crate) struct MockCoasterRepository {
    stored: Mutex<Vec<Coaster>>,
    saved: Mutex<Vec<Coaster>>,
}

impl MockCoasterRepository {
    pub(crate) fn with(coaster: Coaster) -> Self {
        Self::with_all(vec![coaster])
    }

    pub(crate) fn with_all(coasters: Vec<Coaster>) -> Self {
        Self {
            stored: Mutex::new(coasters),
            saved: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn saved(&self) -> Vec<Coaster> {
        self.saved.lock().unwrap().clone()
    }
}

#[async_trait]
impl CoasterRepository for MockCoasterRepository {
    async fn save(&self, coaster: &mut Coaster) -> Result<Vec<CoasterEvent>, DomainError> {
        let released = coaster.release_events();
        self.saved.lock().unwrap().push(coaster.clone());
        Ok(released)
    }

    async fn find_by_id(&self, id: &CoasterId) -> Result<Option<Coaster>, DomainError> {
        Ok(self
            .stored
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Coaster>, DomainError> {
        Ok(self.stored.lock().unwrap().clone())
    }

    async fn delete(&self, id: &CoasterId) -> Result<(), DomainError> {
        self.stored.lock().unwrap().retain(|c| c.id() != id);
        Ok(())
    }

    async fn publish_events(&self, _events: &[CoasterEvent]) {}
}
