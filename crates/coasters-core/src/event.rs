//! Domain event abstractions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Metadata attached to every domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Unique event identifier.
    pub event_id: Uuid,
    /// Aggregate this event belongs to.
    pub aggregate_id: String,
    /// Timestamp of event creation.
    pub occurred_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Creates metadata for a fresh event on `aggregate_id`.
    #[must_use]
    pub fn new(aggregate_id: impl Into<String>, occurred_at: DateTime<Utc>) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            aggregate_id: aggregate_id.into(),
            occurred_at,
        }
    }
}

/// Trait that all domain events implement.
pub trait DomainEvent: Send + Sync + std::fmt::Debug {
    /// Returns the event name. Doubles as the name of the per-event topic.
    fn event_name(&self) -> &'static str;

    /// Returns the structured event payload.
    fn event_data(&self) -> serde_json::Value;

    /// Returns the metadata for this event.
    fn metadata(&self) -> &EventMetadata;

    /// Returns the event timestamp in epoch seconds.
    fn timestamp(&self) -> i64 {
        self.metadata().occurred_at.timestamp()
    }

    /// Wraps the event for the catch-all domain events channel.
    fn envelope(&self) -> EventEnvelope {
        EventEnvelope {
            name: self.event_name().to_owned(),
            data: self.event_data(),
            timestamp: self.timestamp(),
        }
    }
}

/// Wire format of a domain event on the catch-all channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event name.
    pub name: String,
    /// Event payload.
    pub data: serde_json::Value,
    /// Epoch seconds.
    pub timestamp: i64,
}
