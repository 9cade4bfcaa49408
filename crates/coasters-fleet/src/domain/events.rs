//! Domain events for the Fleet Management context.

use coasters_core::channels;
use coasters_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};

use super::identifiers::CoasterId;

/// Event name of [`CoasterConfigurationChanged`]; also its topic.
pub const CONFIGURATION_CHANGED_EVENT: &str = channels::CONFIGURATION_CHANGED;

/// Emitted whenever a coaster is created or its configuration changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoasterConfigurationChanged {
    /// The coaster identifier.
    pub coaster_id: CoasterId,
}

/// Event payload variants for the Fleet Management context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoasterEventKind {
    /// Staffing, demand, hours, or the wagon set changed.
    ConfigurationChanged(CoasterConfigurationChanged),
}

/// Domain event envelope for the Fleet Management context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoasterEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: CoasterEventKind,
}

impl DomainEvent for CoasterEvent {
    fn event_name(&self) -> &'static str {
        match &self.kind {
            CoasterEventKind::ConfigurationChanged(_) => CONFIGURATION_CHANGED_EVENT,
        }
    }

    fn event_data(&self) -> serde_json::Value {
        match &self.kind {
            CoasterEventKind::ConfigurationChanged(payload) => {
                serde_json::json!({ "coaster_id": payload.coaster_id.as_str() })
            }
        }
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}
