//! Wire payloads published by the analysis pipeline.

use serde::{Deserialize, Serialize};

use super::status::OperationalStatus;

/// Opening and closing time of the analyzed coaster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperatingHours {
    /// Opening time, `HH:MM`.
    pub start: String,
    /// Closing time, `HH:MM`.
    pub end: String,
}

/// Attached wagons versus the count that would cover demand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WagonSummary {
    /// Wagons currently attached.
    pub count: u64,
    /// Attached wagons plus the additional wagons needed.
    pub total: u64,
}

/// Available versus required staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonnelSummary {
    /// Staff on the coaster.
    pub available: u32,
    /// Staff the attached wagons need.
    pub required: u32,
}

/// Published to `operational_status_updates` after every analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// The coaster identifier.
    pub id: String,
    /// Daily operating window.
    pub operating_hours: OperatingHours,
    /// Wagon count against the recommended total.
    pub wagons: WagonSummary,
    /// Staffing against the requirement.
    pub personnel: PersonnelSummary,
    /// Visitors expected per day.
    pub daily_clients: u32,
    /// Overall classification.
    pub status: OperationalStatus,
}

/// Published to `capacity_problems` when the status is not `OK`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemAlert {
    /// The coaster identifier.
    pub coaster_id: String,
    /// Epoch seconds.
    pub timestamp: i64,
    /// The problem status that raised the alert.
    pub status: OperationalStatus,
    /// Comma-separated contributing shortages and surpluses.
    pub details: String,
}
