//! Message bus topic names.
//!
//! These names are part of the wire contract shared with external
//! subscribers and must not change.

/// Catch-all channel carrying every released domain event as
/// `{ name, data, timestamp }`.
pub const DOMAIN_EVENTS: &str = "domain_events";

/// Per-event channel for `coaster.configuration.changed`, payload `{ coaster_id }`.
pub const CONFIGURATION_CHANGED: &str = "coaster.configuration.changed";

/// Status snapshots produced by every analysis run.
pub const OPERATIONAL_STATUS_UPDATES: &str = "operational_status_updates";

/// Problem alerts produced when a coaster is not in the `OK` state.
pub const CAPACITY_PROBLEMS: &str = "capacity_problems";
