//! Coaster operations: Operational Analysis bounded context.
//!
//! Derives staffing and ride-throughput figures from a coaster's current
//! configuration, classifies its operational status, and publishes status
//! snapshots and problem alerts whenever the configuration changes.

pub mod application;
pub mod domain;
