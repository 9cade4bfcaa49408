//! Coaster operations: Monitoring.
//!
//! Consumes status snapshots and problem alerts from the message bus,
//! keeps the latest status per coaster for a console dashboard, and appends
//! problems to a notifications log.

pub mod dashboard;
pub mod monitor;
pub mod problem_log;
