//! Coaster operations: Fleet Management bounded context.
//!
//! Owns the Coaster aggregate and its Wagons, the configuration-changed
//! event they record, and the repository contract used to persist them.

pub mod application;
pub mod domain;
