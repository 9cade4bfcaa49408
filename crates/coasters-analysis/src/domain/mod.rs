//! Domain layer for the Operational Analysis context.

pub mod personnel;
pub mod reports;
pub mod status;
pub mod throughput;
