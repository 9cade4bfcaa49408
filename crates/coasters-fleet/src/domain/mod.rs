//! Domain layer for the Fleet Management context.

pub mod aggregates;
pub mod commands;
pub mod events;
pub mod identifiers;
pub mod repository;
