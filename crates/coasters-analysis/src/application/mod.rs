//! Application layer for the Operational Analysis context.

pub mod analysis_service;
pub mod listener;
