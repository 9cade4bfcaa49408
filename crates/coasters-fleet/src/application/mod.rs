//! Application layer for the Fleet Management context.

pub mod command_handlers;
pub mod query_handlers;

#[cfg(test)]
pub(crate) mod testing;
