//! Coasters Core: shared kernel.
//!
//! Defines the traits, value objects, and error types that every bounded
//! context depends on. It contains no infrastructure code.

pub mod aggregate;
pub mod bus;
pub mod channels;
pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod value_objects;
