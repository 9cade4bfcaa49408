//! Shared test doubles and utilities for the coaster operations services.

mod bus;
mod clock;
mod repository;

pub use bus::{FailingMessageBus, InMemoryMessageBus, RecordingMessageBus};
pub use clock::{FixedClock, fixed_clock};
pub use repository::{FailingCoasterRepository, InMemoryCoasterRepository};
