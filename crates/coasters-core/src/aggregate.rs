//! Aggregate root abstraction.

use crate::event::DomainEvent;

/// Trait for aggregate roots that record domain events on mutation.
///
/// Events accumulate in an owned buffer until [`AggregateRoot::release_events`]
/// drains it. The aggregate never publishes anything itself.
pub trait AggregateRoot: Send + Sync {
    /// The event type this aggregate records.
    type Event: DomainEvent;

    /// Returns the aggregate identifier.
    fn aggregate_id(&self) -> &str;

    /// Returns events recorded since the last release.
    fn pending_events(&self) -> &[Self::Event];

    /// Returns all pending events and leaves the buffer empty.
    fn release_events(&mut self) -> Vec<Self::Event>;

    /// Returns `true` while at least one event is waiting to be released.
    fn has_pending_events(&self) -> bool {
        !self.pending_events().is_empty()
    }
}
