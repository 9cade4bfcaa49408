//! Coaster repository contract.

use async_trait::async_trait;
use coasters_core::error::DomainError;

use super::aggregates::Coaster;
use super::events::CoasterEvent;
use super::identifiers::CoasterId;

/// Persists Coaster aggregates as whole snapshots and announces their changes.
///
/// There is no concurrency control: concurrent saves of the same identity
/// race and the last write wins.
#[async_trait]
pub trait CoasterRepository: Send + Sync {
    /// Writes the full aggregate, indexes its identity, then releases its
    /// pending events and publishes them.
    ///
    /// Publishing is best-effort: a failed publish is logged and does not undo
    /// the write. Returns the released events.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the record cannot be written.
    /// Pending events stay on the aggregate in that case.
    async fn save(&self, coaster: &mut Coaster) -> Result<Vec<CoasterEvent>, DomainError>;

    /// Loads a coaster, or `None` if no record exists.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` on transport failure or a
    /// corrupt record.
    async fn find_by_id(&self, id: &CoasterId) -> Result<Option<Coaster>, DomainError>;

    /// Loads every indexed coaster, skipping identities whose record is gone.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` on transport failure.
    async fn find_all(&self) -> Result<Vec<Coaster>, DomainError>;

    /// Removes the record and its index entry.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` on transport failure.
    async fn delete(&self, id: &CoasterId) -> Result<(), DomainError>;

    /// Publishes each event to the catch-all channel and to its own topic,
    /// in order. Failures are logged and swallowed.
    async fn publish_events(&self, events: &[CoasterEvent]);
}
