//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Error)]
pub enum DomainError {
    /// An aggregate was not found.
    #[error("aggregate not found: {0}")]
    AggregateNotFound(String),

    /// An entity owned by an aggregate was not found.
    #[error("wagon {wagon_id} not found on coaster {coaster_id}")]
    WagonNotFound {
        /// The aggregate that was searched.
        coaster_id: String,
        /// The missing entity identity.
        wagon_id: String,
    },

    /// A validation error in domain logic.
    #[error("validation error: {0}")]
    Validation(String),

    /// A store or message bus failure.
    #[error("infrastructure error: {0}")]
    Infrastructure(String),
}

impl DomainError {
    /// Returns `true` for the not-found family of errors.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::AggregateNotFound(_) | Self::WagonNotFound { .. })
    }
}
