//! Shared application state.

use std::sync::Arc;

use coasters_core::clock::Clock;
use coasters_fleet::domain::repository::CoasterRepository;

/// Application state shared across all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Clock used to timestamp domain events.
    pub clock: Arc<dyn Clock>,
    /// Coaster repository.
    pub coaster_repository: Arc<dyn CoasterRepository>,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState").finish_non_exhaustive()
    }
}

impl AppState {
    /// Create new application state.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, coaster_repository: Arc<dyn CoasterRepository>) -> Self {
        Self {
            clock,
            coaster_repository,
        }
    }
}
