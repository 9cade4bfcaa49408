//! Reacts to configuration changes by re-analyzing the affected coaster.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use coasters_core::bus::{MessageBus, MessageStream};
use coasters_core::channels;
use coasters_core::error::DomainError;
use coasters_fleet::domain::identifiers::CoasterId;
use coasters_fleet::domain::repository::CoasterRepository;
use futures::StreamExt;
use tokio::sync::broadcast;
use tracing::{debug, error, info, instrument, warn};

use crate::application::analysis_service::CoasterAnalysisService;
use crate::domain::reports::StatusSnapshot;

/// Default pause before re-subscribing after the subscription is lost.
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Subscribes to `coaster.configuration.changed` and re-analyzes every
/// coaster it hears about.
#[derive(Clone)]
pub struct ConfigurationChangedListener {
    repository: Arc<dyn CoasterRepository>,
    analysis: CoasterAnalysisService,
    bus: Arc<dyn MessageBus>,
    retry_delay: Duration,
}

impl std::fmt::Debug for ConfigurationChangedListener {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfigurationChangedListener")
            .field("retry_delay", &self.retry_delay)
            .finish_non_exhaustive()
    }
}

impl ConfigurationChangedListener {
    #[must_use]
    pub fn new(
        repository: Arc<dyn CoasterRepository>,
        analysis: CoasterAnalysisService,
        bus: Arc<dyn MessageBus>,
    ) -> Self {
        Self {
            repository,
            analysis,
            bus,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }

    /// Set custom retry delay.
    #[must_use]
    pub fn with_retry_delay(mut self, delay: Duration) -> Self {
        self.retry_delay = delay;
        self
    }

    /// Handles one configuration-changed payload.
    ///
    /// Payloads without a `coaster_id` and identities with no stored coaster
    /// are ignored.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store cannot be read.
    pub async fn handle_message(
        &self,
        payload: &serde_json::Value,
    ) -> Result<Option<StatusSnapshot>, DomainError> {
        let Some(coaster_id) = payload.get("coaster_id").and_then(serde_json::Value::as_str) else {
            debug!(%payload, "configuration change without coaster_id ignored");
            return Ok(None);
        };
        self.process_coaster(&CoasterId::from(coaster_id)).await
    }

    /// Re-analyzes one coaster. Returns `None` if it no longer exists.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store cannot be read.
    #[instrument(skip(self), fields(coaster_id = %coaster_id))]
    pub async fn process_coaster(
        &self,
        coaster_id: &CoasterId,
    ) -> Result<Option<StatusSnapshot>, DomainError> {
        match self.repository.find_by_id(coaster_id).await? {
            Some(coaster) => Ok(Some(self.analysis.analyze_and_publish(&coaster).await)),
            None => {
                debug!("coaster no longer exists; change ignored");
                Ok(None)
            }
        }
    }

    /// Re-analyzes every stored coaster.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the store cannot be read.
    #[instrument(skip(self))]
    pub async fn process_all_coasters(
        &self,
    ) -> Result<BTreeMap<CoasterId, StatusSnapshot>, DomainError> {
        let mut results = BTreeMap::new();
        for coaster in self.repository.find_all().await? {
            let snapshot = self.analysis.analyze_and_publish(&coaster).await;
            results.insert(coaster.id().clone(), snapshot);
        }
        info!(coasters = results.len(), "all coasters analyzed");
        Ok(results)
    }

    /// Runs the subscribe-process loop until `shutdown` fires or its sender
    /// is dropped.
    ///
    /// A lost subscription is re-established after the retry delay. A
    /// message that fails to process is logged and skipped.
    pub async fn listen(&self, mut shutdown: broadcast::Receiver<()>) {
        info!(topic = channels::CONFIGURATION_CHANGED, "listener started");

        loop {
            tokio::select! {
                _ = shutdown.recv() => break,
                subscribed = self.bus.subscribe(&[channels::CONFIGURATION_CHANGED]) => {
                    match subscribed {
                        Ok(mut stream) => {
                            info!(topic = channels::CONFIGURATION_CHANGED, "subscribed");
                            if self.drain(&mut stream, &mut shutdown).await {
                                break;
                            }
                            warn!(retry_in = ?self.retry_delay, "subscription ended; reconnecting");
                        }
                        Err(e) => {
                            error!(error = %e, retry_in = ?self.retry_delay, "failed to subscribe");
                        }
                    }
                }
            }

            tokio::select! {
                _ = shutdown.recv() => break,
                () = tokio::time::sleep(self.retry_delay) => {}
            }
        }

        info!("listener stopped");
    }

    /// Processes messages until the stream ends. Returns `true` on shutdown.
    async fn drain(
        &self,
        stream: &mut MessageStream,
        shutdown: &mut broadcast::Receiver<()>,
    ) -> bool {
        loop {
            tokio::select! {
                _ = shutdown.recv() => return true,
                next = stream.next() => match next {
                    Some(Ok(message)) => {
                        if let Err(e) = self.handle_message(&message.payload).await {
                            error!(error = %e, "failed to process configuration change");
                        }
                    }
                    Some(Err(e)) => warn!(error = %e, "undecodable message skipped"),
                    None => return false,
                },
            }
        }
    }
}
