//! Analysis orchestrator.
//!
//! Runs the personnel and throughput analyses for a coaster, classifies the
//! result, and publishes a status snapshot plus a problem alert when the
//! coaster is not healthy.

use std::sync::Arc;

use coasters_core::bus::{MessageBus, publish_best_effort};
use coasters_core::channels;
use coasters_core::clock::Clock;
use coasters_fleet::domain::aggregates::Coaster;
use serde::Serialize;
use tracing::{info, instrument, warn};

use crate::domain::personnel::PersonnelAnalysis;
use crate::domain::reports::{
    OperatingHours, PersonnelSummary, ProblemAlert, StatusSnapshot, WagonSummary,
};
use crate::domain::status::{OperationalStatus, problem_details};
use crate::domain::throughput::ThroughputAnalysis;

/// Combined result of both analyses for one coaster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CoasterAnalysis {
    pub personnel: PersonnelAnalysis,
    pub throughput: ThroughputAnalysis,
    pub status: OperationalStatus,
}

impl CoasterAnalysis {
    /// Analyzes the current configuration of `coaster`.
    #[must_use]
    pub fn of(coaster: &Coaster) -> Self {
        let personnel = PersonnelAnalysis::of(coaster);
        let throughput = ThroughputAnalysis::of(coaster);
        let status = OperationalStatus::determine(&personnel, &throughput);
        Self {
            personnel,
            throughput,
            status,
        }
    }

    /// Builds the status snapshot for `coaster`.
    #[must_use]
    pub fn snapshot(&self, coaster: &Coaster) -> StatusSnapshot {
        let count = coaster.wagons().len() as u64;
        StatusSnapshot {
            id: coaster.id().to_string(),
            operating_hours: OperatingHours {
                start: coaster.operating_hours().start().to_owned(),
                end: coaster.operating_hours().end().to_owned(),
            },
            wagons: WagonSummary {
                count,
                total: count + self.throughput.additional_wagons_needed,
            },
            personnel: PersonnelSummary {
                available: self.personnel.available_personnel,
                required: self.personnel.required_personnel,
            },
            daily_clients: coaster.daily_clients(),
            status: self.status,
        }
    }

    /// Builds a problem alert, or `None` when the status is `OK`.
    #[must_use]
    pub fn problem(&self, coaster: &Coaster, timestamp: i64) -> Option<ProblemAlert> {
        self.status.is_problem().then(|| ProblemAlert {
            coaster_id: coaster.id().to_string(),
            timestamp,
            status: self.status,
            details: problem_details(&self.personnel, &self.throughput),
        })
    }
}

/// Publishes analysis results to the message bus.
#[derive(Clone)]
pub struct CoasterAnalysisService {
    bus: Arc<dyn MessageBus>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for CoasterAnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CoasterAnalysisService").finish_non_exhaustive()
    }
}

impl CoasterAnalysisService {
    /// Creates a service publishing to `bus` and stamping alerts with `clock`.
    #[must_use]
    pub fn new(bus: Arc<dyn MessageBus>, clock: Arc<dyn Clock>) -> Self {
        Self { bus, clock }
    }

    /// Analyzes `coaster`, publishes its snapshot to
    /// [`channels::OPERATIONAL_STATUS_UPDATES`], and publishes an alert to
    /// [`channels::CAPACITY_PROBLEMS`] when the status is a problem.
    ///
    /// Publish failures are logged and do not stop the analysis.
    #[instrument(skip(self, coaster), fields(coaster_id = %coaster.id()))]
    pub async fn analyze_and_publish(&self, coaster: &Coaster) -> StatusSnapshot {
        let analysis = CoasterAnalysis::of(coaster);
        let snapshot = analysis.snapshot(coaster);

        self.publish(channels::OPERATIONAL_STATUS_UPDATES, &snapshot)
            .await;

        if let Some(alert) = analysis.problem(coaster, self.clock.epoch_seconds()) {
            self.publish(channels::CAPACITY_PROBLEMS, &alert).await;
        }

        info!(status = %snapshot.status, "coaster analyzed");
        snapshot
    }

    async fn publish<T: Serialize + Sync>(&self, topic: &str, report: &T) {
        match serde_json::to_value(report) {
            Ok(payload) => {
                publish_best_effort(self.bus.as_ref(), topic, &payload).await;
            }
            Err(error) => warn!(topic, %error, "report not serializable"),
        }
    }
}
