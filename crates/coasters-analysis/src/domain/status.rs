//! Operational status classification.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::personnel::PersonnelAnalysis;
use super::throughput::ThroughputAnalysis;

/// Overall health of a coaster's configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationalStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "PROBLEM! Resource shortage")]
    ResourceShortage,
    #[serde(rename = "PROBLEM! Resource surplus")]
    ResourceSurplus,
}

impl OperationalStatus {
    /// Classifies the analyses.
    ///
    /// A shortage in either dimension wins. Surplus is only a problem when
    /// both staffing and throughput are over target at once.
    #[must_use]
    pub fn determine(personnel: &PersonnelAnalysis, throughput: &ThroughputAnalysis) -> Self {
        if personnel.has_shortage() || throughput.has_shortage() {
            Self::ResourceShortage
        } else if personnel.has_surplus() && throughput.has_surplus() {
            Self::ResourceSurplus
        } else {
            Self::Ok
        }
    }

    /// Wire label of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::ResourceShortage => "PROBLEM! Resource shortage",
            Self::ResourceSurplus => "PROBLEM! Resource surplus",
        }
    }

    #[must_use]
    pub fn is_problem(self) -> bool {
        self != Self::Ok
    }
}

impl fmt::Display for OperationalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable list of every contributing shortage or surplus,
/// comma-separated. Empty when nothing contributes.
#[must_use]
pub fn problem_details(personnel: &PersonnelAnalysis, throughput: &ThroughputAnalysis) -> String {
    let mut details = Vec::new();

    if personnel.has_shortage() {
        details.push(format!("Shortage of {} staff", personnel.shortage));
    }
    if throughput.has_shortage() {
        details.push(format!(
            "Shortage of {} wagons",
            throughput.additional_wagons_needed
        ));
    }
    if personnel.has_surplus() {
        details.push(format!("Surplus of {} staff", personnel.surplus));
    }
    if throughput.has_surplus() {
        details.push(format!(
            "Excess capacity: can serve {} clients (target: {})",
            throughput.total_clients_per_day, throughput.daily_clients_target
        ));
    }

    details.join(", ")
}
