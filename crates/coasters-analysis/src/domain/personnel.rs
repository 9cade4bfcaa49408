//! Staffing requirements.
//!
//! One operator runs the coaster and every attached wagon needs two
//! attendants.

use coasters_fleet::domain::aggregates::Coaster;
use serde::Serialize;

/// Staff needed to run a coaster with no wagons.
pub const BASE_PERSONNEL: u32 = 1;

/// Additional staff needed per attached wagon.
pub const PERSONNEL_PER_WAGON: u32 = 2;

/// Required versus available staffing for one coaster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PersonnelAnalysis {
    /// Staff needed for the current wagon count.
    pub required_personnel: u32,
    /// Staff on the coaster's roster.
    pub available_personnel: u32,
    /// Missing staff, zero when fully staffed.
    pub shortage: u32,
    /// Idle staff, zero when not over-staffed.
    pub surplus: u32,
}

impl PersonnelAnalysis {
    /// Analyzes `available` staff against `wagon_count` wagons.
    #[must_use]
    pub fn new(wagon_count: usize, available: u32) -> Self {
        let required = required_personnel(wagon_count);
        Self {
            required_personnel: required,
            available_personnel: available,
            shortage: required.saturating_sub(available),
            surplus: available.saturating_sub(required),
        }
    }

    /// Analyzes the coaster's roster against its attached wagons.
    #[must_use]
    pub fn of(coaster: &Coaster) -> Self {
        Self::new(coaster.wagons().len(), coaster.personnel_count())
    }

    #[must_use]
    pub fn has_shortage(&self) -> bool {
        self.shortage > 0
    }

    #[must_use]
    pub fn has_surplus(&self) -> bool {
        self.surplus > 0
    }
}

/// Staff required to run `wagon_count` wagons.
#[must_use]
pub fn required_personnel(wagon_count: usize) -> u32 {
    let wagons = u32::try_from(wagon_count).unwrap_or(u32::MAX);
    BASE_PERSONNEL.saturating_add(wagons.saturating_mul(PERSONNEL_PER_WAGON))
}

/// Staff to hire so that `current` staff can run `wagon_count` wagons.
#[must_use]
pub fn additional_personnel_needed(current: u32, wagon_count: usize) -> u32 {
    required_personnel(wagon_count).saturating_sub(current)
}

/// Largest wagon count `available` staff can run.
///
/// A roster without the base operator supports zero wagons.
#[must_use]
pub fn max_wagons(available: u32) -> u32 {
    available.saturating_sub(BASE_PERSONNEL) / PERSONNEL_PER_WAGON
}
