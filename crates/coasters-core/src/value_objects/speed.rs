//! Wagon speed.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

use super::Distance;

/// A strictly positive speed in meters per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Speed {
    meters_per_second: f64,
}

impl Speed {
    /// Creates a speed of `meters_per_second`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless the value is finite and positive.
    pub fn new(meters_per_second: f64) -> Result<Self, DomainError> {
        if !meters_per_second.is_finite() || meters_per_second <= 0.0 {
            return Err(DomainError::Validation("speed must be a positive number".into()));
        }
        Ok(Self { meters_per_second })
    }

    /// Returns the speed in meters per second.
    #[must_use]
    pub fn meters_per_second(&self) -> f64 {
        self.meters_per_second
    }

    /// Returns the speed in kilometers per hour.
    #[must_use]
    pub fn kilometers_per_hour(&self) -> f64 {
        self.meters_per_second * 3.6
    }

    /// Whole seconds needed to cover `distance`, rounded up.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn time_to_travel(&self, distance: &Distance) -> u64 {
        // Both operands are positive and finite, so the quotient is too.
        (distance.meters() / self.meters_per_second).ceil() as u64
    }
}

impl<'de> Deserialize<'de> for Speed {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            meters_per_second: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.meters_per_second).map_err(serde::de::Error::custom)
    }
}
