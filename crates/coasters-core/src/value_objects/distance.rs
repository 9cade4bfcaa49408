//! Track distance.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// A strictly positive distance in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Distance {
    meters: f64,
}

impl Distance {
    /// Creates a distance of `meters` meters.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless `meters` is finite and positive.
    pub fn new(meters: f64) -> Result<Self, DomainError> {
        if !meters.is_finite() || meters <= 0.0 {
            return Err(DomainError::Validation(
                "distance must be a positive number".into(),
            ));
        }
        Ok(Self { meters })
    }

    /// Returns the distance in meters.
    #[must_use]
    pub fn meters(&self) -> f64 {
        self.meters
    }

    /// Returns the distance in kilometers.
    #[must_use]
    pub fn kilometers(&self) -> f64 {
        self.meters / 1000.0
    }
}

impl<'de> Deserialize<'de> for Distance {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            meters: f64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.meters).map_err(serde::de::Error::custom)
    }
}
