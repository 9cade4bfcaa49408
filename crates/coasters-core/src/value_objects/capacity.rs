//! Seat capacity.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// Number of seats in a wagon. Always a positive integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Capacity {
    seats: u32,
}

impl Capacity {
    /// Creates a capacity of `seats` seats.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` unless `seats` is a positive integer
    /// that fits in a `u32`.
    pub fn new(seats: i64) -> Result<Self, DomainError> {
        u32::try_from(seats)
            .ok()
            .filter(|seats| *seats > 0)
            .map(|seats| Self { seats })
            .ok_or_else(|| DomainError::Validation("capacity must be a positive integer".into()))
    }

    /// Returns the number of seats.
    #[must_use]
    pub fn seats(&self) -> u32 {
        self.seats
    }
}

impl<'de> Deserialize<'de> for Capacity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            seats: i64,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.seats).map_err(serde::de::Error::custom)
    }
}
