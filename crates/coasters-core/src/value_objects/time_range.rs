//! Daily operating window.

use chrono::NaiveTime;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::DomainError;

/// A same-day time window written as `HH:MM` 24-hour strings.
///
/// The hour may be written with one digit (`8:00`); minutes always take two.
/// The start must be strictly before the end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeRange {
    start: String,
    end: String,
    #[serde(skip)]
    start_time: NaiveTime,
    #[serde(skip)]
    end_time: NaiveTime,
}

impl TimeRange {
    /// Creates a time range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either bound is not a valid
    /// `HH:MM` time or if `end` is not after `start`.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Result<Self, DomainError> {
        let start = start.into();
        let end = end.into();
        let start_time = parse_clock_time(&start)?;
        let end_time = parse_clock_time(&end)?;

        if start_time >= end_time {
            return Err(DomainError::Validation(
                "end time must be after start time".into(),
            ));
        }

        Ok(Self {
            start,
            end,
            start_time,
            end_time,
        })
    }

    /// Returns the start time as given.
    #[must_use]
    pub fn start(&self) -> &str {
        &self.start
    }

    /// Returns the end time as given.
    #[must_use]
    pub fn end(&self) -> &str {
        &self.end
    }

    /// Returns the length of the window in minutes.
    #[must_use]
    pub fn duration_in_minutes(&self) -> u32 {
        let minutes = (self.end_time - self.start_time).num_minutes();
        // Construction guarantees 0 < minutes < 24 * 60.
        u32::try_from(minutes).unwrap_or(0)
    }
}

impl<'de> Deserialize<'de> for TimeRange {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            start: String,
            end: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::new(raw.start, raw.end).map_err(serde::de::Error::custom)
    }
}

fn parse_clock_time(value: &str) -> Result<NaiveTime, DomainError> {
    let invalid = || {
        DomainError::Validation(format!(
            "invalid time format: {value}, expected HH:MM"
        ))
    };

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    let well_formed = (1..=2).contains(&hours.len())
        && minutes.len() == 2
        && hours.bytes().chain(minutes.bytes()).all(|b| b.is_ascii_digit());
    if !well_formed {
        return Err(invalid());
    }

    let hour: u32 = hours.parse().map_err(|_| invalid())?;
    let minute: u32 = minutes.parse().map_err(|_| invalid())?;
    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid)
}
