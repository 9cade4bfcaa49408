//! Aggregate roots for the Fleet Management context.

use std::collections::HashSet;

use coasters_core::aggregate::AggregateRoot;
use coasters_core::clock::Clock;
use coasters_core::error::DomainError;
use coasters_core::event::EventMetadata;
use coasters_core::value_objects::{Capacity, Distance, Speed, TimeRange};
use serde::{Deserialize, Deserializer, Serialize};

use super::events::{CoasterConfigurationChanged, CoasterEvent, CoasterEventKind};
use super::identifiers::{CoasterId, WagonId};

/// A ride vehicle attached to a coaster. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wagon {
    id: WagonId,
    seat_count: Capacity,
    speed: Speed,
}

impl Wagon {
    /// Builds a wagon from already-validated parts.
    #[must_use]
    pub fn new(id: WagonId, seat_count: Capacity, speed: Speed) -> Self {
        Self {
            id,
            seat_count,
            speed,
        }
    }

    /// Creates a wagon with a freshly generated identity.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the seat count or speed is invalid.
    pub fn create(seat_count: i64, speed_mps: f64) -> Result<Self, DomainError> {
        Ok(Self::new(
            WagonId::generate(),
            Capacity::new(seat_count)?,
            Speed::new(speed_mps)?,
        ))
    }

    /// Returns the wagon identity.
    #[must_use]
    pub fn id(&self) -> &WagonId {
        &self.id
    }

    /// Returns the seat count.
    #[must_use]
    pub fn seat_count(&self) -> Capacity {
        self.seat_count
    }

    /// Returns the travel speed.
    #[must_use]
    pub fn speed(&self) -> Speed {
        self.speed
    }
}

/// The aggregate root for a roller-coaster attraction.
///
/// Wagons are kept in insertion order. Every mutation records exactly one
/// configuration-changed event; the buffer is only emptied by
/// [`AggregateRoot::release_events`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coaster {
    id: CoasterId,
    personnel_count: u32,
    daily_clients: u32,
    track_length: Distance,
    operating_hours: TimeRange,
    wagons: Vec<Wagon>,
    /// Events pending release. Never persisted.
    #[serde(skip)]
    pending_events: Vec<CoasterEvent>,
}

impl Coaster {
    /// Rebuilds a coaster from stored state without recording any event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if two wagons share an identity.
    pub fn reconstitute(
        id: CoasterId,
        personnel_count: u32,
        daily_clients: u32,
        track_length: Distance,
        operating_hours: TimeRange,
        wagons: Vec<Wagon>,
    ) -> Result<Self, DomainError> {
        let mut seen = HashSet::with_capacity(wagons.len());
        if let Some(duplicate) = wagons.iter().find(|w| !seen.insert(w.id())) {
            return Err(DomainError::Validation(format!(
                "wagon {} appears twice on coaster {id}",
                duplicate.id()
            )));
        }

        Ok(Self {
            id,
            personnel_count,
            daily_clients,
            track_length,
            operating_hours,
            wagons,
            pending_events: Vec::new(),
        })
    }

    /// Creates a new coaster with a generated identity and records one
    /// configuration-changed event.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the track length or operating
    /// hours are invalid.
    pub fn create(
        personnel_count: u32,
        daily_clients: u32,
        track_length_meters: f64,
        operating_hours_start: &str,
        operating_hours_end: &str,
        clock: &dyn Clock,
    ) -> Result<Self, DomainError> {
        let mut coaster = Self::reconstitute(
            CoasterId::generate(),
            personnel_count,
            daily_clients,
            Distance::new(track_length_meters)?,
            TimeRange::new(operating_hours_start, operating_hours_end)?,
            Vec::new(),
        )?;
        coaster.record_configuration_changed(clock);
        Ok(coaster)
    }

    /// Returns the coaster identity.
    #[must_use]
    pub fn id(&self) -> &CoasterId {
        &self.id
    }

    /// Returns the number of staff available.
    #[must_use]
    pub fn personnel_count(&self) -> u32 {
        self.personnel_count
    }

    /// Returns the daily visitor target.
    #[must_use]
    pub fn daily_clients(&self) -> u32 {
        self.daily_clients
    }

    /// Returns the track length.
    #[must_use]
    pub fn track_length(&self) -> Distance {
        self.track_length
    }

    /// Returns the daily operating window.
    #[must_use]
    pub fn operating_hours(&self) -> &TimeRange {
        &self.operating_hours
    }

    /// Returns the attached wagons in insertion order.
    #[must_use]
    pub fn wagons(&self) -> &[Wagon] {
        &self.wagons
    }

    /// Looks up an attached wagon.
    #[must_use]
    pub fn wagon(&self, wagon_id: &WagonId) -> Option<&Wagon> {
        self.wagons.iter().find(|w| w.id() == wagon_id)
    }

    /// Replaces staffing, demand, and operating hours.
    pub fn update(
        &mut self,
        personnel_count: u32,
        daily_clients: u32,
        operating_hours: TimeRange,
        clock: &dyn Clock,
    ) {
        self.personnel_count = personnel_count;
        self.daily_clients = daily_clients;
        self.operating_hours = operating_hours;

        self.record_configuration_changed(clock);
    }

    /// Attaches a wagon.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a wagon with the same identity is
    /// already attached.
    pub fn add_wagon(&mut self, wagon: Wagon, clock: &dyn Clock) -> Result<(), DomainError> {
        if self.wagon(wagon.id()).is_some() {
            return Err(DomainError::Validation(format!(
                "wagon {} is already attached to coaster {}",
                wagon.id(),
                self.id
            )));
        }
        self.wagons.push(wagon);

        self.record_configuration_changed(clock);
        Ok(())
    }

    /// Detaches a wagon and returns it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::WagonNotFound` if no wagon with that identity is
    /// attached. The wagon set is left untouched in that case.
    pub fn remove_wagon(
        &mut self,
        wagon_id: &WagonId,
        clock: &dyn Clock,
    ) -> Result<Wagon, DomainError> {
        let position = self
            .wagons
            .iter()
            .position(|w| w.id() == wagon_id)
            .ok_or_else(|| DomainError::WagonNotFound {
                coaster_id: self.id.to_string(),
                wagon_id: wagon_id.to_string(),
            })?;
        let removed = self.wagons.remove(position);

        self.record_configuration_changed(clock);
        Ok(removed)
    }

    fn record_configuration_changed(&mut self, clock: &dyn Clock) {
        let event = CoasterEvent {
            metadata: EventMetadata::new(self.id.as_str(), clock.now()),
            kind: CoasterEventKind::ConfigurationChanged(CoasterConfigurationChanged {
                coaster_id: self.id.clone(),
            }),
        };

        self.pending_events.push(event);
    }
}

impl AggregateRoot for Coaster {
    type Event = CoasterEvent;

    fn aggregate_id(&self) -> &str {
        self.id.as_str()
    }

    fn pending_events(&self) -> &[Self::Event] {
        &self.pending_events
    }

    fn release_events(&mut self) -> Vec<Self::Event> {
        std::mem::take(&mut self.pending_events)
    }
}

impl<'de> Deserialize<'de> for Coaster {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            id: CoasterId,
            personnel_count: u32,
            daily_clients: u32,
            track_length: Distance,
            operating_hours: TimeRange,
            #[serde(default)]
            wagons: Vec<Wagon>,
        }

        let raw = Raw::deserialize(deserializer)?;
        Self::reconstitute(
            raw.id,
            raw.personnel_count,
            raw.daily_clients,
            raw.track_length,
            raw.operating_hours,
            raw.wagons,
        )
        .map_err(serde::de::Error::custom)
    }
}
