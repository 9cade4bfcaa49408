//! Ride throughput against daily demand.

use coasters_fleet::domain::aggregates::{Coaster, Wagon};
use coasters_fleet::domain::identifiers::WagonId;
use serde::Serialize;

/// Fixed pause after every trip, in minutes.
pub const BREAK_TIME_MINUTES: u64 = 5;

/// Demand is only considered over-served beyond this multiple of the target.
pub const SURPLUS_FACTOR: u64 = 2;

/// Daily capacity of a single wagon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WagonThroughput {
    /// The wagon identifier.
    pub wagon_id: WagonId,
    /// Minutes per cycle: travel time rounded up to the minute plus the break.
    pub trip_time_minutes: u64,
    /// Whole trips that fit in the operating window.
    pub trips_per_day: u64,
    /// Riders carried per day.
    pub clients_per_day: u64,
}

impl WagonThroughput {
    /// Computes the daily capacity of `wagon` on a track of `coaster`.
    #[must_use]
    pub fn new(wagon: &Wagon, coaster: &Coaster) -> Self {
        let travel_seconds = wagon.speed().time_to_travel(&coaster.track_length());
        let trip_time_minutes = travel_seconds.div_ceil(60) + BREAK_TIME_MINUTES;
        let operating_minutes = u64::from(coaster.operating_hours().duration_in_minutes());
        let seats = u64::from(wagon.seat_count().seats());

        Self {
            wagon_id: wagon.id().clone(),
            trip_time_minutes,
            trips_per_day: operating_minutes / trip_time_minutes,
            clients_per_day: clients_per_day(operating_minutes, seats, trip_time_minutes),
        }
    }
}

/// Fleet-wide throughput of one coaster compared with its daily target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThroughputAnalysis {
    pub wagons: Vec<WagonThroughput>,
    pub total_seat_capacity: u64,
    pub total_trips_per_day: u64,
    pub total_clients_per_day: u64,
    pub daily_clients_target: u64,
    /// Riders the fleet cannot serve.
    pub shortage: u64,
    /// Riders served beyond twice the target.
    pub surplus: u64,
    /// Extra average wagons that would cover the shortage.
    ///
    /// Stays zero for a coaster with no wagons, since there is no average
    /// wagon to extrapolate from.
    pub additional_wagons_needed: u64,
}

impl ThroughputAnalysis {
    /// Analyzes every attached wagon of `coaster`.
    #[must_use]
    pub fn of(coaster: &Coaster) -> Self {
        let wagons: Vec<WagonThroughput> = coaster
            .wagons()
            .iter()
            .map(|wagon| WagonThroughput::new(wagon, coaster))
            .collect();

        let total_seat_capacity = coaster
            .wagons()
            .iter()
            .map(|w| u64::from(w.seat_count().seats()))
            .sum();
        let total_trips_per_day = wagons.iter().map(|w| w.trips_per_day).sum();
        let total_clients_per_day = wagons.iter().map(|w| w.clients_per_day).sum();
        let daily_clients_target = u64::from(coaster.daily_clients());

        let shortage = daily_clients_target.saturating_sub(total_clients_per_day);
        let surplus =
            total_clients_per_day.saturating_sub(daily_clients_target.saturating_mul(SURPLUS_FACTOR));
        let additional_wagons_needed = additional_wagons(
            shortage,
            wagons.len(),
            total_seat_capacity,
            total_trips_per_day,
        );

        Self {
            wagons,
            total_seat_capacity,
            total_trips_per_day,
            total_clients_per_day,
            daily_clients_target,
            shortage,
            surplus,
            additional_wagons_needed,
        }
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

/// Riders one wagon carries per day.
#[must_use]
pub fn clients_per_day(operating_minutes: u64, seat_capacity: u64, trip_time_minutes: u64) -> u64 {
    if trip_time_minutes == 0 {
        return 0;
    }
    (operating_minutes / trip_time_minutes) * seat_capacity
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn additional_wagons(
    shortage: u64,
    wagon_count: usize,
    total_seat_capacity: u64,
    total_trips_per_day: u64,
) -> u64 {
    if shortage == 0 || wagon_count == 0 || total_seat_capacity == 0 {
        return 0;
    }

    let n = wagon_count as f64;
    let clients_per_wagon = (total_seat_capacity as f64 / n) * (total_trips_per_day as f64 / n);
    if clients_per_wagon <= 0.0 {
        return 0;
    }
    (shortage as f64 / clients_per_wagon).ceil() as u64
}

#[cfg(test)]
mod tests {
    use coasters_core::value_objects::{Distance, TimeRange};
    use coasters_fleet::domain::identifiers::CoasterId;

    use super::*;

    fn coaster(daily_clients: u32, track_m: f64, start: &str, end: &str, wagons: Vec<Wagon>) -> Coaster {
        Coaster::reconstitute(
            CoasterId::from("coaster_t"),
            16,
            daily_clients,
            Distance::new(track_m).unwrap(),
            TimeRange::new(start, end).unwrap(),
            wagons,
        )
        .unwrap()
    }

    #[test]
    fn test_two_wagons_on_reference_track() {
        // Arrange
        let wagons = vec![
            Wagon::create(32, 2.0).unwrap(),
            Wagon::create(32, 2.0).unwrap(),
        ];
        let coaster = coaster(1000, 1800.0, "08:00", "16:00", wagons);

        // Act
        let analysis = ThroughputAnalysis::of(&coaster);

        // Assert
        assert_eq!(analysis.wagons[0].trip_time_minutes, 20);
        assert_eq!(analysis.wagons[0].trips_per_day, 24);
        assert_eq!(analysis.total_seat_capacity, 64);
        assert_eq!(analysis.total_trips_per_day, 48);
        assert_eq!(analysis.total_clients_per_day, 1536);
        assert_eq!(analysis.shortage, 0);
        assert_eq!(analysis.surplus, 0);
    }

    #[test]
    fn test_shortage_estimates_additional_wagons() {
        // Arrange: each wagon serves 24 * 32 = 768 riders.
        let wagons = vec![
            Wagon::create(32, 2.0).unwrap(),
            Wagon::create(32, 2.0).unwrap(),
        ];
        let coaster = coaster(3000, 1800.0, "08:00", "16:00", wagons);

        // Act
        let analysis = ThroughputAnalysis::of(&coaster);

        // Assert
        assert_eq!(analysis.shortage, 3000 - 1536);
        assert!(analysis.has_shortage());
        assert_eq!(analysis.additional_wagons_needed, 2);
    }

    #[test]
    fn test_surplus_only_beyond_double_demand() {
        let wagons = vec![Wagon::create(32, 2.0).unwrap()];

        let at_double = ThroughputAnalysis::of(&coaster(384, 1800.0, "08:00", "16:00", wagons.clone()));
        let beyond = ThroughputAnalysis::of(&coaster(300, 1800.0, "08:00", "16:00", wagons));

        assert_eq!(at_double.surplus, 0);
        assert_eq!(beyond.surplus, 768 - 600);
    }

    #[test]
    fn test_no_wagons_reports_shortage_without_wagon_estimate() {
        let analysis = ThroughputAnalysis::of(&coaster(500, 1800.0, "08:00", "16:00", Vec::new()));

        assert_eq!(analysis.shortage, 500);
        assert_eq!(analysis.additional_wagons_needed, 0);
    }

    #[test]
    fn test_trip_longer_than_window_serves_nobody() {
        // 10 km at 1 m/s is 167 minutes of travel plus the break.
        let wagons = vec![Wagon::create(10, 1.0).unwrap()];

        let analysis = ThroughputAnalysis::of(&coaster(50, 10_000.0, "08:00", "09:00", wagons));

        assert_eq!(analysis.total_trips_per_day, 0);
        assert_eq!(analysis.shortage, 50);
        assert_eq!(analysis.additional_wagons_needed, 0);
    }

    #[test]
    fn test_clients_per_day_floors_trips() {
        assert_eq!(clients_per_day(480, 32, 20), 768);
        assert_eq!(clients_per_day(59, 10, 20), 20);
        assert_eq!(clients_per_day(59, 10, 0), 0);
    }
}
