//! Commands for the Fleet Management context.

use coasters_core::command::Command;
use uuid::Uuid;

use super::identifiers::{CoasterId, WagonId};

/// Command to register a new coaster.
#[derive(Debug, Clone)]
pub struct RegisterCoaster {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Staff available to run the coaster.
    pub personnel_count: u32,
    /// Visitors expected per day.
    pub daily_clients: u32,
    /// Track length in meters.
    pub track_length_meters: f64,
    /// Opening time, `HH:MM`.
    pub operating_hours_start: String,
    /// Closing time, `HH:MM`.
    pub operating_hours_end: String,
}

/// Command to change staffing, demand, and operating hours of a coaster.
#[derive(Debug, Clone)]
pub struct UpdateCoaster {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The coaster identifier.
    pub coaster_id: CoasterId,
    /// Staff available to run the coaster.
    pub personnel_count: u32,
    /// Visitors expected per day.
    pub daily_clients: u32,
    /// Opening time, `HH:MM`.
    pub operating_hours_start: String,
    /// Closing time, `HH:MM`.
    pub operating_hours_end: String,
}

/// Command to attach a new wagon to a coaster.
#[derive(Debug, Clone)]
pub struct AddWagon {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The coaster identifier.
    pub coaster_id: CoasterId,
    /// Seats in the wagon.
    pub seat_count: i64,
    /// Wagon speed in meters per second.
    pub speed_mps: f64,
}

/// Command to detach a wagon from a coaster.
#[derive(Debug, Clone)]
pub struct RemoveWagon {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The coaster identifier.
    pub coaster_id: CoasterId,
    /// The wagon identifier.
    pub wagon_id: WagonId,
}

macro_rules! impl_command {
    ($($ty:ident => $name:literal),* $(,)?) => {
        $(
            impl Command for $ty {
                fn command_type(&self) -> &'static str {
                    $name
                }

                fn correlation_id(&self) -> Uuid {
                    self.correlation_id
                }
            }
        )*
    };
}

impl_command! {
    RegisterCoaster => "fleet.register_coaster",
    UpdateCoaster => "fleet.update_coaster",
    AddWagon => "fleet.add_wagon",
    RemoveWagon => "fleet.remove_wagon",
}
