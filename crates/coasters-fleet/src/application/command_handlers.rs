//! Command handlers for the Fleet Management context.
//!
//! This module contains application-level command handler functions that
//! orchestrate domain logic: load aggregate, execute command, save snapshot.

use coasters_core::clock::Clock;
use coasters_core::command::Command;
use coasters_core::error::DomainError;
use coasters_core::event::DomainEvent;
use coasters_core::value_objects::TimeRange;
use tracing::info;
use uuid::Uuid;

use crate::domain::aggregates::{Coaster, Wagon};
use crate::domain::commands::{AddWagon, RegisterCoaster, RemoveWagon, UpdateCoaster};
use crate::domain::events::CoasterEvent;
use crate::domain::identifiers::{CoasterId, WagonId};
use crate::domain::repository::CoasterRepository;

/// Result of a successfully handled command.
#[derive(Debug)]
pub struct CoasterCommandResult {
    /// The aggregate ID affected by the command.
    pub coaster_id: CoasterId,
    /// The wagon created by the command, if any.
    pub wagon_id: Option<WagonId>,
    /// IDs of the events released and published on save.
    pub event_ids: Vec<Uuid>,
}

impl CoasterCommandResult {
    fn new(coaster_id: CoasterId, wagon_id: Option<WagonId>, events: &[CoasterEvent]) -> Self {
        Self {
            coaster_id,
            wagon_id,
            event_ids: events.iter().map(|e| e.metadata().event_id).collect(),
        }
    }
}

fn require_positive(field: &str, value: u32) -> Result<u32, DomainError> {
    if value == 0 {
        return Err(DomainError::Validation(format!(
            "{field} must be greater than 0"
        )));
    }
    Ok(value)
}

/// Loads a coaster or reports it missing.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no record exists.
pub(crate) async fn load(
    coaster_id: &CoasterId,
    repo: &dyn CoasterRepository,
) -> Result<Coaster, DomainError> {
    repo.find_by_id(coaster_id)
        .await?
        .ok_or_else(|| DomainError::AggregateNotFound(coaster_id.to_string()))
}

/// Handles the `RegisterCoaster` command: creates the aggregate and saves it.
///
/// # Errors
///
/// Returns `DomainError::Validation` for invalid input, or the repository
/// error if saving fails.
pub async fn handle_register_coaster(
    command: &RegisterCoaster,
    clock: &dyn Clock,
    repo: &dyn CoasterRepository,
) -> Result<CoasterCommandResult, DomainError> {
    let mut coaster = Coaster::create(
        require_positive("personnel_count", command.personnel_count)?,
        require_positive("daily_clients", command.daily_clients)?,
        command.track_length_meters,
        &command.operating_hours_start,
        &command.operating_hours_end,
        clock,
    )?;

    let released = repo.save(&mut coaster).await?;

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        coaster_id = %coaster.id(),
        "coaster registered"
    );

    Ok(CoasterCommandResult::new(coaster.id().clone(), None, &released))
}

/// Handles the `UpdateCoaster` command.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the coaster does not exist,
/// `DomainError::Validation` for invalid input, or the repository error.
pub async fn handle_update_coaster(
    command: &UpdateCoaster,
    clock: &dyn Clock,
    repo: &dyn CoasterRepository,
) -> Result<CoasterCommandResult, DomainError> {
    let personnel_count = require_positive("personnel_count", command.personnel_count)?;
    let daily_clients = require_positive("daily_clients", command.daily_clients)?;
    let operating_hours = TimeRange::new(
        command.operating_hours_start.clone(),
        command.operating_hours_end.clone(),
    )?;

    let mut coaster = load(&command.coaster_id, repo).await?;
    coaster.update(personnel_count, daily_clients, operating_hours, clock);
    let released = repo.save(&mut coaster).await?;

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        coaster_id = %command.coaster_id,
        "coaster updated"
    );

    Ok(CoasterCommandResult::new(
        command.coaster_id.clone(),
        None,
        &released,
    ))
}

/// Handles the `AddWagon` command: creates a wagon and attaches it.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the coaster does not exist,
/// `DomainError::Validation` for invalid wagon input, or the repository error.
pub async fn handle_add_wagon(
    command: &AddWagon,
    clock: &dyn Clock,
    repo: &dyn CoasterRepository,
) -> Result<CoasterCommandResult, DomainError> {
    let wagon = Wagon::create(command.seat_count, command.speed_mps)?;
    let wagon_id = wagon.id().clone();

    let mut coaster = load(&command.coaster_id, repo).await?;
    coaster.add_wagon(wagon, clock)?;
    let released = repo.save(&mut coaster).await?;

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        coaster_id = %command.coaster_id,
        wagon_id = %wagon_id,
        "wagon added"
    );

    Ok(CoasterCommandResult::new(
        command.coaster_id.clone(),
        Some(wagon_id),
        &released,
    ))
}

/// Handles the `RemoveWagon` command.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if the coaster does not exist,
/// `DomainError::WagonNotFound` if the wagon is not attached, or the
/// repository error.
pub async fn handle_remove_wagon(
    command: &RemoveWagon,
    clock: &dyn Clock,
    repo: &dyn CoasterRepository,
) -> Result<CoasterCommandResult, DomainError> {
    let mut coaster = load(&command.coaster_id, repo).await?;
    coaster.remove_wagon(&command.wagon_id, clock)?;
    let released = repo.save(&mut coaster).await?;

    info!(
        command_type = command.command_type(),
        correlation_id = %command.correlation_id(),
        coaster_id = %command.coaster_id,
        wagon_id = %command.wagon_id,
        "wagon removed"
    );

    Ok(CoasterCommandResult::new(
        command.coaster_id.clone(),
        None,
        &released,
    ))
}
