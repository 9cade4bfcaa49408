//! Query handlers for the Fleet Management context.
//!
//! This module contains query handlers that load coaster snapshots and
//! return read-only view DTOs.

use coasters_core::error::DomainError;
use serde::Serialize;

use crate::application::command_handlers;
use crate::domain::aggregates::{Coaster, Wagon};
use crate::domain::identifiers::{CoasterId, WagonId};
use crate::domain::repository::CoasterRepository;

/// Read-only view of a wagon.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WagonView {
    /// The wagon identifier.
    pub id: WagonId,
    /// Seats in the wagon.
    pub seat_count: u32,
    /// Speed in meters per second.
    pub speed: f64,
}

impl From<&Wagon> for WagonView {
    fn from(wagon: &Wagon) -> Self {
        Self {
            id: wagon.id().clone(),
            seat_count: wagon.seat_count().seats(),
            speed: wagon.speed().meters_per_second(),
        }
    }
}

/// Opening and closing time, `HH:MM`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OperatingHoursView {
    /// Opening time.
    pub start: String,
    /// Closing time.
    pub end: String,
}

/// Read-only view of a coaster aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoasterView {
    /// The coaster identifier.
    pub id: CoasterId,
    /// Staff available.
    pub personnel_count: u32,
    /// Daily visitor target.
    pub daily_clients: u32,
    /// Track length in meters.
    pub track_length: f64,
    /// Daily operating window.
    pub operating_hours: OperatingHoursView,
    /// Wagons in insertion order.
    pub wagons: Vec<WagonView>,
}

impl From<&Coaster> for CoasterView {
    fn from(coaster: &Coaster) -> Self {
        Self {
            id: coaster.id().clone(),
            personnel_count: coaster.personnel_count(),
            daily_clients: coaster.daily_clients(),
            track_length: coaster.track_length().meters(),
            operating_hours: OperatingHoursView {
                start: coaster.operating_hours().start().to_owned(),
                end: coaster.operating_hours().end().to_owned(),
            },
            wagons: coaster.wagons().iter().map(WagonView::from).collect(),
        }
    }
}

/// Retrieves a coaster by its identity.
///
/// # Errors
///
/// Returns `DomainError::AggregateNotFound` if no record exists for the ID.
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn get_coaster_by_id(
    coaster_id: &CoasterId,
    repo: &dyn CoasterRepository,
) -> Result<CoasterView, DomainError> {
    let coaster = command_handlers::load(coaster_id, repo).await?;
    Ok(CoasterView::from(&coaster))
}

/// Lists all known coasters, sorted by identity for determinism.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the store fails.
pub async fn list_coasters(repo: &dyn CoasterRepository) -> Result<Vec<CoasterView>, DomainError> {
    let mut views: Vec<CoasterView> = repo
        .find_all()
        .await?
        .iter()
        .map(CoasterView::from)
        .collect();
    views.sort_by(|a, b| a.id.cmp(&b.id));
    Ok(views)
}

#[cfg(test)]
mod tests {
    use coasters_core::error::DomainError;
    use coasters_core::value_objects::{Distance, TimeRange};

    use super::*;
    use crate::application::testing::{MockCoasterRepository, fixed_clock};

    fn coaster_with_id(id: &str, wagons: Vec<Wagon>) -> Coaster {
        Coaster::reconstitute(
            CoasterId::from(id),
            16,
            60_000,
            Distance::new(1800.0).unwrap(),
            TimeRange::new("08:00", "16:00").unwrap(),
            wagons,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_get_coaster_by_id_returns_view_with_wagons() {
        // Arrange
        let wagon = Wagon::create(32, 1.2).unwrap();
        let wagon_id = wagon.id().clone();
        let repo = MockCoasterRepository::with(coaster_with_id("coaster_a", vec![wagon]));

        // Act
        let view = get_coaster_by_id(&CoasterId::from("coaster_a"), &repo)
            .await
            .unwrap();

        // Assert
        assert_eq!(view.personnel_count, 16);
        assert_eq!(view.operating_hours.start, "08:00");
        assert_eq!(view.wagons.len(), 1);
        assert_eq!(view.wagons[0].id, wagon_id);
        assert_eq!(view.wagons[0].seat_count, 32);
    }

    #[tokio::test]
    async fn test_get_coaster_by_id_returns_not_found_for_unknown_id() {
        let repo = MockCoasterRepository::default();

        let result = get_coaster_by_id(&CoasterId::from("coaster_missing"), &repo).await;

        assert!(matches!(result, Err(DomainError::AggregateNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_coasters_sorts_by_id() {
        // Arrange
        let repo = MockCoasterRepository::with_all(vec![
            coaster_with_id("coaster_b", Vec::new()),
            coaster_with_id("coaster_a", Vec::new()),
        ]);

        // Act
        let views = list_coasters(&repo).await.unwrap();

        // Assert
        let ids: Vec<&str> = views.iter().map(|v| v.id.as_str()).collect();
        assert_eq!(ids, vec!["coaster_a", "coaster_b"]);
    }

    #[test]
    fn test_coaster_view_serializes_wire_shape() {
        let coaster = Coaster::create(3, 100, 250.5, "09:00", "17:00", &fixed_clock()).unwrap();

        let json = serde_json::to_value(CoasterView::from(&coaster)).unwrap();

        assert_eq!(json["track_length"], 250.5);
        assert_eq!(json["operating_hours"]["end"], "17:00");
        assert_eq!(json["wagons"], serde_json::json!([]));
    }
}
