//! Routes for the Fleet Management bounded context.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use coasters_fleet::application::query_handlers::{self, CoasterView};
use coasters_fleet::application::command_handlers;
use coasters_fleet::domain::commands;
use coasters_fleet::domain::identifiers::{CoasterId, WagonId};

use crate::error::ApiError;
use crate::routes::{ApiResponse, JsonBody};
use crate::state::AppState;

/// Request body for POST /api/coasters.
#[derive(Debug, Deserialize)]
pub struct RegisterCoasterRequest {
    pub personnel_count: u32,
    pub daily_clients: u32,
    pub track_length_meters: f64,
    pub operating_hours_start: String,
    pub operating_hours_end: String,
}

/// Request body for PUT /api/coasters/{coaster_id}.
#[derive(Debug, Deserialize)]
pub struct UpdateCoasterRequest {
    pub personnel_count: u32,
    pub daily_clients: u32,
    pub operating_hours_start: String,
    pub operating_hours_end: String,
}

/// Request body for POST /api/coasters/{coaster_id}/wagons.
#[derive(Debug, Deserialize)]
pub struct AddWagonRequest {
    pub seat_count: i64,
    pub speed_mps: f64,
}

/// Identity of a created resource.
#[derive(Debug, Serialize)]
pub struct CreatedResource {
    pub id: String,
}

/// IDs of the domain events released by a command.
#[derive(Debug, Serialize)]
pub struct CommandOutcome {
    pub event_ids: Vec<Uuid>,
}

/// POST /api/coasters
#[instrument(skip(state, request))]
async fn register_coaster(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<RegisterCoasterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResource>>), ApiError> {
    let command = commands::RegisterCoaster {
        correlation_id: Uuid::new_v4(),
        personnel_count: request.personnel_count,
        daily_clients: request.daily_clients,
        track_length_meters: request.track_length_meters,
        operating_hours_start: request.operating_hours_start,
        operating_hours_end: request.operating_hours_end,
    };

    info!(correlation_id = %command.correlation_id, "handling register_coaster command");

    let result = command_handlers::handle_register_coaster(
        &command,
        state.clock.as_ref(),
        &*state.coaster_repository,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Coaster created successfully",
            CreatedResource {
                id: result.coaster_id.to_string(),
            },
        )),
    ))
}

/// GET /api/coasters
async fn list_coasters(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CoasterView>>>, ApiError> {
    let views = query_handlers::list_coasters(&*state.coaster_repository).await?;
    Ok(Json(ApiResponse::success("Coasters retrieved", views)))
}

/// GET /api/coasters/{coaster_id}
#[instrument(skip(state))]
async fn get_coaster(
    State(state): State<AppState>,
    Path(coaster_id): Path<String>,
) -> Result<Json<ApiResponse<CoasterView>>, ApiError> {
    let view = query_handlers::get_coaster_by_id(
        &CoasterId::from(coaster_id),
        &*state.coaster_repository,
    )
    .await?;
    Ok(Json(ApiResponse::success("Coaster retrieved", view)))
}

/// PUT /api/coasters/{coaster_id}
#[instrument(skip(state, request))]
async fn update_coaster(
    State(state): State<AppState>,
    Path(coaster_id): Path<String>,
    JsonBody(request): JsonBody<UpdateCoasterRequest>,
) -> Result<Json<ApiResponse<CommandOutcome>>, ApiError> {
    let command = commands::UpdateCoaster {
        correlation_id: Uuid::new_v4(),
        coaster_id: CoasterId::from(coaster_id),
        personnel_count: request.personnel_count,
        daily_clients: request.daily_clients,
        operating_hours_start: request.operating_hours_start,
        operating_hours_end: request.operating_hours_end,
    };

    info!(correlation_id = %command.correlation_id, "handling update_coaster command");

    let result = command_handlers::handle_update_coaster(
        &command,
        state.clock.as_ref(),
        &*state.coaster_repository,
    )
    .await?;

    Ok(Json(ApiResponse::success(
        "Coaster updated successfully",
        CommandOutcome {
            event_ids: result.event_ids,
        },
    )))
}

/// POST /api/coasters/{coaster_id}/wagons
#[instrument(skip(state, request))]
async fn add_wagon(
    State(state): State<AppState>,
    Path(coaster_id): Path<String>,
    JsonBody(request): JsonBody<AddWagonRequest>,
) -> Result<(StatusCode, Json<ApiResponse<CreatedResource>>), ApiError> {
    let command = commands::AddWagon {
        correlation_id: Uuid::new_v4(),
        coaster_id: CoasterId::from(coaster_id),
        seat_count: request.seat_count,
        speed_mps: request.speed_mps,
    };

    info!(correlation_id = %command.correlation_id, "handling add_wagon command");

    let result = command_handlers::handle_add_wagon(
        &command,
        state.clock.as_ref(),
        &*state.coaster_repository,
    )
    .await?;

    let id = result
        .wagon_id
        .map(|id| id.to_string())
        .unwrap_or_default();
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(
            "Wagon added successfully",
            CreatedResource { id },
        )),
    ))
}

/// DELETE /api/coasters/{coaster_id}/wagons/{wagon_id}
#[instrument(skip(state))]
async fn remove_wagon(
    State(state): State<AppState>,
    Path((coaster_id, wagon_id)): Path<(String, String)>,
) -> Result<Json<ApiResponse<CommandOutcome>>, ApiError> {
    let command = commands::RemoveWagon {
        correlation_id: Uuid::new_v4(),
        coaster_id: CoasterId::from(coaster_id),
        wagon_id: WagonId::from(wagon_id),
    };

    info!(correlation_id = %command.correlation_id, "handling remove_wagon command");

    let result = command_handlers::handle_remove_wagon(
        &command,
        state.clock.as_ref(),
        &*state.coaster_repository,
    )
    .await?;

    Ok(Json(ApiResponse::success(
        "Wagon removed successfully",
        CommandOutcome {
            event_ids: result.event_ids,
        },
    )))
}

/// Returns the router for the fleet management context.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(register_coaster).get(list_coasters))
        .route("/{coaster_id}", get(get_coaster).put(update_coaster))
        .route("/{coaster_id}/wagons", post(add_wagon))
        .route("/{coaster_id}/wagons/{wagon_id}", delete(remove_wagon))
}
