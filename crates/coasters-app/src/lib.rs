//! Coaster operations: process entry points.
//!
//! Shared wiring for the three binaries: `coasters-api` serves the fleet
//! management HTTP API, `coasters-listener` re-analyzes coasters on
//! configuration changes, and `coasters-monitor` renders the live dashboard.

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod routes;
pub mod shutdown;
pub mod state;
pub mod telemetry;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Builds the full HTTP application.
pub fn build_router(app_state: state::AppState) -> Router {
    Router::new()
        .merge(routes::health::router())
        .nest("/api/coasters", routes::coasters::router())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
