//! Shared test helpers for API integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use coasters_core::bus::MessageBus;
use coasters_fleet::domain::repository::CoasterRepository;
use coasters_test_support::{InMemoryCoasterRepository, fixed_clock};
use http_body_util::BodyExt;
use tower::ServiceExt;

use coasters_app::build_router;
use coasters_app::state::AppState;

/// Build the full app over an in-memory repository with no bus attached.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(InMemoryCoasterRepository::new()))
}

/// Build the full app over an in-memory repository that publishes to `bus`.
pub fn build_test_app_on_bus(bus: Arc<dyn MessageBus>) -> (Router, Arc<InMemoryCoasterRepository>) {
    let repository = Arc::new(InMemoryCoasterRepository::with_bus(bus));
    (build_test_app_with(repository.clone()), repository)
}

/// Build the full app over `repository` with a fixed clock.
pub fn build_test_app_with(repository: Arc<dyn CoasterRepository>) -> Router {
    build_router(AppState::new(Arc::new(fixed_clock()), repository))
}

/// A registration body for a coaster with the given staff and demand.
pub fn coaster_body(personnel_count: u32, daily_clients: u32) -> serde_json::Value {
    serde_json::json!({
        "personnel_count": personnel_count,
        "daily_clients": daily_clients,
        "track_length_meters": 1800,
        "operating_hours_start": "8:00",
        "operating_hours_end": "16:00",
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body_bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body_bytes).unwrap_or(serde_json::Value::Null);

    (status, json)
}

fn with_json(method: &str, uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

fn without_body(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Send a POST request with a JSON body and return the response.
pub async fn post_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, with_json("POST", uri, body)).await
}

/// Send a PUT request with a JSON body and return the response.
pub async fn put_json(
    app: Router,
    uri: &str,
    body: &serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    send(app, with_json("PUT", uri, body)).await
}

/// Send a GET request and return the response.
pub async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, without_body("GET", uri)).await
}

/// Send a DELETE request and return the response.
pub async fn delete_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
    send(app, without_body("DELETE", uri)).await
}
