//! Integration tests for the fleet management endpoints.

mod common;

use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use coasters_analysis::application::analysis_service::CoasterAnalysisService;
use coasters_analysis::application::listener::ConfigurationChangedListener;
use coasters_core::bus::{BusMessage, MessageBus, MessageStream};
use coasters_core::channels;
use coasters_test_support::{FailingCoasterRepository, InMemoryMessageBus, fixed_clock};
use futures::StreamExt;
use serde_json::json;
use tokio::sync::broadcast;

async fn register(app: axum::Router, personnel_count: u32, daily_clients: u32) -> String {
    let (status, json) = common::post_json(
        app,
        "/api/coasters",
        &common::coaster_body(personnel_count, daily_clients),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["data"]["id"].as_str().unwrap().to_owned()
}

async fn next_on(stream: &mut MessageStream, topic: &str) -> BusMessage {
    tokio::time::timeout(Duration::from_secs(2), async {
        loop {
            let message = stream.next().await.unwrap().unwrap();
            if message.topic == topic {
                return message;
            }
        }
    })
    .await
    .unwrap()
}

#[tokio::test]
async fn test_register_and_fetch_coaster() {
    // Arrange
    let app = common::build_test_app();
    let coaster_id = register(app.clone(), 16, 60_000).await;

    // Act
    let (status, json) = common::get_json(app, &format!("/api/coasters/{coaster_id}")).await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "success");
    assert_eq!(json["data"]["id"], coaster_id.as_str());
    assert_eq!(json["data"]["personnel_count"], 16);
    assert_eq!(json["data"]["daily_clients"], 60_000);
    assert_eq!(json["data"]["operating_hours"]["start"], "8:00");
    assert_eq!(json["data"]["wagons"], json!([]));
}

#[tokio::test]
async fn test_list_coasters_returns_every_registered_coaster() {
    // Arrange
    let app = common::build_test_app();
    let first = register(app.clone(), 4, 900).await;
    let second = register(app.clone(), 6, 1200).await;

    // Act
    let (status, json) = common::get_json(app, "/api/coasters").await;

    // Assert
    assert_eq!(status, StatusCode::OK);
    let mut ids: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["id"].as_str().unwrap())
        .collect();
    ids.sort_unstable();
    let mut expected = vec![first.as_str(), second.as_str()];
    expected.sort_unstable();
    assert_eq!(ids, expected);
}

#[tokio::test]
async fn test_register_rejects_zero_personnel() {
    let app = common::build_test_app();

    let (status, json) =
        common::post_json(app, "/api/coasters", &common::coaster_body(0, 900)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_add_wagon_rejects_invalid_seat_count() {
    // Arrange
    let app = common::build_test_app();
    let coaster_id = register(app.clone(), 4, 900).await;

    // Act
    let (status, json) = common::post_json(
        app,
        &format!("/api/coasters/{coaster_id}/wagons"),
        &json!({ "seat_count": 0, "speed_mps": 1.2 }),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn test_update_unknown_coaster_returns_404() {
    let app = common::build_test_app();

    let (status, json) = common::put_json(
        app,
        "/api/coasters/coaster_missing",
        &json!({
            "personnel_count": 4,
            "daily_clients": 900,
            "operating_hours_start": "08:00",
            "operating_hours_end": "16:00",
        }),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "aggregate_not_found");
}

#[tokio::test]
async fn test_remove_unknown_wagon_returns_404() {
    // Arrange
    let app = common::build_test_app();
    let coaster_id = register(app.clone(), 4, 900).await;

    // Act
    let (status, json) = common::delete_json(
        app,
        &format!("/api/coasters/{coaster_id}/wagons/wagon_missing"),
    )
    .await;

    // Assert
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "wagon_not_found");
}

#[tokio::test]
async fn test_store_failure_returns_500() {
    let app = common::build_test_app_with(Arc::new(FailingCoasterRepository));

    let (status, json) = common::get_json(app, "/api/coasters").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "infrastructure_error");
}

#[tokio::test]
async fn test_configuration_changes_flow_to_status_updates() {
    // Arrange
    let bus = Arc::new(InMemoryMessageBus::default());
    let (app, repository) = common::build_test_app_on_bus(bus.clone());
    let analysis = CoasterAnalysisService::new(bus.clone(), Arc::new(fixed_clock()));
    let listener = ConfigurationChangedListener::new(repository, analysis, bus.clone())
        .with_retry_delay(Duration::from_millis(10));
    let mut observer = bus
        .subscribe(&[channels::OPERATIONAL_STATUS_UPDATES, channels::CAPACITY_PROBLEMS])
        .await
        .unwrap();
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);
    let listening = tokio::spawn(async move { listener.listen(shutdown_rx).await });
    // Give the listener time to subscribe.
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Act
    let coaster_id = register(app.clone(), 1, 900).await;
    let registered = next_on(&mut observer, channels::OPERATIONAL_STATUS_UPDATES).await;
    let problem = next_on(&mut observer, channels::CAPACITY_PROBLEMS).await;

    let (status, _) = common::post_json(
        app,
        &format!("/api/coasters/{coaster_id}/wagons"),
        &json!({ "seat_count": 32, "speed_mps": 1.2 }),
    )
    .await;
    let with_wagon = next_on(&mut observer, channels::OPERATIONAL_STATUS_UPDATES).await;

    let _ = shutdown_tx.send(());
    listening.await.unwrap();

    // Assert
    assert_eq!(registered.payload["id"], coaster_id.as_str());
    assert_eq!(registered.payload["wagons"]["count"], 0);
    assert_eq!(registered.payload["personnel"]["required"], 1);
    assert_eq!(registered.payload["status"], "PROBLEM! Resource shortage");
    assert_eq!(problem.payload["coaster_id"], coaster_id.as_str());
    assert_eq!(problem.payload["timestamp"], fixed_clock().0.timestamp());

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(with_wagon.payload["wagons"]["count"], 1);
    assert_eq!(with_wagon.payload["personnel"]["available"], 1);
    assert_eq!(with_wagon.payload["personnel"]["required"], 3);
    assert_eq!(with_wagon.payload["status"], "PROBLEM! Resource shortage");
}
