//! Integration tests against a live Redis server.
//!
//! Run with `cargo test -p coasters-store -- --ignored` and `REDIS_URL`
//! pointing at a disposable server. Each test uses its own key prefix.

use std::sync::Arc;
use std::time::Duration;

use coasters_core::bus::MessageBus;
use coasters_core::channels;
use coasters_fleet::domain::aggregates::{Coaster, Wagon};
use coasters_fleet::domain::repository::CoasterRepository;
use coasters_store::{Keyspace, RedisCoasterRepository, RedisMessageBus, RedisSettings};
use coasters_test_support::{RecordingMessageBus, fixed_clock};
use futures::StreamExt;
use redis::AsyncCommands;
use uuid::Uuid;

fn settings() -> RedisSettings {
    RedisSettings {
        url: std::env::var("REDIS_URL").unwrap_or_else(|_| "redis://127.0.0.1:6379".to_owned()),
        database: 1,
        password: None,
    }
}

fn unique_keyspace() -> Keyspace {
    Keyspace::new(format!("coaster:test:{}:", uuid_like()))
}

fn uuid_like() -> String {
    Uuid::new_v4().simple().to_string()
}

async fn repository(bus: Arc<dyn MessageBus>) -> RedisCoasterRepository {
    repository_with_keys(bus, unique_keyspace()).await
}

async fn repository_with_keys(bus: Arc<dyn MessageBus>, keys: Keyspace) -> RedisCoasterRepository {
    let conn = settings().connection_manager().await.unwrap();
    RedisCoasterRepository::new(conn, keys, bus)
}

fn new_coaster() -> Coaster {
    let mut coaster = Coaster::create(16, 60_000, 1800.0, "08:00", "16:00", &fixed_clock()).unwrap();
    coaster
        .add_wagon(Wagon::create(32, 1.2).unwrap(), &fixed_clock())
        .unwrap();
    coaster
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_save_then_find_by_id_round_trips() {
    let bus = Arc::new(RecordingMessageBus::new());
    let repo = repository(bus.clone()).await;
    let mut coaster = new_coaster();

    let released = repo.save(&mut coaster).await.unwrap();
    let loaded = repo.find_by_id(coaster.id()).await.unwrap().unwrap();

    assert_eq!(released.len(), 2);
    assert_eq!(loaded, coaster);
    assert_eq!(bus.published_to(channels::CONFIGURATION_CHANGED).len(), 2);
    assert_eq!(bus.published_to(channels::DOMAIN_EVENTS).len(), 2);
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_delete_removes_from_find_all() {
    let repo = repository(Arc::new(RecordingMessageBus::new())).await;
    let mut kept = new_coaster();
    let mut deleted = new_coaster();
    repo.save(&mut kept).await.unwrap();
    repo.save(&mut deleted).await.unwrap();

    repo.delete(deleted.id()).await.unwrap();

    assert!(repo.find_by_id(deleted.id()).await.unwrap().is_none());
    let all = repo.find_all().await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id(), kept.id());
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_message_bus_delivers_published_payload() {
    let settings = settings();
    let bus = RedisMessageBus::new(
        settings.client().unwrap(),
        settings.connection_manager().await.unwrap(),
    );
    let topic = format!("{}:{}", channels::CAPACITY_PROBLEMS, uuid_like());
    let mut stream = bus.subscribe(&[topic.as_str()]).await.unwrap();

    bus.publish(&topic, &serde_json::json!({ "coaster_id": "coaster_a" }))
        .await
        .unwrap();

    let message = tokio::time::timeout(Duration::from_secs(5), stream.next())
        .await
        .unwrap()
        .unwrap()
        .unwrap();
    assert_eq!(message.topic, topic);
    assert_eq!(message.payload["coaster_id"], "coaster_a");
}

#[tokio::test]
#[ignore = "requires a running Redis server"]
async fn test_find_all_skips_indexed_id_without_record() {
    // Arrange
    let keys = unique_keyspace();
    let repo = repository_with_keys(Arc::new(RecordingMessageBus::new()), keys.clone()).await;
    let mut stored = new_coaster();
    repo.save(&mut stored).await.unwrap();
    let mut conn = settings().connection_manager().await.unwrap();
    let _: () = conn.sadd(keys.index_key(), "coaster_stray").await.unwrap();

    // Act
    let all = repo.find_all().await.unwrap();

    // Assert
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id(), stored.id());
}
