//! Redis pub/sub implementation of the `MessageBus` trait.
//!
//! Payloads travel as JSON text. Each subscription opens its own pub/sub
//! connection; the stream ends when that connection drops.

use async_trait::async_trait;
use coasters_core::bus::{BusMessage, MessageBus, MessageStream};
use coasters_core::error::DomainError;
use futures::StreamExt;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client, Msg};
use tracing::debug;

/// Message bus over Redis `PUBLISH`/`SUBSCRIBE`.
#[derive(Clone)]
pub struct RedisMessageBus {
    client: Client,
    conn: ConnectionManager,
}

impl std::fmt::Debug for RedisMessageBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisMessageBus").finish_non_exhaustive()
    }
}

impl RedisMessageBus {
    /// Publishes through `conn` and subscribes through fresh connections
    /// opened from `client`.
    #[must_use]
    pub fn new(client: Client, conn: ConnectionManager) -> Self {
        Self { client, conn }
    }
}

/// Decodes one pub/sub message into a `BusMessage`.
///
/// # Errors
///
/// Returns `DomainError::Infrastructure` if the payload is not UTF-8 JSON.
pub fn decode_message(msg: &Msg) -> Result<BusMessage, DomainError> {
    let topic = msg.get_channel_name().to_owned();
    let text: String = msg
        .get_payload()
        .map_err(|e| DomainError::Infrastructure(format!("unreadable payload on {topic}: {e}")))?;
    let payload = serde_json::from_str(&text)
        .map_err(|e| DomainError::Infrastructure(format!("invalid JSON on {topic}: {e}")))?;
    Ok(BusMessage { topic, payload })
}

#[async_trait]
impl MessageBus for RedisMessageBus {
    async fn publish(&self, topic: &str, payload: &serde_json::Value) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        let receivers: i64 = conn
            .publish(topic, payload.to_string())
            .await
            .map_err(|e| DomainError::Infrastructure(format!("failed to publish to {topic}: {e}")))?;
        debug!(topic, receivers, "published");
        Ok(())
    }

    async fn subscribe(&self, topics: &[&str]) -> Result<MessageStream, DomainError> {
        let mut pubsub = self
            .client
            .get_async_pubsub()
            .await
            .map_err(|e| DomainError::Infrastructure(format!("failed to open pub/sub: {e}")))?;
        for topic in topics {
            pubsub.subscribe(*topic).await.map_err(|e| {
                DomainError::Infrastructure(format!("failed to subscribe to {topic}: {e}"))
            })?;
        }

        let stream = pubsub
            .into_on_message()
            .map(|msg| decode_message(&msg));
        Ok(Box::pin(stream))
    }
}

#[cfg(test)]
mod tests {
    use redis::Value;

    use super::*;

    fn message(channel: &str, payload: &str) -> Msg {
        Msg::from_value(&Value::Array(vec![
            Value::BulkString(b"message".to_vec()),
            Value::BulkString(channel.as_bytes().to_vec()),
            Value::BulkString(payload.as_bytes().to_vec()),
        ]))
        .unwrap()
    }

    #[test]
    fn test_decode_message_parses_json_payload() {
        let msg = message("capacity_problems", r#"{"coaster_id":"coaster_a"}"#);

        let decoded = decode_message(&msg).unwrap();

        assert_eq!(decoded.topic, "capacity_problems");
        assert_eq!(decoded.payload, serde_json::json!({ "coaster_id": "coaster_a" }));
    }

    #[test]
    fn test_decode_message_rejects_non_json() {
        let msg = message("capacity_problems", "not json");

        assert!(matches!(
            decode_message(&msg),
            Err(DomainError::Infrastructure(_))
        ));
    }
}
