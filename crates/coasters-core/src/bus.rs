//! Message bus abstraction.
//!
//! Topics are plain string channels. Delivery is fire-and-forget and
//! at-most-once: a publish that reaches no subscriber is simply lost.

use std::pin::Pin;

use async_trait::async_trait;
use futures::Stream;
use serde::{Deserialize, Serialize};

use crate::channels;
use crate::error::DomainError;
use crate::event::DomainEvent;

/// A message received from a subscribed topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusMessage {
    /// Topic the message was published to.
    pub topic: String,
    /// Decoded JSON payload.
    pub payload: serde_json::Value,
}

/// Stream of messages from a subscription.
///
/// An `Err` item reports a single undecodable message; the stream stays
/// usable. The stream ending means the subscription was lost.
pub type MessageStream = Pin<Box<dyn Stream<Item = Result<BusMessage, DomainError>> + Send>>;

/// Publish/subscribe transport.
#[async_trait]
pub trait MessageBus: Send + Sync {
    /// Publishes `payload` to `topic`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the transport is unreachable.
    async fn publish(&self, topic: &str, payload: &serde_json::Value) -> Result<(), DomainError>;

    /// Subscribes to every topic in `topics` and returns one merged stream.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the subscription cannot be
    /// established.
    async fn subscribe(&self, topics: &[&str]) -> Result<MessageStream, DomainError>;
}

/// Publishes `payload` and logs instead of failing.
///
/// Returns `true` when the publish went through.
pub async fn publish_best_effort(
    bus: &dyn MessageBus,
    topic: &str,
    payload: &serde_json::Value,
) -> bool {
    match bus.publish(topic, payload).await {
        Ok(()) => true,
        Err(error) => {
            tracing::warn!(topic, %error, "publish failed; message dropped");
            false
        }
    }
}

/// Publishes each event to [`channels::DOMAIN_EVENTS`] as an envelope and to
/// the topic named after the event, in buffer order.
///
/// Failures are logged and skipped. Returns the number of successful publishes.
pub async fn publish_domain_events<E: DomainEvent>(bus: &dyn MessageBus, events: &[E]) -> usize {
    let mut delivered = 0;
    for event in events {
        match serde_json::to_value(event.envelope()) {
            Ok(envelope) => {
                if publish_best_effort(bus, channels::DOMAIN_EVENTS, &envelope).await {
                    delivered += 1;
                }
            }
            Err(error) => {
                tracing::warn!(event = event.event_name(), %error, "event envelope not serializable");
            }
        }

        if publish_best_effort(bus, event.event_name(), &event.event_data()).await {
            delivered += 1;
        }
    }
    delivered
}
