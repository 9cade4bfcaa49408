//! Test message buses: `MessageBus` implementations for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use coasters_core::bus::{BusMessage, MessageBus, MessageStream};
use coasters_core::error::DomainError;
use futures::stream;
use tokio::sync::broadcast;

/// An in-process bus backed by a tokio broadcast channel.
///
/// Matches the pub/sub semantics of the production bus: subscribers only
/// see messages published after they subscribed, and a publish with no
/// subscriber is lost.
#[derive(Debug)]
pub struct InMemoryMessageBus {
    sender: broadcast::Sender<BusMessage>,
}

impl InMemoryMessageBus {
    /// Creates a bus that buffers up to `capacity` undelivered messages per
    /// subscriber.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }
}

impl Default for InMemoryMessageBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[async_trait]
impl MessageBus for InMemoryMessageBus {
    async fn publish(&self, topic: &str, payload: &serde_json::Value) -> Result<(), DomainError> {
        // No receivers is not an error for fire-and-forget delivery.
        let _ = self.sender.send(BusMessage {
            topic: topic.to_owned(),
            payload: payload.clone(),
        });
        Ok(())
    }

    async fn subscribe(&self, topics: &[&str]) -> Result<MessageStream, DomainError> {
        let receiver = self.sender.subscribe();
        let topics: Vec<String> = topics.iter().map(|t| (*t).to_owned()).collect();

        let stream = stream::unfold((receiver, topics), |(mut receiver, topics)| async move {
            loop {
                match receiver.recv().await {
                    Ok(message) if topics.contains(&message.topic) => {
                        return Some((Ok(message), (receiver, topics)));
                    }
                    Ok(_) | Err(broadcast::error::RecvError::Lagged(_)) => {}
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        });
        Ok(Box::pin(stream))
    }
}

/// A bus that records every publish and replays a scripted sequence of
/// incoming messages to the first subscriber.
///
/// Later subscriptions receive a stream that ends immediately.
#[derive(Debug, Default)]
pub struct RecordingMessageBus {
    published: Mutex<Vec<BusMessage>>,
    subscriptions: Mutex<Vec<Vec<String>>>,
    incoming: Mutex<VecDeque<Vec<Result<BusMessage, String>>>>,
    failing_topics: Vec<String>,
}

impl RecordingMessageBus {
    /// Creates a recording bus with no scripted messages.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a recording bus whose publishes to `topic` fail.
    #[must_use]
    pub fn failing_on(topic: &str) -> Self {
        Self {
            failing_topics: vec![topic.to_owned()],
            ..Self::default()
        }
    }

    /// Queues one subscription's worth of incoming messages. Each call
    /// scripts the next subscription; an `Err` item becomes an
    /// infrastructure error on the stream.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn with_incoming(self, messages: Vec<Result<BusMessage, String>>) -> Self {
        self.incoming.lock().unwrap().push_back(messages);
        self
    }

    /// Returns a snapshot of every successful publish, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn published(&self) -> Vec<BusMessage> {
        self.published.lock().unwrap().clone()
    }

    /// Returns the payloads published to `topic`, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn published_to(&self, topic: &str) -> Vec<serde_json::Value> {
        self.published
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.topic == topic)
            .map(|m| m.payload.clone())
            .collect()
    }

    /// Returns the topic lists of every `subscribe` call.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn subscriptions(&self) -> Vec<Vec<String>> {
        self.subscriptions.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageBus for RecordingMessageBus {
    async fn publish(&self, topic: &str, payload: &serde_json::Value) -> Result<(), DomainError> {
        if self.failing_topics.iter().any(|t| t == topic) {
            return Err(DomainError::Infrastructure("connection refused".into()));
        }
        self.published.lock().unwrap().push(BusMessage {
            topic: topic.to_owned(),
            payload: payload.clone(),
        });
        Ok(())
    }

    async fn subscribe(&self, topics: &[&str]) -> Result<MessageStream, DomainError> {
        self.subscriptions
            .lock()
            .unwrap()
            .push(topics.iter().map(|t| (*t).to_owned()).collect());

        let script = self.incoming.lock().unwrap().pop_front().unwrap_or_default();
        let items = script
            .into_iter()
            .map(|item| item.map_err(DomainError::Infrastructure));
        Ok(Box::pin(stream::iter(items)))
    }
}

/// A bus whose every operation fails with an infrastructure error.
#[derive(Debug)]
pub struct FailingMessageBus;

#[async_trait]
impl MessageBus for FailingMessageBus {
    async fn publish(&self, _topic: &str, _payload: &serde_json::Value) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }

    async fn subscribe(&self, _topics: &[&str]) -> Result<MessageStream, DomainError> {
        Err(DomainError::Infrastructure("connection refused".into()))
    }
}
