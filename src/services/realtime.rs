use std::collections::HashMap;
use std::pin::Pin;
use std::sync::Mutex;
use std::task::{Context, Poll};

use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tokio_stream::wrappers::errors::BroadcastStreamRecvError;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

const TOPIC_CAPACITY: usize = 256;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// In-process fan-out for push updates (availability changes, booking status
/// notifications). Subscriptions are explicit and cancel by dropping; there
/// are no ambient global listeners.
pub struct RealtimeHub {
    topics: Mutex<HashMap<String, broadcast::Sender<TopicEvent>>>,
}

impl RealtimeHub {
    pub fn new() -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
        }
    }

    pub fn subscribe(&self, topic: &str) -> TopicSubscription {
        let mut topics = self.topics.lock().unwrap();
        let sender = topics
            .entry(topic.to_string())
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0);
        TopicSubscription {
            topic: topic.to_string(),
            inner: BroadcastStream::new(sender.subscribe()),
        }
    }

    /// Delivers an event to current subscribers; returns how many received
    /// it. A topic with no remaining subscribers is dropped.
    pub fn publish(&self, topic: &str, payload: serde_json::Value) -> usize {
        let mut topics = self.topics.lock().unwrap();
        let Some(sender) = topics.get(topic) else {
            return 0;
        };
        let event = TopicEvent {
            topic: topic.to_string(),
            payload,
        };
        match sender.send(event) {
            Ok(count) => count,
            Err(_) => {
                topics.remove(topic);
                0
            }
        }
    }
}

impl Default for RealtimeHub {
    fn default() -> Self {
        Self::new()
    }
}

pub struct TopicSubscription {
    topic: String,
    inner: BroadcastStream<TopicEvent>,
}

impl TopicSubscription {
    pub fn topic(&self) -> &str {
        &self.topic
    }

    pub async fn next_event(&mut self) -> Option<TopicEvent> {
        self.next().await
    }

    /// Dropping the subscription cancels it; this just makes that explicit.
    pub fn unsubscribe(self) {}
}

impl Stream for TopicSubscription {
    type Item = TopicEvent;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<TopicEvent>> {
        loop {
            match Pin::new(&mut self.inner).poll_next(cx) {
                Poll::Ready(Some(Ok(event))) => return Poll::Ready(Some(event)),
                // Skip over lagged gaps; subscribers only care about fresh state
                Poll::Ready(Some(Err(BroadcastStreamRecvError::Lagged(_)))) => continue,
                Poll::Ready(None) => return Poll::Ready(None),
                Poll::Pending => return Poll::Pending,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_published_event() {
        let hub = RealtimeHub::new();
        let mut sub = hub.subscribe("availability:pro-1");

        let delivered = hub.publish(
            "availability:pro-1",
            serde_json::json!({"date": "2025-06-10"}),
        );
        assert_eq!(delivered, 1);

        let event = sub.next_event().await.unwrap();
        assert_eq!(event.topic, "availability:pro-1");
        assert_eq!(event.payload["date"], "2025-06-10");
    }

    #[tokio::test]
    async fn test_topics_are_isolated() {
        let hub = RealtimeHub::new();
        let _other = hub.subscribe("availability:pro-2");
        let mut sub = hub.subscribe("availability:pro-1");

        hub.publish("availability:pro-2", serde_json::json!({}));
        hub.publish("availability:pro-1", serde_json::json!({"n": 1}));

        let event = sub.next_event().await.unwrap();
        assert_eq!(event.payload["n"], 1);
    }

    #[tokio::test]
    async fn test_unsubscribe_stops_delivery() {
        let hub = RealtimeHub::new();
        let sub = hub.subscribe("bookings:pro-1");
        sub.unsubscribe();

        assert_eq!(hub.publish("bookings:pro-1", serde_json::json!({})), 0);
    }

    #[tokio::test]
    async fn test_publish_without_subscribers_is_a_no_op() {
        let hub = RealtimeHub::new();
        assert_eq!(hub.publish("nobody-home", serde_json::json!({})), 0);
    }
}
