//! Domain event system — decoupled observation of review turns.
//!
//! Events are published when a turn moves through its lifecycle.
//! Interested components (the CLI's verbose output, tests) subscribe
//! without the orchestrator knowing about them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::broadcast;

/// All domain events in the system.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DomainEvent {
    /// A turn was submitted to the orchestrator
    TurnStarted {
        mode: String,
        attachments: usize,
        history_len: usize,
        timestamp: DateTime<Utc>,
    },

    /// The model answered
    ModelResponded {
        model: String,
        tokens_used: u32,
        tool_calls: usize,
        timestamp: DateTime<Utc>,
    },

    /// A generated file was encoded
    FileGenerated {
        name: String,
        mime_type: String,
        bytes: usize,
        timestamp: DateTime<Utc>,
    },

    /// A generated file could not be encoded and was left out
    FileDropped {
        name: String,
        reason: String,
        timestamp: DateTime<Utc>,
    },

    /// The turn finished with a reply
    TurnCompleted {
        text_len: usize,
        files: usize,
        timestamp: DateTime<Utc>,
    },

    /// The turn ended in an error message
    TurnFailed {
        error_message: String,
        timestamp: DateTime<Utc>,
    },
}

/// A broadcast-based event bus for domain events.
///
/// Uses `tokio::sync::broadcast` for multi-consumer pub/sub.
pub struct EventBus {
    sender: broadcast::Sender<Arc<DomainEvent>>,
}

impl EventBus {
    /// Create a new event bus with the given capacity.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish an event to all subscribers.
    pub fn publish(&self, event: DomainEvent) {
        // No subscribers is fine
        let _ = self.sender.send(Arc::new(event));
    }

    /// Subscribe to receive events.
    pub fn subscribe(&self) -> broadcast::Receiver<Arc<DomainEvent>> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn event_bus_publish_subscribe() {
        let bus = EventBus::new(16);
        let mut rx = bus.subscribe();

        bus.publish(DomainEvent::FileGenerated {
            name: "report.doc".into(),
            mime_type: "application/msword".into(),
            bytes: 42,
            timestamp: Utc::now(),
        });

        let event = rx.recv().await.unwrap();
        match event.as_ref() {
            DomainEvent::FileGenerated { name, bytes, .. } => {
                assert_eq!(name, "report.doc");
                assert_eq!(*bytes, 42);
            }
            _ => panic!("Expected FileGenerated event"),
        }
    }

    #[test]
    fn event_bus_no_subscribers_doesnt_panic() {
        let bus = EventBus::new(16);
        bus.publish(DomainEvent::TurnFailed {
            error_message: "no subscribers".into(),
            timestamp: Utc::now(),
        });
    }
}
