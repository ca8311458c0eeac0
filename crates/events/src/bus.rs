//! Event bus abstraction for decoupled event emission.
//!
//! Producers hold an [`EventBusRef`] and never know who listens. The UI
//! binding implements [`EventBus`] on top of its own dispatcher; tests use
//! [`InMemoryEventBus`] to assert on what was emitted.

use serde::Serialize;
use std::sync::{Arc, Mutex};

/// Sink for POMA events, keyed by topic (see [`crate::event_names`]).
pub trait EventBus: Send + Sync {
    fn emit(&self, topic: &str, payload: serde_json::Value);
}

pub type EventBusRef = Arc<dyn EventBus>;

/// Serialize a typed event and emit it.
///
/// Serialization failures are logged and the event is dropped; emission is
/// never allowed to fail the producer.
pub fn emit_json<T: Serialize>(bus: &dyn EventBus, topic: &str, event: &T) {
    match serde_json::to_value(event) {
        Ok(payload) => bus.emit(topic, payload),
        Err(e) => tracing::warn!(topic, error = %e, "failed to serialize event"),
    }
}

/// One event recorded by [`InMemoryEventBus`].
#[derive(Debug, Clone)]
pub struct EmittedEvent {
    pub topic: String,
    pub payload: serde_json::Value,
}

/// Records every event, for tests and diagnostics screens.
#[derive(Default)]
pub struct InMemoryEventBus {
    events: Mutex<Vec<EmittedEvent>>,
}

impl InMemoryEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<EmittedEvent> {
        self.lock().clone()
    }

    pub fn events_for(&self, topic: &str) -> Vec<EmittedEvent> {
        self.lock()
            .iter()
            .filter(|e| e.topic == topic)
            .cloned()
            .collect()
    }

    /// Most recent payload emitted on `topic`.
    pub fn last_for(&self, topic: &str) -> Option<serde_json::Value> {
        self.lock()
            .iter()
            .rev()
            .find(|e| e.topic == topic)
            .map(|e| e.payload.clone())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<EmittedEvent>> {
        self.events.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl EventBus for InMemoryEventBus {
    fn emit(&self, topic: &str, payload: serde_json::Value) {
        self.lock().push(EmittedEvent {
            topic: topic.to_string(),
            payload,
        });
    }
}

/// Discards everything.
pub struct NullEventBus;

impl EventBus for NullEventBus {
    fn emit(&self, _topic: &str, _payload: serde_json::Value) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{event_names, PermissionChangedEvent};
    use serde_json::json;

    #[test]
    fn test_in_memory_event_bus() {
        let bus = InMemoryEventBus::new();

        bus.emit(event_names::SESSION_CHANGED, json!({"current": null}));
        bus.emit(event_names::JUMP_RESOLVED, json!({"outcome": "seeked"}));
        bus.emit(event_names::SESSION_CHANGED, json!({"current": {"title": "Ep1"}}));

        assert_eq!(bus.len(), 3);
        assert_eq!(bus.events_for(event_names::SESSION_CHANGED).len(), 2);
        assert_eq!(bus.events_for("missing:topic").len(), 0);
        assert_eq!(
            bus.last_for(event_names::SESSION_CHANGED).unwrap()["current"]["title"],
            "Ep1"
        );
    }

    #[test]
    fn test_emit_json_typed_event() {
        let bus = InMemoryEventBus::new();
        let event = PermissionChangedEvent {
            granted: false,
            timestamp_ms: 7,
        };

        emit_json(&bus, event_names::SESSION_PERMISSION, &event);

        let payload = bus.last_for(event_names::SESSION_PERMISSION).unwrap();
        assert_eq!(payload["granted"], false);
        assert_eq!(payload["timestamp_ms"], 7);
    }

    #[test]
    fn test_clear() {
        let bus = InMemoryEventBus::new();
        bus.emit("test:event", json!({}));
        assert!(!bus.is_empty());

        bus.clear();
        assert!(bus.is_empty());
    }

    #[test]
    fn test_null_event_bus() {
        let bus = NullEventBus;
        bus.emit("test:event", json!({"data": "ignored"}));
    }
}
