//! Shared event contracts for POMA.
//!
//! Session tracking, jump-back and the bookmark list run in different
//! places; these DTOs are the formal payloads they exchange, so that a
//! UI layer (or a test) can subscribe without knowing the producers.
//!
//! Also provides the `EventBus` trait for decoupled event emission.

mod bus;

pub use bus::{emit_json, EmittedEvent, EventBus, EventBusRef, InMemoryEventBus, NullEventBus};

use poma_media::MediaSessionSnapshot;
use serde::{Deserialize, Serialize};

/// Event emitted when the published "current" media session changes.
///
/// Producers: session tracker
/// Consumers: UI, jump-back resolver diagnostics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionChangedEvent {
    /// Currently surfaced session, `None` when nothing is tracked.
    #[serde(default)]
    pub current: Option<MediaSessionSnapshot>,
    /// Whether the current session looks like a podcast.
    #[serde(default)]
    pub is_podcast: bool,
    /// Apps with a tracked session after the change.
    #[serde(default)]
    pub tracked_apps: Vec<String>,
    /// Timestamp in milliseconds.
    #[serde(default)]
    pub timestamp_ms: i64,
}

/// Event emitted when notification access is granted or revoked.
///
/// Producers: session tracker, refresher
/// Consumers: UI (persistent banner)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionChangedEvent {
    pub granted: bool,
    #[serde(default)]
    pub timestamp_ms: i64,
}

/// Event emitted when a jump-back attempt finishes.
///
/// Producers: jump-back dispatcher
/// Consumers: UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JumpResolvedEvent {
    pub podcast_name: String,
    pub episode_name: String,
    /// "seeked", "deep_linked", "web_fallback" or "failed".
    pub outcome: String,
    /// URI, URL or app id the jump landed on.
    #[serde(default)]
    pub target: Option<String>,
    /// Position the jump resumed at, after rewind.
    #[serde(default)]
    pub position_ms: Option<u64>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Event emitted when a swipe on a bookmark card resolves to an intent.
///
/// Producers: bookmark gesture handling
/// Consumers: UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkIntentEvent {
    #[serde(default)]
    pub bookmark_id: Option<i64>,
    pub episode_name: String,
    /// "delete", "edit", "filter_by_episode" or "jump_to_source".
    pub intent: String,
}

/// Event names as constants to prevent typos.
pub mod event_names {
    /// Current session changed.
    pub const SESSION_CHANGED: &str = "session:changed";
    /// Notification access changed.
    pub const SESSION_PERMISSION: &str = "session:permission";
    /// Jump-back attempt finished.
    pub const JUMP_RESOLVED: &str = "jump:resolved";
    /// Bookmark swipe intent.
    pub const BOOKMARK_INTENT: &str = "bookmark:intent";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_changed_deserialize_minimal() {
        let json = r#"{"current": null}"#;
        let event: SessionChangedEvent = serde_json::from_str(json).unwrap();
        assert!(event.current.is_none());
        assert!(!event.is_podcast);
        assert!(event.tracked_apps.is_empty());
    }

    #[test]
    fn test_jump_resolved_roundtrip_fields() {
        let event = JumpResolvedEvent {
            podcast_name: "Show".into(),
            episode_name: "Ep1".into(),
            outcome: "deep_linked".into(),
            target: Some("spotify:episode:ABC?t=115".into()),
            position_ms: Some(115_000),
            error: None,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["outcome"], "deep_linked");
        assert_eq!(value["position_ms"], 115_000);
    }
}
