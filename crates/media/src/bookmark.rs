//! Bookmark projections shared by capture and jump-back.

use serde::{Deserialize, Serialize};

/// What a bookmark taken from a snapshot would contain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkDraft {
    pub podcast_name: String,
    pub episode_name: String,
    pub timestamp_ms: u64,
    #[serde(default)]
    pub media_id: Option<String>,
    #[serde(default)]
    pub source_app_package: Option<String>,
    #[serde(default)]
    pub album_art_uri: Option<String>,
}

/// A stored bookmark as jump-back sees it. Never mutated locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkRecord {
    pub podcast_name: String,
    pub episode_name: String,
    pub timestamp_ms: u64,
    #[serde(default)]
    pub media_id: Option<String>,
    #[serde(default)]
    pub source_app_package: Option<String>,
}

impl BookmarkRecord {
    pub fn new(
        podcast_name: impl Into<String>,
        episode_name: impl Into<String>,
        timestamp_ms: u64,
    ) -> Self {
        Self {
            podcast_name: podcast_name.into(),
            episode_name: episode_name.into(),
            timestamp_ms,
            media_id: None,
            source_app_package: None,
        }
    }

    pub fn with_media_id(mut self, media_id: impl Into<String>) -> Self {
        self.media_id = Some(media_id.into()).filter(|m: &String| !m.is_empty());
        self
    }

    pub fn with_source_app(mut self, package: impl Into<String>) -> Self {
        self.source_app_package = Some(package.into()).filter(|p: &String| !p.is_empty());
        self
    }
}

impl From<BookmarkDraft> for BookmarkRecord {
    fn from(draft: BookmarkDraft) -> Self {
        Self {
            podcast_name: draft.podcast_name,
            episode_name: draft.episode_name,
            timestamp_ms: draft.timestamp_ms,
            media_id: draft.media_id,
            source_app_package: draft.source_app_package,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_backend_json() {
        let json = r#"{
            "podcast_name": "Show",
            "episode_name": "Ep1",
            "timestamp_ms": 125000,
            "media_id": "spotify:episode:ABC",
            "source_app_package": "com.spotify.music"
        }"#;
        let record: BookmarkRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.timestamp_ms, 125_000);
        assert_eq!(record.media_id.as_deref(), Some("spotify:episode:ABC"));
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{"podcast_name": "Show", "episode_name": "Ep1", "timestamp_ms": 0}"#;
        let record: BookmarkRecord = serde_json::from_str(json).unwrap();
        assert!(record.media_id.is_none());
        assert!(record.source_app_package.is_none());
    }

    #[test]
    fn test_builder_ignores_empty_ids() {
        let record = BookmarkRecord::new("Show", "Ep1", 5).with_media_id("");
        assert!(record.media_id.is_none());
    }
}
