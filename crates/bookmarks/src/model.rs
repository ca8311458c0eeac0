//! Backend wire types.

use chrono::{DateTime, NaiveDateTime, Utc};
use poma_media::{
    is_spotify_app, spotify_episode_id, BookmarkDraft, BookmarkRecord, SPOTIFY_EPISODE_PREFIX,
    SPOTIFY_PACKAGE,
};
use serde::{Deserialize, Serialize};

/// A bookmark as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: i64,
    pub podcast_name: String,
    pub episode_name: String,
    pub timestamp_ms: u64,
    #[serde(default)]
    pub duration_ms: Option<u64>,
    #[serde(default)]
    pub spotify_episode_id: Option<String>,
    #[serde(default)]
    pub podcast_cover_url: Option<String>,
    #[serde(default)]
    pub audio_file_path: Option<String>,
    #[serde(default)]
    pub transcript_text: Option<String>,
    #[serde(default)]
    pub user_note: Option<String>,
    #[serde(default)]
    pub ai_summary: Option<String>,
    /// ISO-8601, with or without an offset.
    pub created_at: String,
    #[serde(default)]
    pub media_id: Option<String>,
    #[serde(default)]
    pub source_app_package: Option<String>,
    #[serde(default)]
    pub album_art_uri: Option<String>,
}

impl Bookmark {
    /// Parsed `created_at`; naive timestamps are taken as UTC.
    pub fn created_at_time(&self) -> Option<DateTime<Utc>> {
        let raw = self.created_at.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
            return Some(dt.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }

    /// Resolver input for this bookmark.
    ///
    /// Bookmarks created from the Spotify Web API only carry
    /// `spotify_episode_id`; those are mapped onto the Spotify app.
    pub fn record(&self) -> BookmarkRecord {
        let legacy_spotify = self
            .spotify_episode_id
            .as_deref()
            .filter(|id| !id.is_empty());

        let media_id = non_empty(&self.media_id)
            .map(str::to_string)
            .or_else(|| legacy_spotify.map(|id| format!("{}{}", SPOTIFY_EPISODE_PREFIX, id)));
        let source_app_package = non_empty(&self.source_app_package)
            .map(str::to_string)
            .or_else(|| legacy_spotify.map(|_| SPOTIFY_PACKAGE.to_string()));

        BookmarkRecord {
            podcast_name: self.podcast_name.clone(),
            episode_name: self.episode_name.clone(),
            timestamp_ms: self.timestamp_ms,
            media_id,
            source_app_package,
        }
    }

    /// Whether a left swipe on this bookmark should jump anywhere.
    pub fn can_jump_to_source(&self) -> bool {
        let record = self.record();
        record.media_id.is_some()
            && record
                .source_app_package
                .as_deref()
                .is_some_and(is_spotify_app)
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

/// Body of `POST /api/v1/bookmarks/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookmarkRequest {
    pub podcast_name: String,
    pub episode_name: String,
    pub timestamp_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub spotify_episode_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub media_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub source_app_package: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub album_art_uri: Option<String>,
}

impl CreateBookmarkRequest {
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.user_note = Some(note.into());
        self
    }
}

impl From<BookmarkDraft> for CreateBookmarkRequest {
    fn from(draft: BookmarkDraft) -> Self {
        let spotify_episode_id = draft
            .media_id
            .as_deref()
            .and_then(spotify_episode_id)
            .map(str::to_string);

        Self {
            podcast_name: draft.podcast_name,
            episode_name: draft.episode_name,
            timestamp_ms: draft.timestamp_ms,
            spotify_episode_id,
            user_note: None,
            media_id: draft.media_id,
            source_app_package: draft.source_app_package,
            album_art_uri: draft.album_art_uri,
        }
    }
}

/// Body of `PUT /api/v1/bookmarks/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateBookmarkRequest {
    pub transcript_text: String,
}
