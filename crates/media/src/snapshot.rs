//! Normalized media session state.

use crate::bookmark::BookmarkDraft;
use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";
pub const UNKNOWN_PODCAST: &str = "Unknown Podcast";
pub const UNKNOWN_EPISODE: &str = "Unknown Episode";

/// Transport state reported by a media session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackStatus {
    Playing,
    Paused,
    Stopped,
    /// Buffering, connecting, skipping, error and anything else.
    #[default]
    Other,
}

impl PlaybackStatus {
    /// Map a raw platform state code (Android `PlaybackState.STATE_*`).
    pub fn from_platform_code(code: i32) -> Self {
        match code {
            1 => PlaybackStatus::Stopped,
            2 => PlaybackStatus::Paused,
            3 => PlaybackStatus::Playing,
            _ => PlaybackStatus::Other,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlaybackStatus::Playing => "playing",
            PlaybackStatus::Paused => "paused",
            PlaybackStatus::Stopped => "stopped",
            PlaybackStatus::Other => "other",
        }
    }
}

impl std::fmt::Display for PlaybackStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One immutable reading of a platform media session.
///
/// A new snapshot is built on every session or metadata callback and
/// supersedes the previous one for the same app; snapshots are never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaSessionSnapshot {
    /// Package of the publishing app (e.g. "com.spotify.music")
    pub source_app_id: String,

    pub title: String,
    pub artist: String,
    pub album: String,

    pub duration_ms: u64,
    pub position_ms: u64,

    pub status: PlaybackStatus,

    #[serde(default)]
    pub album_art_uri: Option<String>,

    /// Opaque app-specific content id (e.g. "spotify:episode:<id>")
    #[serde(default)]
    pub media_id: Option<String>,

    #[serde(default)]
    pub episode_description: Option<String>,

    #[serde(default)]
    pub genre: Option<String>,
}

impl MediaSessionSnapshot {
    /// Snapshot with sentinel strings and zeroed numerics.
    pub fn empty(source_app_id: impl Into<String>) -> Self {
        Self {
            source_app_id: source_app_id.into(),
            title: UNKNOWN_TITLE.to_string(),
            artist: UNKNOWN_ARTIST.to_string(),
            album: UNKNOWN_ALBUM.to_string(),
            duration_ms: 0,
            position_ms: 0,
            status: PlaybackStatus::Other,
            album_art_uri: None,
            media_id: None,
            episode_description: None,
            genre: None,
        }
    }

    pub fn is_playing(&self) -> bool {
        self.status == PlaybackStatus::Playing
    }

    pub fn is_podcast_content(&self) -> bool {
        crate::classify::is_podcast_content(self)
    }

    /// Bookmark fields for the current position.
    pub fn to_bookmark_draft(&self) -> BookmarkDraft {
        let podcast_name = if self.artist.is_empty() {
            UNKNOWN_PODCAST.to_string()
        } else {
            self.artist.clone()
        };
        let episode_name = if self.title.is_empty() {
            UNKNOWN_EPISODE.to_string()
        } else {
            self.title.clone()
        };

        BookmarkDraft {
            podcast_name,
            episode_name,
            timestamp_ms: self.position_ms,
            media_id: self.media_id.clone(),
            source_app_package: Some(self.source_app_id.clone()),
            album_art_uri: self.album_art_uri.clone(),
        }
    }

    /// Multi-line summary used in diagnostics screens and logs.
    pub fn describe(&self) -> String {
        let mut lines = vec![
            format!("App: {}", crate::classify::app_display_name(&self.source_app_id)),
            format!("Title: {}", self.title),
            format!("Artist: {}", self.artist),
            format!(
                "Position: {}",
                crate::classify::format_position(self.position_ms)
            ),
            format!("Playing: {}", self.is_playing()),
            format!("Duration: {}ms", self.duration_ms),
            format!("Album: {}", self.album),
        ];

        if let Some(ref genre) = self.genre {
            lines.push(format!("Genre: {}", genre));
        }
        if let Some(ref description) = self.episode_description {
            lines.push(format!("Description: {}", description));
        }
        lines.push(format!("Podcast: {}", self.is_podcast_content()));

        lines.join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_codes() {
        assert_eq!(PlaybackStatus::from_platform_code(1), PlaybackStatus::Stopped);
        assert_eq!(PlaybackStatus::from_platform_code(2), PlaybackStatus::Paused);
        assert_eq!(PlaybackStatus::from_platform_code(3), PlaybackStatus::Playing);
        assert_eq!(PlaybackStatus::from_platform_code(6), PlaybackStatus::Other);
        assert_eq!(PlaybackStatus::from_platform_code(-1), PlaybackStatus::Other);
    }

    #[test]
    fn test_bookmark_draft_uses_artist_and_title() {
        let mut snapshot = MediaSessionSnapshot::empty("com.spotify.music");
        snapshot.artist = "The Show".into();
        snapshot.title = "Ep1".into();
        snapshot.position_ms = 61_000;
        snapshot.media_id = Some("spotify:episode:ABC".into());

        let draft = snapshot.to_bookmark_draft();
        assert_eq!(draft.podcast_name, "The Show");
        assert_eq!(draft.episode_name, "Ep1");
        assert_eq!(draft.timestamp_ms, 61_000);
        assert_eq!(draft.media_id.as_deref(), Some("spotify:episode:ABC"));
        assert_eq!(draft.source_app_package.as_deref(), Some("com.spotify.music"));
    }

    #[test]
    fn test_bookmark_draft_fills_blank_names() {
        let mut snapshot = MediaSessionSnapshot::empty("com.example.player");
        snapshot.artist.clear();
        snapshot.title.clear();

        let draft = snapshot.to_bookmark_draft();
        assert_eq!(draft.podcast_name, UNKNOWN_PODCAST);
        assert_eq!(draft.episode_name, UNKNOWN_EPISODE);
    }

    #[test]
    fn test_describe_mentions_position() {
        let mut snapshot = MediaSessionSnapshot::empty("com.spotify.music");
        snapshot.position_ms = 125_000;
        snapshot.status = PlaybackStatus::Playing;

        let text = snapshot.describe();
        assert!(text.contains("App: Spotify"));
        assert!(text.contains("Position: 2:05"));
        assert!(text.contains("Playing: true"));
    }

    #[test]
    fn test_status_serializes_lowercase() {
        let json = serde_json::to_string(&PlaybackStatus::Playing).unwrap();
        assert_eq!(json, "\"playing\"");
    }
}
