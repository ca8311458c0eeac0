//! Metadata extraction.
//!
//! Platform calls may fail one field at a time (a binder hiccup, a missing
//! bundle entry). Extraction treats every field independently: a failed read
//! is logged and the field falls back to its default, the rest of the
//! snapshot is still built.

use crate::snapshot::{
    MediaSessionSnapshot, PlaybackStatus, UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_TITLE,
};
use serde::{Deserialize, Serialize};

/// Metadata fields read from a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    Title,
    Artist,
    Album,
    Duration,
    AlbumArtUri,
    MediaId,
    DisplayDescription,
    Genre,
}

impl MetadataKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetadataKey::Title => "title",
            MetadataKey::Artist => "artist",
            MetadataKey::Album => "album",
            MetadataKey::Duration => "duration",
            MetadataKey::AlbumArtUri => "album_art_uri",
            MetadataKey::MediaId => "media_id",
            MetadataKey::DisplayDescription => "display_description",
            MetadataKey::Genre => "genre",
        }
    }
}

impl std::fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single platform read failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReadError {
    #[error("metadata field '{key}' unreadable: {reason}")]
    Field { key: MetadataKey, reason: String },

    #[error("playback state unreadable: {0}")]
    Playback(String),
}

/// Read access to a session's metadata bundle.
pub trait MetadataReader: Send + Sync {
    fn read_string(&self, key: MetadataKey) -> Result<Option<String>, ReadError>;

    fn read_long(&self, key: MetadataKey) -> Result<Option<i64>, ReadError>;
}

/// Read access to a session's playback state.
pub trait PlaybackReader: Send + Sync {
    fn status(&self) -> Result<PlaybackStatus, ReadError>;

    fn position_ms(&self) -> Result<i64, ReadError>;
}

/// Metadata copied out of the platform in one go.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMetadata {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
    #[serde(default)]
    pub duration_ms: Option<i64>,
    #[serde(default)]
    pub album_art_uri: Option<String>,
    #[serde(default)]
    pub media_id: Option<String>,
    #[serde(default)]
    pub display_description: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl MetadataReader for RawMetadata {
    fn read_string(&self, key: MetadataKey) -> Result<Option<String>, ReadError> {
        let value = match key {
            MetadataKey::Title => &self.title,
            MetadataKey::Artist => &self.artist,
            MetadataKey::Album => &self.album,
            MetadataKey::AlbumArtUri => &self.album_art_uri,
            MetadataKey::MediaId => &self.media_id,
            MetadataKey::DisplayDescription => &self.display_description,
            MetadataKey::Genre => &self.genre,
            MetadataKey::Duration => {
                return Err(ReadError::Field {
                    key,
                    reason: "not a string field".to_string(),
                })
            }
        };
        Ok(value.clone())
    }

    fn read_long(&self, key: MetadataKey) -> Result<Option<i64>, ReadError> {
        match key {
            MetadataKey::Duration => Ok(self.duration_ms),
            _ => Err(ReadError::Field {
                key,
                reason: "not a numeric field".to_string(),
            }),
        }
    }
}

/// Playback state copied out of the platform in one go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPlayback {
    pub status: PlaybackStatus,
    pub position_ms: i64,
}

impl RawPlayback {
    pub fn new(status: PlaybackStatus, position_ms: i64) -> Self {
        Self {
            status,
            position_ms,
        }
    }
}

impl PlaybackReader for RawPlayback {
    fn status(&self) -> Result<PlaybackStatus, ReadError> {
        Ok(self.status)
    }

    fn position_ms(&self) -> Result<i64, ReadError> {
        Ok(self.position_ms)
    }
}

/// Result of reading one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// The session has something to show.
    Snapshot(MediaSessionSnapshot),

    /// No metadata and the session explicitly reports STOPPED.
    Stopped,

    /// Neither metadata nor playback state could be read.
    ///
    /// Usually a transient race while the session is being replaced; callers
    /// must not treat this as the session going away.
    Unavailable,
}

impl Extraction {
    pub fn snapshot(&self) -> Option<&MediaSessionSnapshot> {
        match self {
            Extraction::Snapshot(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn into_snapshot(self) -> Option<MediaSessionSnapshot> {
        match self {
            Extraction::Snapshot(snapshot) => Some(snapshot),
            _ => None,
        }
    }
}

/// Build a snapshot from whatever the session exposes.
///
/// Never fails: unreadable strings become sentinel values, unreadable or
/// negative numerics become 0 and unreadable optionals stay `None`.
pub fn extract(
    app_id: &str,
    metadata: Option<&dyn MetadataReader>,
    playback: Option<&dyn PlaybackReader>,
) -> Extraction {
    if metadata.is_none() && playback.is_none() {
        tracing::debug!(app_id, "no metadata or playback state");
        return Extraction::Unavailable;
    }

    let status = playback.map(|p| match p.status() {
        Ok(status) => status,
        Err(e) => {
            tracing::warn!(app_id, error = %e, "playback status read failed");
            PlaybackStatus::Other
        }
    });

    let Some(metadata) = metadata else {
        if status == Some(PlaybackStatus::Stopped) {
            tracing::debug!(app_id, "session stopped without metadata");
            return Extraction::Stopped;
        }
        let mut snapshot = MediaSessionSnapshot::empty(app_id);
        snapshot.status = status.unwrap_or_default();
        snapshot.position_ms = playback.map(|p| read_position(app_id, p)).unwrap_or(0);
        return Extraction::Snapshot(snapshot);
    };

    let snapshot = MediaSessionSnapshot {
        source_app_id: app_id.to_string(),
        title: read_string(app_id, metadata, MetadataKey::Title)
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        artist: read_string(app_id, metadata, MetadataKey::Artist)
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        album: read_string(app_id, metadata, MetadataKey::Album)
            .unwrap_or_else(|| UNKNOWN_ALBUM.to_string()),
        duration_ms: read_long(app_id, metadata, MetadataKey::Duration),
        position_ms: playback.map(|p| read_position(app_id, p)).unwrap_or(0),
        status: status.unwrap_or_default(),
        album_art_uri: read_string(app_id, metadata, MetadataKey::AlbumArtUri),
        media_id: read_string(app_id, metadata, MetadataKey::MediaId),
        episode_description: read_string(app_id, metadata, MetadataKey::DisplayDescription),
        genre: read_string(app_id, metadata, MetadataKey::Genre),
    };

    tracing::debug!(
        app_id,
        title = %snapshot.title,
        status = %snapshot.status,
        position_ms = snapshot.position_ms,
        "media info extracted"
    );

    Extraction::Snapshot(snapshot)
}

fn read_string(app_id: &str, metadata: &dyn MetadataReader, key: MetadataKey) -> Option<String> {
    match metadata.read_string(key) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(app_id, %key, error = %e, "metadata read failed");
            None
        }
    }
}

fn read_long(app_id: &str, metadata: &dyn MetadataReader, key: MetadataKey) -> u64 {
    match metadata.read_long(key) {
        Ok(value) => clamp_non_negative(value.unwrap_or(0)),
        Err(e) => {
            tracing::warn!(app_id, %key, error = %e, "metadata read failed");
            0
        }
    }
}

fn read_position(app_id: &str, playback: &dyn PlaybackReader) -> u64 {
    match playback.position_ms() {
        Ok(position) => clamp_non_negative(position),
        Err(e) => {
            tracing::warn!(app_id, error = %e, "playback position read failed");
            0
        }
    }
}

fn clamp_non_negative(value: i64) -> u64 {
    value.max(0) as u64
}
