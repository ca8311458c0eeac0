//! Media session domain types for POMA.
//!
//! This crate turns whatever a platform media session exposes into a
//! normalized [`MediaSessionSnapshot`] and answers simple questions about it:
//! - Is this podcast content?
//! - Which app is playing, and how should it be named?
//! - What bookmark would be taken right now?
//!
//! It also holds [`BookmarkRecord`], the read-only view of a stored bookmark
//! that jump-back works from.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Platform bindings                        │
//! │  implement MetadataReader / PlaybackReader per session        │
//! └──────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────────────────────────────────────────┐
//! │                        Domain Layer                           │
//! │  extract.rs  - per-field best-effort extraction (pure)        │
//! │  snapshot.rs - MediaSessionSnapshot, PlaybackStatus           │
//! │  classify.rs - podcast heuristics, app naming (pure)          │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use poma_media::{extract, Extraction, PlaybackStatus, RawMetadata, RawPlayback};
//!
//! let metadata = RawMetadata {
//!     title: Some("Episode 12".into()),
//!     artist: Some("The Show".into()),
//!     ..Default::default()
//! };
//! let playback = RawPlayback::new(PlaybackStatus::Playing, 42_000);
//!
//! match extract("com.example.podcasts", Some(&metadata), Some(&playback)) {
//!     Extraction::Snapshot(snapshot) => assert!(snapshot.is_podcast_content()),
//!     other => panic!("unexpected {other:?}"),
//! }
//! ```

mod bookmark;
mod classify;
mod extract;
mod snapshot;

pub use bookmark::{BookmarkDraft, BookmarkRecord};
pub use classify::{
    app_display_name, format_position, is_podcast_content, is_spotify_app, is_youtube_app,
    spotify_episode_id, SPOTIFY_DESCRIPTION_MIN_LEN, SPOTIFY_EPISODE_PREFIX, SPOTIFY_PACKAGE,
};
pub use extract::{
    extract, Extraction, MetadataKey, MetadataReader, PlaybackReader, RawMetadata, RawPlayback,
    ReadError,
};
pub use snapshot::{
    MediaSessionSnapshot, PlaybackStatus, UNKNOWN_ALBUM, UNKNOWN_ARTIST, UNKNOWN_EPISODE,
    UNKNOWN_PODCAST, UNKNOWN_TITLE,
};
