//! Example: track an in-memory Spotify session and jump back to a bookmark.
//!
//! Run with: cargo run -p poma-application --example jump_demo

use poma_application::{init_logging, Poma, PomaConfig};
use poma_events::InMemoryEventBus;
use poma_jump::InMemoryLauncher;
use poma_media::{BookmarkRecord, PlaybackStatus, RawMetadata, RawPlayback, SPOTIFY_PACKAGE};
use poma_session::fake::{InMemorySession, InMemorySessionSource};
use poma_session::SessionHandle;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging(Some("info,poma=debug"));

    let source = Arc::new(InMemorySessionSource::granted());
    let launcher = Arc::new(InMemoryLauncher::with_schemes(&["spotify"]));
    let bus = Arc::new(InMemoryEventBus::new());
    let mut poma = Poma::new(PomaConfig::default(), source.clone(), launcher.clone(), bus.clone());

    println!("=== Jump-back Example ===\n");

    let spotify = Arc::new(InMemorySession::new(SPOTIFY_PACKAGE));
    spotify.set_metadata(Some(RawMetadata {
        title: Some("Ep1".into()),
        artist: Some("Show".into()),
        media_id: Some("spotify:episode:ABC".into()),
        display_description: Some("An episode about bookmarks".into()),
        ..Default::default()
    }));
    spotify.set_playback(Some(RawPlayback::new(PlaybackStatus::Playing, 125_000)));
    source.replace_sessions(vec![spotify.clone() as SessionHandle]);

    poma.start()?;

    if let Some(current) = poma.current() {
        println!("{}\n", current.describe());
    }

    let draft = poma
        .bookmark_from_current()
        .ok_or_else(|| anyhow::anyhow!("nothing playing"))?;
    println!("Bookmarked {} at {} ms", draft.episode_name, draft.timestamp_ms);

    let outcome = poma.resolve_jump(BookmarkRecord::from(draft.clone())).await;
    println!("Live session:   {:?}", outcome);

    source.set_active(Vec::new());
    let outcome = poma.resolve_jump(BookmarkRecord::from(draft)).await;
    println!("No session:     {:?}", outcome);

    let outcome = poma
        .resolve_jump(BookmarkRecord::new("Show", "Ep1", 60_000))
        .await;
    println!("No media id:    {:?}", outcome);

    println!("\nEvents emitted: {}", bus.len());
    poma.shutdown().await;
    Ok(())
}
