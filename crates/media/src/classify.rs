//! Podcast heuristics and app naming.
//!
//! Pure domain logic - no I/O, no platform dependencies.

use crate::snapshot::MediaSessionSnapshot;

/// Package of the Spotify Android app.
pub const SPOTIFY_PACKAGE: &str = "com.spotify.music";

pub const SPOTIFY_EPISODE_PREFIX: &str = "spotify:episode:";

/// Spotify episodes carry long show notes; music tracks rarely do.
pub const SPOTIFY_DESCRIPTION_MIN_LEN: usize = 100;

/// Known players and their display names, matched by package substring.
const APP_NAMES: &[(&str, &str)] = &[
    ("spotify", "Spotify"),
    ("google.android.apps.podcasts", "Google Podcasts"),
    ("pocketcasts", "Pocket Casts"),
    ("overcast", "Overcast"),
    ("podcast", "Podcasts"),
    ("youtube", "YouTube"),
];

/// Decide whether a snapshot looks like podcast content.
///
/// Any one of these is enough:
/// 1. the app id mentions "podcast"
/// 2. the genre mentions "podcast"
/// 3. an episode description is present
/// 4. the app is Spotify and the description is longer than
///    [`SPOTIFY_DESCRIPTION_MIN_LEN`]
///
/// This is a heuristic; false negatives are expected.
pub fn is_podcast_content(snapshot: &MediaSessionSnapshot) -> bool {
    let description_len = snapshot
        .episode_description
        .as_deref()
        .map(|d| d.chars().count())
        .unwrap_or(0);

    contains_ignore_case(&snapshot.source_app_id, "podcast")
        || snapshot
            .genre
            .as_deref()
            .is_some_and(|g| contains_ignore_case(g, "podcast"))
        || description_len > 0
        || (snapshot.source_app_id.contains("spotify")
            && description_len > SPOTIFY_DESCRIPTION_MIN_LEN)
}

pub fn is_spotify_app(package: &str) -> bool {
    package.contains("spotify")
}

pub fn is_youtube_app(package: &str) -> bool {
    package.contains("youtube")
}

/// Episode id from a `spotify:episode:<id>` media id.
pub fn spotify_episode_id(media_id: &str) -> Option<&str> {
    media_id
        .strip_prefix(SPOTIFY_EPISODE_PREFIX)
        .and_then(|rest| rest.split(['?', '#']).next())
        .filter(|id| !id.is_empty())
}

/// Human-readable name for a player package.
pub fn app_display_name(package: &str) -> String {
    if let Some((_, name)) = APP_NAMES.iter().find(|(needle, _)| package.contains(needle)) {
        return (*name).to_string();
    }

    let last = package.rsplit('.').next().unwrap_or(package);
    let mut chars = last.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Format a playback position as `m:ss` or `h:mm:ss`.
pub fn format_position(position_ms: u64) -> String {
    let total_seconds = position_ms / 1000;
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{}:{:02}", minutes, seconds)
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}
