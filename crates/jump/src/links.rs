//! Link builders for resuming a bookmark outside the live session.
//!
//! Pure functions; nothing here launches anything.

use crate::launcher::LaunchRequest;
use poma_media::{is_youtube_app, spotify_episode_id, BookmarkRecord, SPOTIFY_PACKAGE};
use url::form_urlencoded;

/// Context restored before the bookmarked moment.
pub const DEFAULT_REWIND_MS: u64 = 10_000;

pub const SPOTIFY_URI_PREFIX: &str = "spotify:";

const SPOTIFY_EPISODE_WEB: &str = "https://open.spotify.com/episode/";
const YOUTUBE_SEARCH: &str = "https://www.youtube.com/results";
const WEB_SEARCH: &str = "https://www.google.com/search";

/// Position to resume at: `timestamp_ms` minus the rewind, clamped to 0.
pub fn rewound(timestamp_ms: u64, rewind_ms: u64) -> u64 {
    timestamp_ms.saturating_sub(rewind_ms)
}

/// App-specific URI that opens the bookmarked content directly.
///
/// Spotify episode ids get a `?t=<seconds>` offset; other Spotify ids have
/// no deep link. YouTube sessions never deep link. Any other URI-like media
/// id is handed to its own app as-is.
pub fn deep_link(record: &BookmarkRecord, position_ms: u64) -> Option<LaunchRequest> {
    let media_id = record.media_id.as_deref().filter(|m| !m.is_empty())?;

    if media_id.starts_with(SPOTIFY_URI_PREFIX) {
        spotify_episode_id(media_id)?;
        let uri = format!("{}?t={}", media_id, position_ms / 1000);
        return Some(LaunchRequest::new(uri).with_package(SPOTIFY_PACKAGE));
    }

    let package = record.source_app_package.as_deref();
    if package.is_some_and(is_youtube_app) || !looks_like_uri(media_id) {
        return None;
    }

    let request = LaunchRequest::new(media_id);
    Some(match package {
        Some(package) => request.with_package(package),
        None => request,
    })
}

/// Public web URL for the bookmark; always available.
pub fn web_url(record: &BookmarkRecord, position_ms: u64) -> String {
    if let Some(id) = record.media_id.as_deref().and_then(spotify_episode_id) {
        return format!("{}{}?t={}", SPOTIFY_EPISODE_WEB, id, position_ms / 1000);
    }

    let query = search_query(record);
    if record
        .source_app_package
        .as_deref()
        .is_some_and(is_youtube_app)
    {
        return with_query(YOUTUBE_SEARCH, "search_query", &query);
    }

    with_query(WEB_SEARCH, "q", &query)
}

/// "<podcast> <episode>", skipping blank parts.
pub fn search_query(record: &BookmarkRecord) -> String {
    [record.podcast_name.trim(), record.episode_name.trim()]
        .into_iter()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn with_query(base: &str, key: &str, value: &str) -> String {
    let encoded = form_urlencoded::Serializer::new(String::new())
        .append_pair(key, value)
        .finish();
    format!("{}?{}", base, encoded)
}

fn looks_like_uri(media_id: &str) -> bool {
    match media_id.split_once(':') {
        Some((scheme, rest)) => {
            !rest.is_empty()
                && scheme
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic())
                && scheme
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
                && !media_id.contains(char::is_whitespace)
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spotify_record() -> BookmarkRecord {
        BookmarkRecord::new("Show", "Ep1", 125_000)
            .with_media_id("spotify:episode:ABC")
            .with_source_app(SPOTIFY_PACKAGE)
    }

    #[test]
    fn test_rewind_clamps_at_zero() {
        assert_eq!(rewound(125_000, DEFAULT_REWIND_MS), 115_000);
        assert_eq!(rewound(10_000, DEFAULT_REWIND_MS), 0);
        assert_eq!(rewound(4_000, DEFAULT_REWIND_MS), 0);
    }

    #[test]
    fn test_spotify_deep_link() {
        let request = deep_link(&spotify_record(), 115_000).unwrap();
        assert_eq!(request.uri, "spotify:episode:ABC?t=115");
        assert_eq!(request.package.as_deref(), Some(SPOTIFY_PACKAGE));
    }

    #[test]
    fn test_only_spotify_episodes_deep_link() {
        for media_id in ["spotify:track:XYZ", "spotify:show:XYZ"] {
            let record = BookmarkRecord::new("Show", "Ep1", 0)
                .with_media_id(media_id)
                .with_source_app(SPOTIFY_PACKAGE);
            assert!(deep_link(&record, 115_000).is_none(), "{media_id}");
        }
    }

    #[test]
    fn test_no_deep_link_without_media_id() {
        let record = BookmarkRecord::new("Show", "Ep1", 0).with_source_app(SPOTIFY_PACKAGE);
        assert!(deep_link(&record, 0).is_none());
    }

    #[test]
    fn test_other_app_uri_launched_as_is() {
        let record = BookmarkRecord::new("Show", "Ep1", 0)
            .with_media_id("pktc://podcast/abc")
            .with_source_app("au.com.shiftyjelly.pocketcasts");
        let request = deep_link(&record, 30_000).unwrap();
        assert_eq!(request.uri, "pktc://podcast/abc");
        assert_eq!(
            request.package.as_deref(),
            Some("au.com.shiftyjelly.pocketcasts")
        );
    }

    #[test]
    fn test_opaque_ids_are_not_links() {
        let record = BookmarkRecord::new("Show", "Ep1", 0).with_media_id("12345");
        assert!(deep_link(&record, 0).is_none());

        let youtube = BookmarkRecord::new("Show", "Ep1", 0)
            .with_media_id("yt:abc")
            .with_source_app("com.google.android.youtube");
        assert!(deep_link(&youtube, 0).is_none());
    }

    #[test]
    fn test_web_url_for_spotify_episode() {
        assert_eq!(
            web_url(&spotify_record(), 115_000),
            "https://open.spotify.com/episode/ABC?t=115"
        );
    }

    #[test]
    fn test_web_search_fallback() {
        let record = BookmarkRecord::new("Show", "Ep1", 0);
        let url = web_url(&record, 0);
        assert_eq!(url, "https://www.google.com/search?q=Show+Ep1");
    }

    #[test]
    fn test_youtube_search_fallback() {
        let record =
            BookmarkRecord::new("Show", "Ep 1", 0).with_source_app("com.google.android.youtube");
        assert_eq!(
            web_url(&record, 0),
            "https://www.youtube.com/results?search_query=Show+Ep+1"
        );
    }

    #[test]
    fn test_search_query_encodes_reserved_characters() {
        let record = BookmarkRecord::new("Q&A", "Part 1/2", 0);
        assert_eq!(
            web_url(&record, 0),
            "https://www.google.com/search?q=Q%26A+Part+1%2F2"
        );
    }
}
