//! Extraction over every combination of present/absent metadata fields.

use poma_media::{
    extract, Extraction, PlaybackStatus, RawMetadata, RawPlayback, UNKNOWN_ALBUM, UNKNOWN_ARTIST,
    UNKNOWN_TITLE,
};

fn metadata_with(mask: u8) -> RawMetadata {
    let pick = |bit: u8, value: &str| (mask & (1 << bit) != 0).then(|| value.to_string());
    RawMetadata {
        title: pick(0, "Title"),
        artist: pick(1, "Artist"),
        album: pick(2, "Album"),
        duration_ms: (mask & (1 << 3) != 0).then_some(60_000),
        album_art_uri: pick(4, "content://art"),
        media_id: pick(5, "spotify:episode:XYZ"),
        display_description: pick(6, "Notes"),
        genre: pick(7, "Podcast"),
    }
}

#[test]
fn test_every_partial_bundle_yields_defaults() {
    let playback = RawPlayback::new(PlaybackStatus::Playing, 1_000);

    for mask in 0..=u8::MAX {
        let metadata = metadata_with(mask);
        let snapshot = match extract("com.example.player", Some(&metadata), Some(&playback)) {
            Extraction::Snapshot(snapshot) => snapshot,
            other => panic!("mask {mask:#010b} produced {other:?}"),
        };

        let expect = |bit: u8, present: &str, sentinel: &str| {
            if mask & (1 << bit) != 0 {
                present.to_string()
            } else {
                sentinel.to_string()
            }
        };

        assert_eq!(snapshot.title, expect(0, "Title", UNKNOWN_TITLE));
        assert_eq!(snapshot.artist, expect(1, "Artist", UNKNOWN_ARTIST));
        assert_eq!(snapshot.album, expect(2, "Album", UNKNOWN_ALBUM));
        let expected_duration = if mask & (1 << 3) != 0 { 60_000 } else { 0 };
        assert_eq!(snapshot.duration_ms, expected_duration);
        assert_eq!(snapshot.media_id.is_some(), mask & (1 << 5) != 0);
        assert_eq!(snapshot.position_ms, 1_000);
    }
}
