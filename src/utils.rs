use std::collections::HashSet;

use crate::types::{Track, TrackTableRow};

/// Drops every track whose id was already seen, keeping first occurrences
/// in their original order.
pub fn remove_duplicate_tracks(tracks: &mut Vec<Track>) {
    let mut seen_ids = HashSet::new();
    tracks.retain(|track| seen_ids.insert(track.id.clone()));
}

pub fn total_duration_ms(tracks: &[Track]) -> u64 {
    tracks.iter().map(|t| t.duration_ms).sum()
}

/// Uppercases the first character and leaves the rest alone
/// (`"hip-hop"` → `"Hip-hop"`).
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Formats milliseconds as `m:ss`, or `h:mm:ss` from one hour on.
pub fn format_duration(duration_ms: u64) -> String {
    let total_secs = duration_ms / 1000;
    let (hours, minutes, seconds) = (total_secs / 3600, (total_secs % 3600) / 60, total_secs % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

pub fn track_table_rows(tracks: &[Track]) -> Vec<TrackTableRow> {
    tracks
        .iter()
        .enumerate()
        .map(|(i, t)| TrackTableRow {
            position: i + 1,
            name: t.name.clone(),
            artists: t.artists.join(", "),
            album: t.album.clone(),
            length: format_duration(t.duration_ms),
        })
        .collect()
}
