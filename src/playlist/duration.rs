//! Fitting a track list to a requested duration.
//!
//! This is a best-effort approximation, not bin packing: one extra fetch,
//! one greedy pass over it, then at most one prefix trim. The result is
//! close to the target but rarely exact, and that is accepted.

use std::collections::HashSet;

use crate::{
    error::PlaylistError,
    spotify::RecommendationSource,
    types::{RecommendationQuery, Track},
    utils::total_duration_ms,
};

/// How far past the target the fill step may go, as a factor of the target.
pub const OVERSHOOT_TOLERANCE: f64 = 1.1;

/// Size of the single extra fetch issued when the first batch is too short.
pub const EXPANSION_FETCH_LIMIT: u32 = 50;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FitOptions {
    pub overshoot_tolerance: f64,
    pub expansion_limit: u32,
}

impl Default for FitOptions {
    fn default() -> Self {
        FitOptions {
            overshoot_tolerance: OVERSHOOT_TOLERANCE,
            expansion_limit: EXPANSION_FETCH_LIMIT,
        }
    }
}

/// Appends candidates in order until the total reaches `target_ms`.
///
/// Candidates whose id is already in the list are skipped. A candidate is
/// taken only if the new total stays within `target_ms * tolerance`, and
/// the walk stops as soon as the total is at or above the target.
pub fn fill_to_target(
    mut tracks: Vec<Track>,
    candidates: Vec<Track>,
    target_ms: u64,
    tolerance: f64,
) -> Vec<Track> {
    let mut seen: HashSet<String> = tracks.iter().map(|t| t.id.clone()).collect();
    let mut total = total_duration_ms(&tracks);
    let ceiling = target_ms as f64 * tolerance;

    for candidate in candidates {
        if seen.contains(&candidate.id) {
            continue;
        }

        if (total + candidate.duration_ms) as f64 <= ceiling {
            total += candidate.duration_ms;
            seen.insert(candidate.id.clone());
            tracks.push(candidate);
        }

        if total >= target_ms {
            break;
        }
    }

    tracks
}

/// Keeps the longest prefix whose total does not exceed `target_ms`.
///
/// Everything from the first track that would overflow is dropped, even if
/// a shorter track further down would still fit.
pub fn trim_to_target(tracks: Vec<Track>, target_ms: u64) -> Vec<Track> {
    let mut running = 0;
    tracks
        .into_iter()
        .take_while(|track| {
            if running + track.duration_ms <= target_ms {
                running += track.duration_ms;
                true
            } else {
                false
            }
        })
        .collect()
}

/// Brings `initial` close to `target_ms`.
///
/// When the list is short, one more batch of `expansion_limit` tracks is
/// fetched with the same constraints and used to [`fill_to_target`]. When
/// the list (possibly after filling) is long, it is [`trim_to_target`]ed.
/// A list that already sums to the target is returned untouched without
/// any fetch.
pub async fn fit_to_duration(
    source: &dyn RecommendationSource,
    query: &RecommendationQuery,
    initial: Vec<Track>,
    target_ms: u64,
    options: FitOptions,
) -> Result<Vec<Track>, PlaylistError> {
    let mut tracks = initial;

    if total_duration_ms(&tracks) < target_ms {
        let candidates = source
            .recommendations(&query.with_limit(options.expansion_limit))
            .await?;
        tracing::debug!(
            "Filling {} ms short playlist from {} extra candidates",
            target_ms - total_duration_ms(&tracks),
            candidates.len()
        );
        tracks = fill_to_target(tracks, candidates, target_ms, options.overshoot_tolerance);
    }

    if total_duration_ms(&tracks) > target_ms {
        tracks = trim_to_target(tracks, target_ms);
    }

    Ok(tracks)
}
