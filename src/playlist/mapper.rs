use crate::types::{
    DEFAULT_RECOMMENDATION_LIMIT, EnergyLevel, MAX_SEED_GENRES, Mood, PlaylistRequest,
    RecommendationQuery, ValueRange,
};

/// Valence (musical positivity) bounds for each mood.
pub fn mood_valence(mood: Mood) -> ValueRange {
    match mood {
        Mood::Happy => ValueRange::new(0.6, 1.0),
        Mood::Sad => ValueRange::new(0.0, 0.4),
        Mood::Energetic => ValueRange::new(0.5, 1.0),
        Mood::Calm => ValueRange::new(0.0, 0.5),
        Mood::Romantic => ValueRange::new(0.4, 0.8),
        Mood::Focused => ValueRange::new(0.3, 0.7),
        Mood::Party => ValueRange::new(0.7, 1.0),
        Mood::Chill => ValueRange::new(0.0, 0.4),
    }
}

pub fn energy_level_range(level: EnergyLevel) -> ValueRange {
    match level {
        EnergyLevel::Low => ValueRange::new(0.0, 0.4),
        EnergyLevel::Medium => ValueRange::new(0.4, 0.7),
        EnergyLevel::High => ValueRange::new(0.7, 1.0),
    }
}

/// Energy implied by the mood alone, used when no level was asked for.
/// Moods without an obvious intensity leave energy unconstrained.
pub fn mood_energy(mood: Mood) -> Option<ValueRange> {
    match mood {
        Mood::Energetic | Mood::Party => Some(ValueRange::new(0.7, 1.0)),
        Mood::Calm | Mood::Chill | Mood::Sad => Some(ValueRange::new(0.0, 0.4)),
        Mood::Happy | Mood::Romantic | Mood::Focused => None,
    }
}

/// Translates a request into recommendation constraints.
///
/// Pure: the same request always yields the same query. Genres keep their
/// order and are cut to the first five; an explicit energy level wins over
/// the mood's implied energy.
pub fn map_preferences(request: &PlaylistRequest) -> RecommendationQuery {
    let seed_genres = request
        .genre_list()
        .map(|genres| genres.iter().take(MAX_SEED_GENRES).cloned().collect())
        .unwrap_or_default();

    let energy = match request.energy_level {
        Some(level) => Some(energy_level_range(level)),
        None => mood_energy(request.mood),
    };

    RecommendationQuery {
        seed_genres,
        valence: mood_valence(request.mood),
        energy,
        limit: Some(DEFAULT_RECOMMENDATION_LIMIT),
    }
}
