use crate::{
    types::{Mood, PlaylistRequest},
    utils::capitalize,
};

/// Label used for a mood in playlist titles.
pub fn mood_display_name(mood: Mood) -> &'static str {
    match mood {
        Mood::Happy => "Happy",
        Mood::Sad => "Melancholic",
        Mood::Energetic => "Energetic",
        Mood::Calm => "Calm",
        Mood::Romantic => "Romantic",
        Mood::Focused => "Focus",
        Mood::Party => "Party",
        Mood::Chill => "Chill",
    }
}

/// `"{Mood} {FirstGenre} Playlist"`, with `Music` standing in when no genre
/// was given.
pub fn playlist_name(request: &PlaylistRequest) -> String {
    let genre = request
        .genre_list()
        .and_then(|genres| genres.first())
        .map(|g| capitalize(g))
        .unwrap_or_else(|| "Music".to_string());

    format!("{} {} Playlist", mood_display_name(request.mood), genre)
}

/// One sentence describing the request, one clause per field that is set.
pub fn playlist_description(request: &PlaylistRequest) -> String {
    let mut parts = vec![format!("A personalized {} playlist", request.mood)];

    if let Some(genres) = request.genre_list() {
        parts.push(format!("featuring {} music", genres.join(", ")));
    }

    if let Some(level) = request.energy_level {
        parts.push(format!("with {level} energy"));
    }

    if let Some(duration) = request.duration {
        parts.push(format!("lasting approximately {duration} minutes"));
    }

    parts.join(", ") + "."
}
