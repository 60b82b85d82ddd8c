use crate::models::{Artist, Track};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap, HashSet};

/// How many tracks and artists end up in the profile
pub const PROFILE_DEPTH: usize = 20;
/// How many top tracks the dashboard fetches
pub const TOP_TRACKS_LIMIT: u32 = 50;
/// How many top artists the dashboard fetches
pub const TOP_ARTISTS_LIMIT: u32 = 30;

/// Statistical summary of a user's listening habits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListeningProfile {
    /// "Title - Primary Artist" labels, most played first
    pub tracks: Vec<String>,
    pub artists: Vec<String>,
    /// Distinct genre tags, sorted
    pub genres: Vec<String>,
    pub repeat_rate: f64,
    pub genre_diversity: f64,
    pub dominant_genre: String,
}

/// Listening profile analytics using static helper functions
pub struct ProfileAnalyzer;

impl ProfileAnalyzer {
    /// Build a profile from raw top-tracks and top-artists data
    pub fn analyze(top_tracks: &[Track], top_artists: &[Artist]) -> ListeningProfile {
        // Genres come from every supplied artist, not only the first PROFILE_DEPTH
        let genre_tags: Vec<&str> = top_artists
            .iter()
            .flat_map(|a| a.genres.iter().map(String::as_str))
            .collect();

        let tracks: Vec<String> = top_tracks
            .iter()
            .take(PROFILE_DEPTH)
            .map(Self::track_label)
            .collect();
        let artists: Vec<String> = top_artists
            .iter()
            .take(PROFILE_DEPTH)
            .map(|a| a.name.clone())
            .collect();

        let genres: Vec<String> = genre_tags
            .iter()
            .map(|g| g.to_string())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        ListeningProfile {
            repeat_rate: Self::calculate_repeat_rate(&artists),
            genre_diversity: Self::calculate_genre_diversity(&genre_tags),
            dominant_genre: Self::dominant_genre(&genre_tags)
                .unwrap_or("unknown")
                .to_string(),
            tracks,
            artists,
            genres,
        }
    }

    fn track_label(track: &Track) -> String {
        match track.primary_artist() {
            Some(artist) => format!("{} - {}", track.name, artist),
            None => track.name.clone(),
        }
    }

    /// Artist slots divided by distinct artists, rounded to 2 decimals
    pub fn calculate_repeat_rate(artist_names: &[String]) -> f64 {
        let distinct = artist_names.iter().collect::<HashSet<_>>().len();
        round2(artist_names.len() as f64 / distinct.max(1) as f64)
    }

    /// Distinct genres divided by total genre tags, rounded to 2 decimals
    pub fn calculate_genre_diversity(genre_tags: &[&str]) -> f64 {
        let distinct = genre_tags.iter().collect::<HashSet<_>>().len();
        round2(distinct as f64 / genre_tags.len().max(1) as f64)
    }

    /// Most frequent tag; ties go to the tag seen first
    pub fn dominant_genre<'a>(genre_tags: &[&'a str]) -> Option<&'a str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for &tag in genre_tags {
            *counts.entry(tag).or_insert(0) += 1;
        }

        let mut best: Option<(&'a str, usize)> = None;
        for &tag in genre_tags {
            let count = counts[tag];
            // Strictly greater keeps the first-encountered tag on ties
            if best.is_none_or(|(_, best_count)| count > best_count) {
                best = Some((tag, count));
            }
        }
        best.map(|(tag, _)| tag)
    }
}

/// Ties go to the even neighbour, so 0.125 becomes 0.12
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ArtistRef;
    use approx::assert_relative_eq;

    fn artist(name: &str, genres: &[&str]) -> Artist {
        Artist {
            name: name.to_string(),
            genres: genres.iter().map(|g| g.to_string()).collect(),
        }
    }

    fn track(name: &str, artist: &str) -> Track {
        Track {
            id: format!("id-{name}"),
            name: name.to_string(),
            uri: None,
            artists: vec![ArtistRef {
                name: artist.to_string(),
            }],
        }
    }

    #[test]
    fn test_reference_profile() {
        let artists = vec![
            artist("A", &["pop"]),
            artist("A", &["pop"]),
            artist("B", &["rock"]),
        ];
        let profile = ProfileAnalyzer::analyze(&[], &artists);

        assert_relative_eq!(profile.repeat_rate, 1.5);
        assert_eq!(profile.dominant_genre, "pop");
        assert_relative_eq!(profile.genre_diversity, 0.67);
        assert_eq!(profile.genres, vec!["pop".to_string(), "rock".to_string()]);
        assert_eq!(profile.artists, vec!["A", "A", "B"]);
    }

    #[test]
    fn test_dominant_genre_tie_goes_to_first_seen() {
        assert_eq!(
            ProfileAnalyzer::dominant_genre(&["rock", "pop", "pop", "rock", "jazz"]),
            Some("rock")
        );
        assert_eq!(
            ProfileAnalyzer::dominant_genre(&["jazz", "rock", "pop", "pop"]),
            Some("pop")
        );
        assert_eq!(ProfileAnalyzer::dominant_genre(&[]), None);
    }

    fn names(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_repeat_rate_bounds() {
        assert_relative_eq!(ProfileAnalyzer::calculate_repeat_rate(&names(&["A", "B", "C"])), 1.0);
        assert_relative_eq!(
            ProfileAnalyzer::calculate_repeat_rate(&names(&["A", "A", "A", "A"])),
            4.0
        );
        // Guarded divisor: no artists at all
        assert_relative_eq!(ProfileAnalyzer::calculate_repeat_rate(&[]), 0.0);
    }

    #[test]
    fn test_genre_diversity_bounds() {
        assert_relative_eq!(ProfileAnalyzer::calculate_genre_diversity(&[]), 0.0);
        assert_relative_eq!(
            ProfileAnalyzer::calculate_genre_diversity(&["a", "b", "c"]),
            1.0
        );
        let diversity = ProfileAnalyzer::calculate_genre_diversity(&["a", "a", "a", "b"]);
        assert!(diversity > 0.0 && diversity <= 1.0);
        assert_relative_eq!(diversity, 0.5);
    }

    #[test]
    fn test_exact_halves_round_to_even() {
        assert_relative_eq!(ProfileAnalyzer::calculate_genre_diversity(&["a"; 8]), 0.12);
        let artists: Vec<String> = (0..8)
            .map(|i| format!("Artist {i}"))
            .chain(std::iter::once("Artist 0".to_string()))
            .collect();
        assert_relative_eq!(ProfileAnalyzer::calculate_repeat_rate(&artists), 1.12);
        assert_relative_eq!(round2(0.375), 0.38);
    }

    #[test]
    fn test_no_genres_yields_unknown() {
        let profile = ProfileAnalyzer::analyze(&[track("Song", "X")], &[artist("X", &[])]);
        assert_eq!(profile.dominant_genre, "unknown");
        assert!(profile.genres.is_empty());
        assert_relative_eq!(profile.genre_diversity, 0.0);
        assert_relative_eq!(profile.repeat_rate, 1.0);
    }

    #[test]
    fn test_truncates_to_profile_depth_but_counts_all_genres() {
        let tracks: Vec<Track> = (0..50).map(|i| track(&format!("T{i}"), "Artist")).collect();
        let mut artists: Vec<Artist> = (0..20)
            .map(|i| artist(&format!("Artist {i}"), &["indie"]))
            .collect();
        // Artists beyond the first 20 still contribute genre tags
        for i in 20..30 {
            artists.push(artist(&format!("Artist {i}"), &["shoegaze", "shoegaze", "shoegaze"]));
        }

        let profile = ProfileAnalyzer::analyze(&tracks, &artists);
        assert_eq!(profile.tracks.len(), PROFILE_DEPTH);
        assert_eq!(profile.artists.len(), PROFILE_DEPTH);
        assert_eq!(profile.tracks[0], "T0 - Artist");
        assert_eq!(profile.dominant_genre, "shoegaze");
        assert_relative_eq!(profile.genre_diversity, 0.04);
    }

    #[test]
    fn test_track_without_artist_uses_title() {
        let bare = Track {
            id: "1".to_string(),
            name: "Lonely".to_string(),
            uri: None,
            artists: vec![],
        };
        let profile = ProfileAnalyzer::analyze(&[bare], &[]);
        assert_eq!(profile.tracks, vec!["Lonely".to_string()]);
    }

    #[test]
    fn test_profile_serializes_with_dashboard_keys() {
        let profile = ProfileAnalyzer::analyze(&[track("S", "A")], &[artist("A", &["pop"])]);
        let value = serde_json::to_value(&profile).unwrap();
        for key in [
            "tracks",
            "artists",
            "genres",
            "repeat_rate",
            "genre_diversity",
            "dominant_genre",
        ] {
            assert!(value.get(key).is_some(), "missing key {key}");
        }
    }
}
