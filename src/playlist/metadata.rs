use super::parser::SONG_DIVIDER;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A "Title - Artist" line extracted from model output, not yet matched
/// against the catalog
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SongCandidate(String);

impl SongCandidate {
    pub fn new(display: impl Into<String>) -> Self {
        Self(display.into())
    }

    /// The display string, also used verbatim as the search query
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Best-effort title: everything before the first divider
    pub fn title(&self) -> &str {
        match self.0.split_once(SONG_DIVIDER) {
            Some((title, _)) => title.trim(),
            None => self.0.trim(),
        }
    }

    /// Best-effort artist: everything after the first divider
    pub fn artist(&self) -> Option<&str> {
        self.0
            .split_once(SONG_DIVIDER)
            .map(|(_, artist)| artist.trim())
            .filter(|a| !a.is_empty())
    }
}

impl fmt::Display for SongCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A candidate paired with the catalog track it matched
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedTrack {
    pub candidate: SongCandidate,
    pub track_id: String,
    pub uri: String,
    pub matched_name: String, // What the catalog actually returned, for display
}

/// What the user asked for, and for whom
#[derive(Debug, Clone)]
pub struct PlaylistRequest {
    pub theme: String,
    pub user_id: String,
}

/// Outcome of a successful playlist synthesis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistResult {
    pub playlist_url: String,
    pub tracks_added: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_displays_verbatim() {
        let candidate = SongCandidate::new("Re: Stacks - Bon Iver");
        assert_eq!(candidate.as_str(), "Re: Stacks - Bon Iver");
        assert_eq!(candidate.to_string(), "Re: Stacks - Bon Iver");
    }

    #[test]
    fn test_title_and_artist_split_on_first_divider() {
        let candidate = SongCandidate::new("Midnight City - M83 - Remix");
        assert_eq!(candidate.title(), "Midnight City");
        assert_eq!(candidate.artist(), Some("M83 - Remix"));

        let hyphenated = SongCandidate::new("Jean-Baptiste  -  Anti-Flag ");
        assert_eq!(hyphenated.title(), "Jean-Baptiste");
        assert_eq!(hyphenated.artist(), Some("Anti-Flag"));

        let bare = SongCandidate::new("Untitled");
        assert_eq!(bare.title(), "Untitled");
        assert_eq!(bare.artist(), None);
    }

    #[test]
    fn test_playlist_result_json_shape() {
        let result = PlaylistResult {
            playlist_url: "https://open.spotify.com/playlist/x".to_string(),
            tracks_added: 12,
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            serde_json::json!({
                "playlist_url": "https://open.spotify.com/playlist/x",
                "tracks_added": 12
            })
        );
    }
}
