use serde::{Deserialize, Serialize};

/// A Spotify track with the fields the pipeline reads
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub artists: Vec<ArtistRef>,
}

/// Simplified artist object embedded in a track
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistRef {
    pub name: String,
}

/// Full artist object as returned by the top-artists endpoint
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Artist {
    pub name: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

impl Track {
    /// Name of the first credited artist, if any
    pub fn primary_artist(&self) -> Option<&str> {
        self.artists.first().map(|a| a.name.as_str())
    }

    /// Spotify URI for this track, derived from the id when the payload omitted it
    pub fn uri(&self) -> String {
        match &self.uri {
            Some(uri) if !uri.is_empty() => uri.clone(),
            _ => format!("spotify:track:{}", self.id),
        }
    }
}

/// Raw top-items payload fetched for the dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TopItems {
    #[serde(default)]
    pub top_tracks: Vec<Track>,
    #[serde(default)]
    pub top_artists: Vec<Artist>,
}

/// Generic paging wrapper (`/me/top/*`, search results)
#[derive(Debug, Deserialize)]
pub struct Paging<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
}

/// Response structure for the search endpoint with `type=track`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub tracks: Option<Paging<Track>>,
}

/// Response structure for `/me`
#[derive(Debug, Deserialize)]
pub struct CurrentUser {
    pub id: String,
}

/// Request body for playlist creation
#[derive(Debug, Serialize)]
pub struct CreatePlaylistRequest<'a> {
    pub name: &'a str,
    pub public: bool,
    pub description: &'a str,
}

/// Response structure for playlist creation
#[derive(Debug, Clone, Deserialize)]
pub struct CreatedPlaylist {
    pub id: String,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ExternalUrls {
    pub spotify: Option<String>,
}

impl CreatedPlaylist {
    /// Public link to the playlist, falling back to the canonical web URL
    pub fn public_url(&self) -> String {
        self.external_urls
            .spotify
            .clone()
            .unwrap_or_else(|| format!("https://open.spotify.com/playlist/{}", self.id))
    }
}

/// Request body for adding tracks to a playlist
#[derive(Debug, Serialize)]
pub struct AddTracksRequest<'a> {
    pub uris: &'a [String],
}

/// Request body for Gemini `generateContent`
#[derive(Debug, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

/// Response structure for Gemini `generateContent`
#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<Content>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() { None } else { Some(text) }
    }
}
