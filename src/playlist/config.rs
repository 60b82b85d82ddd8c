use serde::{Deserialize, Serialize};

/// Hard ceiling on how many tracks one generated playlist may hold
pub const MAX_PLAYLIST_TRACKS: usize = 40;

/// Settings for AI playlist synthesis, loaded from JSON
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthesisConfig {
    pub model: String,           // Language model used for roasts and playlists
    pub song_count: usize,       // How many songs the playlist prompt asks for
    pub max_tracks: usize,       // Tracks attached at most, clamped to 1..=MAX_PLAYLIST_TRACKS
    pub search_limit: u32,       // Hits requested per catalog search; only the first is used
    pub dedupe_track_ids: bool,  // Drop repeated catalog ids before attaching
    pub public: bool,            // Create playlists as public
    pub name_prefix: String,     // Playlist name is "<prefix>: <theme>"
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            model: "models/gemini-2.5-flash".to_string(),
            song_count: MAX_PLAYLIST_TRACKS,
            max_tracks: MAX_PLAYLIST_TRACKS,
            search_limit: 1,
            dedupe_track_ids: false,
            public: true,
            name_prefix: "Spotiscan".to_string(),
        }
    }
}

impl SynthesisConfig {
    /// Load settings from a JSON object file; missing fields take defaults
    pub fn load_from_file(path: &str) -> anyhow::Result<SynthesisConfig> {
        let content = std::fs::read_to_string(path)?;
        let config: SynthesisConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Effective track cap, at least one track and never above MAX_PLAYLIST_TRACKS
    pub fn track_cap(&self) -> usize {
        self.max_tracks.clamp(1, MAX_PLAYLIST_TRACKS)
    }
}
