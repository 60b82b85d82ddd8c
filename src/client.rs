use crate::config::Config;
use crate::models::{
    AddTracksRequest, Artist, CreatePlaylistRequest, CreatedPlaylist, CurrentUser, Paging,
    SearchResponse, Track,
};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use ureq::{Agent, AgentBuilder, Request};
use urlencoding::encode;

/// The catalog operations the pipeline depends on
#[cfg_attr(test, mockall::automock)]
pub trait CatalogService {
    /// The current user's most played tracks
    fn top_tracks(&self, limit: u32) -> Result<Vec<Track>>;

    /// The current user's most played artists
    fn top_artists(&self, limit: u32) -> Result<Vec<Artist>>;

    /// Ranked track hits for a free-text query
    fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>>;

    /// Account id of the authenticated user
    fn current_user(&self) -> Result<String>;

    fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<CreatedPlaylist>;

    /// Append tracks to a playlist in one call
    fn add_tracks(&self, playlist_id: &str, track_uris: &[String]) -> Result<()>;
}

/// A blocking Spotify Web API client authenticated with a bearer token
pub struct SpotifyClient {
    agent: Agent,
    base_url: String,
    access_token: String,
}

impl SpotifyClient {
    /// Create a client for an already authorized session
    pub fn new(config: &Config, access_token: String) -> Self {
        let agent = AgentBuilder::new().timeout(config.request_timeout).build();

        SpotifyClient {
            agent,
            base_url: config.spotify_api_base.trim_end_matches('/').to_string(),
            access_token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn authorized(&self, request: Request) -> Request {
        request.set("Authorization", &format!("Bearer {}", self.access_token))
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let mut request = self.authorized(self.agent.get(&self.url(path)));
        for (key, value) in query {
            request = request.query(key, value);
        }

        let response = request.call().map_err(describe_error)?;
        response
            .into_json::<T>()
            .with_context(|| format!("Failed to parse JSON response from {path}"))
    }
}

impl CatalogService for SpotifyClient {
    fn top_tracks(&self, limit: u32) -> Result<Vec<Track>> {
        let page: Paging<Track> = self
            .get_json("me/top/tracks", &[("limit", &limit.to_string())])
            .context("Fetching top tracks failed")?;
        log::debug!("Fetched {} top tracks", page.items.len());
        Ok(page.items)
    }

    fn top_artists(&self, limit: u32) -> Result<Vec<Artist>> {
        let page: Paging<Artist> = self
            .get_json("me/top/artists", &[("limit", &limit.to_string())])
            .context("Fetching top artists failed")?;
        log::debug!("Fetched {} top artists", page.items.len());
        Ok(page.items)
    }

    fn search_tracks(&self, query: &str, limit: u32) -> Result<Vec<Track>> {
        let parsed: SearchResponse = self
            .get_json(
                "search",
                &[("q", query), ("type", "track"), ("limit", &limit.to_string())],
            )
            .with_context(|| format!("Search for '{query}' failed"))?;

        // A response without a tracks section counts as zero hits
        Ok(parsed.tracks.map(|p| p.items).unwrap_or_default())
    }

    fn current_user(&self) -> Result<String> {
        let user: CurrentUser = self
            .get_json("me", &[])
            .context("Fetching current user failed")?;
        Ok(user.id)
    }

    fn create_playlist(
        &self,
        user_id: &str,
        name: &str,
        public: bool,
        description: &str,
    ) -> Result<CreatedPlaylist> {
        let url = self.url(&format!("users/{}/playlists", encode(user_id)));
        log::info!("Creating playlist '{name}' for user {user_id}");

        let response = self
            .authorized(self.agent.post(&url))
            .send_json(CreatePlaylistRequest {
                name,
                public,
                description,
            })
            .map_err(describe_error)
            .context("Creating playlist failed")?;

        let playlist: CreatedPlaylist = response
            .into_json()
            .context("Failed to parse create playlist response")?;
        log::info!("✓ Created playlist with ID: {}", playlist.id);
        Ok(playlist)
    }

    fn add_tracks(&self, playlist_id: &str, track_uris: &[String]) -> Result<()> {
        let url = self.url(&format!("playlists/{}/tracks", encode(playlist_id)));
        log::info!(
            "Adding {} tracks to playlist {playlist_id}",
            track_uris.len()
        );

        self.authorized(self.agent.post(&url))
            .send_json(AddTracksRequest { uris: track_uris })
            .map_err(describe_error)
            .context("Adding tracks to playlist failed")?;
        Ok(())
    }
}

/// Turn a ureq error into an anyhow error that keeps the API's error body
pub(crate) fn describe_error(err: ureq::Error) -> anyhow::Error {
    match err {
        ureq::Error::Status(code, response) => {
            let body = response
                .into_string()
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            anyhow::anyhow!("API returned status {code}: {}", body.trim())
        }
        ureq::Error::Transport(transport) => {
            anyhow::anyhow!("HTTP request failed: {transport}")
        }
    }
}
