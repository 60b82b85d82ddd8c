use super::utils::PlaylistNaming;
use super::{PlaylistRequest, PlaylistResult, ResolvedTrack, SynthesisConfig};
use crate::client::CatalogService;
use crate::error::PipelineError;
use std::collections::HashSet;

/// Turns resolved tracks into a playlist on the catalog
pub struct PlaylistAssembler<'a> {
    catalog: &'a dyn CatalogService,
    config: &'a SynthesisConfig,
}

impl<'a> PlaylistAssembler<'a> {
    pub fn new(catalog: &'a dyn CatalogService, config: &'a SynthesisConfig) -> Self {
        Self { catalog, config }
    }

    /// Tracks that would be attached, in resolution order, capped
    pub fn select_tracks<'t>(&self, resolved: &'t [ResolvedTrack]) -> Vec<&'t ResolvedTrack> {
        let mut seen = HashSet::new();
        resolved
            .iter()
            .filter(|t| !self.config.dedupe_track_ids || seen.insert(t.track_id.as_str()))
            .take(self.config.track_cap())
            .collect()
    }

    /// Create the playlist, then attach every selected track in one batch.
    ///
    /// If attaching fails the empty playlist is left in place.
    pub fn assemble(
        &self,
        request: &PlaylistRequest,
        resolved: &[ResolvedTrack],
    ) -> Result<PlaylistResult, PipelineError> {
        let selected = self.select_tracks(resolved);
        if selected.is_empty() {
            return Err(PipelineError::NoTracksResolved);
        }
        let uris: Vec<String> = selected.iter().map(|t| t.uri.clone()).collect();

        let name = PlaylistNaming::playlist_name(&self.config.name_prefix, &request.theme);
        let description = PlaylistNaming::playlist_description(&request.theme);

        let playlist = self
            .catalog
            .create_playlist(&request.user_id, &name, self.config.public, &description)
            .map_err(PipelineError::CatalogWriteFailure)?;
        log::debug!("State: PLAYLIST_CREATED ({})", playlist.id);

        self.catalog
            .add_tracks(&playlist.id, &uris)
            .map_err(|e| {
                log::warn!(
                    "Playlist {} was created but attaching tracks failed; it is left empty",
                    playlist.id
                );
                PipelineError::CatalogWriteFailure(e)
            })?;
        log::debug!("State: TRACKS_ATTACHED ({} tracks)", uris.len());

        Ok(PlaylistResult {
            playlist_url: playlist.public_url(),
            tracks_added: uris.len(),
        })
    }
}
