use super::assembler::PlaylistAssembler;
use super::parser::ResponseParser;
use super::prompt::PromptBuilder;
use super::resolver::{ResolutionReport, TrackResolver};
use super::{PlaylistRequest, PlaylistResult, SongCandidate, SynthesisConfig};
use crate::client::CatalogService;
use crate::error::PipelineError;
use crate::llm::LanguageModel;

/// Turns a free-text theme into a playlist on the catalog.
///
/// Stages run strictly in order and never loop back:
/// prompt built, model responded, candidates parsed, tracks resolved,
/// playlist created, tracks attached. An empty stage ends the run.
pub struct PlaylistSynthesizer<'a> {
    llm: &'a dyn LanguageModel,
    catalog: &'a dyn CatalogService,
    config: &'a SynthesisConfig,
}

impl<'a> PlaylistSynthesizer<'a> {
    pub fn new(
        llm: &'a dyn LanguageModel,
        catalog: &'a dyn CatalogService,
        config: &'a SynthesisConfig,
    ) -> Self {
        Self {
            llm,
            catalog,
            config,
        }
    }

    /// Ask the model for songs and parse its answer
    pub fn request_candidates(&self, theme: &str) -> Result<Vec<SongCandidate>, PipelineError> {
        let prompt = PromptBuilder::playlist_prompt(theme, self.config.song_count);
        log::debug!("State: PROMPT_BUILT");

        let response = self
            .llm
            .generate(&self.config.model, &prompt)
            .map_err(PipelineError::UpstreamServiceFailure)?;
        log::debug!("State: MODEL_RESPONDED ({} bytes)", response.len());

        let candidates = ResponseParser::parse_candidates(&response);
        if candidates.is_empty() {
            log::warn!("Model response contained no 'Title - Artist' lines");
            return Err(PipelineError::MalformedModelOutput);
        }
        log::debug!("State: CANDIDATES_PARSED ({} candidates)", candidates.len());
        Ok(candidates)
    }

    /// Everything up to and including catalog matching; mutates nothing
    pub fn preview(&self, theme: &str) -> Result<ResolutionReport, PipelineError> {
        let candidates = self.request_candidates(theme)?;
        let report = TrackResolver::new(self.catalog, self.config.search_limit)
            .resolve_all(&candidates);
        log::debug!("State: TRACKS_RESOLVED ({} tracks)", report.hits());
        Ok(report)
    }

    /// Run the whole pipeline
    pub fn synthesize(&self, theme: &str) -> Result<PlaylistResult, PipelineError> {
        let report = self.preview(theme)?;
        let resolved = report.resolved();
        if resolved.is_empty() {
            return Err(PipelineError::NoTracksResolved);
        }

        let user_id = self
            .catalog
            .current_user()
            .map_err(PipelineError::UpstreamServiceFailure)?;
        let request = PlaylistRequest {
            theme: theme.to_string(),
            user_id,
        };

        let result = PlaylistAssembler::new(self.catalog, self.config).assemble(&request, &resolved)?;
        log::info!(
            "Playlist ready with {} tracks: {}",
            result.tracks_added,
            result.playlist_url
        );
        Ok(result)
    }
}
