//! Request handlers the web layer calls into.
//!
//! Each handler returns an [`ApiResponse`]: a status code plus a JSON body,
//! either the serialized result or `{"error": ..., "kind": ...}`.

use crate::client::CatalogService;
use crate::error::PipelineError;
use crate::llm::LanguageModel;
use crate::models::TopItems;
use crate::playlist::prompt::PromptBuilder;
use crate::playlist::{PlaylistResult, PlaylistSynthesizer, SynthesisConfig};
use crate::profile::{ListeningProfile, ProfileAnalyzer, TOP_ARTISTS_LIMIT, TOP_TRACKS_LIMIT};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn from_result<T: Serialize>(result: Result<T, PipelineError>) -> Self {
        match result {
            Ok(value) => match serde_json::to_value(value) {
                Ok(body) => ApiResponse { status: 200, body },
                Err(e) => ApiResponse {
                    status: 500,
                    body: json!({ "error": format!("Failed to serialize response: {e}"), "kind": "internal" }),
                },
            },
            Err(err) => {
                log::warn!("Request failed ({}): {err}", err.kind());
                ApiResponse {
                    status: err.status(),
                    body: json!({ "error": err.to_string(), "kind": err.kind() }),
                }
            }
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Roast endpoint payload
#[derive(Debug, Clone, Serialize)]
pub struct RoastResponse {
    pub roast: String,
}

/// Per-session state kept between the dashboard view and the roast request
#[derive(Debug, Default)]
pub struct Session {
    pub profile: Option<ListeningProfile>,
}

/// Fetch the raw data the dashboard analyzes
pub fn fetch_top_items(catalog: &dyn CatalogService) -> Result<TopItems, PipelineError> {
    let top_tracks = catalog
        .top_tracks(TOP_TRACKS_LIMIT)
        .map_err(PipelineError::UpstreamServiceFailure)?;
    let top_artists = catalog
        .top_artists(TOP_ARTISTS_LIMIT)
        .map_err(PipelineError::UpstreamServiceFailure)?;
    Ok(TopItems {
        top_tracks,
        top_artists,
    })
}

/// Analytics endpoint: compute the profile and remember it for the roast
pub fn analytics(session: &mut Session, payload: &TopItems) -> ApiResponse {
    let profile = ProfileAnalyzer::analyze(&payload.top_tracks, &payload.top_artists);
    log::info!(
        "Profile: repeat rate {}, genre diversity {}, dominant genre '{}'",
        profile.repeat_rate,
        profile.genre_diversity,
        profile.dominant_genre
    );
    let response = ApiResponse::from_result(Ok(&profile));
    session.profile = Some(profile);
    response
}

pub fn roast_text(
    profile: Option<&ListeningProfile>,
    llm: &dyn LanguageModel,
    config: &SynthesisConfig,
) -> Result<RoastResponse, PipelineError> {
    let profile =
        profile.ok_or_else(|| PipelineError::MissingPrecondition("No Spotify data".to_string()))?;
    let prompt = PromptBuilder::roast_prompt(profile);
    let roast = llm
        .generate(&config.model, &prompt)
        .map_err(PipelineError::UpstreamServiceFailure)?;
    Ok(RoastResponse { roast })
}

/// Roast endpoint: needs a profile from an earlier analytics call
pub fn roast(session: &Session, llm: &dyn LanguageModel, config: &SynthesisConfig) -> ApiResponse {
    ApiResponse::from_result(roast_text(session.profile.as_ref(), llm, config))
}

pub fn synthesize_playlist(
    catalog: Option<&dyn CatalogService>,
    prompt: Option<&str>,
    llm: &dyn LanguageModel,
    config: &SynthesisConfig,
) -> Result<PlaylistResult, PipelineError> {
    let catalog = catalog.ok_or(PipelineError::NotAuthenticated)?;
    let theme = prompt
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| PipelineError::MissingPrecondition("Prompt missing".to_string()))?;

    PlaylistSynthesizer::new(llm, catalog, config).synthesize(theme)
}

/// Playlist endpoint: theme in, playlist link out
pub fn generate_playlist(
    catalog: Option<&dyn CatalogService>,
    prompt: Option<&str>,
    llm: &dyn LanguageModel,
    config: &SynthesisConfig,
) -> ApiResponse {
    ApiResponse::from_result(synthesize_playlist(catalog, prompt, llm, config))
}
