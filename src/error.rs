use thiserror::Error;

/// Terminal failures of the analytics, roast and playlist flows.
///
/// Per-song lookup misses never show up here; the resolver absorbs them.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// No previously computed profile, or a required input is absent.
    #[error("{0}")]
    MissingPrecondition(String),

    /// No authenticated catalog session.
    #[error("User not logged in")]
    NotAuthenticated,

    /// The model answered, but no line looked like `Title - Artist`.
    #[error("No valid songs found")]
    MalformedModelOutput,

    /// Candidates were parsed, but none of them matched a catalog track.
    #[error("No valid songs found")]
    NoTracksResolved,

    /// Playlist creation or track attachment failed.
    #[error("catalog write failed: {0:#}")]
    CatalogWriteFailure(anyhow::Error),

    /// Any other call to the language model or the catalog failed.
    #[error("upstream service failed: {0:#}")]
    UpstreamServiceFailure(anyhow::Error),
}

impl PipelineError {
    /// Stable category name used in error payloads
    pub fn kind(&self) -> &'static str {
        match self {
            PipelineError::MissingPrecondition(_) | PipelineError::NotAuthenticated => {
                "missing_precondition"
            }
            PipelineError::MalformedModelOutput => "malformed_model_output",
            PipelineError::NoTracksResolved => "no_tracks_resolved",
            PipelineError::CatalogWriteFailure(_) => "catalog_write_failure",
            PipelineError::UpstreamServiceFailure(_) => "upstream_service_failure",
        }
    }

    /// HTTP status the web layer should answer with
    pub fn status(&self) -> u16 {
        match self {
            PipelineError::NotAuthenticated => 401,
            PipelineError::MissingPrecondition(_)
            | PipelineError::MalformedModelOutput
            | PipelineError::NoTracksResolved => 400,
            PipelineError::CatalogWriteFailure(_) | PipelineError::UpstreamServiceFailure(_) => {
                502
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_results_share_user_message() {
        assert_eq!(
            PipelineError::MalformedModelOutput.to_string(),
            "No valid songs found"
        );
        assert_eq!(PipelineError::NoTracksResolved.to_string(), "No valid songs found");
        assert_ne!(
            PipelineError::MalformedModelOutput.kind(),
            PipelineError::NoTracksResolved.kind()
        );
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(PipelineError::MissingPrecondition("x".into()).status(), 400);
        assert_eq!(PipelineError::NotAuthenticated.status(), 401);
        assert_eq!(PipelineError::MalformedModelOutput.status(), 400);
        assert_eq!(
            PipelineError::CatalogWriteFailure(anyhow::anyhow!("boom")).status(),
            502
        );
        let upstream = PipelineError::UpstreamServiceFailure(anyhow::anyhow!("timed out"));
        assert_eq!(upstream.status(), 502);
        assert!(upstream.to_string().contains("timed out"));
    }
}
