use super::{ResolvedTrack, SongCandidate};
use crate::client::CatalogService;

/// Outcome of looking up a single candidate
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    Hit(ResolvedTrack),
    /// Search succeeded but returned nothing
    Miss,
    /// Search call itself failed (network, auth, rate limit, timeout)
    Failed(String),
}

/// Per-candidate outcomes of a resolution pass, in candidate order
#[derive(Debug, Clone, Default)]
pub struct ResolutionReport {
    pub outcomes: Vec<(SongCandidate, Resolution)>,
}

impl ResolutionReport {
    /// Resolved tracks in candidate order, misses and failures dropped
    pub fn resolved(&self) -> Vec<ResolvedTrack> {
        self.outcomes
            .iter()
            .filter_map(|(_, outcome)| match outcome {
                Resolution::Hit(track) => Some(track.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn hits(&self) -> usize {
        self.count(|o| matches!(o, Resolution::Hit(_)))
    }

    pub fn misses(&self) -> usize {
        self.count(|o| matches!(o, Resolution::Miss))
    }

    pub fn failures(&self) -> usize {
        self.count(|o| matches!(o, Resolution::Failed(_)))
    }

    /// Share of candidates that did not resolve (0.0 when there were none)
    pub fn miss_rate(&self) -> f64 {
        if self.outcomes.is_empty() {
            return 0.0;
        }
        (self.misses() + self.failures()) as f64 / self.outcomes.len() as f64
    }

    fn count(&self, predicate: impl Fn(&Resolution) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| predicate(o)).count()
    }
}

/// Maps candidates to catalog tracks, one search each, no retries
pub struct TrackResolver<'a> {
    catalog: &'a dyn CatalogService,
    search_limit: u32,
}

impl<'a> TrackResolver<'a> {
    pub fn new(catalog: &'a dyn CatalogService, search_limit: u32) -> Self {
        Self {
            catalog,
            search_limit: search_limit.max(1),
        }
    }

    /// Look up a single candidate, turning every failure into an outcome
    pub fn resolve_one(&self, candidate: &SongCandidate) -> Resolution {
        match self.catalog.search_tracks(candidate.as_str(), self.search_limit) {
            Ok(hits) => match hits.into_iter().next() {
                Some(track) => Resolution::Hit(ResolvedTrack {
                    candidate: candidate.clone(),
                    uri: track.uri(),
                    track_id: track.id,
                    matched_name: track.name,
                }),
                None => Resolution::Miss,
            },
            Err(e) => Resolution::Failed(format!("{e:#}")),
        }
    }

    /// Resolve candidates sequentially, in order
    pub fn resolve_all(&self, candidates: &[SongCandidate]) -> ResolutionReport {
        let mut report = ResolutionReport::default();

        for candidate in candidates {
            let outcome = self.resolve_one(candidate);
            match &outcome {
                Resolution::Hit(track) => log::debug!(
                    "✓ '{}' -> {} ({})",
                    track.candidate,
                    track.matched_name,
                    track.track_id
                ),
                Resolution::Miss => log::debug!("✗ '{candidate}': no catalog match"),
                Resolution::Failed(reason) => {
                    log::debug!("✗ '{candidate}': search failed: {reason}")
                }
            }
            report.outcomes.push((candidate.clone(), outcome));
        }

        log::info!(
            "Resolved {}/{} candidates ({} misses, {} failed searches, miss rate {:.0}%)",
            report.hits(),
            report.outcomes.len(),
            report.misses(),
            report.failures(),
            report.miss_rate() * 100.0
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MockCatalogService;
    use crate::models::Track;
    use approx::assert_relative_eq;
    use mockall::predicate::eq;

    fn hit(id: &str) -> Vec<Track> {
        vec![Track {
            id: id.to_string(),
            name: format!("Track {id}"),
            uri: None,
            artists: vec![],
        }]
    }

    fn candidates(raw: &[&str]) -> Vec<SongCandidate> {
        raw.iter().map(|s| SongCandidate::new(*s)).collect()
    }

    #[test]
    fn test_hits_misses_and_failures() {
        let mut catalog = MockCatalogService::new();
        catalog
            .expect_search_tracks()
            .with(eq("A - X"), eq(1))
            .times(1)
            .returning(|_, _| Ok(hit("a")));
        catalog
            .expect_search_tracks()
            .with(eq("B - Y"), eq(1))
            .times(1)
            .returning(|_, _| Ok(vec![]));
        catalog
            .expect_search_tracks()
            .with(eq("C - Z"), eq(1))
            .times(1)
            .returning(|_, _| Err(anyhow::anyhow!("API returned status 429: rate limited")));
        catalog
            .expect_search_tracks()
            .with(eq("D - W"), eq(1))
            .times(1)
            .returning(|_, _| Ok(hit("d")));

        let resolver = TrackResolver::new(&catalog, 1);
        let report = resolver.resolve_all(&candidates(&["A - X", "B - Y", "C - Z", "D - W"]));

        assert_eq!(report.hits(), 2);
        assert_eq!(report.misses(), 1);
        assert_eq!(report.failures(), 1);
        assert_relative_eq!(report.miss_rate(), 0.5);

        let resolved = report.resolved();
        let ids: Vec<&str> = resolved.iter().map(|t| t.track_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "d"]);
        assert_eq!(resolved[0].uri, "spotify:track:a");
        assert_eq!(resolved[1].candidate.as_str(), "D - W");

        match &report.outcomes[2].1 {
            Resolution::Failed(reason) => assert!(reason.contains("429")),
            other => panic!("expected failure, got {other:?}"),
        }
    }

    #[test]
    fn test_takes_first_hit_only() {
        let mut catalog = MockCatalogService::new();
        catalog.expect_search_tracks().returning(|_, _| {
            let mut hits = hit("best");
            hits.extend(hit("second"));
            Ok(hits)
        });

        let resolver = TrackResolver::new(&catalog, 5);
        match resolver.resolve_one(&SongCandidate::new("Song - Artist")) {
            Resolution::Hit(track) => assert_eq!(track.track_id, "best"),
            other => panic!("expected hit, got {other:?}"),
        }
    }

    #[test]
    fn test_never_more_resolved_than_candidates_and_no_id_dedupe() {
        let mut catalog = MockCatalogService::new();
        catalog
            .expect_search_tracks()
            .times(3)
            .returning(|_, _| Ok(hit("same")));

        let resolver = TrackResolver::new(&catalog, 1);
        let report = resolver.resolve_all(&candidates(&[
            "Song - Artist",
            "Song (Remastered) - Artist",
            "song - artist",
        ]));
        assert_eq!(report.resolved().len(), 3);
        assert!(report.resolved().iter().all(|t| t.track_id == "same"));
    }

    #[test]
    fn test_empty_candidates_make_no_calls() {
        let catalog = MockCatalogService::new();
        let report = TrackResolver::new(&catalog, 1).resolve_all(&[]);
        assert!(report.resolved().is_empty());
        assert_relative_eq!(report.miss_rate(), 0.0);
    }
}
