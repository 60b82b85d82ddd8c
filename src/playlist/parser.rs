use super::SongCandidate;
use std::collections::HashSet;

/// Divider a line must contain to count as "Title - Artist"
pub const SONG_DIVIDER: &str = " - ";

/// Extracts song candidates from raw model output
pub struct ResponseParser;

impl ResponseParser {
    /// Keep lines containing the divider, trimmed, first occurrence of each
    /// exact string only. Everything else is discarded without complaint.
    pub fn parse_candidates(raw: &str) -> Vec<SongCandidate> {
        let mut seen = HashSet::new();
        raw.trim()
            .split('\n')
            .filter(|line| Self::is_song_line(line))
            .map(str::trim)
            .filter(|line| seen.insert(*line))
            .map(SongCandidate::new)
            .collect()
    }

    /// Whether a raw line passes the format gate
    pub fn is_song_line(line: &str) -> bool {
        line.contains(SONG_DIVIDER)
    }
}
