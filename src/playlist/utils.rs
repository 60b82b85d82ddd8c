/// Playlist naming utilities
pub struct PlaylistNaming;

impl PlaylistNaming {
    /// "<prefix>: <theme>"
    pub fn playlist_name(prefix: &str, theme: &str) -> String {
        let theme = Self::single_line(theme);
        if prefix.trim().is_empty() {
            theme
        } else {
            format!("{}: {}", prefix.trim(), theme)
        }
    }

    pub fn playlist_description(theme: &str) -> String {
        format!("AI-generated playlist for vibe: {}", Self::single_line(theme))
    }

    // Spotify rejects line breaks in names and descriptions
    fn single_line(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}
