use crate::profile::ListeningProfile;

/// Builds the instruction text sent to the language model.
///
/// Neither prompt is trusted to be obeyed; the playlist output still goes
/// through the response parser.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Roast prompt with four fixed sections, in order: roast, taste score,
    /// psychological breakdown, five recommendations.
    pub fn roast_prompt(profile: &ListeningProfile) -> String {
        format!(
            r#"You are Spotiscan, a culturally fluent musical psychologist with sharp observational humor and a deep knowledge of music subcultures.

Analyze the user's music identity using ONLY the data below.

### 🔥 Roast (2-4 lines)
Painfully accurate and funny. Be specific to their artists, genres and listening patterns.

### 🎧 Music Taste Score (0-10)
One brutally honest number and one short sentence explaining it.

### 🧠 Psychological Breakdown
Interpret these signals:
- Repeat rate = {repeat_rate}
- Genre diversity = {genre_diversity}
- Dominant genre = {dominant_genre}

Describe their emotional patterns, coping style, attachment vibes and main-character energy.

### 🎵 5 Niche Recommendations
Rules:
- Exactly 5 REAL songs
- Format: Song – Artist
- Skip overplayed viral hits unless they genuinely fit
- Favour underground, cinematic, indie, alternative or cult-classic tracks

Tracks: {tracks}
Artists: {artists}
Genres: {genres}
"#,
            repeat_rate = profile.repeat_rate,
            genre_diversity = profile.genre_diversity,
            dominant_genre = profile.dominant_genre,
            tracks = quoted_list(&profile.tracks),
            artists = quoted_list(&profile.artists),
            genres = quoted_list(&profile.genres),
        )
    }

    /// Playlist prompt asking for `song_count` songs, one `Song Title - Artist` per line
    pub fn playlist_prompt(theme: &str, song_count: usize) -> String {
        format!(
            r#"You are a world-class playlist curator with deep taste and zero tolerance for filler.

Generate exactly {song_count} real, high-quality songs that match the theme: "{theme}".

Your job:
- Understand the emotional tone, mood, tempo and sub-genre of the theme
- Choose songs that FEEL like the vibe
- Avoid generic radio and viral hits unless they are perfect for the theme
- Prefer cinematic, niche, cult-classic, global, indie, electronic, alternative or aesthetic tracks

FORMAT (STRICT):
Song Title - Artist
One song per line
No numbering
No quotes
No extra text
"#,
            theme = theme.trim(),
        )
    }
}

fn quoted_list(items: &[String]) -> String {
    let quoted: Vec<String> = items.iter().map(|i| format!("'{i}'")).collect();
    format!("[{}]", quoted.join(", "))
}
