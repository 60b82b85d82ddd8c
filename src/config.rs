use anyhow::{Context, Result};
use std::time::Duration;

const DEFAULT_SPOTIFY_API_BASE: &str = "https://api.spotify.com/v1";
const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Only needed by commands that call the language model
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    /// Access token of an already authorized Spotify session, if any
    pub spotify_access_token: Option<String>,
    pub spotify_api_base: String,
    pub request_timeout: Duration,
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();

    let gemini_api_key = env_secret("GEMINI_API_KEY");
    let spotify_access_token = env_secret("SPOTIFY_ACCESS_TOKEN");

    let request_timeout = match std::env::var("REQUEST_TIMEOUT_SECS") {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .with_context(|| format!("REQUEST_TIMEOUT_SECS is not a number: {raw}"))?,
        Err(_) => DEFAULT_TIMEOUT_SECS,
    };

    Ok(Config {
        gemini_api_key,
        gemini_api_base: env_or("GEMINI_API_BASE", DEFAULT_GEMINI_API_BASE),
        spotify_access_token,
        spotify_api_base: env_or("SPOTIFY_API_BASE", DEFAULT_SPOTIFY_API_BASE),
        request_timeout: Duration::from_secs(request_timeout),
    })
}

fn env_secret(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .map(|v| v.trim().trim_end_matches('/').to_string())
        .ok()
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}
