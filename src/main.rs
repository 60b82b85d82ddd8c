use anyhow::Result;
use clap::{Parser, Subcommand};

mod client;
mod config;
mod error;
mod llm;
mod models;
mod playlist;
mod profile;
mod service;


use crate::client::{CatalogService, SpotifyClient};
use crate::config::load_config;
use crate::error::PipelineError;
use crate::llm::GeminiClient;
use crate::playlist::assembler::PlaylistAssembler;
use crate::playlist::parser::ResponseParser;
use crate::playlist::resolver::Resolution;
use crate::playlist::{PlaylistSynthesizer, SynthesisConfig};
use crate::service::{ApiResponse, Session};

#[derive(Parser)]
#[command(name = "spotiscan")]
#[command(about = "Roast your Spotify taste and turn a vibe into a playlist")]
#[command(version)]
struct Args {
    /// Path to a synthesis settings JSON file (defaults are used when omitted)
    #[arg(short = 'c', long = "config")]
    config_file: Option<String>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch top tracks and artists and print the listening profile
    Analyze,
    /// Analyze, then ask the model to roast the profile
    Roast,
    /// Generate a playlist for a free-text theme
    Playlist {
        /// The vibe, e.g. "rainy night drive in Tokyo"
        theme: String,

        /// Resolve songs against the catalog but do not create the playlist
        #[arg(long)]
        dry_run: bool,
    },
    /// Parse a saved model response and print the candidates it yields
    Parse {
        /// File containing raw model output
        file: String,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let synthesis = match &args.config_file {
        Some(path) => {
            if !std::path::Path::new(path).exists() {
                return Err(anyhow::anyhow!("Configuration file '{}' not found", path));
            }
            log::info!("Loading synthesis settings from: {path}");
            SynthesisConfig::load_from_file(path)?
        }
        None => SynthesisConfig::default(),
    };

    // Offline command, needs no credentials
    if let Command::Parse { file } = &args.command {
        let raw = std::fs::read_to_string(file)?;
        let candidates = ResponseParser::parse_candidates(&raw);
        println!("{} candidates:", candidates.len());
        for (i, candidate) in candidates.iter().enumerate() {
            println!(
                "  {:>2}. {} (by {})",
                i + 1,
                candidate.title(),
                candidate.artist().unwrap_or("unknown artist")
            );
        }
        return Ok(());
    }

    let config = load_config()?;
    let spotify = config
        .spotify_access_token
        .clone()
        .map(|token| SpotifyClient::new(&config, token));
    let catalog: Option<&dyn CatalogService> =
        spotify.as_ref().map(|c| c as &dyn CatalogService);

    match args.command {
        Command::Analyze => {
            let mut session = Session::default();
            let response = dashboard(catalog, &mut session);
            print_response(&response)
        }
        Command::Roast => {
            let mut session = Session::default();
            let response = dashboard(catalog, &mut session);
            if !response.is_success() {
                return print_response(&response);
            }
            let llm = GeminiClient::shared(&config)?;
            let response = service::roast(&session, llm, &synthesis);
            match response.body.get("roast").and_then(|r| r.as_str()) {
                Some(text) if response.is_success() => {
                    println!("{text}");
                    Ok(())
                }
                _ => print_response(&response),
            }
        }
        Command::Playlist { theme, dry_run } if dry_run => {
            let Some(catalog) = catalog else {
                return print_response(&ApiResponse::from_result::<()>(Err(
                    PipelineError::NotAuthenticated,
                )));
            };
            let llm = GeminiClient::shared(&config)?;
            let report = match PlaylistSynthesizer::new(llm, catalog, &synthesis).preview(&theme) {
                Ok(report) => report,
                Err(e) => return print_response(&ApiResponse::from_result::<()>(Err(e))),
            };

            println!("\n🔍 DRY RUN: playlist for '{theme}' (would create via API)");
            for (i, (candidate, outcome)) in report.outcomes.iter().enumerate() {
                match outcome {
                    Resolution::Hit(track) => println!(
                        "  {:>2}. ✓ {} -> {} [{}]",
                        i + 1,
                        candidate,
                        track.matched_name,
                        track.track_id
                    ),
                    Resolution::Miss => println!("  {:>2}. ✗ {} (no match)", i + 1, candidate),
                    Resolution::Failed(reason) => {
                        println!("  {:>2}. ✗ {} ({})", i + 1, candidate, reason)
                    }
                }
            }
            let resolved = report.resolved();
            let selected = PlaylistAssembler::new(catalog, &synthesis).select_tracks(&resolved);
            println!(
                "\nWould attach {} of {} resolved tracks",
                selected.len(),
                resolved.len()
            );
            Ok(())
        }
        Command::Playlist { theme, .. } => {
            println!("🎵 Generating playlist for '{theme}'...");
            let llm = GeminiClient::shared(&config)?;
            let response = service::generate_playlist(catalog, Some(&theme), llm, &synthesis);
            print_response(&response)
        }
        Command::Parse { .. } => Ok(()),
    }
}

/// Fetch top items and run the analytics endpoint on them
fn dashboard(catalog: Option<&dyn CatalogService>, session: &mut Session) -> ApiResponse {
    let Some(catalog) = catalog else {
        return ApiResponse::from_result::<()>(Err(PipelineError::NotAuthenticated));
    };
    match service::fetch_top_items(catalog) {
        Ok(payload) => service::analytics(session, &payload),
        Err(e) => ApiResponse::from_result::<()>(Err(e)),
    }
}

fn print_response(response: &ApiResponse) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&response.body)?);
    if response.is_success() {
        Ok(())
    } else {
        Err(anyhow::anyhow!("Request failed with status {}", response.status))
    }
}
