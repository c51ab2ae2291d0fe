mod catalog;
mod events;
mod matching;
mod pacing;
mod spotify;
mod tidal;
mod transfer;

use std::time::Duration;

use anyhow::{Context, Result, ensure};
use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::events::{EventKind, EventSink, TransferEvent};
use crate::pacing::SleepPacer;
use crate::transfer::{Transfer, TransferConfig};

#[derive(Parser)]
#[command(version, author, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copies a Spotify playlist into a new TIDAL playlist
    Transfer {
        /// Spotify access token
        #[arg(short = 'S', long, env = "SPOTIFY_TOKEN", hide_env_values = true)]
        spotify_token: String,

        /// TIDAL access token
        #[arg(short = 'T', long, env = "TIDAL_TOKEN", hide_env_values = true)]
        tidal_token: String,

        /// Name of the new playlist, defaults to the Spotify playlist's name
        #[arg(short, long)]
        name: Option<String>,

        /// Tracks requested per Spotify page
        #[arg(long, default_value_t = 100)]
        page_size: u32,

        /// Pause after each TIDAL search
        #[arg(long, default_value_t = 200)]
        search_delay_ms: u64,

        /// Pause after each batch of tracks added to the TIDAL playlist
        #[arg(long, default_value_t = 5000)]
        batch_delay_ms: u64,

        /// Match the tracks and report the results without creating a playlist
        #[arg(long)]
        dry_run: bool,

        /// Print progress events as JSON lines
        #[arg(long)]
        json_events: bool,

        /// Spotify playlist ID, `spotify:playlist:` URI or `open.spotify.com` link
        playlist: String,
    },

    /// Lists the current user's Spotify playlists
    Playlists {
        /// Spotify access token
        #[arg(short = 'S', long, env = "SPOTIFY_TOKEN", hide_env_values = true)]
        spotify_token: String,
    },

    /// Generate shell completions
    Completions {
        /// The shell to generate the completions for
        #[arg(value_enum)]
        shell: clap_complete_command::Shell,
    },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn print_event(event: &TransferEvent, json: bool) {
    if json {
        match serde_json::to_string(event) {
            Ok(line) => println!("{line}"),
            Err(err) => tracing::warn!(%err, "could not serialize event"),
        }
        return;
    }
    let marker = match event.kind {
        EventKind::Positive => '+',
        EventKind::Negative => '-',
    };
    println!("{marker} {}", event.message);
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Transfer {
            spotify_token,
            tidal_token,
            name,
            page_size,
            search_delay_ms,
            batch_delay_ms,
            dry_run,
            json_events,
            playlist,
        } => {
            let playlist_id = spotify::parse_playlist_id(&playlist)
                .context("invalid Spotify playlist ID")?
                .to_owned();
            ensure!(
                (1..=100).contains(&page_size),
                "page size must be between 1 and 100",
            );

            let source = spotify::Client::new(&spotify_token, page_size)?;
            let target = tidal::Client::new(&tidal_token)?;
            let name = match name {
                Some(name) => name,
                None => source
                    .playlist_name(&playlist_id)
                    .await
                    .context("fetching the playlist name")?,
            };

            let events = EventSink::new();
            let _subscription = events.subscribe(move |event| print_event(event, json_events));

            let config = TransferConfig {
                search_delay: Duration::from_millis(search_delay_ms),
                batch_delay: Duration::from_millis(batch_delay_ms),
                dry_run,
                ..TransferConfig::default()
            };
            let summary = Transfer::new(&source, &target, &SleepPacer, events, config)
                .run(&playlist_id, &name)
                .await?;
            tracing::info!(?summary, "transfer finished");
        }
        Commands::Playlists { spotify_token } => {
            let client = spotify::Client::new(&spotify_token, 50)?;
            let playlists = client.all_playlists(50).await?;
            if playlists.is_empty() {
                println!("No playlists found.");
            }
            for playlist in playlists {
                println!("{}  {}", playlist.id, playlist.name);
            }
        }
        Commands::Completions { shell } => {
            shell.generate(&mut Cli::command(), &mut std::io::stdout());
        }
    }
    Ok(())
}
