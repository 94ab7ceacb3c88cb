use chrono::{TimeZone, Utc};
use clap::{Parser, Subcommand};
use lastfm_ws::{Credentials, LastFmClient, LastFmError, Params, SessionPersistence};

/// Command-line client for the Last.fm web services
#[derive(Parser)]
#[command(name = "lastfm-ws", about = "Last.fm web services client", long_about = None)]
struct Cli {
    /// Show detailed debug information
    #[arg(long, global = true)]
    verbose: bool,

    /// Print records as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate and save the session key for later commands
    ///
    /// Needs LASTFM_API_KEY, LASTFM_API_SECRET, LASTFM_USERNAME and either
    /// LASTFM_AUTH_TOKEN or LASTFM_PASSWORD.
    Login,

    /// Show metadata and the track listing of an album
    AlbumInfo {
        /// Artist name
        artist: String,
        /// Album name
        album: String,
    },

    /// Show metadata and biography of an artist
    ArtistInfo {
        /// Artist name
        artist: String,
    },

    /// Scrobble a track
    Scrobble {
        /// Artist name
        artist: String,
        /// Track name
        track: String,
        /// Album name
        #[arg(long)]
        album: Option<String>,
        /// Unix time the track started playing (defaults to now)
        #[arg(long)]
        timestamp: Option<i64>,
    },
}

fn print_record<T>(record: &T, json: bool) -> Result<(), Box<dyn std::error::Error>>
where
    T: serde::Serialize + std::fmt::Display,
{
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("{record}");
    }
    Ok(())
}

/// Restore a saved session for the configured user, or authenticate and save one.
async fn ensure_session(
    client: &mut LastFmClient,
    store: &SessionPersistence,
) -> lastfm_ws::Result<()> {
    if client.session_key().is_some() {
        return Ok(());
    }

    let username = client
        .credentials()
        .username
        .clone()
        .ok_or(LastFmError::MissingCredential("username"))?;

    match store.load_session(&username) {
        Ok(Some(session)) if session.is_valid() => {
            log::debug!("Using saved session for {username}");
            client.restore_session(&session);
            return Ok(());
        }
        Ok(_) => {}
        Err(e) => {
            log::warn!("Ignoring unreadable saved session: {e}");
            store.remove_session(&username)?;
        }
    }

    client.authenticate().await?;
    if let Some(session) = client.session() {
        store.save_session(&session)?;
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let credentials = Credentials::from_env()?;
    let http_client = http_client::native::NativeClient::new();
    let mut client = LastFmClient::new(Box::new(http_client), credentials);

    match cli.command {
        Commands::Login => {
            let store = SessionPersistence::new()?;
            client.set_session_key(None);
            client.authenticate().await?;
            if let Some(session) = client.session() {
                store.save_session(&session)?;
                println!("Logged in as {}", session.username);
            }
        }
        Commands::AlbumInfo { artist, album } => {
            let params = Params::new()
                .with("artist", artist)
                .with("album", album)
                .with("autocorrect", true);
            let album = client.album().get_info(params).await?;
            print_record(&album, cli.json)?;
            if !cli.json {
                for track in &album.tracks {
                    println!(
                        "  {:>2}. {}",
                        track.position.unwrap_or_default(),
                        track.name.as_deref().unwrap_or_default()
                    );
                }
            }
        }
        Commands::ArtistInfo { artist } => {
            let params = Params::new().with("artist", artist).with("autocorrect", true);
            let artist = client.artist().get_info(params).await?;
            print_record(&artist, cli.json)?;
            if !cli.json {
                if let Some(listeners) = artist.listeners {
                    println!("  listeners: {listeners}");
                }
                if let Some(summary) = artist.wiki.as_ref().and_then(|w| w.summary.as_deref()) {
                    println!("\n{summary}");
                }
            }
        }
        Commands::Scrobble {
            artist,
            track,
            album,
            timestamp,
        } => {
            let store = SessionPersistence::new()?;
            ensure_session(&mut client, &store).await?;
            let started = match timestamp {
                Some(secs) => Utc
                    .timestamp_opt(secs, 0)
                    .single()
                    .ok_or_else(|| format!("Invalid timestamp: {secs}"))?,
                None => Utc::now(),
            };
            let params = Params::new()
                .with("artist", artist)
                .with("track", track)
                .with_opt("album", album)
                .with("timestamp", started);
            let summary = client.track().scrobble(params).await?;
            println!(
                "Scrobbled: {} accepted, {} ignored",
                summary.accepted, summary.ignored
            );
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        if let Some(LastFmError::MissingCredential(_)) = e.downcast_ref::<LastFmError>() {
            eprintln!();
            eprintln!("Set LASTFM_API_KEY, and for signed calls LASTFM_API_SECRET,");
            eprintln!("LASTFM_USERNAME and LASTFM_AUTH_TOKEN or LASTFM_PASSWORD.");
        }
        std::process::exit(1);
    }
}
