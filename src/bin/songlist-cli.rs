use clap::{Parser, Subcommand};
use songlist::dates::format_relative;
use songlist::session::{logout, require_session};
use songlist::views::needs_login;
use songlist::{
    AddSongForm, CatalogApi, CatalogError, ClientConfig, FileSessionStore, FormStatus,
    PlaylistsPage, Session, SessionProvider, SongDetailPage, SongListPage, SongMedia,
    ThumbnailFile, ViewState,
};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "songlist-cli")]
#[command(about = "CLI for browsing and adding songs in the playlist catalog", long_about = None)]
struct Cli {
    /// Catalog API base URL
    #[arg(long, env = "SONGLIST_API_URL", default_value = songlist::config::DEFAULT_BASE_URL)]
    base_url: String,

    /// Session file (defaults to the user config directory)
    #[arg(long, env = "SONGLIST_SESSION_FILE")]
    session_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store a session token obtained from the login service
    Login {
        /// Bearer token
        #[arg(long)]
        token: String,

        /// User data (JSON)
        #[arg(long)]
        user: Option<String>,
    },
    /// Remove the stored session
    Logout,
    /// List playlists
    Playlists,
    /// List songs of a playlist
    Songs {
        /// Playlist ID
        playlist_id: String,

        /// Only show songs whose title or artist contains this text
        #[arg(short, long, default_value = "")]
        search: String,
    },
    /// Show a song with its comments
    Song {
        /// Song ID
        song_id: String,
    },
    /// Add a new song
    AddSong {
        #[arg(long)]
        title: String,
        #[arg(long)]
        artist: String,
        #[arg(long)]
        description: String,
        /// Source URL (YouTube)
        #[arg(long)]
        source: String,
        /// Thumbnail image (JPG, JPEG or PNG, max 2MB)
        #[arg(long)]
        thumbnail: PathBuf,
    },
    /// Download a thumbnail image
    Thumbnail {
        /// Thumbnail file name
        filename: String,

        /// Output path (defaults to the file name)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .compact()
        .init();

    let session = FileSessionStore::new(
        cli.session_file
            .clone()
            .unwrap_or_else(FileSessionStore::default_path),
    );
    let api = CatalogApi::new(ClientConfig::new(&cli.base_url)?)?;

    match run(&cli.command, &session, &api).await {
        Err(e) if needs_login(&e) => {
            eprintln!("Not logged in. Run `songlist-cli login --token <TOKEN>` first.");
            std::process::exit(2);
        }
        other => other?,
    }

    Ok(())
}

async fn run(
    command: &Commands,
    session: &FileSessionStore,
    api: &CatalogApi,
) -> Result<(), CatalogError> {
    match command {
        Commands::Login { token, user } => {
            session.store(&Session::new(token.clone(), user.clone()))?;
            println!("✅ Session saved to {}", session.path().display());
        }
        Commands::Logout => {
            logout(session)?;
            println!("Logged out");
        }
        Commands::Playlists => {
            let mut page = PlaylistsPage::new();
            page.load(session, api).await?;

            match page.state() {
                ViewState::Ready(playlists) if playlists.is_empty() => {
                    println!("No playlists found")
                }
                ViewState::Ready(playlists) => {
                    for (i, playlist) in playlists.iter().enumerate() {
                        println!(
                            "{}. {} ({}) [ID: {}]",
                            i + 1,
                            playlist.name,
                            playlist.song_count_label(),
                            playlist.id
                        );
                    }
                }
                state => report_failure(state),
            }
        }
        Commands::Songs {
            playlist_id,
            search,
        } => {
            let mut page = SongListPage::new(playlist_id.clone());
            page.set_query(search.clone());
            page.load(session, api).await?;

            match page.state() {
                ViewState::Ready(list) => {
                    if !list.playlist_name().is_empty() {
                        println!("{}", list.playlist_name());
                    }
                    let songs = list.visible();
                    if songs.is_empty() {
                        println!("No songs found");
                    }
                    for (i, song) in songs.iter().enumerate() {
                        println!(
                            "{}. {} - {} (♥ {}, {} comments) [ID: {}]",
                            i + 1,
                            song.artist,
                            song.title,
                            song.likes_display(),
                            song.comment_count(),
                            song.id
                        );
                    }
                }
                state => report_failure(state),
            }
        }
        Commands::Song { song_id } => {
            let mut page = SongDetailPage::new(song_id.clone());
            page.load(session, api).await?;

            match page.state() {
                ViewState::Ready(detail) => {
                    let song = &detail.song;
                    println!("{}", song.title);
                    println!("   {}", song.artist);
                    match &detail.media {
                        SongMedia::Embed { url, .. } => println!("   Player: {}", url),
                        SongMedia::Thumbnail { url } => println!("   Thumbnail: {}", url),
                    }
                    println!("   {} likes", song.likes_display());
                    println!();
                    println!("{}", song.description);
                    println!();
                    println!("Comments ({})", song.comment_count());
                    if song.comments.is_empty() {
                        println!("   No comments yet.");
                    }
                    for comment in &song.comments {
                        println!(
                            "   {} · {}: {}",
                            comment.creator,
                            format_relative(&comment.created_at),
                            comment.text
                        );
                    }
                }
                state => report_failure(state),
            }
        }
        Commands::AddSong {
            title,
            artist,
            description,
            source,
            thumbnail,
        } => {
            let mut form = AddSongForm::open(session)?;
            form.fields.title = title.clone();
            form.fields.artist = artist.clone();
            form.fields.description = description.clone();
            form.fields.source = source.clone();

            let image = ThumbnailFile::from_path(thumbnail).await?;
            if let Err(e) = form.select_thumbnail(image) {
                println!("❌ {}", e);
                return Ok(());
            }

            match form.submit(api).await {
                FormStatus::Succeeded(msg) => println!("✅ {}", msg),
                FormStatus::Failed(msg) => println!("❌ {}", msg),
                FormStatus::Idle | FormStatus::Submitting => {}
            }
        }
        Commands::Thumbnail { filename, output } => {
            require_session(session)?;
            let bytes = api.get_thumbnail(filename).await?;
            let path = output.clone().unwrap_or_else(|| PathBuf::from(filename));
            tokio::fs::write(&path, &bytes).await?;
            println!("✅ Saved {} bytes to {}", bytes.len(), path.display());
        }
    }

    Ok(())
}

fn report_failure<T>(state: &ViewState<T>) {
    if let Some(msg) = state.error() {
        println!("❌ {}", msg);
        println!("   Run the command again to retry.");
    }
}
