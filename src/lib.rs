//! # songlist
//!
//! A Rust client for a remote playlist and song catalog.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use songlist::{CatalogApi, ClientConfig, FileSessionStore, SongListPage};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let api = CatalogApi::new(ClientConfig::default())?;
//!     let session = FileSessionStore::new(FileSessionStore::default_path());
//!
//!     // Songs of a playlist, filtered client-side
//!     let mut page = SongListPage::new("playlist-uuid");
//!     page.set_query("queen");
//!     page.load(&session, &api).await?;
//!
//!     if let Some(list) = page.state().data() {
//!         for song in list.visible() {
//!             println!("{} - {}", song.artist, song.title);
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Playlists, songs and song detail** fetched from the catalog API
//! - **Response normalization** for endpoints that may or may not wrap lists
//! - **Search** by case-insensitive substring over title and artist
//! - **Add song** with thumbnail validation and multipart upload
//! - **YouTube** video id extraction for embedded playback
//!
//! ## Building blocks
//!
//! - [`CatalogApi`] - HTTP client for the catalog endpoints
//! - [`views`] - page controllers with an explicit load state
//! - [`session`] - stored session and the auth gate

pub mod api;
pub mod config;
pub mod converters;
pub mod dates;
pub mod error;
pub mod models;
pub mod search;
pub mod session;
pub mod submission;
pub mod views;
pub mod youtube;

pub use api::{CatalogApi, CatalogSource};
pub use config::ClientConfig;
pub use error::{CatalogError, Result};
pub use models::{Comment, Playlist, Song};
pub use search::{filter_songs, SongSearch};
pub use session::{FileSessionStore, MemorySession, Session, SessionProvider};
pub use submission::{AddSongForm, FormStatus, NewSong, SongForm, ThumbnailFile};
pub use views::{
    PlaylistsPage, SongDetail, SongDetailPage, SongList, SongListPage, SongMedia, ViewState,
};
