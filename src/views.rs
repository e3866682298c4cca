//! Page controllers.
//!
//! Each page owns one [`ViewState`] and walks `Loading -> Ready` or
//! `Loading -> Failed`. Loading again from `Failed` is the retry. A missing
//! session stops a load before anything is fetched and is returned as
//! [`CatalogError::SessionMissing`] so the caller can show the login view.

use tracing::debug;

use crate::api::CatalogSource;
use crate::error::{CatalogError, Result};
use crate::models::{Playlist, Song};
use crate::search::SongSearch;
use crate::session::{require_session, SessionProvider};
use crate::youtube;

/// Lifecycle of a page's data.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    /// Not loaded yet.
    Idle,
    /// A request is in flight. Stays set if the caller drops the load
    /// future before it settles.
    Loading,
    /// Data arrived.
    Ready(T),
    /// The request failed; carries the message to display.
    Failed(String),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Idle
    }
}

impl<T> ViewState<T> {
    /// Loaded data, if ready.
    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    /// Error text, if failed.
    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }

    /// True while a load is pending, or after a pending load was dropped
    /// before it settled.
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    fn settle(result: Result<T>, fallback: &str) -> Self {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => ViewState::Failed(e.user_message(fallback)),
        }
    }
}

/// The playlists page.
#[derive(Debug, Default)]
pub struct PlaylistsPage {
    state: ViewState<Vec<Playlist>>,
}

impl PlaylistsPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ViewState<Vec<Playlist>> {
        &self.state
    }

    /// Fetch the playlists.
    pub async fn load<S: CatalogSource + ?Sized>(
        &mut self,
        session: &dyn SessionProvider,
        source: &S,
    ) -> Result<()> {
        require_session(session)?;
        self.state = ViewState::Loading;
        debug!("Loading playlists");

        let result = source.list_playlists().await;
        self.state = ViewState::settle(result, "Failed to fetch playlists");
        Ok(())
    }

    /// Load again after a failure.
    pub async fn retry<S: CatalogSource + ?Sized>(
        &mut self,
        session: &dyn SessionProvider,
        source: &S,
    ) -> Result<()> {
        self.load(session, source).await
    }
}

/// Songs of one playlist, with the search applied.
#[derive(Debug, Clone, Default)]
pub struct SongList {
    search: SongSearch,
    playlist_name: String,
}

impl SongList {
    /// Wrap fetched songs. The playlist name comes from the first song.
    pub fn new(songs: Vec<Song>) -> Self {
        let playlist_name = songs
            .first()
            .and_then(|s| s.playlist_name.clone())
            .unwrap_or_default();

        Self {
            search: SongSearch::new(songs),
            playlist_name,
        }
    }

    pub fn playlist_name(&self) -> &str {
        &self.playlist_name
    }

    pub fn search(&self) -> &SongSearch {
        &self.search
    }

    /// Songs matching the current query.
    pub fn visible(&self) -> Vec<&Song> {
        self.search.results()
    }
}

/// The song list page of one playlist.
#[derive(Debug, Default)]
pub struct SongListPage {
    playlist_id: String,
    query: String,
    state: ViewState<SongList>,
}

impl SongListPage {
    pub fn new<S: Into<String>>(playlist_id: S) -> Self {
        Self {
            playlist_id: playlist_id.into(),
            ..Default::default()
        }
    }

    pub fn playlist_id(&self) -> &str {
        &self.playlist_id
    }

    pub fn state(&self) -> &ViewState<SongList> {
        &self.state
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Update the search query. Results recompute immediately when data is
    /// loaded; otherwise the query applies once it arrives.
    pub fn set_query<S: Into<String>>(&mut self, query: S) {
        self.query = query.into();
        if let ViewState::Ready(list) = &mut self.state {
            list.search.set_query(self.query.clone());
        }
    }

    /// Fetch the songs of the playlist.
    pub async fn load<S: CatalogSource + ?Sized>(
        &mut self,
        session: &dyn SessionProvider,
        source: &S,
    ) -> Result<()> {
        require_session(session)?;
        self.state = ViewState::Loading;
        debug!(playlist = %self.playlist_id, "Loading songs");

        let result = source.list_songs(&self.playlist_id).await.map(|songs| {
            let mut list = SongList::new(songs);
            list.search.set_query(self.query.clone());
            list
        });
        self.state = ViewState::settle(result, "Failed to fetch songs");
        Ok(())
    }

    /// Load again after a failure.
    pub async fn retry<S: CatalogSource + ?Sized>(
        &mut self,
        session: &dyn SessionProvider,
        source: &S,
    ) -> Result<()> {
        self.load(session, source).await
    }
}

/// How a song's media is presented.
#[derive(Debug, Clone, PartialEq)]
pub enum SongMedia {
    /// An embeddable YouTube player.
    Embed { video_id: String, url: String },
    /// No recognizable video; show the thumbnail image.
    Thumbnail { url: String },
}

impl SongMedia {
    /// Pick the player when the source is a YouTube link, the thumbnail
    /// otherwise.
    pub fn for_song<S: CatalogSource + ?Sized>(song: &Song, source: &S) -> Self {
        match youtube::extract_video_id(&song.source) {
            Some(video_id) => SongMedia::Embed {
                url: youtube::embed_url(&video_id),
                video_id,
            },
            None => SongMedia::Thumbnail {
                url: source.thumbnail_url(&song.thumbnail),
            },
        }
    }
}

/// A song ready to render.
#[derive(Debug, Clone, PartialEq)]
pub struct SongDetail {
    pub song: Song,
    pub media: SongMedia,
}

/// The song detail page.
#[derive(Debug, Default)]
pub struct SongDetailPage {
    song_id: String,
    state: ViewState<SongDetail>,
}

impl SongDetailPage {
    pub fn new<S: Into<String>>(song_id: S) -> Self {
        Self {
            song_id: song_id.into(),
            state: ViewState::Idle,
        }
    }

    pub fn song_id(&self) -> &str {
        &self.song_id
    }

    pub fn state(&self) -> &ViewState<SongDetail> {
        &self.state
    }

    /// Fetch the song.
    pub async fn load<S: CatalogSource + ?Sized>(
        &mut self,
        session: &dyn SessionProvider,
        source: &S,
    ) -> Result<()> {
        require_session(session)?;
        self.state = ViewState::Loading;
        debug!(song = %self.song_id, "Loading song details");

        let result = source.get_song(&self.song_id).await.map(|song| SongDetail {
            media: SongMedia::for_song(&song, source),
            song,
        });
        self.state = ViewState::settle(result, "Failed to fetch song details");
        Ok(())
    }

    /// Load again after a failure.
    pub async fn retry<S: CatalogSource + ?Sized>(
        &mut self,
        session: &dyn SessionProvider,
        source: &S,
    ) -> Result<()> {
        self.load(session, source).await
    }
}

/// Whether an error means "send the user to the login view".
pub fn needs_login(err: &CatalogError) -> bool {
    matches!(err, CatalogError::SessionMissing)
}
