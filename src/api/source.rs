//! Data-source seam between the views and the network.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::Result;
use crate::models::{Playlist, Song};
use crate::submission::NewSong;

/// Everything the views need from the remote catalog.
///
/// [`CatalogApi`](super::CatalogApi) is the real implementation; tests
/// substitute their own.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// All playlists.
    async fn list_playlists(&self) -> Result<Vec<Playlist>>;

    /// Songs of one playlist, in server order.
    async fn list_songs(&self, playlist_id: &str) -> Result<Vec<Song>>;

    /// One song with its comments.
    async fn get_song(&self, song_id: &str) -> Result<Song>;

    /// Post a new song. Returns the server message, if any.
    async fn add_song(&self, song: &NewSong) -> Result<Option<String>>;

    /// Resolve a thumbnail file name to its URL.
    fn thumbnail_url(&self, filename: &str) -> String;

    /// Download a thumbnail image.
    async fn get_thumbnail(&self, filename: &str) -> Result<Bytes>;
}
