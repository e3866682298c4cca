//! Catalog REST API client.
//!
//! Every call is a single anonymous request. There are no retries and no
//! timeouts; a hung request simply never resolves.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, StatusCode, Url};
use serde_json::{json, Value};
use tracing::{debug, error, info};

use super::source::CatalogSource;
use crate::config::ClientConfig;
use crate::converters::{self, ApiEnvelope};
use crate::error::{CatalogError, Result};
use crate::models::{Playlist, Song};
use crate::submission::{NewSong, MSG_ADD_FAILED};

const MSG_PLAYLISTS_FAILED: &str = "Failed to fetch playlists";
const MSG_SONGS_FAILED: &str = "Failed to fetch songs";
const MSG_SONG_FAILED: &str = "Failed to fetch song details";
const MSG_SONG_NOT_FOUND: &str = "Song not found";
const MSG_THUMBNAIL_FAILED: &str = "Failed to fetch thumbnail";

/// Catalog API client.
///
/// # Example
///
/// ```rust,no_run
/// use songlist::{CatalogApi, ClientConfig};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let api = CatalogApi::new(ClientConfig::default())?;
///     for playlist in api.list_playlists().await? {
///         println!("{} ({} songs)", playlist.name, playlist.song_count);
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CatalogApi {
    client: Client,
    config: ClientConfig,
}

impl CatalogApi {
    /// Create a new client for the given configuration.
    pub fn new(config: ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(format!("songlist/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { client, config })
    }

    /// The configuration this client talks to.
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Make a GET request and read the body as JSON.
    async fn get_api(&self, url: Url) -> Result<(StatusCode, Value)> {
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        read_json(response).await
    }

    /// Fetch all playlists.
    pub async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        let (status, body) = self
            .get_api(self.config.resource_url(&["playlists"])?)
            .await?;
        let envelope = ApiEnvelope::parse(&body);

        if !status.is_success() || envelope.reported_failure() {
            return Err(api_failure(status, envelope, MSG_PLAYLISTS_FAILED));
        }

        let playlists = converters::parse_playlists(body);
        info!("Fetched {} playlists", playlists.len());
        Ok(playlists)
    }

    /// Fetch the songs of a playlist.
    pub async fn list_songs(&self, playlist_id: &str) -> Result<Vec<Song>> {
        let (status, body) = self
            .get_api(
                self.config
                    .resource_url(&["playlists", "song-list", playlist_id])?,
            )
            .await?;

        if !status.is_success() {
            return Err(api_failure(
                status,
                ApiEnvelope::parse(&body),
                MSG_SONGS_FAILED,
            ));
        }

        let songs = converters::parse_songs(body);
        info!("Fetched {} songs for playlist {}", songs.len(), playlist_id);
        Ok(songs)
    }

    /// Fetch a single song with comments.
    pub async fn get_song(&self, song_id: &str) -> Result<Song> {
        let (status, body) = self
            .get_api(self.config.resource_url(&["playlists", "song", song_id])?)
            .await?;
        let envelope = ApiEnvelope::parse(&body);

        if !status.is_success() || !envelope.reported_success() {
            return Err(api_failure(status, envelope, MSG_SONG_FAILED));
        }

        converters::parse_song(&envelope)
            .ok_or_else(|| CatalogError::Api(MSG_SONG_NOT_FOUND.to_string()))
    }

    /// Post a new song as multipart form data.
    ///
    /// The endpoint has no de-duplication key; posting the same song twice
    /// creates two records.
    pub async fn add_song(&self, song: &NewSong) -> Result<Option<String>> {
        let url = self.config.resource_url(&["playlists", "song"])?;
        debug!(title = %song.title, file = %song.thumbnail.file_name, "POST {}", url);

        let thumbnail = Part::bytes(song.thumbnail.bytes.to_vec())
            .file_name(song.thumbnail.file_name.clone())
            .mime_str(&song.thumbnail.mime)?;

        let form = Form::new()
            .text("title", song.title.clone())
            .text("artist", song.artist.clone())
            .text("description", song.description.clone())
            .text("source", song.source.clone())
            .part("thumbnail", thumbnail);

        let response = self.client.post(url).multipart(form).send().await?;
        let (status, body) = read_json(response).await?;
        let envelope = ApiEnvelope::parse(&body);

        if !status.is_success() || !envelope.reported_success() {
            return Err(api_failure(status, envelope, MSG_ADD_FAILED));
        }

        Ok(envelope.message)
    }

    /// URL of a thumbnail asset.
    pub fn thumbnail_url(&self, filename: &str) -> String {
        self.config.thumbnail_url(filename)
    }

    /// Download a thumbnail image.
    pub async fn get_thumbnail(&self, filename: &str) -> Result<Bytes> {
        let url = self.config.resource_url(&["thumbnail", filename])?;
        debug!("GET {}", url);

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            error!("Thumbnail {} unavailable: {}", filename, status);
            return Err(CatalogError::Api(MSG_THUMBNAIL_FAILED.to_string()));
        }

        Ok(response.bytes().await?)
    }
}

#[async_trait]
impl CatalogSource for CatalogApi {
    async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        CatalogApi::list_playlists(self).await
    }

    async fn list_songs(&self, playlist_id: &str) -> Result<Vec<Song>> {
        CatalogApi::list_songs(self, playlist_id).await
    }

    async fn get_song(&self, song_id: &str) -> Result<Song> {
        CatalogApi::get_song(self, song_id).await
    }

    async fn add_song(&self, song: &NewSong) -> Result<Option<String>> {
        CatalogApi::add_song(self, song).await
    }

    fn thumbnail_url(&self, filename: &str) -> String {
        CatalogApi::thumbnail_url(self, filename)
    }

    async fn get_thumbnail(&self, filename: &str) -> Result<Bytes> {
        CatalogApi::get_thumbnail(self, filename).await
    }
}

/// Read status and body. A body that is not JSON reads as `{}`.
async fn read_json(response: Response) -> Result<(StatusCode, Value)> {
    let status = response.status();
    let text = response.text().await?;

    let body = match serde_json::from_str::<Value>(&text) {
        Ok(value) => value,
        Err(e) => {
            debug!("Response body is not JSON ({}): treating as empty", e);
            json!({})
        }
    };

    Ok((status, body))
}

/// Build the error for a failed call, preferring the server's message.
fn api_failure(status: StatusCode, envelope: ApiEnvelope, fallback: &str) -> CatalogError {
    let message = envelope
        .message
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    error!("Catalog API error ({}): {}", status, message);
    CatalogError::Api(message)
}
