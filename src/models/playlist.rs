//! Playlist model.

use serde::{Deserialize, Serialize};

use super::common::null_as_default;

/// A playlist as listed by `GET /playlists`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Playlist {
    /// Opaque playlist identifier.
    #[serde(rename = "uuid")]
    pub id: String,

    /// Display name.
    #[serde(rename = "playlist_name", default, deserialize_with = "null_as_default")]
    pub name: String,

    /// Number of songs as reported by the server.
    ///
    /// Display data only; never reconciled against a fetched song list.
    #[serde(default, deserialize_with = "null_as_default")]
    pub song_count: u32,
}

impl Playlist {
    /// Create a new playlist record.
    pub fn new<S1: Into<String>, S2: Into<String>>(id: S1, name: S2, song_count: u32) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            song_count,
        }
    }

    /// Song count label, e.g. "12 songs".
    pub fn song_count_label(&self) -> String {
        format!("{} songs", self.song_count)
    }
}
