//! Song and comment models.

use serde::{Deserialize, Serialize};

use super::common::{group_thousands, null_as_default};

/// A comment left on a song.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Comment {
    /// Comment body.
    #[serde(rename = "comment_text", default, deserialize_with = "null_as_default")]
    pub text: String,

    /// Display name of the author.
    #[serde(default, deserialize_with = "null_as_default")]
    pub creator: String,

    /// Creation time as sent by the server (ISO-8601, kept verbatim).
    #[serde(rename = "createdAt", default, deserialize_with = "null_as_default")]
    pub created_at: String,
}

/// A song record.
///
/// Returned both by the song list endpoint and the song detail endpoint.
/// Fields the server leaves out or sends as `null` take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Song {
    /// Opaque song identifier.
    #[serde(rename = "uuid")]
    pub id: String,

    /// Song title.
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,

    /// Artist name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub artist: String,

    /// Free-form description.
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,

    /// Source URL, usually a YouTube link.
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,

    /// Thumbnail file name, resolved against the thumbnail endpoint.
    #[serde(default, deserialize_with = "null_as_default")]
    pub thumbnail: String,

    /// Like count.
    #[serde(default, deserialize_with = "null_as_default")]
    pub likes: u64,

    /// Comments in server order.
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments: Vec<Comment>,

    /// Name of the playlist this song belongs to, when the server includes it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub playlist_name: Option<String>,
}

impl Song {
    /// Number of comments.
    pub fn comment_count(&self) -> usize {
        self.comments.len()
    }

    /// Like count with thousands separators, e.g. "1,234".
    pub fn likes_display(&self) -> String {
        group_thousands(self.likes)
    }
}
