//! JSON to model converters.
//!
//! The catalog API is inconsistent about wrapping list results: some
//! endpoints return a bare array, others `{ "success": true, "data": [...] }`.
//! Responses are classified once, right after they are read, and every
//! caller downstream only sees typed sequences.

use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

use crate::models::{Playlist, Song};

/// Shape of a list response.
#[derive(Debug, Clone, PartialEq)]
pub enum ListPayload {
    /// The body is the array itself.
    Bare(Vec<Value>),
    /// An object carrying the list under `data`.
    Wrapped(Value),
    /// Anything else (`null`, scalars, objects without `data`).
    Unrecognized,
}

impl From<Value> for ListPayload {
    fn from(value: Value) -> Self {
        match value {
            Value::Array(items) => ListPayload::Bare(items),
            Value::Object(mut obj) => match obj.remove("data") {
                Some(data) => ListPayload::Wrapped(data),
                None => ListPayload::Unrecognized,
            },
            _ => ListPayload::Unrecognized,
        }
    }
}

impl ListPayload {
    /// Raw list items, empty when the payload carries no array.
    pub fn into_items(self) -> Vec<Value> {
        match self {
            ListPayload::Bare(items) => items,
            ListPayload::Wrapped(Value::Array(items)) => items,
            ListPayload::Wrapped(_) | ListPayload::Unrecognized => Vec::new(),
        }
    }
}

/// Status fields common to every catalog response object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApiEnvelope {
    /// `success` flag, when present and boolean.
    pub success: Option<bool>,
    /// Server message, when present and a string.
    pub message: Option<String>,
    /// `data` payload, when present and not null.
    pub data: Option<Value>,
}

impl ApiEnvelope {
    /// Read the envelope fields out of a response body.
    pub fn parse(json: &Value) -> Self {
        Self {
            success: json.get("success").and_then(|s| s.as_bool()),
            message: json
                .get("message")
                .and_then(|m| m.as_str())
                .map(|s| s.to_string()),
            data: json.get("data").filter(|d| !d.is_null()).cloned(),
        }
    }

    /// Whether the server explicitly reported failure.
    pub fn reported_failure(&self) -> bool {
        self.success == Some(false)
    }

    /// Whether the server explicitly reported success.
    pub fn reported_success(&self) -> bool {
        self.success == Some(true)
    }
}

/// Normalize a loosely shaped list response into typed records.
///
/// Arrays are used as-is, `{ data: [...] }` is unwrapped, anything else
/// becomes an empty list. Items that do not deserialize are skipped.
pub fn normalize_list<T: DeserializeOwned>(json: Value) -> Vec<T> {
    parse_items(ListPayload::from(json).into_items())
}

/// Deserialize each item, dropping the ones that do not fit `T`.
pub fn parse_items<T: DeserializeOwned>(items: Vec<Value>) -> Vec<T> {
    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                warn!("Skipping malformed record: {}", e);
                None
            }
        })
        .collect()
}

/// Normalize a playlist list response.
pub fn parse_playlists(json: Value) -> Vec<Playlist> {
    normalize_list(json)
}

/// Normalize a song list response.
pub fn parse_songs(json: Value) -> Vec<Song> {
    normalize_list(json)
}

/// Parse a single song out of a detail response's `data` field.
pub fn parse_song(envelope: &ApiEnvelope) -> Option<Song> {
    let data = envelope.data.clone()?;
    match serde_json::from_value(data) {
        Ok(song) => Some(song),
        Err(e) => {
            warn!("Song detail did not match the expected shape: {}", e);
            None
        }
    }
}
