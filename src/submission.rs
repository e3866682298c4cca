//! Add-song form: validation, state and submission.
//!
//! Image constraints are checked when a thumbnail is selected, required
//! fields when the form is submitted. Nothing reaches the network unless
//! both pass.

use std::path::Path;

use bytes::Bytes;
use tracing::{debug, info, warn};

use crate::api::CatalogSource;
use crate::error::{CatalogError, Result};
use crate::session::{require_session, SessionProvider};

/// Largest accepted thumbnail, in bytes.
pub const MAX_THUMBNAIL_BYTES: u64 = 2 * 1024 * 1024;

/// Accepted thumbnail MIME types.
pub const ALLOWED_THUMBNAIL_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png"];

pub const MSG_IMAGE_TOO_LARGE: &str = "Image size must be less than 2MB";
pub const MSG_IMAGE_WRONG_TYPE: &str = "Only JPG, JPEG, and PNG files are allowed";
pub const MSG_FIELDS_REQUIRED: &str = "All fields are required";
pub const MSG_SONG_ADDED: &str = "Song added successfully!";
pub const MSG_ADD_FAILED: &str = "Failed to add song";

/// Check a candidate thumbnail's size and MIME type.
///
/// Size is checked before type.
pub fn validate_thumbnail(size: u64, mime: &str) -> Result<()> {
    if size > MAX_THUMBNAIL_BYTES {
        return Err(CatalogError::Validation(MSG_IMAGE_TOO_LARGE.to_string()));
    }
    if !ALLOWED_THUMBNAIL_TYPES.contains(&mime) {
        return Err(CatalogError::Validation(MSG_IMAGE_WRONG_TYPE.to_string()));
    }
    Ok(())
}

/// An image picked for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct ThumbnailFile {
    /// File name sent with the multipart part.
    pub file_name: String,
    /// MIME type sent with the multipart part.
    pub mime: String,
    /// Raw image bytes.
    pub bytes: Bytes,
}

impl ThumbnailFile {
    /// Create a thumbnail from bytes already in memory.
    pub fn new<S1: Into<String>, S2: Into<String>, B: Into<Bytes>>(
        file_name: S1,
        mime: S2,
        bytes: B,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Read an image from disk, guessing its MIME type from the extension.
    pub async fn from_path(path: &Path) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("thumbnail")
            .to_string();
        let mime = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();

        debug!(file = %path.display(), mime = %mime, size = bytes.len(), "Read thumbnail");

        Ok(Self::new(file_name, mime, bytes))
    }

    /// Size in bytes.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Check this image against the upload constraints.
    pub fn validate(&self) -> Result<()> {
        validate_thumbnail(self.size(), &self.mime)
    }
}

/// A validated song ready to be posted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewSong {
    pub title: String,
    pub artist: String,
    pub description: String,
    pub source: String,
    pub thumbnail: ThumbnailFile,
}

/// Raw form fields as the user entered them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SongForm {
    pub title: String,
    pub artist: String,
    pub description: String,
    pub source: String,
    pub thumbnail: Option<ThumbnailFile>,
}

impl SongForm {
    /// Check required fields and build the payload.
    pub fn to_new_song(&self) -> Result<NewSong> {
        let thumbnail = match &self.thumbnail {
            Some(t) => t.clone(),
            None => return Err(CatalogError::Validation(MSG_FIELDS_REQUIRED.to_string())),
        };

        let text_fields = [&self.title, &self.artist, &self.description, &self.source];
        if text_fields.iter().any(|f| f.is_empty()) {
            return Err(CatalogError::Validation(MSG_FIELDS_REQUIRED.to_string()));
        }

        Ok(NewSong {
            title: self.title.clone(),
            artist: self.artist.clone(),
            description: self.description.clone(),
            source: self.source.clone(),
            thumbnail,
        })
    }

    /// Reset every field, including the selected image.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Submission state of the add-song form.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum FormStatus {
    /// Nothing submitted yet, no message.
    #[default]
    Idle,
    /// A request is in flight. Stays set if the caller drops the submit
    /// future before it settles.
    Submitting,
    /// The song was accepted; carries the success message.
    Succeeded(String),
    /// Validation or submission failed; carries the message to show.
    Failed(String),
}

impl FormStatus {
    /// Error text, when in the failed state.
    pub fn error(&self) -> Option<&str> {
        match self {
            FormStatus::Failed(msg) => Some(msg.as_str()),
            _ => None,
        }
    }
}

/// The add-song page: form fields plus submission state.
#[derive(Debug, Default)]
pub struct AddSongForm {
    pub fields: SongForm,
    status: FormStatus,
}

impl AddSongForm {
    /// Open the form. Requires a stored session.
    pub fn open(session: &dyn SessionProvider) -> Result<Self> {
        require_session(session)?;
        Ok(Self::default())
    }

    /// Current status.
    pub fn status(&self) -> &FormStatus {
        &self.status
    }

    /// Select a thumbnail.
    ///
    /// A rejected image leaves the previous selection untouched and sets the
    /// inline error. An accepted one clears it.
    pub fn select_thumbnail(&mut self, thumbnail: ThumbnailFile) -> Result<()> {
        match thumbnail.validate() {
            Ok(()) => {
                self.fields.thumbnail = Some(thumbnail);
                self.status = FormStatus::Idle;
                Ok(())
            }
            Err(e) => {
                warn!(file = %thumbnail.file_name, "Thumbnail rejected: {}", e);
                self.status = FormStatus::Failed(e.user_message(MSG_IMAGE_WRONG_TYPE));
                Err(e)
            }
        }
    }

    /// Validate and post the form.
    ///
    /// Failures are reported through [`AddSongForm::status`]; this never
    /// returns an error.
    pub async fn submit<S: CatalogSource + ?Sized>(&mut self, source: &S) -> &FormStatus {
        let song = match self.fields.to_new_song() {
            Ok(song) => song,
            Err(e) => {
                self.status = FormStatus::Failed(e.user_message(MSG_FIELDS_REQUIRED));
                return &self.status;
            }
        };

        self.status = FormStatus::Submitting;

        self.status = match source.add_song(&song).await {
            Ok(_) => {
                info!(title = %song.title, artist = %song.artist, "Song added");
                self.fields.clear();
                FormStatus::Succeeded(MSG_SONG_ADDED.to_string())
            }
            Err(e) => FormStatus::Failed(e.user_message(MSG_ADD_FAILED)),
        };

        &self.status
    }
}
