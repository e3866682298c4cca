//! Error types for the catalog client.

use thiserror::Error;

/// Main error type for all catalog operations.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No stored session; the caller should send the user to the login view.
    #[error("No active session")]
    SessionMissing,

    /// Client-side validation rejected the input before any request was made.
    #[error("{0}")]
    Validation(String),

    /// The API answered with a failure (non-2xx or `success: false`).
    #[error("{0}")]
    Api(String),

    /// Configured base URL or a request path segment is unusable.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP request failed.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CatalogError {
    /// Text a view renders for this failure.
    ///
    /// Server and validation messages are shown verbatim. Transport and
    /// local failures show their own description. `fallback` covers an
    /// API failure that came back without a message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            CatalogError::Api(msg) | CatalogError::Validation(msg) if !msg.is_empty() => {
                msg.clone()
            }
            CatalogError::Api(_) | CatalogError::Validation(_) => fallback.to_string(),
            other => other.to_string(),
        }
    }
}

/// Result type alias for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
