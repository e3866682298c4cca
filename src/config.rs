//! Client configuration.

use reqwest::Url;

use crate::error::{CatalogError, Result};

/// Base URL of the catalog API.
pub const DEFAULT_BASE_URL: &str = "https://learn.smktelkom-mlg.sch.id/ukl2";

/// Where the client sends its requests.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    /// API base URL, without trailing slash.
    pub base_url: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

impl ClientConfig {
    /// Validate and normalize a base URL.
    pub fn new(base_url: &str) -> Result<Self> {
        let url = base_url.trim().trim_end_matches('/');

        if url.is_empty() {
            return Err(CatalogError::InvalidUrl("URL cannot be empty".into()));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(CatalogError::InvalidUrl(format!(
                "{} must start with http:// or https://",
                url
            )));
        }
        Url::parse(url).map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", url, e)))?;

        Ok(Self {
            base_url: url.to_string(),
        })
    }

    /// Absolute URL for an API path such as `/playlists`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Absolute URL for a resource path made of opaque segments.
    ///
    /// Each segment is percent-encoded, so an id containing `/`, `?` or `#`
    /// stays inside its own segment. Empty, `.` and `..` segments are
    /// rejected since they would address a different resource.
    pub fn resource_url(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments.iter().find(|s| matches!(**s, "" | "." | "..")) {
            return Err(CatalogError::InvalidUrl(format!(
                "invalid path segment {:?}",
                bad
            )));
        }
        self.join_segments(segments)
    }

    /// URL of a thumbnail asset.
    pub fn thumbnail_url(&self, filename: &str) -> String {
        self.join_segments(&["thumbnail", filename])
            .map(String::from)
            .unwrap_or_else(|_| self.endpoint("thumbnail"))
    }

    fn join_segments(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| CatalogError::InvalidUrl(format!("{}: {}", self.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}
