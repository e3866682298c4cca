//! Client-side session and the auth gate.
//!
//! A session is two opaque strings, a bearer token and a user-data blob,
//! written by an external login flow. Protected views read it on every load
//! and only [`logout`] removes it. Nothing here checks expiry.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::error::{CatalogError, Result};

/// Stored credentials.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Session {
    /// Opaque bearer token.
    #[serde(default)]
    pub token: String,

    /// Opaque user-data blob, normally JSON.
    #[serde(default)]
    pub user: Option<String>,
}

impl Session {
    /// Create a session from a token and optional user blob.
    pub fn new<S: Into<String>>(token: S, user: Option<String>) -> Self {
        Self {
            token: token.into(),
            user,
        }
    }

    /// A session only counts when the token is non-empty.
    pub fn is_authenticated(&self) -> bool {
        !self.token.is_empty()
    }

    /// The user blob parsed as JSON, if present and valid.
    pub fn user_data(&self) -> Option<Value> {
        self.user
            .as_deref()
            .and_then(|raw| serde_json::from_str(raw).ok())
    }
}

/// Source of the current session, injected into every protected view.
pub trait SessionProvider: Send + Sync {
    /// The stored session, if any.
    fn current(&self) -> Option<Session>;

    /// Store a session (used by the external login flow).
    fn store(&self, session: &Session) -> Result<()>;

    /// Remove the stored session.
    fn clear(&self) -> Result<()>;
}

/// Return the current session or [`CatalogError::SessionMissing`].
pub fn require_session(provider: &dyn SessionProvider) -> Result<Session> {
    provider
        .current()
        .filter(Session::is_authenticated)
        .ok_or(CatalogError::SessionMissing)
}

/// Clear the stored session.
pub fn logout(provider: &dyn SessionProvider) -> Result<()> {
    provider.clear()?;
    info!("Logged out");
    Ok(())
}

/// In-memory session slot.
#[derive(Debug, Default)]
pub struct MemorySession {
    slot: RwLock<Option<Session>>,
}

impl MemorySession {
    /// Empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `session`.
    pub fn with_session(session: Session) -> Self {
        Self {
            slot: RwLock::new(Some(session)),
        }
    }
}

impl SessionProvider for MemorySession {
    fn current(&self) -> Option<Session> {
        self.slot.read().clone()
    }

    fn store(&self, session: &Session) -> Result<()> {
        *self.slot.write() = Some(session.clone());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        *self.slot.write() = None;
        Ok(())
    }
}

/// Session persisted as a small JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Store backed by `path`.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Default location: `<config dir>/songlist/session.json`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("songlist")
            .join("session.json")
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionProvider for FileSessionStore {
    fn current(&self) -> Option<Session> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&raw) {
            Ok(session) => Some(session),
            Err(e) => {
                debug!("Ignoring unreadable session file {}: {}", self.path.display(), e);
                None
            }
        }
    }

    fn store(&self, session: &Session) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(session)?)?;
        debug!("Session stored at {}", self.path.display());
        Ok(())
    }

    fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_session_missing() {
        let provider = MemorySession::new();
        assert!(matches!(
            require_session(&provider),
            Err(CatalogError::SessionMissing)
        ));
    }

    #[test]
    fn test_empty_token_is_not_a_session() {
        let provider = MemorySession::with_session(Session::new("", None));
        assert!(require_session(&provider).is_err());
    }

    #[test]
    fn test_logout_clears() {
        let provider = MemorySession::with_session(Session::new("tok", None));
        assert_eq!(require_session(&provider).unwrap().token, "tok");

        logout(&provider).unwrap();
        assert!(provider.current().is_none());
    }

    #[test]
    fn test_user_data() {
        let session = Session::new("tok", Some(r#"{"name":"ana"}"#.to_string()));
        assert_eq!(session.user_data().unwrap()["name"], "ana");

        let broken = Session::new("tok", Some("{not json".to_string()));
        assert!(broken.user_data().is_none());
        assert!(Session::new("tok", None).user_data().is_none());
    }

    #[test]
    fn test_file_store_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileSessionStore::new(dir.path().join("nested").join("session.json"));
        assert!(store.current().is_none());

        let session = Session::new("tok", Some("{}".to_string()));
        store.store(&session).unwrap();
        assert_eq!(store.current(), Some(session));

        store.clear().unwrap();
        assert!(store.current().is_none());
        // Clearing twice is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_file_store_ignores_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");
        fs::write(&path, "garbage").unwrap();
        assert!(FileSessionStore::new(path).current().is_none());
    }
}
