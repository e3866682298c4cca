//! Data models for catalog API responses.
//!
//! Records are owned by whichever view fetched them; nothing here is
//! persisted.

pub mod common;
pub mod playlist;
pub mod song;

// Re-exports for convenience
pub use playlist::Playlist;
pub use song::{Comment, Song};
