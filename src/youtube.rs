//! YouTube source URL parsing.

use once_cell::sync::Lazy;
use regex::Regex;

/// Length of a YouTube video identifier.
const VIDEO_ID_LEN: usize = 11;

/// Embedded player URL prefix.
const EMBED_URL_BASE: &str = "https://www.youtube.com/embed/";

/// Known URL shapes, id captured in group 2. The greedy prefix makes the
/// last marker in the URL win.
static VIDEO_ID_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^.*(youtu\.be/|v/|u/[A-Za-z0-9_]/|embed/|watch\?v=|&v=)([^#&?]*).*")
        .expect("video id pattern is valid")
});

/// Extract the video identifier from a YouTube URL.
///
/// Returns `None` when nothing matches or the candidate is not exactly
/// eleven characters long.
pub fn extract_video_id(url: &str) -> Option<String> {
    let caps = VIDEO_ID_RE.captures(url)?;
    let id = caps.get(2)?.as_str();

    if id.chars().count() == VIDEO_ID_LEN {
        Some(id.to_string())
    } else {
        None
    }
}

/// Embedded player URL for a video identifier.
pub fn embed_url(video_id: &str) -> String {
    format!("{}{}", EMBED_URL_BASE, video_id)
}
