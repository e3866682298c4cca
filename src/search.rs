//! Client-side song search.
//!
//! A plain case-insensitive substring match over title and artist of an
//! already fetched list. No ranking and no fuzzy matching; results keep the
//! order the server sent.

use crate::models::Song;

/// Whether `song` matches an already lower-cased query.
fn matches(song: &Song, term: &str) -> bool {
    song.title.to_lowercase().contains(term) || song.artist.to_lowercase().contains(term)
}

/// Filter `songs` by `query`.
///
/// A blank query returns every song.
pub fn filter_songs<'a>(songs: &'a [Song], query: &str) -> Vec<&'a Song> {
    if query.trim().is_empty() {
        return songs.iter().collect();
    }

    let term = query.to_lowercase();
    songs.iter().filter(|song| matches(song, &term)).collect()
}

/// Fetched songs plus the current query, with the visible subset kept in sync.
///
/// The visible subset is stored as indices into the source list, which is
/// never reordered or modified by filtering.
#[derive(Debug, Clone, Default)]
pub struct SongSearch {
    songs: Vec<Song>,
    query: String,
    visible: Vec<usize>,
}

impl SongSearch {
    /// Create a search over `songs` with an empty query.
    pub fn new(songs: Vec<Song>) -> Self {
        let mut search = Self {
            songs,
            query: String::new(),
            visible: Vec::new(),
        };
        search.recompute();
        search
    }

    /// Replace the source list and recompute.
    pub fn set_songs(&mut self, songs: Vec<Song>) {
        self.songs = songs;
        self.recompute();
    }

    /// Replace the query and recompute.
    pub fn set_query<S: Into<String>>(&mut self, query: S) {
        self.query = query.into();
        self.recompute();
    }

    /// Current query as typed.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The full source list.
    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    /// Songs matching the current query, in source order.
    pub fn results(&self) -> Vec<&Song> {
        self.visible.iter().map(|&i| &self.songs[i]).collect()
    }

    /// Number of songs matching the current query.
    pub fn result_count(&self) -> usize {
        self.visible.len()
    }

    fn recompute(&mut self) {
        self.visible = if self.query.trim().is_empty() {
            (0..self.songs.len()).collect()
        } else {
            let term = self.query.to_lowercase();
            self.songs
                .iter()
                .enumerate()
                .filter(|(_, song)| matches(song, &term))
                .map(|(i, _)| i)
                .collect()
        };
    }
}
