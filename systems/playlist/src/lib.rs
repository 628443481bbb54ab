#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Ordered queue of level names played back to back.
//!
//! The playlist only stores names; resolving a name to a level is left to
//! whichever level library the caller uses.

/// Ordered, possibly repeating list of level names with a cursor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Playlist {
    names: Vec<String>,
    cursor: usize,
}

impl Playlist {
    /// Creates an empty playlist.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a playlist from the provided names, positioned on the first.
    #[must_use]
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            cursor: 0,
        }
    }

    /// Appends a level name to the end of the playlist.
    pub fn add(&mut self, name: impl Into<String>) {
        self.names.push(name.into());
    }

    /// Removes the first occurrence of `name`, returning whether one was found.
    pub fn remove(&mut self, name: &str) -> bool {
        let Some(index) = self.names.iter().position(|entry| entry == name) else {
            return false;
        };
        let _ = self.names.remove(index);
        if index < self.cursor {
            self.cursor -= 1;
        }
        if self.cursor >= self.names.len() {
            self.cursor = 0;
        }
        true
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.names.clear();
        self.cursor = 0;
    }

    /// Replaces the playlist with a single entry, as when one level is
    /// picked directly from the menu.
    pub fn replace_with_single(&mut self, name: impl Into<String>) {
        self.clear();
        self.add(name);
    }

    /// Name of the level under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.names.get(self.cursor).map(String::as_str)
    }

    /// Moves to the next entry, wrapping to the first after the last, and
    /// returns its name.
    pub fn advance(&mut self) -> Option<&str> {
        if self.names.is_empty() {
            return None;
        }
        self.cursor = (self.cursor + 1) % self.names.len();
        self.current()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the playlist has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Entries in play order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_playlist_has_nothing_to_play() {
        let mut playlist = Playlist::new();
        assert!(playlist.is_empty());
        assert_eq!(playlist.current(), None);
        assert_eq!(playlist.advance(), None);
    }

    #[test]
    fn advance_wraps_to_first() {
        let mut playlist = Playlist::from_names(["Intro", "Corner", "Vault"]);
        assert_eq!(playlist.current(), Some("Intro"));
        assert_eq!(playlist.advance(), Some("Corner"));
        assert_eq!(playlist.advance(), Some("Vault"));
        assert_eq!(playlist.advance(), Some("Intro"));
    }

    #[test]
    fn duplicates_are_kept_and_removed_one_at_a_time() {
        let mut playlist = Playlist::from_names(["Intro", "Corner", "Intro"]);
        assert_eq!(playlist.len(), 3);

        assert!(playlist.remove("Intro"));
        assert_eq!(playlist.names().collect::<Vec<_>>(), vec!["Corner", "Intro"]);
        assert!(!playlist.remove("Missing"));
        assert_eq!(playlist.len(), 2);
    }

    #[test]
    fn removing_before_cursor_keeps_current_entry() {
        let mut playlist = Playlist::from_names(["A", "B", "C"]);
        let _ = playlist.advance();
        let _ = playlist.advance();
        assert_eq!(playlist.current(), Some("C"));

        assert!(playlist.remove("A"));
        assert_eq!(playlist.current(), Some("C"));
    }

    #[test]
    fn removing_last_current_entry_wraps_cursor() {
        let mut playlist = Playlist::from_names(["A", "B"]);
        let _ = playlist.advance();
        assert!(playlist.remove("B"));
        assert_eq!(playlist.current(), Some("A"));
    }

    #[test]
    fn replace_with_single_resets_playlist() {
        let mut playlist = Playlist::from_names(["A", "B"]);
        let _ = playlist.advance();
        playlist.replace_with_single("Solo");
        assert_eq!(playlist.len(), 1);
        assert_eq!(playlist.current(), Some("Solo"));
        assert_eq!(playlist.advance(), Some("Solo"));

        playlist.clear();
        assert!(playlist.is_empty());
    }
}
