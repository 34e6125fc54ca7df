//! Stateless find / replace over a [`TextBuffer`](crate::buffer::TextBuffer).
//!
//! Every function takes the buffer plus caller-owned positions and returns new
//! positions; nothing is remembered between calls. Offsets are char indices.

mod finder;
mod replace;

pub use finder::{find_all, find_next};
pub use replace::{replace_all, replace_next};

/// Search configuration options.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// The text to look for. An empty query never matches.
    pub query: String,
    /// Whether search is case-sensitive.
    pub case_sensitive: bool,
    /// Whether to match whole words only.
    pub whole_word: bool,
}

impl SearchOptions {
    /// Builds options for `query` with the given flags.
    pub fn new(query: impl Into<String>, case_sensitive: bool, whole_word: bool) -> Self {
        Self {
            query: query.into(),
            case_sensitive,
            whole_word,
        }
    }
}

/// A single search match in the buffer, as a half-open char range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchMatch {
    /// Start char index in the buffer.
    pub start: usize,
    /// End char index in the buffer (exclusive).
    pub end: usize,
}

impl SearchMatch {
    /// Number of chars covered by the match.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns true if the range covers no chars.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Host-owned selection, as a char range. `start == end` is a caret.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub start: usize,
    pub end: usize,
}

impl Selection {
    /// A selection spanning `start..end`, normalized so `start <= end`.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// A collapsed selection at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns true if the selection is collapsed to a point.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<SearchMatch> for Selection {
    fn from(m: SearchMatch) -> Self {
        Self::new(m.start, m.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_len_and_is_empty() {
        let m = SearchMatch { start: 3, end: 7 };
        assert_eq!(m.len(), 4);
        assert!(!m.is_empty());
        assert!(SearchMatch { start: 5, end: 5 }.is_empty());
    }

    #[test]
    fn test_selection_from_match() {
        let sel = Selection::from(SearchMatch { start: 2, end: 6 });
        assert_eq!(sel, Selection::new(6, 2));
        assert!(!sel.is_empty());
        assert!(Selection::caret(4).is_empty());
    }
}
