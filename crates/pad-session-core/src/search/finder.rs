/// Plain-text matching with ordinal case folding and whole-word boundaries.
use crate::buffer::TextBuffer;

use super::{SearchMatch, SearchOptions};

/// Simple ordinal case fold: lowercase only when it maps to exactly one char.
///
/// Keeping the mapping one-to-one means a match always spans exactly as many
/// chars as the query, so offsets never drift.
#[inline]
fn fold(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

#[inline]
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric()
}

/// A buffer flattened into chars, with the case-folded copy the matcher compares against.
pub(super) struct Haystack {
    pub(super) chars: Vec<char>,
    folded: Vec<char>,
    needle: Vec<char>,
    whole_word: bool,
}

impl Haystack {
    /// Returns `None` for an empty query.
    pub(super) fn new(buffer: &TextBuffer, options: &SearchOptions) -> Option<Self> {
        if options.query.is_empty() {
            return None;
        }
        let chars: Vec<char> = buffer.chars().collect();
        let (folded, needle) = if options.case_sensitive {
            (chars.clone(), options.query.chars().collect())
        } else {
            (
                chars.iter().copied().map(fold).collect(),
                options.query.chars().map(fold).collect(),
            )
        };
        Some(Self {
            chars,
            folded,
            needle,
            whole_word: options.whole_word,
        })
    }

    pub(super) fn len(&self) -> usize {
        self.chars.len()
    }

    /// The char immediately left of `idx` in the unmodified buffer.
    pub(super) fn left_of(&self, idx: usize) -> Option<char> {
        idx.checked_sub(1).and_then(|i| self.chars.get(i).copied())
    }

    /// Finds the first match whose start lies in `[from, until)`.
    ///
    /// `left_neighbor` supplies the char preceding a candidate start, which lets
    /// replace-all judge word boundaries against already-rewritten text.
    pub(super) fn scan(
        &self,
        from: usize,
        until: usize,
        left_neighbor: impl Fn(usize) -> Option<char>,
    ) -> Option<SearchMatch> {
        let m = self.needle.len();
        let n = self.folded.len();
        if m > n {
            return None;
        }
        let last_start = (n - m).min(until.saturating_sub(1));
        if from > last_start || until == 0 {
            return None;
        }

        (from..=last_start)
            .filter(|&s| self.folded[s..s + m] == self.needle[..])
            .find(|&s| !self.whole_word || self.on_word_boundary(s, s + m, &left_neighbor))
            .map(|s| SearchMatch { start: s, end: s + m })
    }

    fn on_word_boundary(
        &self,
        start: usize,
        end: usize,
        left_neighbor: &impl Fn(usize) -> Option<char>,
    ) -> bool {
        let left_ok = left_neighbor(start).is_none_or(|c| !is_word_char(c));
        let right_ok = self.chars.get(end).is_none_or(|&c| !is_word_char(c));
        left_ok && right_ok
    }
}

/// Finds the first match at or after `from_offset`.
///
/// When nothing is found and `wrap` is set, scans again from the start of the
/// buffer, considering matches that start before `from_offset`. An offset past
/// the end of the buffer is treated as the end.
pub fn find_next(
    buffer: &TextBuffer,
    options: &SearchOptions,
    from_offset: usize,
    wrap: bool,
) -> Option<SearchMatch> {
    let hay = Haystack::new(buffer, options)?;
    let from = from_offset.min(hay.len());
    let left = |s: usize| hay.left_of(s);

    hay.scan(from, usize::MAX, left).or_else(|| {
        if wrap && from > 0 {
            hay.scan(0, from, left)
        } else {
            None
        }
    })
}

/// Finds every non-overlapping match from the start of the buffer, in order.
pub fn find_all(buffer: &TextBuffer, options: &SearchOptions) -> Vec<SearchMatch> {
    let Some(hay) = Haystack::new(buffer, options) else {
        return Vec::new();
    };
    let mut matches = Vec::new();
    let mut cursor = 0;
    while let Some(m) = hay.scan(cursor, usize::MAX, |s| hay.left_of(s)) {
        cursor = m.end;
        matches.push(m);
    }
    matches
}
