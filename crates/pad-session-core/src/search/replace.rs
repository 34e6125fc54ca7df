/// Replace-next and replace-all on top of the finder.
use crate::buffer::TextBuffer;

use super::finder::{find_next, Haystack};
use super::{SearchOptions, Selection};

/// Replaces the next match after the selection end (wrapping) with `replacement`.
///
/// On success the selection collapses right after the inserted text. Returns
/// whether a replacement happened; an empty query is a no-op.
pub fn replace_next(
    buffer: &mut TextBuffer,
    selection: &mut Selection,
    options: &SearchOptions,
    replacement: &str,
) -> bool {
    let Some(m) = find_next(buffer, options, selection.end, true) else {
        return false;
    };

    if let Err(e) = buffer.replace(m.start, m.end, replacement) {
        tracing::warn!("Replace at {}..{} failed: {e:#}", m.start, m.end);
        return false;
    }

    *selection = Selection::caret(m.start + replacement.chars().count());
    true
}

/// Replaces every match, scanning once from the start of the buffer.
///
/// After each replacement the scan resumes right after the inserted text, so a
/// replacement that itself contains the query is never matched again. Whole-word
/// checks see the rewritten text to the left of each candidate. On success the
/// selection collapses to the end of the buffer.
pub fn replace_all(
    buffer: &mut TextBuffer,
    selection: &mut Selection,
    options: &SearchOptions,
    replacement: &str,
) -> bool {
    let Some(hay) = Haystack::new(buffer, options) else {
        return false;
    };

    let mut output = String::with_capacity(hay.len());
    let mut copied_upto = 0;
    let mut cursor = 0;
    // Left neighbor of `cursor` in the rewritten text; `None` at buffer start.
    let mut tail_at_cursor: Option<char> = None;
    let mut count = 0usize;

    while let Some(m) = hay.scan(cursor, usize::MAX, |s| {
        if s == cursor {
            tail_at_cursor
        } else {
            hay.left_of(s)
        }
    }) {
        let tail_before = if m.start == cursor {
            tail_at_cursor
        } else {
            hay.left_of(m.start)
        };

        output.extend(&hay.chars[copied_upto..m.start]);
        output.push_str(replacement);
        copied_upto = m.end;

        // An empty replacement leaves the text left of the match as the new neighbor.
        tail_at_cursor = replacement.chars().last().or(tail_before);
        cursor = m.end;
        count += 1;
    }

    if count == 0 {
        return false;
    }

    output.extend(&hay.chars[copied_upto..]);
    *buffer = TextBuffer::from(output.as_str());
    *selection = Selection::caret(buffer.len_chars());
    tracing::debug!("Replaced {count} occurrence(s)");
    true
}
