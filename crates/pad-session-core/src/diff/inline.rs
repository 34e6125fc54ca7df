//! Char-level highlighting inside a changed line pair.

use similar::{capture_diff_slices, Algorithm, DiffTag};

/// Half-open char range `(start, end)` within a segment's text.
pub type HighlightRange = (usize, usize);

/// Returns the changed char ranges of `left` and `right`, relative to each line.
pub(super) fn highlight_pair(left: &str, right: &str) -> (Vec<HighlightRange>, Vec<HighlightRange>) {
    let old: Vec<char> = left.chars().collect();
    let new: Vec<char> = right.chars().collect();

    let mut left_ranges = Vec::new();
    let mut right_ranges = Vec::new();

    for op in capture_diff_slices(Algorithm::Myers, &old, &new) {
        let (tag, old_range, new_range) = op.as_tag_tuple();
        match tag {
            DiffTag::Equal => {}
            DiffTag::Delete => push_merged(&mut left_ranges, old_range.start, old_range.end),
            DiffTag::Insert => push_merged(&mut right_ranges, new_range.start, new_range.end),
            DiffTag::Replace => {
                push_merged(&mut left_ranges, old_range.start, old_range.end);
                push_merged(&mut right_ranges, new_range.start, new_range.end);
            }
        }
    }

    (left_ranges, right_ranges)
}

fn push_merged(ranges: &mut Vec<HighlightRange>, start: usize, end: usize) {
    if start == end {
        return;
    }
    match ranges.last_mut() {
        Some(last) if last.1 == start => last.1 = end,
        _ => ranges.push((start, end)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_char_change() {
        let (l, r) = highlight_pair("let x = 1;\n", "let y = 1;\n");
        assert_eq!(l, vec![(4, 5)]);
        assert_eq!(r, vec![(4, 5)]);
    }

    #[test]
    fn test_pure_insertion_highlights_right_only() {
        let (l, r) = highlight_pair("ac", "abc");
        assert!(l.is_empty());
        assert_eq!(r, vec![(1, 2)]);
    }

    #[test]
    fn test_pure_deletion_highlights_left_only() {
        let (l, r) = highlight_pair("abcd", "ad");
        assert_eq!(l, vec![(1, 3)]);
        assert!(r.is_empty());
    }

    #[test]
    fn test_ranges_are_char_offsets() {
        let (l, r) = highlight_pair("über", "uber");
        assert_eq!(l, vec![(0, 1)]);
        assert_eq!(r, vec![(0, 1)]);
    }

    #[test]
    fn test_identical_lines_have_no_highlights() {
        let (l, r) = highlight_pair("same", "same");
        assert!(l.is_empty() && r.is_empty());
    }

    #[test]
    fn test_adjacent_ranges_merge() {
        let mut ranges = Vec::new();
        push_merged(&mut ranges, 0, 2);
        push_merged(&mut ranges, 2, 3);
        push_merged(&mut ranges, 5, 5);
        push_merged(&mut ranges, 6, 7);
        assert_eq!(ranges, vec![(0, 3), (6, 7)]);
    }
}
