//! Turns a line edit script into two row-aligned panes.

use super::inline::highlight_pair;
use super::myers::EditOp;
use super::{DiffOptions, DiffSegment, SegmentKind};

/// Builds the left and right panes; both come back with the same number of rows.
pub(super) fn build_panes(
    left: &[&str],
    right: &[&str],
    ops: &[EditOp],
    options: &DiffOptions,
) -> (Vec<DiffSegment>, Vec<DiffSegment>) {
    let mut panes = Panes::with_capacity(ops.len(), options);
    let (mut li, mut ri) = (0usize, 0usize);
    let mut deleted: Vec<usize> = Vec::new();
    let mut inserted: Vec<usize> = Vec::new();

    for op in ops {
        match op {
            EditOp::Keep => {
                panes.flush_hunk(left, right, &mut deleted, &mut inserted);
                panes.push_unchanged(left[li], li, ri);
                li += 1;
                ri += 1;
            }
            EditOp::Delete => {
                deleted.push(li);
                li += 1;
            }
            EditOp::Insert => {
                inserted.push(ri);
                ri += 1;
            }
        }
    }
    panes.flush_hunk(left, right, &mut deleted, &mut inserted);

    debug_assert_eq!(panes.left.len(), panes.right.len());
    (panes.left, panes.right)
}

struct Panes<'o> {
    left: Vec<DiffSegment>,
    right: Vec<DiffSegment>,
    options: &'o DiffOptions,
}

impl<'o> Panes<'o> {
    fn with_capacity(rows: usize, options: &'o DiffOptions) -> Self {
        Self {
            left: Vec::with_capacity(rows),
            right: Vec::with_capacity(rows),
            options,
        }
    }

    fn push_unchanged(&mut self, text: &str, left_idx: usize, right_idx: usize) {
        self.left
            .push(DiffSegment::line(SegmentKind::Unchanged, text, left_idx + 1));
        self.right
            .push(DiffSegment::line(SegmentKind::Unchanged, text, right_idx + 1));
    }

    /// Emits one hunk: the i-th deleted line shares a row with the i-th inserted line,
    /// and whichever side runs out first is filled with padding.
    fn flush_hunk(
        &mut self,
        left: &[&str],
        right: &[&str],
        deleted: &mut Vec<usize>,
        inserted: &mut Vec<usize>,
    ) {
        let rows = deleted.len().max(inserted.len());
        for row in 0..rows {
            let mut l = match deleted.get(row) {
                Some(&i) => DiffSegment::line(SegmentKind::Deleted, left[i], i + 1),
                None => DiffSegment::padding(),
            };
            let mut r = match inserted.get(row) {
                Some(&i) => DiffSegment::line(SegmentKind::Inserted, right[i], i + 1),
                None => DiffSegment::padding(),
            };

            if self.wants_highlights(&l, &r) {
                let (lh, rh) = highlight_pair(&l.text, &r.text);
                l.highlights = lh;
                r.highlights = rh;
            }

            self.left.push(l);
            self.right.push(r);
        }
        deleted.clear();
        inserted.clear();
    }

    fn wants_highlights(&self, l: &DiffSegment, r: &DiffSegment) -> bool {
        let limit = self.options.inline_max_line_chars;
        self.options.inline_highlights
            && l.kind == SegmentKind::Deleted
            && r.kind == SegmentKind::Inserted
            && l.text.chars().count() <= limit
            && r.text.chars().count() <= limit
    }
}
