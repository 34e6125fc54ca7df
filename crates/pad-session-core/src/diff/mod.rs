//! Line-level side-by-side diff with optional char-level highlights.
//!
//! [`DiffEngine::compute`] aligns two texts line by line and returns two panes
//! of equal length, one per input. Each row index refers to the same visual
//! line in both panes, so a host can render them next to each other and keep
//! them scrolled together. Every call is independent of the previous one.

mod align;
mod inline;
mod myers;

use serde::Serialize;

pub use inline::HighlightRange;

/// What a row of one pane shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SegmentKind {
    /// Present on both sides with identical text.
    Unchanged,
    /// Present only on the right side.
    Inserted,
    /// Present only on the left side.
    Deleted,
    /// Filler keeping this pane aligned with content on the other side.
    Padding,
}

/// One row of one pane.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiffSegment {
    pub kind: SegmentKind,
    /// The line's literal text including its `\n` terminator, if it had one.
    /// Empty for padding.
    pub text: String,
    /// 1-based line number in this side's input. `None` for padding.
    pub line_number: Option<usize>,
    /// Changed char ranges within `text` when paired with a changed line on the other side.
    pub highlights: Vec<HighlightRange>,
}

impl DiffSegment {
    fn line(kind: SegmentKind, text: &str, line_number: usize) -> Self {
        Self {
            kind,
            text: text.to_string(),
            line_number: Some(line_number),
            highlights: Vec::new(),
        }
    }

    fn padding() -> Self {
        Self {
            kind: SegmentKind::Padding,
            text: String::new(),
            line_number: None,
            highlights: Vec::new(),
        }
    }

    /// Returns true for filler rows.
    pub fn is_padding(&self) -> bool {
        self.kind == SegmentKind::Padding
    }

    /// The text without its line terminator, for display.
    pub fn line_text(&self) -> &str {
        let text = self.text.strip_suffix('\n').unwrap_or(&self.text);
        text.strip_suffix('\r').unwrap_or(text)
    }
}

/// Line counts of a rendered diff.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DiffStats {
    pub deleted: usize,
    pub inserted: usize,
    pub unchanged: usize,
}

/// Two row-aligned panes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DiffView {
    pub left: Vec<DiffSegment>,
    pub right: Vec<DiffSegment>,
}

impl DiffView {
    /// Number of rows, the same in both panes.
    pub fn rows(&self) -> usize {
        self.left.len()
    }

    /// Returns true if both inputs were empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Iterates over `(left, right)` row pairs.
    pub fn iter_rows(&self) -> impl Iterator<Item = (&DiffSegment, &DiffSegment)> {
        self.left.iter().zip(self.right.iter())
    }

    /// Concatenated non-padding text of the left pane (equals the left input).
    pub fn left_text(&self) -> String {
        pane_text(&self.left)
    }

    /// Concatenated non-padding text of the right pane (equals the right input).
    pub fn right_text(&self) -> String {
        pane_text(&self.right)
    }

    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for (l, r) in self.iter_rows() {
            match l.kind {
                SegmentKind::Unchanged => stats.unchanged += 1,
                SegmentKind::Deleted => stats.deleted += 1,
                _ => {}
            }
            if r.kind == SegmentKind::Inserted {
                stats.inserted += 1;
            }
        }
        stats
    }
}

fn pane_text(pane: &[DiffSegment]) -> String {
    pane.iter()
        .filter(|s| !s.is_padding())
        .map(|s| s.text.as_str())
        .collect()
}

/// Why a diff was not rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SkipReason {
    /// The two inputs together have more lines than allowed.
    TooManyLines { lines: usize, limit: usize },
    /// Aligning the inputs needs more line edits than allowed.
    TooManyEdits { limit: usize },
}

impl std::fmt::Display for SkipReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyLines { lines, limit } => {
                write!(f, "diff too large: {lines} lines (limit {limit})")
            }
            Self::TooManyEdits { limit } => {
                write!(f, "diff too large: more than {limit} changed lines")
            }
        }
    }
}

/// Result of a diff request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffOutcome {
    Rendered(DiffView),
    /// The inputs exceeded a size guard; nothing was computed.
    TooLarge(SkipReason),
}

impl DiffOutcome {
    /// The rendered view, if any.
    pub fn view(&self) -> Option<&DiffView> {
        match self {
            Self::Rendered(view) => Some(view),
            Self::TooLarge(_) => None,
        }
    }

    /// Consumes the outcome, returning the rendered view, if any.
    pub fn into_view(self) -> Option<DiffView> {
        match self {
            Self::Rendered(view) => Some(view),
            Self::TooLarge(_) => None,
        }
    }

    pub fn is_too_large(&self) -> bool {
        matches!(self, Self::TooLarge(_))
    }
}

/// Size guards and highlighting switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOptions {
    /// Maximum combined line count of both inputs.
    pub max_lines: usize,
    /// Maximum number of inserted plus deleted lines.
    pub max_edit_distance: usize,
    /// Whether to compute char-level highlights for changed line pairs.
    pub inline_highlights: bool,
    /// Lines longer than this (in chars) get no char-level highlights.
    pub inline_max_line_chars: usize,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            max_lines: 200_000,
            max_edit_distance: 20_000,
            inline_highlights: true,
            inline_max_line_chars: 1_000,
        }
    }
}

/// Stateless side-by-side diff computation.
#[derive(Debug, Clone, Default)]
pub struct DiffEngine {
    options: DiffOptions,
}

impl DiffEngine {
    pub fn new(options: DiffOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    /// Diffs `left` against `right`.
    ///
    /// Both texts are expected to use `\n` line breaks already.
    pub fn compute(&self, left: &str, right: &str) -> DiffOutcome {
        let left_lines: Vec<&str> = left.split_inclusive('\n').collect();
        let right_lines: Vec<&str> = right.split_inclusive('\n').collect();

        let lines = left_lines.len() + right_lines.len();
        if lines > self.options.max_lines {
            let reason = SkipReason::TooManyLines {
                lines,
                limit: self.options.max_lines,
            };
            tracing::warn!("Skipping diff: {reason}");
            return DiffOutcome::TooLarge(reason);
        }

        let Some(ops) = myers::edit_script(&left_lines, &right_lines, self.options.max_edit_distance)
        else {
            let reason = SkipReason::TooManyEdits {
                limit: self.options.max_edit_distance,
            };
            tracing::warn!("Skipping diff: {reason}");
            return DiffOutcome::TooLarge(reason);
        };

        let (left_pane, right_pane) =
            align::build_panes(&left_lines, &right_lines, &ops, &self.options);
        tracing::debug!(
            "Diffed {} vs {} lines into {} rows",
            left_lines.len(),
            right_lines.len(),
            left_pane.len()
        );

        DiffOutcome::Rendered(DiffView {
            left: left_pane,
            right: right_pane,
        })
    }
}
