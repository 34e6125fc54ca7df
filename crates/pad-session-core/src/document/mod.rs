//! Document session: baseline snapshot, live text, and save-format overrides.
//!
//! A `SessionState` ties together the snapshot a document was loaded (or last
//! saved) with, the host's current text, and optional encoding / line-ending
//! overrides chosen since. Whether the document needs saving is derived from
//! those on every mutation and is never set directly. Diff-preview mode lives
//! in the `preview` submodule.

mod preview;
mod snapshot;

use chrono::{DateTime, Local};

use crate::encoding::{apply_line_ending, LineEnding, TextEncoding};
use crate::search::Selection;

pub use preview::EditorMode;
pub use snapshot::TextSnapshot;

/// Text and format to hand to the byte writer when saving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePayload {
    /// Live text with the effective line ending applied.
    pub text: String,
    pub encoding: TextEncoding,
    pub line_ending: LineEnding,
}

/// Modification tracking for one open document.
#[derive(Debug, Clone)]
pub struct SessionState {
    original: TextSnapshot,
    live_text: String,
    encoding_override: Option<TextEncoding>,
    line_ending_override: Option<LineEnding>,
    modified: bool,
    mode: EditorMode,
    /// Timestamp of the last completed save.
    last_saved_at: Option<DateTime<Local>>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(TextSnapshot::default())
    }
}

impl SessionState {
    /// Creates a session baselined on `snapshot`.
    pub fn new(snapshot: TextSnapshot) -> Self {
        let live_text = snapshot.content().to_string();
        Self {
            original: snapshot,
            live_text,
            encoding_override: None,
            line_ending_override: None,
            modified: false,
            mode: EditorMode::Editing,
            last_saved_at: None,
        }
    }

    /// Re-baselines on `snapshot`: live text becomes its content and overrides are cleared.
    ///
    /// Returns true if the modified flag changed.
    pub fn init(&mut self, snapshot: TextSnapshot) -> bool {
        self.live_text = snapshot.content().to_string();
        self.original = snapshot;
        self.encoding_override = None;
        self.line_ending_override = None;
        self.recompute_modified()
    }

    /// Records the host's current text. Call on every content change.
    ///
    /// Returns true if the modified flag changed.
    pub fn set_live_text(&mut self, text: impl Into<String>) -> bool {
        self.live_text = text.into();
        self.recompute_modified()
    }

    /// Requests a save encoding.
    ///
    /// An encoding different from the original's becomes the override. Choosing
    /// the original's encoding again drops an existing override. `None` and
    /// re-choosing the original without an override are no-ops. Returns whether
    /// anything changed.
    pub fn try_set_encoding(&mut self, encoding: impl Into<Option<TextEncoding>>) -> bool {
        let Some(encoding) = encoding.into() else {
            return false;
        };

        if encoding != self.original.encoding() {
            self.encoding_override = Some(encoding);
        } else if self.encoding_override.is_some() {
            self.encoding_override = None;
        } else {
            return false;
        }
        self.recompute_modified();
        true
    }

    /// Requests a save line ending; same rules as [`Self::try_set_encoding`].
    pub fn try_set_line_ending(&mut self, line_ending: impl Into<Option<LineEnding>>) -> bool {
        let Some(line_ending) = line_ending.into() else {
            return false;
        };

        if line_ending != self.original.line_ending() {
            self.line_ending_override = Some(line_ending);
        } else if self.line_ending_override.is_some() {
            self.line_ending_override = None;
        } else {
            return false;
        }
        self.recompute_modified();
        true
    }

    /// The encoding a save would use.
    pub fn effective_encoding(&self) -> TextEncoding {
        self.encoding_override.unwrap_or(self.original.encoding())
    }

    /// The line ending a save would use.
    pub fn effective_line_ending(&self) -> LineEnding {
        self.line_ending_override
            .unwrap_or(self.original.line_ending())
    }

    /// Builds what the host should encode and write for a save.
    pub fn save_payload(&self) -> SavePayload {
        let line_ending = self.effective_line_ending();
        SavePayload {
            text: apply_line_ending(&self.live_text, line_ending),
            encoding: self.effective_encoding(),
            line_ending,
        }
    }

    /// Re-baselines after the host has durably written `text` with `encoding` and `line_ending`.
    ///
    /// A visible diff preview is closed. Returns true if the modified flag changed.
    pub fn save_completed(
        &mut self,
        text: impl Into<String>,
        encoding: TextEncoding,
        line_ending: LineEnding,
    ) -> bool {
        self.close_diff_preview();
        let changed = self.init(TextSnapshot::new(text, encoding, line_ending));
        self.last_saved_at = Some(Local::now());
        tracing::debug!(
            "Session re-baselined after save ({}, {})",
            self.original.encoding(),
            self.original.line_ending()
        );
        changed
    }

    /// Whether a save is needed.
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    pub fn original(&self) -> &TextSnapshot {
        &self.original
    }

    pub fn live_text(&self) -> &str {
        &self.live_text
    }

    pub fn encoding_override(&self) -> Option<TextEncoding> {
        self.encoding_override
    }

    pub fn line_ending_override(&self) -> Option<LineEnding> {
        self.line_ending_override
    }

    pub fn last_saved_at(&self) -> Option<DateTime<Local>> {
        self.last_saved_at
    }

    /// Whether the live text differs from the baseline, ignoring overrides.
    pub fn content_changed(&self) -> bool {
        self.live_text != self.original.content()
    }

    /// Text to share: the selection when it is non-empty, else the whole document.
    ///
    /// Selection offsets are char indices and are clamped to the text.
    pub fn content_for_sharing(&self, selection: Selection) -> &str {
        if selection.is_empty() {
            return &self.live_text;
        }
        let start = char_to_byte(&self.live_text, selection.start);
        let end = char_to_byte(&self.live_text, selection.end);
        &self.live_text[start..end]
    }

    fn recompute_modified(&mut self) -> bool {
        let modified = self.encoding_override.is_some()
            || self.line_ending_override.is_some()
            || self.content_changed();
        let changed = modified != self.modified;
        self.modified = modified;
        changed
    }
}

fn char_to_byte(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(byte, _)| byte)
}
