//! Editing vs. side-by-side diff preview of the session's changes.

use crate::diff::{DiffEngine, DiffOutcome};

use super::SessionState;

/// What the document view is currently showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    /// The editable text is shown.
    #[default]
    Editing,
    /// A read-only diff of the baseline against the live text is shown.
    DiffPreview,
}

impl SessionState {
    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Find / replace only runs against the editable view.
    pub fn can_search(&self) -> bool {
        self.mode == EditorMode::Editing
    }

    /// Switches to diff preview and renders baseline vs. live text.
    ///
    /// Refused with `None` when the content is unchanged: there is nothing to show.
    pub fn open_diff_preview(&mut self, engine: &DiffEngine) -> Option<DiffOutcome> {
        if !self.content_changed() {
            return None;
        }
        self.mode = EditorMode::DiffPreview;
        Some(self.render_diff(engine))
    }

    /// Renders the preview again, e.g. after the host's theme changed. `None` when not previewing.
    pub fn refresh_diff_preview(&self, engine: &DiffEngine) -> Option<DiffOutcome> {
        (self.mode == EditorMode::DiffPreview).then(|| self.render_diff(engine))
    }

    /// Returns to editing. Returns true if a preview was open.
    pub fn close_diff_preview(&mut self) -> bool {
        let was_open = self.mode == EditorMode::DiffPreview;
        self.mode = EditorMode::Editing;
        was_open
    }

    /// Opens the preview when editing, closes it when previewing.
    ///
    /// Returns the rendered outcome only when a preview was opened.
    pub fn toggle_diff_preview(&mut self, engine: &DiffEngine) -> Option<DiffOutcome> {
        match self.mode {
            EditorMode::Editing => self.open_diff_preview(engine),
            EditorMode::DiffPreview => {
                self.close_diff_preview();
                None
            }
        }
    }

    fn render_diff(&self, engine: &DiffEngine) -> DiffOutcome {
        engine.compute(self.original.content(), &self.live_text)
    }
}
