//! Keeps the vertical offsets of several panes on the same logical row.
//!
//! The synchronizer knows nothing about pixels or widgets. The host reports
//! every scroll it observes through [`ScrollSynchronizer::notify_scrolled`] and
//! applies the [`ScrollCommand`]s it gets back. When the host applies a command,
//! its widget usually reports the resulting scroll again; that echo is
//! recognised and swallowed so offsets never bounce between panes.

/// Handle for a bound pane.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PaneId(usize);

/// Scroll `pane` so `row` is its first visible logical row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollCommand {
    pub pane: PaneId,
    pub row: usize,
}

#[derive(Debug, Default)]
struct Pane {
    row: usize,
    /// Row this pane was last driven to and whose echo has not arrived yet.
    pending: Option<usize>,
    /// Number of logical rows, when known.
    rows: Option<usize>,
}

impl Pane {
    fn clamp(&self, row: usize) -> usize {
        match self.rows {
            Some(rows) => row.min(rows.saturating_sub(1)),
            None => row,
        }
    }
}

/// Coordinates scroll offsets between bound panes.
#[derive(Debug, Default)]
pub struct ScrollSynchronizer {
    panes: Vec<Option<Pane>>,
}

impl ScrollSynchronizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a new pane at row 0 with no known row count.
    pub fn bind(&mut self) -> PaneId {
        self.panes.push(Some(Pane::default()));
        PaneId(self.panes.len() - 1)
    }

    /// Binds a new pane whose content has `rows` logical rows.
    pub fn bind_with_rows(&mut self, rows: usize) -> PaneId {
        let id = self.bind();
        self.set_row_count(id, rows);
        id
    }

    /// Detaches a pane. Later notifications for it are ignored.
    ///
    /// Returns false if the pane was not bound.
    pub fn unbind(&mut self, pane: PaneId) -> bool {
        self.panes
            .get_mut(pane.0)
            .and_then(Option::take)
            .is_some()
    }

    /// Updates a pane's row count, e.g. after its content was re-rendered.
    pub fn set_row_count(&mut self, pane: PaneId, rows: usize) {
        if let Some(p) = self.pane_mut(pane) {
            p.rows = Some(rows);
            p.row = p.clamp(p.row);
        }
    }

    /// Last known row of a bound pane.
    pub fn row(&self, pane: PaneId) -> Option<usize> {
        self.panes.get(pane.0)?.as_ref().map(|p| p.row)
    }

    pub fn is_bound(&self, pane: PaneId) -> bool {
        self.row(pane).is_some()
    }

    /// Number of currently bound panes.
    pub fn bound_count(&self) -> usize {
        self.panes.iter().flatten().count()
    }

    /// Reports that `pane` now shows `row` at the top.
    ///
    /// If this is the echo of a command previously returned for `pane`, it is
    /// consumed and nothing propagates. Otherwise it is a user scroll and every
    /// other bound pane that is not already there gets a command, clamped to its
    /// row count.
    pub fn notify_scrolled(&mut self, pane: PaneId, row: usize) -> Vec<ScrollCommand> {
        let Some(source) = self.pane_mut(pane) else {
            tracing::debug!("Scroll notification for unbound pane {:?}", pane);
            return Vec::new();
        };

        let echo = source.pending.take() == Some(row);
        let moved = source.row != row;
        source.row = row;
        if echo || !moved {
            return Vec::new();
        }

        let mut commands = Vec::new();
        for (idx, slot) in self.panes.iter_mut().enumerate() {
            let Some(other) = slot.as_mut() else {
                continue;
            };
            if idx == pane.0 {
                continue;
            }
            let target = other.clamp(row);
            if other.row == target {
                continue;
            }
            other.row = target;
            other.pending = Some(target);
            commands.push(ScrollCommand {
                pane: PaneId(idx),
                row: target,
            });
        }
        commands
    }

    fn pane_mut(&mut self, pane: PaneId) -> Option<&mut Pane> {
        self.panes.get_mut(pane.0)?.as_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_scroll_drives_other_panes() {
        let mut sync = ScrollSynchronizer::new();
        let left = sync.bind();
        let right = sync.bind();

        let cmds = sync.notify_scrolled(left, 12);
        assert_eq!(cmds, vec![ScrollCommand { pane: right, row: 12 }]);
        assert_eq!(sync.row(right), Some(12));
    }

    #[test]
    fn test_echo_is_consumed() {
        let mut sync = ScrollSynchronizer::new();
        let left = sync.bind();
        let right = sync.bind();

        sync.notify_scrolled(left, 5);
        // Host applied the command; the right widget reports it back.
        assert!(sync.notify_scrolled(right, 5).is_empty());
        // The next scroll on the right pane is a user scroll again.
        assert_eq!(
            sync.notify_scrolled(right, 7),
            vec![ScrollCommand { pane: left, row: 7 }]
        );
    }

    #[test]
    fn test_user_scroll_before_echo_still_propagates() {
        let mut sync = ScrollSynchronizer::new();
        let left = sync.bind();
        let right = sync.bind();

        sync.notify_scrolled(left, 5);
        assert_eq!(
            sync.notify_scrolled(right, 9),
            vec![ScrollCommand { pane: left, row: 9 }]
        );
    }

    #[test]
    fn test_unchanged_row_does_not_propagate() {
        let mut sync = ScrollSynchronizer::new();
        let left = sync.bind();
        sync.bind();
        assert!(sync.notify_scrolled(left, 0).is_empty());
    }

    #[test]
    fn test_target_clamped_to_row_count() {
        let mut sync = ScrollSynchronizer::new();
        let long = sync.bind_with_rows(100);
        let short = sync.bind_with_rows(10);

        let cmds = sync.notify_scrolled(long, 50);
        assert_eq!(cmds, vec![ScrollCommand { pane: short, row: 9 }]);
        // Already at its last row, so nothing further to send.
        assert!(sync.notify_scrolled(short, 9).is_empty());
        assert!(sync.notify_scrolled(long, 60).is_empty());
    }

    #[test]
    fn test_empty_pane_clamps_to_zero() {
        let mut sync = ScrollSynchronizer::new();
        let a = sync.bind();
        let b = sync.bind_with_rows(0);
        sync.notify_scrolled(a, 3);
        assert_eq!(sync.row(b), Some(0));
    }

    #[test]
    fn test_three_panes() {
        let mut sync = ScrollSynchronizer::new();
        let a = sync.bind();
        let b = sync.bind();
        let c = sync.bind();
        let cmds = sync.notify_scrolled(b, 4);
        assert_eq!(
            cmds,
            vec![
                ScrollCommand { pane: a, row: 4 },
                ScrollCommand { pane: c, row: 4 },
            ]
        );
    }

    #[test]
    fn test_unbind_stops_propagation() {
        let mut sync = ScrollSynchronizer::new();
        let a = sync.bind();
        let b = sync.bind();
        assert!(sync.unbind(b));
        assert!(!sync.unbind(b));
        assert!(!sync.is_bound(b));
        assert_eq!(sync.bound_count(), 1);
        assert!(sync.notify_scrolled(a, 8).is_empty());
        assert!(sync.notify_scrolled(b, 8).is_empty());
    }

    #[test]
    fn test_set_row_count_clamps_current_row() {
        let mut sync = ScrollSynchronizer::new();
        let a = sync.bind();
        let b = sync.bind();
        sync.notify_scrolled(a, 40);
        sync.set_row_count(b, 20);
        assert_eq!(sync.row(b), Some(19));
    }
}
