pub mod buffer;
pub mod diff;
pub mod document;
pub mod encoding;
pub mod scroll_sync;
pub mod search;

pub use buffer::TextBuffer;
pub use diff::{
    DiffEngine, DiffOptions, DiffOutcome, DiffSegment, DiffStats, DiffView, SegmentKind,
    SkipReason,
};
pub use document::{EditorMode, SavePayload, SessionState, TextSnapshot};
pub use encoding::{LineEnding, TextEncoding};
pub use scroll_sync::{PaneId, ScrollCommand, ScrollSynchronizer};
pub use search::{SearchMatch, SearchOptions, Selection};
