/// Plain-text two-column rendering of a diff view.
use pad_session_core::diff::HighlightRange;
use pad_session_core::{DiffSegment, DiffView, SegmentKind};

const SEPARATOR: &str = " | ";
/// Line number (5) + space + marker + space.
const GUTTER: usize = 8;

/// Renders `view` as rows of `left | right`, each row at most `width` chars.
pub fn side_by_side(view: &DiffView, width: usize) -> Vec<String> {
    let column = width.saturating_sub(SEPARATOR.len()) / 2;
    let room = column.saturating_sub(GUTTER).max(1);

    view.iter_rows()
        .map(|(l, r)| {
            let left = cell(l, room);
            let right = cell(r, room);
            format!("{left}{SEPARATOR}{right}").trim_end().to_string()
        })
        .collect()
}

fn cell(segment: &DiffSegment, room: usize) -> String {
    let marker = match segment.kind {
        SegmentKind::Unchanged | SegmentKind::Padding => ' ',
        SegmentKind::Deleted => '-',
        SegmentKind::Inserted => '+',
    };
    let number = segment
        .line_number
        .map(|n| n.to_string())
        .unwrap_or_default();

    let text = match segment.kind {
        SegmentKind::Deleted => mark_ranges(segment.line_text(), &segment.highlights, "[-", "-]"),
        SegmentKind::Inserted => mark_ranges(segment.line_text(), &segment.highlights, "{+", "+}"),
        _ => segment.line_text().to_string(),
    };
    let text = fit(&text.replace('\t', "    "), room);

    format!("{number:>5} {marker} {text:<room$}")
}

/// Wraps each highlighted char range in `open` / `close`. Ranges past the text are ignored.
fn mark_ranges(text: &str, ranges: &[HighlightRange], open: &str, close: &str) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 4);
    let mut pos = 0;
    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start >= end {
            continue;
        }
        out.extend(&chars[pos..start]);
        out.push_str(open);
        out.extend(&chars[start..end]);
        out.push_str(close);
        pos = end;
    }
    out.extend(&chars[pos..]);
    out
}

/// Truncates to `room` chars, marking the cut with an ellipsis.
fn fit(text: &str, room: usize) -> String {
    if text.chars().count() <= room {
        return text.to_string();
    }
    let mut out: String = text.chars().take(room.saturating_sub(1)).collect();
    out.push('…');
    out
}
