/// Subcommand implementations. Each writes its report to `out`.
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use pad_session_config::{DiffSection, EngineConfig};
use pad_session_core::search::{find_all, find_next, replace_all, replace_next};
use pad_session_core::{
    DiffEngine, DiffOptions, DiffOutcome, LineEnding, SearchMatch, SearchOptions, Selection,
    SessionState, TextBuffer,
};

use crate::{io, render};

/// Flags shared by `find` and `replace`; config defaults apply when a flag is off.
#[derive(Debug, Clone, Default)]
pub struct SearchFlags {
    pub case_sensitive: bool,
    pub whole_word: bool,
}

impl SearchFlags {
    fn options(&self, query: &str, config: &EngineConfig) -> SearchOptions {
        SearchOptions::new(
            query,
            self.case_sensitive || config.search.case_sensitive,
            self.whole_word || config.search.whole_word,
        )
    }
}

#[derive(Debug, Clone)]
pub struct FindArgs {
    /// Char offset to start searching from.
    pub from: usize,
    pub wrap: bool,
    /// List every match instead of the next one.
    pub all: bool,
}

impl Default for FindArgs {
    fn default() -> Self {
        Self {
            from: 0,
            wrap: true,
            all: false,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ReplaceArgs {
    pub all: bool,
    pub encoding: Option<String>,
    pub line_ending: Option<LineEnding>,
    pub dry_run: bool,
}

pub fn diff_options(section: &DiffSection) -> DiffOptions {
    DiffOptions {
        max_lines: section.max_lines,
        max_edit_distance: section.max_edit_distance,
        inline_highlights: section.inline_highlights,
        inline_max_line_chars: section.inline_max_line_chars,
    }
}

/// Prints a side-by-side diff of two files.
pub fn diff(
    out: &mut impl Write,
    config: &EngineConfig,
    left: &Path,
    right: &Path,
    width: usize,
    inline: bool,
) -> Result<()> {
    let left_snapshot = io::load_snapshot(left)?;
    let right_snapshot = io::load_snapshot(right)?;

    let mut options = diff_options(&config.diff);
    options.inline_highlights &= inline;
    let outcome = DiffEngine::new(options).compute(left_snapshot.content(), right_snapshot.content());

    writeln!(out, "--- {}", left.display())?;
    writeln!(out, "+++ {}", right.display())?;
    print_outcome(out, &outcome, width)
}

fn print_outcome(out: &mut impl Write, outcome: &DiffOutcome, width: usize) -> Result<()> {
    let view = match outcome {
        DiffOutcome::Rendered(view) => view,
        DiffOutcome::TooLarge(reason) => {
            writeln!(out, "{reason}")?;
            return Ok(());
        }
    };

    for row in render::side_by_side(view, width) {
        writeln!(out, "{row}")?;
    }
    let stats = view.stats();
    writeln!(
        out,
        "{} deleted, {} inserted, {} unchanged",
        stats.deleted, stats.inserted, stats.unchanged
    )?;
    Ok(())
}

/// Prints the next match after `from` (or every match with `all`).
pub fn find(
    out: &mut impl Write,
    config: &EngineConfig,
    file: &Path,
    pattern: &str,
    flags: &SearchFlags,
    args: &FindArgs,
) -> Result<()> {
    let snapshot = io::load_snapshot(file)?;
    let buffer = TextBuffer::from(snapshot.content());
    let options = flags.options(pattern, config);

    let matches = if args.all {
        find_all(&buffer, &options)
    } else {
        find_next(&buffer, &options, args.from, args.wrap && config.search.wrap)
            .into_iter()
            .collect()
    };

    if matches.is_empty() {
        writeln!(out, "not found")?;
        return Ok(());
    }
    for m in &matches {
        print_match(out, &buffer, *m)?;
    }
    if args.all {
        writeln!(out, "{} match(es)", matches.len())?;
    }
    Ok(())
}

fn print_match(out: &mut impl Write, buffer: &TextBuffer, m: SearchMatch) -> Result<()> {
    let line = buffer.char_to_line(m.start)?;
    let column = m.start - buffer.line_to_char(line)?;
    let text = buffer.line(line)?.to_string();
    writeln!(
        out,
        "{}:{}: {}..{}: {}",
        line + 1,
        column + 1,
        m.start,
        m.end,
        text.trim_end_matches(['\n', '\r'])
    )?;
    Ok(())
}

/// Replaces in `file` and saves it, applying any encoding / line-ending change.
///
/// With `dry_run` the pending change is shown as a diff and nothing is written.
pub fn replace(
    out: &mut impl Write,
    config: &EngineConfig,
    file: &Path,
    pattern: &str,
    replacement: &str,
    flags: &SearchFlags,
    args: &ReplaceArgs,
) -> Result<()> {
    let mut session = SessionState::new(io::load_snapshot(file)?);
    let mut buffer = TextBuffer::from(session.live_text());
    let mut selection = Selection::caret(0);
    let options = flags.options(pattern, config);

    let replaced = if args.all {
        replace_all(&mut buffer, &mut selection, &options, replacement)
    } else {
        replace_next(&mut buffer, &mut selection, &options, replacement)
    };
    if !replaced {
        writeln!(out, "not found")?;
    }
    session.set_live_text(buffer.to_string());

    if let Some(name) = &args.encoding {
        session.try_set_encoding(io::parse_encoding(name)?);
    }
    if let Some(line_ending) = args.line_ending {
        session.try_set_line_ending(line_ending);
    }

    if !session.is_modified() {
        writeln!(out, "{}: nothing to save", file.display())?;
        return Ok(());
    }

    if args.dry_run {
        let engine = DiffEngine::new(diff_options(&config.diff));
        if let Some(outcome) = session.open_diff_preview(&engine) {
            print_outcome(out, &outcome, 120)?;
        }
        writeln!(
            out,
            "{}: dry run, would save as {} with {} line endings",
            file.display(),
            session.effective_encoding(),
            session.effective_line_ending()
        )?;
        return Ok(());
    }

    let payload = session.save_payload();
    io::write_payload(file, &payload)?;
    let saved_text = session.live_text().to_string();
    session.save_completed(saved_text, payload.encoding, payload.line_ending);

    let saved_at = session
        .last_saved_at()
        .context("session has no save timestamp")?;
    writeln!(
        out,
        "{}: saved as {} with {} line endings at {}",
        file.display(),
        payload.encoding,
        payload.line_ending,
        saved_at.format("%H:%M:%S")
    )?;
    Ok(())
}

/// Prints the detected format and size of a file.
pub fn info(out: &mut impl Write, file: &Path) -> Result<()> {
    let snapshot = io::load_snapshot(file)?;
    let buffer = TextBuffer::from(snapshot.content());
    writeln!(out, "file:        {}", file.display())?;
    writeln!(out, "encoding:    {}", snapshot.encoding())?;
    writeln!(out, "line ending: {}", snapshot.line_ending())?;
    writeln!(out, "lines:       {}", buffer.len_lines())?;
    writeln!(out, "chars:       {}", buffer.len_chars())?;
    Ok(())
}
