mod commands;
mod io;
mod render;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pad_session_config::EngineConfig;
use pad_session_core::LineEnding;

use commands::{FindArgs, ReplaceArgs, SearchFlags};

/// Compare, search and rewrite text files with the pad-session engine.
#[derive(Parser, Debug)]
#[command(name = "pad-session", version, about)]
struct Cli {
    /// Config file to use instead of the one in the user config directory.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show two files side by side with changed lines marked.
    Diff {
        left: PathBuf,
        right: PathBuf,
        /// Total output width in columns.
        #[arg(long, default_value_t = 120)]
        width: usize,
        /// Skip char-level highlights inside changed lines.
        #[arg(long)]
        no_inline: bool,
    },
    /// Find the next match of a pattern, or list all of them.
    Find {
        file: PathBuf,
        pattern: String,
        #[arg(long)]
        case_sensitive: bool,
        #[arg(long)]
        whole_word: bool,
        /// Char offset to start searching from.
        #[arg(long, default_value_t = 0)]
        from: usize,
        /// Don't continue from the top after reaching the end.
        #[arg(long)]
        no_wrap: bool,
        /// List every match.
        #[arg(long)]
        all: bool,
    },
    /// Replace the first (or every) match and save the file.
    Replace {
        file: PathBuf,
        pattern: String,
        replacement: String,
        /// Replace every match instead of the first one.
        #[arg(long)]
        all: bool,
        #[arg(long)]
        case_sensitive: bool,
        #[arg(long)]
        whole_word: bool,
        /// Save with this encoding (e.g. utf-8, utf-16le, windows-1252).
        #[arg(long)]
        encoding: Option<String>,
        /// Save with these line endings: lf, crlf or cr.
        #[arg(long)]
        line_ending: Option<LineEnding>,
        /// Show the pending change without writing the file.
        #[arg(long)]
        dry_run: bool,
    },
    /// Show the detected encoding, line ending and size of a file.
    Info { file: PathBuf },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(EngineConfig::config_path);
    let config = EngineConfig::load_or_create(&config_path);

    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .init();

    tracing::debug!("Using config at {}", config_path.display());

    let mut out = std::io::stdout().lock();
    match cli.command {
        Command::Diff {
            left,
            right,
            width,
            no_inline,
        } => commands::diff(&mut out, &config, &left, &right, width, !no_inline),
        Command::Find {
            file,
            pattern,
            case_sensitive,
            whole_word,
            from,
            no_wrap,
            all,
        } => commands::find(
            &mut out,
            &config,
            &file,
            &pattern,
            &SearchFlags {
                case_sensitive,
                whole_word,
            },
            &FindArgs {
                from,
                wrap: !no_wrap,
                all,
            },
        ),
        Command::Replace {
            file,
            pattern,
            replacement,
            all,
            case_sensitive,
            whole_word,
            encoding,
            line_ending,
            dry_run,
        } => commands::replace(
            &mut out,
            &config,
            &file,
            &pattern,
            &replacement,
            &SearchFlags {
                case_sensitive,
                whole_word,
            },
            &ReplaceArgs {
                all,
                encoding,
                line_ending,
                dry_run,
            },
        ),
        Command::Info { file } => commands::info(&mut out, &file),
    }
}
