//! typst-companion - run one Typst editing command against a file.
//!
//! # Usage
//!
//! ```bash
//! typst-companion notes.typ toggle-bold --cursor 3:7
//! typst-companion notes.typ toggle-list-marker --select 2:1-5:1 --stdout
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use typst_companion_config::Config;
use typst_companion_engine::{Cmd, Document, EditorHost, Outcome, Position, Selection, execute};

/// Typst authoring commands: inline styles, list markers and headings
#[derive(Parser, Debug)]
#[command(name = "typst-companion", version, about, long_about = None)]
struct Cli {
    /// Typst file to edit
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// toggle-bold, toggle-italic, toggle-underline, toggle-strikethrough,
    /// heading-increase, heading-decrease or toggle-list-marker
    #[arg(value_name = "COMMAND")]
    command: Cmd,

    /// Caret at LINE:COLUMN (1-based); repeat for multiple carets
    #[arg(long, value_name = "L:C", value_parser = parse_cursor)]
    cursor: Vec<Selection>,

    /// Selection from anchor to caret, e.g. 2:1-2:9; repeatable
    #[arg(long, value_name = "AL:AC-L:C", value_parser = parse_selection)]
    select: Vec<Selection>,

    /// Config file to use instead of ~/.config/typst-companion/config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Print the result instead of writing it back to FILE
    #[arg(long)]
    stdout: bool,
}

/// Parse a 1-based `LINE:COLUMN` into a zero-based position
fn parse_position(s: &str) -> Result<Position> {
    let (line, column) = s
        .split_once(':')
        .with_context(|| format!("expected LINE:COLUMN, got {s:?}"))?;
    let line: usize = line
        .trim()
        .parse()
        .with_context(|| format!("invalid line in {s:?}"))?;
    let column: usize = column
        .trim()
        .parse()
        .with_context(|| format!("invalid column in {s:?}"))?;
    if line == 0 || column == 0 {
        bail!("lines and columns start at 1, got {s:?}");
    }
    Ok(Position::new(line - 1, column - 1))
}

fn parse_cursor(s: &str) -> Result<Selection, String> {
    parse_position(s)
        .map(Selection::cursor)
        .map_err(|e| format!("{e:#}"))
}

fn parse_selection(s: &str) -> Result<Selection, String> {
    let parse = || -> Result<Selection> {
        let (anchor, active) = s
            .split_once('-')
            .with_context(|| format!("expected ANCHOR-CARET, got {s:?}"))?;
        Ok(Selection::new(parse_position(anchor)?, parse_position(active)?))
    };
    parse().map_err(|e| format!("{e:#}"))
}

/// Configured list markers; a broken config only costs the custom cycle
fn load_candidate_markers(path: Option<&Path>) -> Option<Vec<String>> {
    let explicit =
        path.map(|path| Config::expand_path(path).unwrap_or_else(|| path.to_path_buf()));
    let loaded = match &explicit {
        Some(path) => Config::load_from_path(path),
        None => Config::load(),
    };

    match loaded {
        Ok(Some(config)) => config.candidate_markers().map(<[String]>::to_vec),
        Ok(None) => {
            match &explicit {
                Some(path) => log::warn!(
                    "config file {} not found; using the default list marker cycle",
                    path.display()
                ),
                None => log::debug!("no config file, using the default list marker cycle"),
            }
            None
        }
        Err(e) => {
            log::warn!("{e}; using the default list marker cycle");
            None
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let bytes = std::fs::read(&cli.file)
        .with_context(|| format!("Failed to read {}", cli.file.display()))?;
    let mut document = Document::from_bytes(&bytes)
        .with_context(|| format!("{} is not valid UTF-8", cli.file.display()))?;
    if let Some(markers) = load_candidate_markers(cli.config.as_deref()) {
        document = document.with_candidate_markers(markers);
    }

    let mut selections: Vec<Selection> = cli.cursor;
    selections.extend(cli.select);
    if selections.is_empty() {
        selections.push(Selection::cursor(Position::default()));
    }
    document.set_selections(selections);

    let outcome = execute(&mut document, cli.command)
        .with_context(|| format!("{} failed on {}", cli.command, cli.file.display()))?;

    let carets: Vec<String> = document
        .selections()
        .iter()
        .map(one_based)
        .collect();
    log::info!("{}: {outcome:?}, selections [{}]", cli.command, carets.join(", "));

    if cli.stdout {
        print!("{}", document.text());
    } else if outcome != Outcome::Unchanged {
        std::fs::write(&cli.file, document.to_bytes())
            .with_context(|| format!("Failed to write {}", cli.file.display()))?;
    }

    Ok(())
}

/// Selection as the user would type it back on the command line
fn one_based(selection: &Selection) -> String {
    let show = |pos: Position| format!("{}:{}", pos.line + 1, pos.character + 1);
    if selection.is_empty() {
        show(selection.active)
    } else {
        format!("{}-{}", show(selection.anchor), show(selection.active))
    }
}
