use std::fmt;
use std::str::FromStr;

use crate::editing::heading::{heading_decrease, heading_increase};
use crate::editing::list::toggle_list;
use crate::editing::style::{InlineStyle, toggle_style};
use crate::editing::{EditBatch, EditError, EditorHost};

/// Commands an editor can bind to keys or menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cmd {
    ToggleBold,
    ToggleItalic,
    ToggleUnderline,
    ToggleStrikethrough,
    HeadingIncrease,
    HeadingDecrease,
    ToggleListMarker,
}

impl Cmd {
    pub const ALL: [Cmd; 7] = [
        Cmd::ToggleBold,
        Cmd::ToggleItalic,
        Cmd::ToggleUnderline,
        Cmd::ToggleStrikethrough,
        Cmd::HeadingIncrease,
        Cmd::HeadingDecrease,
        Cmd::ToggleListMarker,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Cmd::ToggleBold => "toggle-bold",
            Cmd::ToggleItalic => "toggle-italic",
            Cmd::ToggleUnderline => "toggle-underline",
            Cmd::ToggleStrikethrough => "toggle-strikethrough",
            Cmd::HeadingIncrease => "heading-increase",
            Cmd::HeadingDecrease => "heading-decrease",
            Cmd::ToggleListMarker => "toggle-list-marker",
        }
    }
}

impl fmt::Display for Cmd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Cmd {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Cmd::ALL
            .into_iter()
            .find(|cmd| cmd.name() == s)
            .ok_or_else(|| EditError::UnknownCommand(s.to_string()))
    }
}

/// What running a command did to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied { edits: usize },
    /// Nothing to edit (no selection, or a no-op such as a caret jump)
    Unchanged,
}

/// Run `cmd` against the host: compute one batch from the current
/// selections, apply it atomically, then restore selections or let the
/// host renumber lists as the command requires
pub fn execute<H: EditorHost + ?Sized>(host: &mut H, cmd: Cmd) -> Result<Outcome, EditError> {
    if host.selections().is_empty() {
        log::debug!("{cmd}: no active selection, skipping");
        return Ok(Outcome::Unchanged);
    }

    match cmd {
        Cmd::ToggleBold => run_style(host, InlineStyle::Bold),
        Cmd::ToggleItalic => run_style(host, InlineStyle::Italic),
        Cmd::ToggleUnderline => run_style(host, InlineStyle::Underline),
        Cmd::ToggleStrikethrough => run_style(host, InlineStyle::Strikethrough),
        Cmd::HeadingIncrease => {
            let batch = heading_increase(&*host)?;
            run_batch(host, &batch)
        }
        Cmd::HeadingDecrease => {
            let batch = heading_decrease(&*host)?;
            run_batch(host, &batch)
        }
        Cmd::ToggleListMarker => {
            let edit = toggle_list(&*host)?;
            let outcome = run_batch(host, &edit.batch)?;
            if outcome != Outcome::Unchanged {
                host.renumber_ordered_lists(&edit.lines);
            }
            Ok(outcome)
        }
    }
}

fn run_style<H: EditorHost + ?Sized>(
    host: &mut H,
    style: InlineStyle,
) -> Result<Outcome, EditError> {
    let edit = toggle_style(&*host, &style.markers())?;
    let outcome = run_batch(host, &edit.batch)?;
    // Caret jumps change selections even when no text changes
    host.set_selections(edit.selections);
    Ok(outcome)
}

fn run_batch<H: EditorHost + ?Sized>(
    host: &mut H,
    batch: &EditBatch,
) -> Result<Outcome, EditError> {
    if batch.is_empty() {
        return Ok(Outcome::Unchanged);
    }
    host.apply(batch)?;
    Ok(Outcome::Applied { edits: batch.len() })
}
