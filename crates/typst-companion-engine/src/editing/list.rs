use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::editing::{EditBatch, EditError, EditorHost, Range};

// ASCII digits only: `٣.` or `１)` are text, not list numbers
static NUMBER_DOT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\. ").expect("numbered marker pattern is valid"));
static NUMBER_PAREN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\) ").expect("numbered marker pattern is valid"));

/// Marker types for list items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ListMarker {
    Dash,        // "- "
    Star,        // "* "
    Plus,        // "+ "
    NumberDot,   // "1. ", "12. "
    NumberParen, // "1) ", "12) "
    None,
}

impl ListMarker {
    /// Text inserted when switching to this marker
    pub fn text(self) -> &'static str {
        match self {
            ListMarker::Dash => "- ",
            ListMarker::Star => "* ",
            ListMarker::Plus => "+ ",
            ListMarker::NumberDot => "1. ",
            ListMarker::NumberParen => "1) ",
            ListMarker::None => "",
        }
    }

    /// Marker at the start of `content` (text after the indentation)
    pub fn classify(content: &str) -> Self {
        if content.starts_with("- ") {
            ListMarker::Dash
        } else if content.starts_with("* ") {
            ListMarker::Star
        } else if content.starts_with("+ ") {
            ListMarker::Plus
        } else if NUMBER_DOT.is_match(content) {
            ListMarker::NumberDot
        } else if NUMBER_PAREN.is_match(content) {
            ListMarker::NumberParen
        } else {
            ListMarker::None
        }
    }

    /// Characters (not bytes) this marker occupies at the start of
    /// `content`. Numbered markers are `digits + 2` wide.
    pub fn width_in(self, content: &str) -> usize {
        let digits = |pattern: &Regex| {
            pattern
                .captures(content)
                .and_then(|caps| caps.get(1))
                .map_or(0, |m| m.as_str().chars().count())
        };
        match self {
            ListMarker::Dash | ListMarker::Star | ListMarker::Plus => 2,
            ListMarker::NumberDot => digits(&NUMBER_DOT) + 2,
            ListMarker::NumberParen => digits(&NUMBER_PAREN) + 2,
            ListMarker::None => 0,
        }
    }

    /// Parse a configured candidate such as `"-"` or `"1."`
    pub fn from_candidate(candidate: &str) -> Option<Self> {
        match format!("{candidate} ").as_str() {
            "- " => Some(ListMarker::Dash),
            "* " => Some(ListMarker::Star),
            "+ " => Some(ListMarker::Plus),
            "1. " => Some(ListMarker::NumberDot),
            "1) " => Some(ListMarker::NumberParen),
            _ => None,
        }
    }
}

/// Ordered cycle of markers visited by repeated toggles.
///
/// The last entry is always [`ListMarker::None`], so cycling eventually
/// removes the marker again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerCycle {
    order: Vec<ListMarker>,
}

impl Default for MarkerCycle {
    fn default() -> Self {
        Self {
            order: vec![
                ListMarker::Dash,
                ListMarker::Star,
                ListMarker::Plus,
                ListMarker::NumberDot,
                ListMarker::NumberParen,
                ListMarker::None,
            ],
        }
    }
}

impl MarkerCycle {
    /// Build the cycle from configured candidates; unknown entries are
    /// dropped and an absent or unusable list gives the default cycle
    pub fn from_candidates(candidates: Option<&[String]>) -> Self {
        let Some(candidates) = candidates else {
            return Self::default();
        };

        let mut order: Vec<ListMarker> = candidates
            .iter()
            .filter_map(|candidate| {
                let marker = ListMarker::from_candidate(candidate);
                if marker.is_none() {
                    log::debug!("ignoring unknown list marker candidate {candidate:?}");
                }
                marker
            })
            .collect();

        if order.is_empty() {
            return Self::default();
        }
        order.push(ListMarker::None);
        Self { order }
    }

    pub fn markers(&self) -> &[ListMarker] {
        &self.order
    }

    /// Successor of `current`; markers outside the cycle restart it
    pub fn next(&self, current: ListMarker) -> ListMarker {
        self.order
            .iter()
            .position(|&marker| marker == current)
            .and_then(|index| self.order.get(index + 1))
            .or_else(|| self.order.first())
            .copied()
            .unwrap_or(ListMarker::None)
    }
}

/// Edits for one list toggle plus the lines they touch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListEdit {
    pub batch: EditBatch,
    pub lines: Vec<usize>,
}

/// Advance the list marker of every selected line by one cycle step
pub fn toggle_list<H: EditorHost + ?Sized>(host: &H) -> Result<ListEdit, EditError> {
    let candidates = host.list_candidates();
    let cycle = MarkerCycle::from_candidates(candidates.as_deref());

    let lines: BTreeSet<usize> = host
        .selections()
        .iter()
        .flat_map(|selection| {
            if selection.is_empty() {
                selection.active.line..=selection.active.line
            } else {
                selection.start().line..=selection.end().line
            }
        })
        .collect();

    let mut batch = EditBatch::new();
    for &line in &lines {
        let text = host.require_line(line)?;
        if let Some((range, marker)) = marker_edit(&text, line, &cycle) {
            batch.replace(range, marker);
        }
    }

    log::debug!(
        "list toggle: {} edit(s) over {} line(s)",
        batch.len(),
        lines.len()
    );

    Ok(ListEdit {
        batch,
        lines: lines.into_iter().collect(),
    })
}

/// Replacement of the current marker on one line, `None` when nothing changes
fn marker_edit(
    text: &str,
    line: usize,
    cycle: &MarkerCycle,
) -> Option<(Range, &'static str)> {
    let indent = indentation(text);
    let content: String = text.chars().skip(indent).collect();
    let current = ListMarker::classify(&content);
    let next = cycle.next(current);
    let width = current.width_in(&content);

    log::trace!("line {line}: {current:?} -> {next:?}");
    if width == 0 && next.text().is_empty() {
        return None;
    }
    Some((Range::on_line(line, indent, indent + width), next.text()))
}

/// Leading whitespace in chars; a blank line counts entirely as indentation
fn indentation(text: &str) -> usize {
    let total = text.chars().count();
    let leading = text.chars().take_while(|c| c.is_whitespace()).count();
    if leading == total { total } else { leading }
}
