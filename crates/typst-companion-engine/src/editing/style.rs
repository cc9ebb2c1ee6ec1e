//! Inline style toggling: wrap a span in start/end markers, or strip them
//! when the span is already wrapped.
//!
//! All edits of one invocation are computed against the same snapshot and
//! returned as one [`EditBatch`]. Selections further right on a line than an
//! earlier edit are corrected through a [`ShiftLog`] instead of re-reading the
//! buffer.

use std::sync::LazyLock;

use regex::Regex;

use crate::editing::{EditBatch, EditError, EditorHost, Position, Range, Selection, ShiftLog};

/// Symmetric markers that get the "jump out of the span" treatment when the
/// caret sits right before the end marker.
const JUMPABLE_MARKERS: [&str; 4] = ["**", "*", "__", "_"];

/// `- `, `* ` or `+ ` bullet with an optional `[ ]`/`[x]` checkbox
static TASK_ITEM_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[*+\-] (\[[ x]\] )? *").expect("task prefix is valid"));

/// Typst inline styles reachable from editor commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStyle {
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl InlineStyle {
    pub fn markers(self) -> WrapMarkers {
        match self {
            InlineStyle::Bold => WrapMarkers::symmetric("*"),
            InlineStyle::Italic => WrapMarkers::symmetric("_"),
            InlineStyle::Underline => WrapMarkers::new("#underline[", "]"),
            InlineStyle::Strikethrough => {
                WrapMarkers::new("#strike[", "]").with_scope(WrapScope::ListItem)
            }
        }
    }
}

/// What a bare caret expands to before wrapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WrapScope {
    /// The word under the caret
    #[default]
    Word,
    /// The word under the caret, except on list/task lines where the whole
    /// item text after the bullet and checkbox is used
    ListItem,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapMarkers {
    pub start: String,
    pub end: String,
    pub scope: WrapScope,
}

impl WrapMarkers {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            scope: WrapScope::Word,
        }
    }

    /// Same marker on both sides, e.g. `*` for bold
    pub fn symmetric(marker: impl Into<String>) -> Self {
        let marker = marker.into();
        Self::new(marker.clone(), marker)
    }

    pub fn with_scope(mut self, scope: WrapScope) -> Self {
        self.scope = scope;
        self
    }

    fn start_len(&self) -> usize {
        self.start.chars().count()
    }

    fn end_len(&self) -> usize {
        self.end.chars().count()
    }

    fn is_jumpable(&self) -> bool {
        self.start == self.end && JUMPABLE_MARKERS.contains(&self.start.as_str())
    }

    /// `text` already carries both markers around (possibly empty) content
    pub fn wraps(&self, text: &str) -> bool {
        text.chars().count() >= self.start_len() + self.end_len()
            && text.starts_with(&self.start)
            && text.ends_with(&self.end)
    }

    /// Text between the markers; only meaningful when [`Self::wraps`] holds
    fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start.len()..text.len() - self.end.len()]
    }
}

/// Where a bare caret sits relative to the markers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretContext {
    /// `*|*`: start marker on the left, end marker on the right
    BetweenMarkers,
    /// `*text|*`: end marker on the right only
    BeforeEndMarker,
    Plain,
}

/// Edits plus the selections the host should show once they are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleEdit {
    pub batch: EditBatch,
    pub selections: Vec<Selection>,
}

/// Toggle `markers` around every selection of the host
pub fn toggle_style<H: EditorHost + ?Sized>(
    host: &H,
    markers: &WrapMarkers,
) -> Result<StyleEdit, EditError> {
    let selections = host.selections();
    let mut batch = EditBatch::new();
    let mut shifts = ShiftLog::new();
    let mut new_selections = selections.clone();

    // Left to right, so every shift a selection needs is already logged
    let mut order: Vec<usize> = (0..selections.len()).collect();
    order.sort_by_key(|&i| selections[i].start());

    for i in order {
        let selection = &selections[i];
        let shift = shifts.offset_for(selection.start());
        let cursor = selection.active;

        if !selection.is_empty() {
            new_selections[i] = wrap_range(
                host,
                &mut batch,
                &mut shifts,
                WrapTarget {
                    selection,
                    cursor,
                    range: selection.range(),
                    selected: true,
                    shift,
                },
                markers,
            )?;
            continue;
        }

        let context = caret_context(host, cursor, markers)?;
        log::trace!("caret {cursor} context {context:?}");

        match context {
            CaretContext::BetweenMarkers => {
                new_selections[i] = jump_past_end(cursor, shift, markers);
            }
            CaretContext::BeforeEndMarker if markers.is_jumpable() => {
                new_selections[i] = jump_past_end(cursor, shift, markers);
            }
            CaretContext::BeforeEndMarker | CaretContext::Plain => {
                let range = quick_target(host, cursor, markers)?;
                new_selections[i] = wrap_range(
                    host,
                    &mut batch,
                    &mut shifts,
                    WrapTarget {
                        selection,
                        cursor,
                        range,
                        selected: false,
                        shift,
                    },
                    markers,
                )?;
            }
        }
    }

    log::debug!(
        "toggle {}…{}: {} edit(s) for {} selection(s)",
        markers.start,
        markers.end,
        batch.len(),
        selections.len()
    );

    Ok(StyleEdit {
        batch,
        selections: new_selections,
    })
}

/// Classify the text immediately around a bare caret
pub fn caret_context<H: EditorHost + ?Sized>(
    host: &H,
    cursor: Position,
    markers: &WrapMarkers,
) -> Result<CaretContext, EditError> {
    let left_start = cursor.character.saturating_sub(markers.start_len());
    let left = host.text_in(Range::new(cursor.with_character(left_start), cursor))?;
    let right = host.text_in(Range::new(
        cursor,
        cursor.with_character(cursor.character + markers.end_len()),
    ))?;

    Ok(if right != markers.end {
        CaretContext::Plain
    } else if left == markers.start {
        CaretContext::BetweenMarkers
    } else {
        CaretContext::BeforeEndMarker
    })
}

fn jump_past_end(cursor: Position, shift: isize, markers: &WrapMarkers) -> Selection {
    Selection::cursor(cursor.shifted(shift + markers.end_len() as isize))
}

/// Span a bare caret expands to: the word, the task item text, or nothing
fn quick_target<H: EditorHost + ?Sized>(
    host: &H,
    cursor: Position,
    markers: &WrapMarkers,
) -> Result<Range, EditError> {
    if markers.scope == WrapScope::ListItem {
        let line = host.require_line(cursor.line)?;
        if let Some(prefix) = TASK_ITEM_PREFIX.find(&line) {
            let start = line[..prefix.end()].chars().count();
            let end = line.chars().count();
            return Ok(Range::on_line(cursor.line, start, end));
        }
    }

    Ok(host
        .word_range_at(cursor)
        .unwrap_or_else(|| Range::empty(cursor)))
}

struct WrapTarget<'a> {
    selection: &'a Selection,
    cursor: Position,
    range: Range,
    /// The range came from an explicit selection rather than a bare caret
    selected: bool,
    shift: isize,
}

/// Wrap or unwrap one range, recording the edit and its shift, and return
/// the selection to show afterwards
fn wrap_range<H: EditorHost + ?Sized>(
    host: &H,
    batch: &mut EditBatch,
    shifts: &mut ShiftLog,
    target: WrapTarget<'_>,
    markers: &WrapMarkers,
) -> Result<Selection, EditError> {
    let WrapTarget {
        selection,
        cursor,
        range,
        selected,
        shift,
    } = target;

    let text = host.text_in(range)?;
    let start_len = markers.start_len() as isize;
    let both_len = start_len + markers.end_len() as isize;
    // Column change on the range's last line once the edit lands
    let line_delta = if range.is_single_line() {
        both_len
    } else {
        markers.end_len() as isize
    };

    let unwrap = markers.wraps(&text);
    let sign: isize = if unwrap { -1 } else { 1 };

    if unwrap {
        log::trace!("unwrap {range}");
        batch.replace(range, markers.inner(&text));
    } else {
        log::trace!("wrap {range}");
        batch.replace(range, format!("{}{}{}", markers.start, text, markers.end));
    }
    shifts.record(range.end, sign * line_delta);

    if selected {
        let start_shift = shift;
        let end_shift = if range.is_single_line() {
            shift + sign * line_delta
        } else {
            sign * line_delta
        };
        return Ok(selection.with_range(Range::new(
            range.start.shifted(start_shift),
            range.end.shifted(end_shift),
        )));
    }

    let moved = if range.is_empty() {
        // `|` becomes `*|*`
        shift + start_len
    } else if cursor.character == range.end.character {
        shift + sign * both_len
    } else {
        shift + sign * start_len
    };

    Ok(Selection::cursor(cursor.shifted(moved)))
}
