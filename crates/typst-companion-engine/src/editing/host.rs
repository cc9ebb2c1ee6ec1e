use crate::editing::{EditBatch, EditError, Position, Range, Selection};

/// Capabilities the editing commands need from whatever owns the document.
///
/// An editor integration implements this over its own buffer and selection
/// model; [`Document`](crate::editing::Document) implements it over an
/// in-memory rope. The commands only read through this trait and hand back
/// a single [`EditBatch`], so the host stays in charge of undo grouping and
/// of applying the batch atomically.
pub trait EditorHost {
    /// Number of lines, counting an empty last line after a trailing newline
    fn line_count(&self) -> usize;

    /// Text of a line without its terminator, `None` past the last line
    fn line_text(&self, line: usize) -> Option<String>;

    /// Text covered by `range`. Columns past a line's end are clamped.
    fn text_in(&self, range: Range) -> Result<String, EditError>;

    /// Range of the word touching `pos`, if any
    fn word_range_at(&self, pos: Position) -> Option<Range>;

    fn selections(&self) -> Vec<Selection>;

    fn set_selections(&mut self, selections: Vec<Selection>);

    /// Apply every edit of the batch in one transaction
    fn apply(&mut self, batch: &EditBatch) -> Result<(), EditError>;

    /// Configured list marker cycle (`["-", "*", "1."]` style entries)
    fn list_candidates(&self) -> Option<Vec<String>> {
        None
    }

    /// Called after list markers changed on `lines` so the host can
    /// renumber ordered lists. Hosts without renumbering ignore it.
    fn renumber_ordered_lists(&mut self, _lines: &[usize]) {}

    /// Line text, or an error naming the missing line
    fn require_line(&self, line: usize) -> Result<String, EditError> {
        self.line_text(line).ok_or(EditError::LineOutOfRange {
            line,
            line_count: self.line_count(),
        })
    }
}
