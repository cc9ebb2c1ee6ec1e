use xi_rope::delta::Builder;
use xi_rope::{Delta, Rope, RopeInfo};

use crate::editing::word::{byte_index, char_index, word_range_in_line};
use crate::editing::{EditBatch, EditError, EditorHost, Patch, Position, Range, Selection};

/// In-memory document host.
///
/// The whole text lives in one `xi_rope::Rope`; `to_bytes()` hands back
/// exactly what was loaded plus the applied edits, line endings included.
/// Selections are kept as line/column positions and transformed through
/// every applied batch the way an editor moves carets across edits.
#[derive(Clone)]
pub struct Document {
    pub(crate) buffer: Rope,
    pub(crate) selections: Vec<Selection>,
    /// Incremented on each applied batch
    pub(crate) version: u64,
    pub(crate) candidate_markers: Option<Vec<String>>,
}

impl Document {
    /// Create a new document from raw bytes
    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        let text = std::str::from_utf8(bytes)?;
        Ok(Self::from_text(text))
    }

    /// Create a new document with a single caret at the start
    pub fn from_text(text: &str) -> Self {
        Self {
            buffer: Rope::from(text),
            selections: vec![Selection::cursor(Position::default())],
            version: 0,
            candidate_markers: None,
        }
    }

    /// Use a configured list marker cycle for `toggle-list-marker`
    pub fn with_candidate_markers(mut self, markers: Vec<String>) -> Self {
        self.candidate_markers = Some(markers);
        self
    }

    /// Get the document's content as raw bytes (exact round-trip)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer.to_string().into_bytes()
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    /// Apply a batch as one delta and move the selections across it
    pub fn apply_batch(&mut self, batch: &EditBatch) -> Result<Patch, EditError> {
        let sorted = batch.sorted()?;

        // Resolve every edit against the current buffer before touching it
        let mut resolved = Vec::with_capacity(sorted.len());
        for edit in sorted {
            let start = self.offset_of(edit.range.start)?;
            let end = self.offset_of(edit.range.end)?.max(start);
            resolved.push((start..end, edit.text.as_str()));
        }

        let delta = self.compile_batch(&resolved);

        // Track changed ranges for the patch
        let mut changed = Vec::new();
        let mut cursor = 0;
        for op in delta.els.iter() {
            match op {
                xi_rope::delta::DeltaElement::Copy(from, to) => {
                    cursor += to - from;
                }
                xi_rope::delta::DeltaElement::Insert(inserted) => {
                    let start = cursor;
                    let end = cursor + inserted.len();
                    changed.push(start..end);
                    cursor = end;
                }
            }
        }

        // Selections are mapped through byte offsets of the old buffer
        let old_selections: Vec<(usize, usize)> = self
            .selections
            .iter()
            .map(|sel| Ok((self.offset_of(sel.anchor)?, self.offset_of(sel.active)?)))
            .collect::<Result<_, EditError>>()?;

        self.buffer = delta.apply(&self.buffer);

        self.selections = old_selections
            .into_iter()
            .map(|(anchor, active)| {
                Selection::new(
                    self.position_of(transform_offset(anchor, &resolved)),
                    self.position_of(transform_offset(active, &resolved)),
                )
            })
            .collect();

        self.version += 1;
        log::debug!(
            "applied {} edit(s), document now at version {}",
            resolved.len(),
            self.version
        );

        Ok(Patch {
            changed,
            selections: self.selections.clone(),
            version: self.version,
        })
    }

    fn compile_batch(&self, resolved: &[(std::ops::Range<usize>, &str)]) -> Delta<RopeInfo> {
        let mut builder = Builder::new(self.buffer.len());
        for (range, text) in resolved {
            builder.replace(range.clone(), Rope::from(*text));
        }
        builder.build()
    }

    /// Byte offset of the start of `line` and of its end (terminator excluded)
    fn line_bounds(&self, line: usize) -> Option<(usize, usize)> {
        if line >= self.line_count() {
            return None;
        }
        let start = self.buffer.offset_of_line(line);
        let next = if line + 1 < self.line_count() {
            self.buffer.offset_of_line(line + 1)
        } else {
            self.buffer.len()
        };
        let raw = self.buffer.slice_to_cow(start..next);
        let raw: &str = &raw;
        let content = raw.strip_suffix('\n').unwrap_or(raw);
        let content = content.strip_suffix('\r').unwrap_or(content);
        Some((start, start + content.len()))
    }

    /// Byte offset for a position; the column is clamped to the line end
    pub(crate) fn offset_of(&self, pos: Position) -> Result<usize, EditError> {
        let (start, end) = self
            .line_bounds(pos.line)
            .ok_or(EditError::LineOutOfRange {
                line: pos.line,
                line_count: self.line_count(),
            })?;
        let line = self.buffer.slice_to_cow(start..end);
        Ok(start + byte_index(&line, pos.character))
    }

    /// Position for a byte offset in the current buffer
    pub(crate) fn position_of(&self, offset: usize) -> Position {
        let offset = offset.min(self.buffer.len());
        let line = self.buffer.line_of_offset(offset);
        let line_start = self.buffer.offset_of_line(line);
        let before = self.buffer.slice_to_cow(line_start..offset);
        Position::new(line, char_index(&before, before.len()))
    }
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("text", &self.buffer.to_string())
            .field("selections", &self.selections)
            .field("version", &self.version)
            .finish()
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        // Rope has no structural equality; compare the text it holds
        self.buffer.to_string() == other.buffer.to_string()
            && self.selections == other.selections
            && self.version == other.version
            && self.candidate_markers == other.candidate_markers
    }
}

/// Move an offset of the old buffer across the sorted, resolved edits
fn transform_offset(offset: usize, resolved: &[(std::ops::Range<usize>, &str)]) -> usize {
    let mut net: isize = 0;
    for (range, text) in resolved {
        let inserted = text.len() as isize;
        if range.end <= offset {
            net += inserted - range.len() as isize;
        } else if range.start < offset {
            // Inside a replaced span: land after the replacement text
            return (range.start as isize + net + inserted) as usize;
        } else {
            break;
        }
    }
    (offset as isize + net) as usize
}

impl EditorHost for Document {
    fn line_count(&self) -> usize {
        self.buffer.line_of_offset(self.buffer.len()) + 1
    }

    fn line_text(&self, line: usize) -> Option<String> {
        let (start, end) = self.line_bounds(line)?;
        Some(self.buffer.slice_to_cow(start..end).into_owned())
    }

    fn text_in(&self, range: Range) -> Result<String, EditError> {
        let start = self.offset_of(range.start)?;
        let end = self.offset_of(range.end)?.max(start);
        Ok(self.buffer.slice_to_cow(start..end).into_owned())
    }

    fn word_range_at(&self, pos: Position) -> Option<Range> {
        let line = self.line_text(pos.line)?;
        word_range_in_line(&line, pos.character)
            .map(|(start, end)| Range::on_line(pos.line, start, end))
    }

    fn selections(&self) -> Vec<Selection> {
        self.selections.clone()
    }

    fn set_selections(&mut self, selections: Vec<Selection>) {
        self.selections = selections;
    }

    fn apply(&mut self, batch: &EditBatch) -> Result<(), EditError> {
        self.apply_batch(batch).map(|_| ())
    }

    fn list_candidates(&self) -> Option<Vec<String>> {
        self.candidate_markers.clone()
    }

    fn renumber_ordered_lists(&mut self, lines: &[usize]) {
        log::trace!("no ordered-list renumbering for lines {lines:?}");
    }
}
