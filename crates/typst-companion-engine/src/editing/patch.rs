use crate::editing::{EditError, Position, Range, Selection};

/// A single replacement computed against a document snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub range: Range,
    pub text: String,
}

impl Edit {
    pub fn replace(range: Range, text: impl Into<String>) -> Self {
        Self {
            range,
            text: text.into(),
        }
    }

    pub fn insert(at: Position, text: impl Into<String>) -> Self {
        Self::replace(Range::empty(at), text)
    }

    pub fn delete(range: Range) -> Self {
        Self::replace(range, String::new())
    }
}

/// Edits that are applied together as one transaction.
///
/// Every range refers to the document as it was before any edit of the batch,
/// so the batch can be built in any order and applied in one step.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBatch {
    edits: Vec<Edit>,
}

impl EditBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, edit: Edit) {
        self.edits.push(edit);
    }

    pub fn replace(&mut self, range: Range, text: impl Into<String>) {
        self.push(Edit::replace(range, text));
    }

    pub fn insert(&mut self, at: Position, text: impl Into<String>) {
        self.push(Edit::insert(at, text));
    }

    pub fn delete(&mut self, range: Range) {
        self.push(Edit::delete(range));
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    /// Edits in the order they were recorded
    pub fn edits(&self) -> &[Edit] {
        &self.edits
    }

    /// Edits sorted by position, rejecting any pair that overlaps
    pub fn sorted(&self) -> Result<Vec<&Edit>, EditError> {
        let mut sorted: Vec<&Edit> = self.edits.iter().collect();
        sorted.sort_by_key(|edit| (edit.range.start, edit.range.end));

        for pair in sorted.windows(2) {
            if pair[0].range.overlaps(&pair[1].range) {
                return Err(EditError::OverlappingEdits {
                    first: pair[0].range,
                    second: pair[1].range,
                });
            }
        }

        Ok(sorted)
    }
}

impl FromIterator<Edit> for EditBatch {
    fn from_iter<I: IntoIterator<Item = Edit>>(iter: I) -> Self {
        Self {
            edits: iter.into_iter().collect(),
        }
    }
}

/// Result of applying a batch to a [`Document`](crate::editing::Document)
#[derive(Debug, Clone, PartialEq)]
pub struct Patch {
    /// Byte ranges of inserted text in the new buffer
    pub changed: Vec<std::ops::Range<usize>>,
    pub selections: Vec<Selection>,
    pub version: u64,
}
