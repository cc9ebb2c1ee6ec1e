use std::fmt;

/// A location in a document: zero-based line and zero-based character column.
///
/// Columns count Unicode scalar values within the line, never bytes, so a
/// position stays meaningful when the host stores text in another encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub const fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }

    /// Same line, different column
    pub const fn with_character(self, character: usize) -> Self {
        Self {
            line: self.line,
            character,
        }
    }

    /// Move the column by a signed delta, saturating at column 0
    pub fn shifted(self, delta: isize) -> Self {
        self.with_character(self.character.saturating_add_signed(delta))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.character)
    }
}

/// An ordered pair of positions, `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    /// Build a range from two positions in either order
    pub fn new(a: Position, b: Position) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// Range within a single line
    pub fn on_line(line: usize, start: usize, end: usize) -> Self {
        Self::new(Position::new(line, start), Position::new(line, end))
    }

    pub fn empty(at: Position) -> Self {
        Self { start: at, end: at }
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn is_single_line(&self) -> bool {
        self.start.line == self.end.line
    }

    /// True when the two ranges share more than a boundary point.
    /// Two empty ranges at the same position also count as overlapping.
    pub fn overlaps(&self, other: &Range) -> bool {
        if self.is_empty() && other.is_empty() {
            return self.start == other.start;
        }
        self.start < other.end && other.start < self.end
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// A range with direction: `anchor` is where the selection began and
/// `active` is where the caret sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Selection {
    pub anchor: Position,
    pub active: Position,
}

impl Selection {
    pub const fn new(anchor: Position, active: Position) -> Self {
        Self { anchor, active }
    }

    /// An empty selection, i.e. a plain caret
    pub const fn cursor(at: Position) -> Self {
        Self {
            anchor: at,
            active: at,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.anchor == self.active
    }

    /// The caret sits before the anchor (shift-selected leftwards)
    pub fn is_reversed(&self) -> bool {
        self.active < self.anchor
    }

    pub fn start(&self) -> Position {
        self.anchor.min(self.active)
    }

    pub fn end(&self) -> Position {
        self.anchor.max(self.active)
    }

    pub fn range(&self) -> Range {
        Range::new(self.anchor, self.active)
    }

    /// Rebuild the selection over `range`, keeping its direction
    pub fn with_range(&self, range: Range) -> Self {
        if self.is_reversed() {
            Self::new(range.end, range.start)
        } else {
            Self::new(range.start, range.end)
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            write!(f, "{}", self.active)
        } else {
            write!(f, "{}->{}", self.anchor, self.active)
        }
    }
}
