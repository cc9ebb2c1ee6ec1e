use crate::editing::Position;

/// Column corrections recorded while a batch is being built.
///
/// Each entry says "text at or after `at` on this line moves by `delta`
/// columns once the batch is applied". Later selections consult the log to
/// translate their snapshot positions into post-edit positions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShiftLog {
    entries: Vec<(Position, isize)>,
}

impl ShiftLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, at: Position, delta: isize) {
        self.entries.push((at, delta));
    }

    /// Total column shift for a position on the same line at or after each entry
    pub fn offset_for(&self, pos: Position) -> isize {
        self.entries
            .iter()
            .filter(|(at, _)| at.line == pos.line && pos.character >= at.character)
            .map(|(_, delta)| delta)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
