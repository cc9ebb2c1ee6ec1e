use crate::editing::Range;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum EditError {
    #[error("Line {line} is out of range (document has {line_count} lines)")]
    LineOutOfRange { line: usize, line_count: usize },
    #[error("Edits at {first} and {second} overlap")]
    OverlappingEdits { first: Range, second: Range },
    #[error("Unknown command: {0}")]
    UnknownCommand(String),
}
