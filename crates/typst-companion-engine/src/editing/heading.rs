use crate::editing::{EditBatch, EditError, EditorHost, Position, Range};

/// Deepest heading Typst renders distinctly (`======`)
pub const MAX_HEADING_LEVEL: usize = 6;

/// Heading level of a line: the number of leading `=`, 0 when there are none
pub fn heading_level(line: &str) -> usize {
    line.chars().take_while(|&c| c == '=').count()
}

/// Line the heading commands act on: the caret line of the primary selection
fn target_line<H: EditorHost + ?Sized>(host: &H) -> Option<usize> {
    host.selections().first().map(|selection| selection.active.line)
}

/// Turn the line into a heading, or make an existing heading one level deeper
pub fn heading_increase<H: EditorHost + ?Sized>(host: &H) -> Result<EditBatch, EditError> {
    let mut batch = EditBatch::new();
    let Some(line) = target_line(host) else {
        return Ok(batch);
    };
    let text = host.require_line(line)?;
    let start = Position::new(line, 0);

    match heading_level(&text) {
        0 => batch.insert(start, "= "),
        level if level < MAX_HEADING_LEVEL => batch.insert(start, "="),
        level => log::debug!("line {line} already at heading level {level}"),
    }
    Ok(batch)
}

/// Make a heading one level shallower; level 1 loses its `= ` prefix
pub fn heading_decrease<H: EditorHost + ?Sized>(host: &H) -> Result<EditBatch, EditError> {
    let mut batch = EditBatch::new();
    let Some(line) = target_line(host) else {
        return Ok(batch);
    };
    let text = host.require_line(line)?;

    if text.starts_with("= ") {
        batch.delete(Range::on_line(line, 0, 2));
    } else if text.starts_with('=') {
        batch.delete(Range::on_line(line, 0, 1));
    }
    Ok(batch)
}
