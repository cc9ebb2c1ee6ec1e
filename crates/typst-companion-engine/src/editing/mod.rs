/*!
 * # Editing Core
 *
 * Authoring commands for Typst sources, written against an injected editor
 * host so they run the same inside an editor integration, a CLI or a test.
 *
 * ## Edit model
 *
 * Every command follows the same loop:
 *
 * 1. read the host's selections and line text (one consistent snapshot)
 * 2. compute an [`EditBatch`] whose ranges all refer to that snapshot
 * 3. hand the batch to [`EditorHost::apply`], which commits it atomically
 * 4. restore selections (style toggles) or ask the host to renumber
 *    ordered lists (list toggles)
 *
 * Commands never re-read the buffer halfway through a batch. When a later
 * selection on the same line needs to know where an earlier edit moved
 * text, it asks the [`ShiftLog`].
 *
 * ## Module Structure
 *
 * - **`position`**: `Position`, `Range` and `Selection` (line/char based)
 * - **`host`**: the `EditorHost` capability trait
 * - **`document`**: in-memory `Document` host over an xi-rope buffer
 * - **`patch`**: `Edit`, `EditBatch` and the `Patch` returned by `Document`
 * - **`shift`**: `ShiftLog` column corrections within a batch
 * - **`style`**: inline style wrap/unwrap toggling
 * - **`list`**: list marker classification and cycling
 * - **`heading`**: heading level increase/decrease
 * - **`commands`**: `Cmd` names and the `execute` runner
 *
 * ## Usage Pattern
 *
 * ```rust
 * use typst_companion_engine::editing::*;
 *
 * let mut doc = Document::from_bytes(b"make this bold").unwrap();
 * doc.set_selections(vec![Selection::cursor(Position::new(0, 6))]);
 *
 * execute(&mut doc, Cmd::ToggleBold).unwrap();
 * assert_eq!(doc.text(), "make *this* bold");
 * assert_eq!(doc.selections(), vec![Selection::cursor(Position::new(0, 7))]);
 * ```
 */

pub mod commands;
pub mod document;
pub mod error;
pub mod heading;
pub mod host;
pub mod list;
pub mod patch;
pub mod position;
pub mod shift;
pub mod style;
pub mod word;

// Public API re-exports
pub use commands::{Cmd, Outcome, execute};
pub use document::Document;
pub use error::EditError;
pub use heading::{MAX_HEADING_LEVEL, heading_decrease, heading_increase, heading_level};
pub use host::EditorHost;
pub use list::{ListEdit, ListMarker, MarkerCycle, toggle_list};
pub use patch::{Edit, EditBatch, Patch};
pub use position::{Position, Range, Selection};
pub use shift::ShiftLog;
pub use style::{CaretContext, InlineStyle, StyleEdit, WrapMarkers, WrapScope, toggle_style};
