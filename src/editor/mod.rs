//! The editing engine.
//!
//! Byte-oriented line storage with cursor, selection, range delete,
//! yank/paste, undo snapshots and text objects. Nothing in here touches the
//! terminal; the [`crate::app`] state machine drives it one keystroke at a
//! time and the renderer only reads from it.

mod buffer;
mod cursor;
mod edit;
mod line;
mod text_object;
mod undo;
mod yank;

pub use buffer::Buffer;
pub use cursor::{Cursor, Position, Selection};
pub use line::{Line, MIN_CAPACITY};
pub use text_object::{TextObject, TextSpan, find_text_object};
pub use undo::{UndoStack, UndoState};
pub use yank::YankBuffer;

/// Word bytes are ASCII alphanumerics and underscore.
pub const fn is_word_byte(byte: u8) -> bool {
    byte.is_ascii_alphanumeric() || byte == b'_'
}
