//! Whole-buffer undo snapshots.

use super::buffer::Buffer;
use super::cursor::Cursor;
use super::line::Line;

const INITIAL_CAPACITY: usize = 16;

/// A full copy of one buffer's lines and the cursor, taken before an edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    /// Index of the buffer the snapshot belongs to.
    pub buffer: usize,
    pub lines: Vec<Line>,
    pub cursor: Cursor,
}

/// Last-in first-out stack of whole-buffer snapshots.
///
/// Every entry copies the entire buffer, so memory grows with buffer size
/// times the number of edits. There is no redo: a popped state is gone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoStack {
    states: Vec<UndoState>,
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoStack {
    pub fn new() -> Self {
        Self {
            states: Vec::with_capacity(INITIAL_CAPACITY),
        }
    }

    /// Snapshot `buffer` (index `index`) and `cursor`.
    pub fn push(&mut self, index: usize, buffer: &Buffer, cursor: Cursor) {
        self.states.push(UndoState {
            buffer: index,
            lines: buffer.lines().to_vec(),
            cursor,
        });
    }

    /// Remove and return the newest snapshot.
    pub fn pop(&mut self) -> Option<UndoState> {
        self.states.pop()
    }

    /// Pop the newest snapshot and restore it into `buffers`.
    ///
    /// Returns the buffer index and cursor that were restored, or `None`
    /// when the stack is empty or the snapshot's buffer no longer exists.
    pub fn undo(&mut self, buffers: &mut [Buffer]) -> Option<(usize, Cursor)> {
        let state = self.states.pop()?;
        let buffer = buffers.get_mut(state.buffer)?;
        buffer.replace_lines(state.lines);
        Some((state.buffer, state.cursor))
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Position;

    fn buffer(lines: &[&str]) -> Buffer {
        Buffer::from_lines(lines.iter().copied(), None)
    }

    #[test]
    fn test_undo_on_empty_stack_is_noop() {
        let mut stack = UndoStack::new();
        let mut buffers = vec![buffer(&["a"])];
        assert_eq!(stack.undo(&mut buffers), None);
        assert_eq!(buffers[0].text(), "a");
    }

    #[test]
    fn test_undo_restores_lines_and_cursor() {
        let mut stack = UndoStack::new();
        let mut buffers = vec![buffer(&["one", "two"])];
        let mut cursor = Position::new(2, 2);
        stack.push(0, &buffers[0], cursor);
        buffers[0].delete_line(&mut cursor).unwrap();
        assert_eq!(buffers[0].text(), "one");

        assert_eq!(stack.undo(&mut buffers), Some((0, Position::new(2, 2))));
        assert_eq!(buffers[0].text(), "one\ntwo");
        assert!(stack.is_empty());
    }

    #[test]
    fn test_snapshot_is_deep_copy() {
        let mut stack = UndoStack::new();
        let mut buf = buffer(&["abc"]);
        stack.push(0, &buf, Position::new(1, 1));
        buf.delete_range(0, 0, 0, 3).unwrap();
        let state = stack.pop().unwrap();
        assert_eq!(state.lines[0].as_bytes(), b"abc");
    }

    #[test]
    fn test_undo_targets_tagged_buffer() {
        let mut stack = UndoStack::new();
        let mut buffers = vec![buffer(&["first"]), buffer(&["second"])];
        stack.push(1, &buffers[1], Position::new(1, 3));
        buffers[1].delete_range(0, 0, 0, 6).unwrap();
        assert_eq!(stack.undo(&mut buffers), Some((1, Position::new(1, 3))));
        assert_eq!(buffers[0].text(), "first");
        assert_eq!(buffers[1].text(), "second");
    }

    #[test]
    fn test_stack_grows_past_initial_capacity() {
        let mut stack = UndoStack::new();
        let buf = buffer(&["x"]);
        for _ in 0..INITIAL_CAPACITY * 3 {
            stack.push(0, &buf, Position::new(1, 1));
        }
        assert_eq!(stack.len(), INITIAL_CAPACITY * 3);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn undo_inverts_exactly_one_push(
                lines in prop::collection::vec("[a-c]{0,5}", 1..6),
                deletes in prop::collection::vec(
                    (0..6usize, 0..6usize, 0..6usize, 0..6usize),
                    1..4,
                ),
            ) {
                let mut buffers = vec![Buffer::from_lines(lines.iter().map(String::as_str), None)];
                let mut stack = UndoStack::new();
                let cursor = Position::new(1, 1);
                let mut history = Vec::new();
                for (sr, sc, er, ec) in deletes {
                    history.push(buffers[0].clone());
                    stack.push(0, &buffers[0], cursor);
                    let _ = buffers[0].delete_range(sr, sc, er, ec);
                }
                while let Some(expected) = history.pop() {
                    prop_assert_eq!(stack.undo(&mut buffers), Some((0, cursor)));
                    prop_assert_eq!(&buffers[0], &expected);
                }
                prop_assert_eq!(stack.undo(&mut buffers), None);
            }
        }
    }
}
