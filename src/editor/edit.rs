//! Range edits on a [`Buffer`].
//!
//! [`Buffer::delete_range`] is the only primitive that removes text; every
//! other delete here is expressed through it so single-line and
//! multi-line removals behave identically. Rows and columns passed to
//! `delete_range` are zero-based, while the cursor-driven operations take
//! the 1-indexed [`Cursor`] a window holds.

use crate::error::EditError;

use super::buffer::Buffer;
use super::cursor::{Cursor, Selection};
use super::is_word_byte;
use super::line::Line;

impl Buffer {
    /// Delete from `(start_row, start_col)` up to but excluding `end_col`
    /// on `end_row`.
    ///
    /// Rows are inclusive and zero-based, `end_col` is exclusive. The end
    /// is clamped to the buffer. Nothing happens for an empty range on a
    /// single line.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `start_row` is past the last
    /// line, or [`EditError::AllocationFailure`] if the joined line cannot
    /// be built.
    pub fn delete_range(
        &mut self,
        start_row: usize,
        start_col: usize,
        end_row: usize,
        end_col: usize,
    ) -> Result<(), EditError> {
        let count = self.line_count();
        if start_row >= count {
            return Err(EditError::OutOfRange {
                row: start_row + 1,
                column: start_col + 1,
            });
        }
        let end_row = end_row.min(count - 1);
        if end_row < start_row {
            return Ok(());
        }
        let end_col = end_col.min(self.line_len(end_row));

        let lines = self.lines_mut();
        if start_row == end_row {
            if start_col < end_col {
                lines[start_row].remove_range(start_col..end_col);
            }
            return Ok(());
        }

        let start_col = start_col.min(lines[start_row].len());
        let mut joined = Line::from_bytes(&lines[start_row].as_bytes()[..start_col])?;
        joined.push_slice(&lines[end_row].as_bytes()[end_col..])?;
        lines[start_row] = joined;
        lines.drain(start_row + 1..=end_row);
        lines.shrink_to_fit();
        Ok(())
    }

    /// Insert `byte` before the cursor and advance it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if the cursor row is past the
    /// buffer, or [`EditError::AllocationFailure`] if the line cannot grow.
    pub fn insert_char(&mut self, cursor: &mut Cursor, byte: u8) -> Result<(), EditError> {
        self.ensure_initialized();
        let (row, col) = self.cursor_index(*cursor)?;
        let line = &mut self.lines_mut()[row];
        let col = col.min(line.len());
        line.insert(col, byte)?;
        cursor.column = col + 2;
        Ok(())
    }

    /// Split the cursor line at the cursor; the cursor moves to the start
    /// of the new line.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if the cursor row is past the
    /// buffer, or [`EditError::AllocationFailure`] if the tail cannot be
    /// copied.
    pub fn insert_newline(&mut self, cursor: &mut Cursor) -> Result<(), EditError> {
        self.ensure_initialized();
        let (row, col) = self.cursor_index(*cursor)?;
        let lines = self.lines_mut();
        let tail = lines[row].split_off(col)?;
        lines.insert(row + 1, tail);
        cursor.row = row + 2;
        cursor.column = 1;
        Ok(())
    }

    /// Delete the byte under the cursor, or the last byte when the cursor
    /// is past the end of the line.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if the cursor row is past the
    /// buffer.
    pub fn delete_char(&mut self, cursor: Cursor) -> Result<(), EditError> {
        let (row, col) = self.cursor_index(cursor)?;
        let len = self.line_len(row);
        if len == 0 {
            return Ok(());
        }
        let col = col.min(len - 1);
        self.delete_range(row, col, row, col + 1)
    }

    /// Delete the byte left of the cursor, joining with the previous line
    /// at column 1.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if the cursor row is past the
    /// buffer.
    pub fn backspace_char(&mut self, cursor: &mut Cursor) -> Result<(), EditError> {
        let (row, col) = self.cursor_index(*cursor)?;
        if col == 0 {
            if row == 0 {
                return Ok(());
            }
            let prev_len = self.line_len(row - 1);
            self.delete_range(row - 1, prev_len, row, 0)?;
            cursor.row = row;
            cursor.column = prev_len + 1;
            return Ok(());
        }
        let col = col.min(self.line_len(row));
        if col == 0 {
            return Ok(());
        }
        self.delete_range(row, col - 1, row, col)?;
        cursor.column = col;
        Ok(())
    }

    /// Delete the run of word bytes under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if the cursor row is past the
    /// buffer.
    pub fn delete_word(&mut self, cursor: &mut Cursor) -> Result<(), EditError> {
        let (row, col) = self.cursor_index(*cursor)?;
        let Some((start, end)) = self
            .line(row)
            .and_then(|line| word_bounds(line.as_bytes(), col))
        else {
            return Ok(());
        };
        self.delete_range(row, start, row, end)?;
        cursor.column = start + 1;
        Ok(())
    }

    /// Remove the cursor line; the only line of a buffer is cleared
    /// instead.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if the cursor row is past the
    /// buffer.
    pub fn delete_line(&mut self, cursor: &mut Cursor) -> Result<(), EditError> {
        let (row, _) = self.cursor_index(*cursor)?;
        let count = self.line_count();
        if count == 1 {
            self.lines_mut()[0].clear();
        } else if row + 1 < count {
            self.delete_range(row, 0, row + 1, 0)?;
        } else {
            let prev_len = self.line_len(row - 1);
            self.delete_range(row - 1, prev_len, row, usize::MAX)?;
        }
        cursor.row = cursor.row.min(self.line_count());
        cursor.column = 1;
        Ok(())
    }

    /// Delete the text under a visual selection.
    ///
    /// Linewise selections remove whole rows; characterwise ones remove
    /// through the end column inclusive. The cursor lands on the start of
    /// what was removed.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if the selection starts past the
    /// buffer.
    pub fn delete_selection(
        &mut self,
        selection: &Selection,
        linewise: bool,
        cursor: &mut Cursor,
    ) -> Result<(), EditError> {
        let (first, last) = selection.normalized();
        if first.row == 0 || first.row > self.line_count() {
            return Err(EditError::OutOfRange {
                row: first.row,
                column: first.column,
            });
        }
        if linewise {
            for _ in first.row..=last.row {
                cursor.row = first.row.min(self.line_count());
                self.delete_line(cursor)?;
            }
            cursor.row = first.row.min(self.line_count()).max(1);
            cursor.column = 1;
        } else {
            let (start_row, start_col) = first.to_zero_based();
            let (end_row, _) = last.to_zero_based();
            self.delete_range(start_row, start_col, end_row, last.column)?;
            *cursor = first;
        }
        Ok(())
    }

    fn cursor_index(&self, cursor: Cursor) -> Result<(usize, usize), EditError> {
        let (row, col) = cursor.to_zero_based();
        if cursor.row == 0 || row >= self.line_count() {
            return Err(EditError::OutOfRange {
                row: cursor.row,
                column: cursor.column,
            });
        }
        Ok((row, col))
    }
}

/// Zero-based `[start, end)` of the word run containing `col`.
pub(super) fn word_bounds(bytes: &[u8], col: usize) -> Option<(usize, usize)> {
    if !bytes.get(col).copied().is_some_and(is_word_byte) {
        return None;
    }
    let start = bytes[..col]
        .iter()
        .rposition(|&b| !is_word_byte(b))
        .map_or(0, |i| i + 1);
    let end = bytes[col..]
        .iter()
        .position(|&b| !is_word_byte(b))
        .map_or(bytes.len(), |i| col + i);
    Some((start, end))
}
