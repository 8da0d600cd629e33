//! The unnamed register: yanking lines, spans and selections, and pasting
//! them back.

use crate::error::EditError;

use super::buffer::Buffer;
use super::cursor::{Cursor, Position, Selection};
use super::line::Line;

/// The unnamed register.
///
/// Holds deep copies of yanked text, so later edits to the source buffer
/// never show through. Each yank replaces the previous contents wholesale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct YankBuffer {
    fragments: Vec<Vec<u8>>,
    linewise: bool,
}

impl YankBuffer {
    pub const fn new() -> Self {
        Self {
            fragments: Vec::new(),
            linewise: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.fragments.is_empty()
    }

    pub const fn is_linewise(&self) -> bool {
        self.linewise
    }

    pub fn fragments(&self) -> &[Vec<u8>] {
        &self.fragments
    }

    /// Yank whole lines `first..=last` (1-indexed), clamped to the buffer.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `first` is not a line of the
    /// buffer.
    pub fn yank_lines(
        &mut self,
        buffer: &Buffer,
        first: usize,
        last: usize,
    ) -> Result<(), EditError> {
        if first == 0 || first > buffer.line_count() {
            return Err(EditError::OutOfRange {
                row: first,
                column: 1,
            });
        }
        let last = last.clamp(first, buffer.line_count());
        self.fragments = buffer.lines()[first - 1..last]
            .iter()
            .map(|line| line.as_bytes().to_vec())
            .collect();
        self.linewise = true;
        Ok(())
    }

    /// Yank the characters from `first` through `last`, both inclusive.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if `first` is not a line of the
    /// buffer.
    pub fn yank_span(
        &mut self,
        buffer: &Buffer,
        first: Position,
        last: Position,
    ) -> Result<(), EditError> {
        let (start_row, start_col) = first.to_zero_based();
        if first.row == 0 || start_row >= buffer.line_count() {
            return Err(EditError::OutOfRange {
                row: first.row,
                column: first.column,
            });
        }
        let end_row = last.row.saturating_sub(1).clamp(start_row, buffer.line_count() - 1);
        let lines = buffer.lines();

        let fragments = if start_row == end_row {
            vec![slice(&lines[start_row], start_col, last.column).to_vec()]
        } else {
            let mut fragments = Vec::with_capacity(end_row - start_row + 1);
            fragments.push(slice(&lines[start_row], start_col, usize::MAX).to_vec());
            fragments.extend(
                lines[start_row + 1..end_row]
                    .iter()
                    .map(|line| line.as_bytes().to_vec()),
            );
            fragments.push(slice(&lines[end_row], 0, last.column).to_vec());
            fragments
        };

        self.fragments = fragments;
        self.linewise = false;
        Ok(())
    }

    /// Yank a visual selection, linewise or characterwise.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::OutOfRange`] if the selection starts past the
    /// buffer.
    pub fn yank_selection(
        &mut self,
        buffer: &Buffer,
        selection: &Selection,
        linewise: bool,
    ) -> Result<(), EditError> {
        let (first, last) = selection.normalized();
        if linewise {
            self.yank_lines(buffer, first.row, last.row)
        } else {
            self.yank_span(buffer, first, last)
        }
    }

    /// Put the register's contents into `buffer` at the cursor.
    ///
    /// Linewise text goes below the cursor row and the cursor moves to
    /// its first line. Characterwise text is spliced in before the cursor
    /// column and the cursor moves past it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::EmptyYank`] if nothing has been yanked, or
    /// [`EditError::OutOfRange`] if the cursor row is past the buffer.
    pub fn paste(&self, buffer: &mut Buffer, cursor: &mut Cursor) -> Result<(), EditError> {
        if self.fragments.is_empty() {
            return Err(EditError::EmptyYank);
        }
        buffer.ensure_initialized();
        let (row, col) = cursor.to_zero_based();
        if cursor.row == 0 || row >= buffer.line_count() {
            return Err(EditError::OutOfRange {
                row: cursor.row,
                column: cursor.column,
            });
        }

        if self.linewise {
            let new_lines = self
                .fragments
                .iter()
                .map(|bytes| Line::from_bytes(bytes))
                .collect::<Result<Vec<_>, _>>()?;
            buffer.lines_mut().splice(row + 1..row + 1, new_lines);
            cursor.row = row + 2;
            cursor.column = 1;
            return Ok(());
        }

        let lines = buffer.lines_mut();
        let col = col.min(lines[row].len());
        let (first, rest) = self.fragments.split_first().ok_or(EditError::EmptyYank)?;
        let Some((last, middle)) = rest.split_last() else {
            lines[row].insert_slice(col, first)?;
            cursor.column = col + first.len() + 1;
            return Ok(());
        };

        let suffix = lines[row].split_off(col)?;
        lines[row].push_slice(first)?;
        let mut tail = Line::from_bytes(last)?;
        tail.push_slice(suffix.as_bytes())?;
        let mut inserted = middle
            .iter()
            .map(|bytes| Line::from_bytes(bytes))
            .collect::<Result<Vec<_>, _>>()?;
        inserted.push(tail);
        lines.splice(row + 1..row + 1, inserted);

        cursor.row += rest.len();
        Ok(())
    }
}

fn slice(line: &Line, start: usize, end: usize) -> &[u8] {
    let bytes = line.as_bytes();
    let end = end.min(bytes.len());
    &bytes[start.min(end)..end]
}
