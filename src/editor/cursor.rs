/// A 1-indexed position in a buffer.
///
/// `row` names `lines[row - 1]`; `column` may sit one past the last byte
/// of the line so that appends have somewhere to go.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

/// The editing cursor of a window.
pub type Cursor = Position;

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// Zero-based `(row, column)` pair, saturating at the origin.
    pub const fn to_zero_based(self) -> (usize, usize) {
        (self.row.saturating_sub(1), self.column.saturating_sub(1))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::new(1, 1)
    }
}

/// A visual-mode selection.
///
/// `start` is the anchor set when visual mode was entered and `end`
/// follows the cursor, so the two are in no particular order. Use
/// [`Selection::normalized`] before consuming it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub start: Position,
    pub end: Position,
}

impl Selection {
    /// A selection anchored and ending at `at`.
    pub const fn at(at: Position) -> Self {
        Self { start: at, end: at }
    }

    /// Endpoints ordered so the first is not after the second.
    pub fn normalized(&self) -> (Position, Position) {
        if self.start <= self.end {
            (self.start, self.end)
        } else {
            (self.end, self.start)
        }
    }

    /// Inclusive row range covered by the selection.
    pub fn rows(&self) -> (usize, usize) {
        let (first, last) = self.normalized();
        (first.row, last.row)
    }

    /// Whether the cell at `(row, column)` falls inside the selection.
    pub fn contains(&self, row: usize, column: usize, linewise: bool) -> bool {
        let (first, last) = self.normalized();
        if row < first.row || row > last.row {
            return false;
        }
        if linewise {
            return true;
        }
        let after_start = row > first.row || column >= first.column;
        let before_end = row < last.row || column <= last.column;
        after_start && before_end
    }
}
