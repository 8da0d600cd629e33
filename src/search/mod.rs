//! Search functionality.
//!
//! Exact, case-sensitive substring search over a buffer with wraparound.

use crate::editor::{Buffer, Cursor};

/// Which way [`find_occurrence`] scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl SearchDirection {
    pub const fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
}

/// Move `cursor` to the next match of `pattern`.
///
/// Forward search starts one byte after the cursor, runs to the end of the
/// buffer, then wraps from the top back to the cursor. Backward search
/// starts one byte before the cursor and wraps from the bottom. Returns
/// whether a match was found; the cursor is untouched otherwise.
pub fn find_occurrence(
    buffer: &Buffer,
    cursor: &mut Cursor,
    pattern: &[u8],
    direction: SearchDirection,
) -> bool {
    if pattern.is_empty() || buffer.line_count() == 0 {
        return false;
    }
    let (row, col) = cursor.to_zero_based();
    let row = row.min(buffer.line_count() - 1);

    let found = match direction {
        SearchDirection::Forward => search_forward(buffer, row, col, pattern),
        SearchDirection::Backward => search_backward(buffer, row, col, pattern),
    };
    if let Some((r, c)) = found {
        cursor.row = r + 1;
        cursor.column = c + 1;
        true
    } else {
        false
    }
}

fn search_forward(
    buffer: &Buffer,
    row: usize,
    col: usize,
    pattern: &[u8],
) -> Option<(usize, usize)> {
    let count = buffer.line_count();
    // One pass over every row starting at the cursor's, then the cursor row
    // again for the part before the cursor.
    (0..=count).find_map(|step| {
        let r = (row + step) % count;
        let bytes = buffer.line(r)?.as_bytes();
        let (from, to) = match step {
            0 => (col + 1, bytes.len()),
            s if s == count => (0, (col + 1).min(bytes.len())),
            _ => (0, bytes.len()),
        };
        find_in(bytes, pattern, from, to).map(|c| (r, c))
    })
}

fn search_backward(
    buffer: &Buffer,
    row: usize,
    col: usize,
    pattern: &[u8],
) -> Option<(usize, usize)> {
    let count = buffer.line_count();
    (0..=count).find_map(|step| {
        let r = (row + count * 2 - step) % count;
        let bytes = buffer.line(r)?.as_bytes();
        let (from, to) = match step {
            0 => (0, col.min(bytes.len())),
            s if s == count => (col, bytes.len()),
            _ => (0, bytes.len()),
        };
        rfind_in(bytes, pattern, from, to).map(|c| (r, c))
    })
}

/// First match starting in `from..to`.
fn find_in(bytes: &[u8], pattern: &[u8], from: usize, to: usize) -> Option<usize> {
    (from..to).find(|&c| bytes[c..].starts_with(pattern))
}

/// Last match starting in `from..to`.
fn rfind_in(bytes: &[u8], pattern: &[u8], from: usize, to: usize) -> Option<usize> {
    (from..to).rev().find(|&c| bytes[c..].starts_with(pattern))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::Position;

    fn buffer(lines: &[&str]) -> Buffer {
        Buffer::from_lines(lines.iter().copied(), None)
    }

    #[test]
    fn test_forward_finds_next_line() {
        let buf = buffer(&["x", "y", "bar", "z"]);
        let mut cursor = Position::new(1, 1);
        assert!(find_occurrence(&buf, &mut cursor, b"bar", SearchDirection::Forward));
        assert_eq!(cursor, Position::new(3, 1));
    }

    #[test]
    fn test_forward_wraps_to_only_match() {
        let buf = buffer(&["x", "y", "bar", "z"]);
        let mut cursor = Position::new(3, 1);
        assert!(find_occurrence(&buf, &mut cursor, b"bar", SearchDirection::Forward));
        assert_eq!(cursor, Position::new(3, 1));
    }

    #[test]
    fn test_forward_skips_match_under_cursor() {
        let buf = buffer(&["ab ab ab"]);
        let mut cursor = Position::new(1, 1);
        assert!(find_occurrence(&buf, &mut cursor, b"ab", SearchDirection::Forward));
        assert_eq!(cursor, Position::new(1, 4));
    }

    #[test]
    fn test_forward_wraps_to_top() {
        let buf = buffer(&["needle", "hay", "hay"]);
        let mut cursor = Position::new(2, 2);
        assert!(find_occurrence(&buf, &mut cursor, b"needle", SearchDirection::Forward));
        assert_eq!(cursor, Position::new(1, 1));
    }

    #[test]
    fn test_forward_wraps_to_earlier_part_of_cursor_line() {
        let buf = buffer(&["key hay"]);
        let mut cursor = Position::new(1, 5);
        assert!(find_occurrence(&buf, &mut cursor, b"key", SearchDirection::Forward));
        assert_eq!(cursor, Position::new(1, 1));
    }

    #[test]
    fn test_backward_finds_previous_match() {
        let buf = buffer(&["ab", "xx ab ab"]);
        let mut cursor = Position::new(2, 7);
        assert!(find_occurrence(&buf, &mut cursor, b"ab", SearchDirection::Backward));
        assert_eq!(cursor, Position::new(2, 4));
    }

    #[test]
    fn test_backward_from_column_one_moves_up() {
        let buf = buffer(&["ab", "ab"]);
        let mut cursor = Position::new(2, 1);
        assert!(find_occurrence(&buf, &mut cursor, b"ab", SearchDirection::Backward));
        assert_eq!(cursor, Position::new(1, 1));
    }

    #[test]
    fn test_backward_wraps_to_bottom() {
        let buf = buffer(&["top", "mid", "end"]);
        let mut cursor = Position::new(1, 1);
        assert!(find_occurrence(&buf, &mut cursor, b"end", SearchDirection::Backward));
        assert_eq!(cursor, Position::new(3, 1));
    }

    #[test]
    fn test_no_match_leaves_cursor() {
        let buf = buffer(&["abc"]);
        let mut cursor = Position::new(1, 2);
        assert!(!find_occurrence(&buf, &mut cursor, b"zzz", SearchDirection::Forward));
        assert_eq!(cursor, Position::new(1, 2));
    }

    #[test]
    fn test_empty_pattern_is_noop() {
        let buf = buffer(&["abc"]);
        let mut cursor = Position::new(1, 2);
        assert!(!find_occurrence(&buf, &mut cursor, b"", SearchDirection::Backward));
        assert_eq!(cursor, Position::new(1, 2));
    }

    #[test]
    fn test_search_is_case_sensitive() {
        let buf = buffer(&["Foo", "foo"]);
        let mut cursor = Position::new(1, 1);
        assert!(find_occurrence(&buf, &mut cursor, b"foo", SearchDirection::Forward));
        assert_eq!(cursor, Position::new(2, 1));
    }
}
