//! Cursor-relative spans: words, paragraphs, and quoted or bracketed text.
//!
//! Only the "inner" form is supported: delimiters are never part of the
//! span.

use super::buffer::Buffer;
use super::cursor::Cursor;
use super::edit::word_bounds;

/// Which kind of span to look for around the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextObject {
    /// Run of `[A-Za-z0-9_]` under the cursor.
    Word,
    /// Contiguous non-empty lines around the cursor row.
    Paragraph,
    /// Text between two identical quote bytes.
    Quote(u8),
    /// Text between a balanced bracket pair.
    Bracket { open: u8, close: u8 },
}

impl TextObject {
    /// Map the key typed after `i` to a text object.
    ///
    /// Either half of a bracket pair names the same object.
    pub const fn from_byte(byte: u8) -> Option<Self> {
        let object = match byte {
            b'w' => Self::Word,
            b'p' => Self::Paragraph,
            b'"' | b'\'' => Self::Quote(byte),
            b'(' | b')' => Self::Bracket {
                open: b'(',
                close: b')',
            },
            b'[' | b']' => Self::Bracket {
                open: b'[',
                close: b']',
            },
            b'{' | b'}' => Self::Bracket {
                open: b'{',
                close: b'}',
            },
            b'<' | b'>' => Self::Bracket {
                open: b'<',
                close: b'>',
            },
            _ => return None,
        };
        Some(object)
    }
}

/// A resolved span in zero-based coordinates.
///
/// Rows are inclusive; `end_col` is exclusive, matching
/// [`Buffer::delete_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextSpan {
    pub start_row: usize,
    pub start_col: usize,
    pub end_row: usize,
    pub end_col: usize,
}

impl TextSpan {
    /// Whether the span covers no bytes.
    pub const fn is_empty(&self) -> bool {
        self.start_row == self.end_row && self.start_col >= self.end_col
    }
}

/// Find `object` around `cursor`.
///
/// Returns `None` when the cursor is not on a word for [`TextObject::Word`],
/// or when no opening or closing delimiter exists.
pub fn find_text_object(buffer: &Buffer, cursor: Cursor, object: TextObject) -> Option<TextSpan> {
    let (row, col) = cursor.to_zero_based();
    if cursor.row == 0 || row >= buffer.line_count() {
        return None;
    }
    match object {
        TextObject::Word => {
            let (start, end) = word_bounds(buffer.line(row)?.as_bytes(), col)?;
            Some(TextSpan {
                start_row: row,
                start_col: start,
                end_row: row,
                end_col: end,
            })
        }
        TextObject::Paragraph => Some(paragraph(buffer, row)),
        TextObject::Quote(quote) => delimited(buffer, row, col, quote, quote, false),
        TextObject::Bracket { open, close } => delimited(buffer, row, col, open, close, true),
    }
}

/// Grow from the cursor row over the non-empty lines on either side.
///
/// The cursor row itself is always included, blank or not.
fn paragraph(buffer: &Buffer, row: usize) -> TextSpan {
    let filled = |r: usize| buffer.line_len(r) > 0;

    let mut start = row;
    while start > 0 && filled(start - 1) {
        start -= 1;
    }
    let mut end = row;
    while end + 1 < buffer.line_count() && filled(end + 1) {
        end += 1;
    }
    TextSpan {
        start_row: start,
        start_col: 0,
        end_row: end,
        end_col: buffer.line_len(end),
    }
}

/// Scan back from just before the cursor for `open`, then forward from
/// there for `close`.
///
/// With `nested`, every `close` met on the way back must be matched by an
/// extra `open` (and the reverse going forward).
fn delimited(
    buffer: &Buffer,
    row: usize,
    col: usize,
    open: u8,
    close: u8,
    nested: bool,
) -> Option<TextSpan> {
    let lines = buffer.lines();

    let mut depth = 0usize;
    let mut start = None;
    'backward: for r in (0..=row).rev() {
        let bytes = lines[r].as_bytes();
        let limit = if r == row { col.min(bytes.len()) } else { bytes.len() };
        for c in (0..limit).rev() {
            let b = bytes[c];
            if nested && b == close {
                depth += 1;
            } else if b == open {
                if depth == 0 {
                    start = Some((r, c + 1));
                    break 'backward;
                }
                depth -= 1;
            }
        }
    }
    let (start_row, start_col) = start?;

    let mut depth = 0usize;
    for (r, line) in lines.iter().enumerate().skip(start_row) {
        let bytes = line.as_bytes();
        let from = if r == start_row { start_col } else { 0 };
        for (c, &b) in bytes.iter().enumerate().skip(from) {
            if nested && b == open {
                depth += 1;
            } else if b == close {
                if depth == 0 {
                    return Some(TextSpan {
                        start_row,
                        start_col,
                        end_row: r,
                        end_col: c,
                    });
                }
                depth -= 1;
            }
        }
    }
    None
}
