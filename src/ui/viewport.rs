//! Viewport management for scrolling.
//!
//! The [`Viewport`] struct tracks which part of a buffer is on screen and
//! keeps the cursor inside it.

use std::ops::Range;

/// The visible window onto a buffer.
///
/// Offsets are zero-based line and byte indices. The viewport never
/// scrolls by itself; call [`Viewport::follow`] after the cursor moves.
///
/// # Example
///
/// ```
/// use tvi::ui::viewport::Viewport;
///
/// let mut vp = Viewport::new(80, 24);
/// assert_eq!(vp.visible_rows(100), 0..24);
///
/// vp.follow(30, 0, 0);
/// assert_eq!(vp.visible_rows(100), 7..31);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    width: u16,
    height: u16,
    top: usize,
    left: usize,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(80, 24)
    }
}

impl Viewport {
    /// Create a viewport of `width` columns and `height` text rows.
    pub const fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            top: 0,
            left: 0,
        }
    }

    /// First visible line.
    pub const fn top(&self) -> usize {
        self.top
    }

    /// First visible byte column.
    pub const fn left(&self) -> usize {
        self.left
    }

    pub const fn width(&self) -> u16 {
        self.width
    }

    pub const fn height(&self) -> u16 {
        self.height
    }

    /// Lines of a `total`-line buffer that fit on screen.
    pub fn visible_rows(&self, total: usize) -> Range<usize> {
        let start = self.top.min(total);
        let end = (self.top + self.height as usize).min(total);
        start..end
    }

    /// Scroll just enough that `(row, col)` is on screen.
    ///
    /// `gutter` is the number of columns taken by line numbers.
    pub fn follow(&mut self, row: usize, col: usize, gutter: u16) {
        let height = (self.height as usize).max(1);
        if row < self.top {
            self.top = row;
        } else if row >= self.top + height {
            self.top = row + 1 - height;
        }

        let text_width = (self.width.saturating_sub(gutter) as usize).max(1);
        if col < self.left {
            self.left = col;
        } else if col >= self.left + text_width {
            self.left = col + 1 - text_width;
        }
    }

    /// Put `row` in the middle of the screen.
    pub const fn center_on(&mut self, row: usize) {
        self.top = row.saturating_sub(self.height as usize / 2);
    }

    /// Resize the viewport, keeping the scroll offsets.
    pub const fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Jump back to the top-left corner.
    pub const fn reset(&mut self) {
        self.top = 0;
        self.left = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_viewport_starts_at_top() {
        let vp = Viewport::new(80, 24);
        assert_eq!(vp.top(), 0);
        assert_eq!(vp.left(), 0);
    }

    #[test]
    fn test_visible_rows_with_short_buffer() {
        let vp = Viewport::new(80, 24);
        assert_eq!(vp.visible_rows(10), 0..10);
    }

    #[test]
    fn test_follow_down_scrolls_minimum() {
        let mut vp = Viewport::new(80, 10);
        vp.follow(10, 0, 0);
        assert_eq!(vp.top(), 1);
    }

    #[test]
    fn test_follow_up_puts_row_at_top() {
        let mut vp = Viewport::new(80, 10);
        vp.follow(50, 0, 0);
        vp.follow(20, 0, 0);
        assert_eq!(vp.top(), 20);
    }

    #[test]
    fn test_follow_inside_view_does_not_scroll() {
        let mut vp = Viewport::new(80, 10);
        vp.follow(5, 5, 0);
        assert_eq!((vp.top(), vp.left()), (0, 0));
    }

    #[test]
    fn test_follow_scrolls_horizontally_past_gutter() {
        let mut vp = Viewport::new(20, 10);
        vp.follow(0, 17, 4);
        assert_eq!(vp.left(), 2);
        vp.follow(0, 0, 4);
        assert_eq!(vp.left(), 0);
    }

    #[test]
    fn test_center_on() {
        let mut vp = Viewport::new(80, 10);
        vp.center_on(30);
        assert_eq!(vp.top(), 25);
        vp.center_on(2);
        assert_eq!(vp.top(), 0);
    }

    #[test]
    fn test_resize_keeps_offsets() {
        let mut vp = Viewport::new(80, 10);
        vp.follow(40, 0, 0);
        vp.resize(100, 30);
        assert_eq!(vp.top(), 31);
        assert_eq!(vp.height(), 30);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn follow_keeps_cursor_visible(
                width in 1..200u16,
                height in 1..100u16,
                gutter in 0..8u16,
                moves in prop::collection::vec((0..10_000usize, 0..500usize), 1..20),
            ) {
                let mut vp = Viewport::new(width, height);
                for (row, col) in moves {
                    vp.follow(row, col, gutter);
                    let text_width = (width.saturating_sub(gutter) as usize).max(1);
                    prop_assert!(row >= vp.top() && row < vp.top() + height as usize);
                    prop_assert!(col >= vp.left() && col < vp.left() + text_width);
                }
            }

            #[test]
            fn visible_rows_within_bounds(
                total in 0..10_000usize,
                height in 1..100u16,
                row in 0..10_000usize,
            ) {
                let mut vp = Viewport::new(80, height);
                vp.follow(row, 0, 0);
                let range = vp.visible_rows(total);
                prop_assert!(range.start <= range.end);
                prop_assert!(range.end <= total);
            }
        }
    }
}
