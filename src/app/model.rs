use std::time::{Duration, Instant};

use crate::editor::{Buffer, Cursor, Position, Selection, UndoStack, YankBuffer};
use crate::error::EditError;
use crate::ui::viewport::Viewport;

use super::update::Pending;

/// How long a toast stays on the status line.
const TOAST_DURATION: Duration = Duration::from_secs(4);

/// Which key handler is active.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Normal,
    Insert,
    VisualLine,
    VisualChar,
    Command,
    Search,
    /// Typing a shell command for the selected lines.
    Filter,
}

impl Mode {
    pub const fn is_visual(self) -> bool {
        matches!(self, Self::VisualLine | Self::VisualChar)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
struct Toast {
    level: ToastLevel,
    message: String,
    expires_at: Instant,
}

/// A view onto one buffer: the cursor plus the scrolled region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Window {
    /// Index into [`Model::buffers`].
    pub buffer: usize,
    pub cursor: Cursor,
    pub viewport: Viewport,
}

/// Work the state machine asks the shell around it to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Write a buffer to its file, optionally quitting afterwards.
    Save { buffer: usize, quit: bool },
    /// Pipe a line range through an external command.
    Filter(FilterRequest),
}

/// The lines a filter command replaces, 1-indexed and inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRequest {
    pub command: String,
    pub buffer: usize,
    pub first_row: usize,
    pub last_row: usize,
}

/// The complete editor state.
///
/// All state lives here - no global or scattered state.
pub struct Model {
    /// Open buffers; never empty.
    pub buffers: Vec<Buffer>,
    /// The one window driving the editor.
    pub window: Window,
    pub mode: Mode,
    /// Active visual selection, `None` outside visual and filter modes.
    pub selection: Option<Selection>,
    /// The unnamed register.
    pub yank: YankBuffer,
    pub undo: UndoStack,
    /// Text typed after `:`.
    pub command: String,
    /// Text typed after `/`; kept after the search for `n` and `N`.
    pub search: String,
    /// Text typed after `f` in visual-line mode.
    pub filter: String,
    /// Numeric prefix typed so far, 0 when none.
    pub count: usize,
    /// First half of a multi-key command awaiting its next byte.
    pub(super) pending: Option<Pending>,
    pub show_line_numbers: bool,
    pub highlight: bool,
    pub should_quit: bool,
    /// Side effects queued by `update`, drained by the event loop.
    pub(super) effects: Vec<Effect>,
    toast: Option<Toast>,
}

impl std::fmt::Debug for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Model")
            .field("buffers", &self.buffers.len())
            .field("window", &self.window)
            .field("mode", &self.mode)
            .field("selection", &self.selection)
            .field("count", &self.count)
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Create a model over `buffers` for a terminal of `size` (width, height).
    ///
    /// An empty list gets one untitled buffer.
    pub fn new(mut buffers: Vec<Buffer>, size: (u16, u16)) -> Self {
        if buffers.is_empty() {
            buffers.push(Buffer::new());
        }
        let (width, height) = size;
        Self {
            buffers,
            window: Window {
                buffer: 0,
                cursor: Position::default(),
                viewport: Viewport::new(width, text_rows(height)),
            },
            mode: Mode::Normal,
            selection: None,
            yank: YankBuffer::new(),
            undo: UndoStack::new(),
            command: String::new(),
            search: String::new(),
            filter: String::new(),
            count: 0,
            pending: None,
            show_line_numbers: false,
            highlight: true,
            should_quit: false,
            effects: Vec::new(),
            toast: None,
        }
    }

    /// Buffer shown in the window.
    pub fn buffer(&self) -> &Buffer {
        &self.buffers[self.window.buffer]
    }

    pub const fn cursor(&self) -> Cursor {
        self.window.cursor
    }

    /// Whether a multi-key command is waiting for its next byte.
    pub const fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// The active buffer and the window cursor, borrowed together.
    pub(super) fn edit_target(&mut self) -> (&mut Buffer, &mut Cursor) {
        let Self {
            buffers, window, ..
        } = self;
        (&mut buffers[window.buffer], &mut window.cursor)
    }

    /// Snapshot the active buffer before a mutation.
    pub(super) fn push_undo(&mut self) {
        self.undo
            .push(self.window.buffer, &self.buffers[self.window.buffer], self.window.cursor);
    }

    /// Restore the newest snapshot, switching to its buffer if needed.
    pub(super) fn undo(&mut self) {
        let Some((index, cursor)) = self.undo.undo(&mut self.buffers) else {
            return;
        };
        if index != self.window.buffer {
            tracing::debug!(from = self.window.buffer, to = index, "undo switched buffer");
            self.window.buffer = index;
            self.window.viewport.reset();
        }
        self.window.cursor = cursor;
    }

    /// Switch to the next or previous buffer, wrapping around.
    pub(super) fn cycle_buffer(&mut self, forward: bool) {
        let count = self.buffers.len();
        let next = if forward {
            (self.window.buffer + 1) % count
        } else {
            (self.window.buffer + count - 1) % count
        };
        if next == self.window.buffer {
            return;
        }
        self.window.buffer = next;
        self.window.cursor = Position::default();
        self.window.viewport.reset();
        tracing::info!(buffer = next, name = %self.buffer().display_name(), "switched buffer");
    }

    /// Clamp the cursor into the buffer: row to `[1, lines]`, column to
    /// `[1, line length + 1]`.
    pub fn clamp_cursor(&mut self) {
        let buffer = &self.buffers[self.window.buffer];
        let cursor = &mut self.window.cursor;
        cursor.row = cursor.row.clamp(1, buffer.line_count().max(1));
        let len = buffer.line_len(cursor.row - 1);
        cursor.column = cursor.column.clamp(1, len + 1);
    }

    /// Clamp the cursor and scroll it into view; run before every draw.
    pub fn prepare_frame(&mut self) {
        self.clamp_cursor();
        let gutter = self.gutter_width();
        let (row, col) = self.window.cursor.to_zero_based();
        self.window.viewport.follow(row, col, gutter);
    }

    /// Columns taken by the line-number gutter, 0 when hidden.
    pub fn gutter_width(&self) -> u16 {
        if self.show_line_numbers {
            crate::ui::line_number_width(self.buffer().line_count()) + 1
        } else {
            0
        }
    }

    pub(super) const fn resize(&mut self, width: u16, height: u16) {
        self.window.viewport.resize(width, text_rows(height));
    }

    pub(super) fn queue(&mut self, effect: Effect) {
        self.effects.push(effect);
    }

    pub(super) fn take_effects(&mut self) -> Vec<Effect> {
        std::mem::take(&mut self.effects)
    }

    /// Text fed to a filter: each requested line followed by `\n`.
    pub fn filter_input(&self, request: &FilterRequest) -> Vec<u8> {
        let Some(buffer) = self.buffers.get(request.buffer) else {
            return Vec::new();
        };
        let first = request.first_row.saturating_sub(1);
        let last = request.last_row.min(buffer.line_count());
        let mut input = Vec::new();
        for line in buffer.lines().get(first..last).unwrap_or_default() {
            input.extend_from_slice(line.as_bytes());
            input.push(b'\n');
        }
        input
    }

    /// Replace the requested lines with a filter's output.
    ///
    /// The output goes in verbatim where the lines were. When the lines ran
    /// to the end of the buffer, one trailing newline is dropped so no
    /// empty line is left behind.
    pub fn apply_filter_output(&mut self, request: &FilterRequest, output: &[u8]) {
        if request.buffer >= self.buffers.len() {
            return;
        }
        if request.buffer != self.window.buffer {
            self.window.buffer = request.buffer;
            self.window.viewport.reset();
        }
        let total = self.buffer().line_count();
        if request.first_row == 0 || request.first_row > total {
            return;
        }
        let last = request.last_row.clamp(request.first_row, total);
        self.push_undo();

        let selection = Selection {
            start: Position::new(request.first_row, 1),
            end: Position::new(last, 1),
        };
        let (buffer, cursor) = self.edit_target();
        if let Err(err) = buffer.delete_selection(&selection, true, cursor) {
            tracing::warn!(%err, "filter could not remove lines");
            return;
        }

        let result = if last == total {
            let trimmed = output.strip_suffix(b"\n").unwrap_or(output);
            if request.first_row == 1 {
                *cursor = Position::new(1, 1);
                insert_bytes(buffer, cursor, trimmed)
            } else if output.is_empty() {
                Ok(())
            } else {
                let end = buffer.line_count();
                *cursor = Position::new(end, buffer.line_len(end - 1) + 1);
                buffer
                    .insert_newline(cursor)
                    .and_then(|()| insert_bytes(buffer, cursor, trimmed))
            }
        } else {
            *cursor = Position::new(request.first_row, 1);
            insert_bytes(buffer, cursor, output)
        };
        if let Err(err) = result {
            tracing::warn!(%err, "filter output only partly inserted");
        }

        let rows = self.buffer().line_count();
        self.window.cursor = Position::new(request.first_row.min(rows), 1);
    }

    pub(super) fn show_toast(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(Toast {
            level,
            message: message.into(),
            expires_at: Instant::now() + TOAST_DURATION,
        });
    }

    pub(super) fn expire_toast(&mut self, now: Instant) -> bool {
        if self
            .toast
            .as_ref()
            .is_some_and(|toast| toast.expires_at <= now)
        {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn active_toast(&self) -> Option<(&str, ToastLevel)> {
        self.toast
            .as_ref()
            .map(|toast| (toast.message.as_str(), toast.level))
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new(Vec::new(), (80, 24))
    }
}

/// Rows left for text once the status line is taken.
const fn text_rows(height: u16) -> u16 {
    height.saturating_sub(1)
}

/// Type `bytes` at the cursor, splitting lines on `\n`.
pub(super) fn insert_bytes(
    buffer: &mut Buffer,
    cursor: &mut Cursor,
    bytes: &[u8],
) -> Result<(), EditError> {
    for &byte in bytes {
        if byte == b'\n' {
            buffer.insert_newline(cursor)?;
        } else {
            buffer.insert_char(cursor, byte)?;
        }
    }
    Ok(())
}
