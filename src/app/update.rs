use crate::app::Model;
use crate::app::model::{Effect, FilterRequest, Mode, ToastLevel};
use crate::editor::{Position, Selection, TextObject, TextSpan, find_text_object};
use crate::error::EditError;
use crate::input::{BACKSPACE, CTRL_C, CTRL_D, CTRL_H, CTRL_U, ENTER, ESC, TAB};
use crate::search::{SearchDirection, find_occurrence};

/// Everything that can drive the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    /// One raw input byte.
    Key(u8),
    /// Terminal resized to (width, height).
    Resize(u16, u16),
    /// Ctrl-C or SIGINT: abandon whatever is half typed.
    Interrupt,
}

impl Message {
    pub const fn from_byte(byte: u8) -> Self {
        if byte == CTRL_C {
            Self::Interrupt
        } else {
            Self::Key(byte)
        }
    }
}

/// The first key(s) of a composite command, waiting for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    /// `g`, expecting `g`.
    Goto,
    /// `z`, expecting `z`.
    Center,
    /// `y`, expecting `y`.
    YankLine,
    /// `d` or `c`, expecting a motion or `i`.
    Operator(Operator),
    /// `di`, `ci` or visual `i`, expecting a text object.
    Object(ObjectAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
    Change,
}

/// What to do with a resolved text object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectAction {
    Delete,
    Change,
    Select,
}

/// Pure function that updates the model based on a message.
///
/// This is the core of TEA - all state transitions happen here.
/// Saving and filtering are queued as [`Effect`]s for the event loop.
pub fn update(mut model: Model, msg: Message) -> Model {
    match msg {
        Message::Key(byte) => match model.mode {
            Mode::Normal => normal_key(&mut model, byte),
            Mode::Insert => insert_key(&mut model, byte),
            Mode::VisualLine | Mode::VisualChar => visual_key(&mut model, byte),
            Mode::Command => command_key(&mut model, byte),
            Mode::Search => search_key(&mut model, byte),
            Mode::Filter => filter_key(&mut model, byte),
        },
        Message::Resize(width, height) => model.resize(width, height),
        Message::Interrupt => {
            model.pending = None;
            model.count = 0;
            model.command.clear();
            model.filter.clear();
            if model.mode == Mode::Search {
                model.search.clear();
            }
            if model.mode.is_visual() || model.mode == Mode::Filter {
                model.selection = None;
            }
            model.mode = Mode::Normal;
        }
    }
    model
}

/// Log an engine error that the editor swallows.
fn swallow(result: Result<(), EditError>) {
    if let Err(err) = result {
        tracing::debug!(%err, "edit ignored");
    }
}

// --- Normal mode ---

fn normal_key(model: &mut Model, byte: u8) {
    if let Some(pending) = model.pending.take() {
        let count = std::mem::take(&mut model.count);
        resolve_pending(model, pending, byte, count);
        return;
    }
    if byte.is_ascii_digit() && (byte != b'0' || model.count > 0) {
        model.count = model
            .count
            .saturating_mul(10)
            .saturating_add(usize::from(byte - b'0'));
        return;
    }
    let count = model.count;
    normal_command(model, byte, count);
    if model.pending.is_none() {
        model.count = 0;
    }
}

fn normal_command(model: &mut Model, byte: u8, count: usize) {
    let repeat = count.max(1);
    let half_page = usize::from(model.window.viewport.height() / 2);
    let cursor = &mut model.window.cursor;
    match byte {
        b'h' => cursor.column = cursor.column.saturating_sub(repeat).max(1),
        b'j' => cursor.row = cursor.row.saturating_add(repeat),
        b'k' => cursor.row = cursor.row.saturating_sub(repeat).max(1),
        b'l' => cursor.column = cursor.column.saturating_add(repeat),
        b'0' => cursor.column = 1,
        b'$' => cursor.column = usize::MAX,
        CTRL_D => cursor.row = cursor.row.saturating_add(half_page),
        CTRL_U => cursor.row = cursor.row.saturating_sub(half_page).max(1),
        b'G' => {
            cursor.row = if count > 0 {
                count
            } else {
                model.buffers[model.window.buffer].line_count()
            };
        }
        b'g' => model.pending = Some(Pending::Goto),
        b'z' => model.pending = Some(Pending::Center),
        b'y' => model.pending = Some(Pending::YankLine),
        b'd' => model.pending = Some(Pending::Operator(Operator::Delete)),
        b'c' => model.pending = Some(Pending::Operator(Operator::Change)),
        b'i' => {
            model.push_undo();
            model.mode = Mode::Insert;
        }
        b'I' => {
            model.push_undo();
            model.clamp_cursor();
            let row = model.window.cursor.row - 1;
            let indent = model.buffer().line(row).map_or(0, |l| l.indent());
            model.window.cursor.column = indent + 1;
            model.mode = Mode::Insert;
        }
        b'A' => {
            model.push_undo();
            model.window.cursor.column = usize::MAX;
            model.mode = Mode::Insert;
        }
        b'o' => open_line_below(model),
        b'x' => {
            model.push_undo();
            model.clamp_cursor();
            let (buffer, cursor) = model.edit_target();
            let repeat = repeat.min(buffer.line_len(cursor.row - 1).max(1));
            for _ in 0..repeat {
                swallow(buffer.delete_char(*cursor));
            }
        }
        b'p' => {
            model.push_undo();
            model.clamp_cursor();
            let Model {
                buffers,
                window,
                yank,
                ..
            } = model;
            swallow(yank.paste(&mut buffers[window.buffer], &mut window.cursor));
        }
        b'u' => model.undo(),
        b'n' => repeat_search(model, SearchDirection::Forward),
        b'N' => repeat_search(model, SearchDirection::Backward),
        b']' => model.show_line_numbers = !model.show_line_numbers,
        b'v' | b'V' => {
            model.clamp_cursor();
            model.selection = Some(Selection::at(model.window.cursor));
            model.mode = if byte == b'v' {
                Mode::VisualChar
            } else {
                Mode::VisualLine
            };
        }
        b':' => {
            model.command.clear();
            model.mode = Mode::Command;
        }
        b'/' => {
            model.search.clear();
            model.mode = Mode::Search;
        }
        _ => {}
    }
    model.clamp_cursor();
}

fn resolve_pending(model: &mut Model, pending: Pending, byte: u8, count: usize) {
    let repeat = count.max(1);
    match (pending, byte) {
        (Pending::Goto, b'g') => {
            model.window.cursor.row = count.max(1);
            model.clamp_cursor();
        }
        (Pending::Center, b'z') => {
            model.clamp_cursor();
            let row = model.window.cursor.row - 1;
            model.window.viewport.center_on(row);
        }
        (Pending::YankLine, b'y') => {
            model.clamp_cursor();
            let row = model.window.cursor.row;
            let Model { buffers, window, yank, .. } = model;
            let last = row.saturating_add(repeat - 1);
            swallow(yank.yank_lines(&buffers[window.buffer], row, last));
        }
        (Pending::Operator(Operator::Delete), b'd') => {
            model.push_undo();
            model.clamp_cursor();
            let (buffer, cursor) = model.edit_target();
            for _ in 0..repeat.min(buffer.line_count().max(1)) {
                swallow(buffer.delete_line(cursor));
            }
        }
        (Pending::Operator(op), b'w') => {
            model.push_undo();
            model.clamp_cursor();
            let (buffer, cursor) = model.edit_target();
            let words = match op {
                Operator::Delete => repeat.min(buffer.line_len(cursor.row - 1).max(1)),
                Operator::Change => 1,
            };
            for _ in 0..words {
                swallow(buffer.delete_word(cursor));
            }
            if op == Operator::Change {
                model.mode = Mode::Insert;
            }
        }
        (Pending::Operator(op), b'i') => {
            model.count = count;
            model.pending = Some(Pending::Object(match op {
                Operator::Delete => ObjectAction::Delete,
                Operator::Change => ObjectAction::Change,
            }));
        }
        (Pending::Object(action), _) => apply_text_object(model, action, byte),
        _ => tracing::debug!(?pending, byte, "composite command abandoned"),
    }
}

/// `o`: open a line below, copying the current line's indentation.
fn open_line_below(model: &mut Model) {
    model.push_undo();
    model.clamp_cursor();
    let (buffer, cursor) = model.edit_target();
    buffer.ensure_initialized();
    let row = cursor.row - 1;
    let indent = buffer.line(row).map_or(0, |l| l.indent());
    cursor.column = buffer.line_len(row) + 1;
    let result = buffer.insert_newline(cursor).and_then(|()| {
        (0..indent).try_for_each(|_| buffer.insert_char(cursor, b' '))
    });
    swallow(result);
    model.mode = Mode::Insert;
}

/// Resolve a text object at the cursor and act on it.
///
/// An unknown object byte or an object with no match leaves every part of
/// the model as it was.
fn apply_text_object(model: &mut Model, action: ObjectAction, byte: u8) {
    let Some(object) = TextObject::from_byte(byte) else {
        tracing::debug!(byte, "unknown text object");
        return;
    };
    let Some(span) = find_text_object(model.buffer(), model.window.cursor, object) else {
        if matches!(object, TextObject::Quote(_) | TextObject::Bracket { .. }) {
            swallow(Err(EditError::UnmatchedDelimiter(char::from(byte))));
        }
        return;
    };
    if span.is_empty() {
        return;
    }

    match action {
        ObjectAction::Select => {
            let selection = Selection {
                start: Position::new(span.start_row + 1, span.start_col + 1),
                end: Position::new(span.end_row + 1, span.end_col),
            };
            model.selection = Some(selection);
            model.window.cursor = selection.normalized().1;
        }
        ObjectAction::Delete | ObjectAction::Change => {
            model.push_undo();
            let (buffer, cursor) = model.edit_target();
            *cursor = Position::new(span.start_row + 1, span.start_col + 1);
            let TextSpan {
                start_row,
                start_col,
                end_row,
                end_col,
            } = span;
            swallow(buffer.delete_range(start_row, start_col, end_row, end_col));
            if action == ObjectAction::Change {
                model.mode = Mode::Insert;
            }
        }
    }
}

fn repeat_search(model: &mut Model, direction: SearchDirection) {
    if model.search.is_empty() {
        return;
    }
    model.clamp_cursor();
    let Model {
        buffers,
        window,
        search,
        ..
    } = model;
    if !find_occurrence(&buffers[window.buffer], &mut window.cursor, search.as_bytes(), direction) {
        let message = format!("Pattern not found: {search}");
        model.show_toast(ToastLevel::Warning, message);
    }
}

// --- Insert mode ---

fn insert_key(model: &mut Model, byte: u8) {
    if byte == ESC {
        model.mode = Mode::Normal;
        model.clamp_cursor();
        return;
    }
    model.clamp_cursor();
    let (buffer, cursor) = model.edit_target();
    let result = match byte {
        TAB => buffer
            .insert_char(cursor, b' ')
            .and_then(|()| buffer.insert_char(cursor, b' ')),
        BACKSPACE | CTRL_H => buffer.backspace_char(cursor),
        ENTER | b'\n' => buffer.insert_newline(cursor),
        32..=126 => buffer.insert_char(cursor, byte),
        _ => Ok(()),
    };
    swallow(result);
}

// --- Visual modes ---

fn visual_key(model: &mut Model, byte: u8) {
    let linewise = model.mode == Mode::VisualLine;
    if let Some(pending) = model.pending.take() {
        match (pending, byte) {
            (Pending::Goto, b'g') => model.window.cursor.row = 1,
            (Pending::Object(action), _) => {
                apply_text_object(model, action, byte);
                return;
            }
            _ => {}
        }
        track_selection_end(model);
        return;
    }

    let cursor = &mut model.window.cursor;
    match byte {
        ESC => {
            snap_to_selection_end(model);
            model.mode = Mode::Normal;
            return;
        }
        b'h' => cursor.column = cursor.column.saturating_sub(1).max(1),
        b'j' => cursor.row = cursor.row.saturating_add(1),
        b'k' => cursor.row = cursor.row.saturating_sub(1).max(1),
        b'l' => cursor.column = cursor.column.saturating_add(1),
        b'0' => cursor.column = 1,
        b'$' => cursor.column = usize::MAX,
        b'G' => cursor.row = model.buffers[model.window.buffer].line_count(),
        b'g' => {
            model.pending = Some(Pending::Goto);
            return;
        }
        b'y' => {
            let Model { buffers, window, yank, selection, .. } = model;
            swallow(selection.ok_or(EditError::EmptySelection).and_then(|selection| {
                yank.yank_selection(&buffers[window.buffer], &selection, linewise)
            }));
            snap_to_selection_end(model);
            model.mode = Mode::Normal;
            return;
        }
        b'd' => {
            if let Some(selection) = model.selection.take() {
                model.push_undo();
                let (buffer, cursor) = model.edit_target();
                swallow(buffer.delete_selection(&selection, linewise, cursor));
            } else {
                swallow(Err(EditError::EmptySelection));
            }
            model.mode = Mode::Normal;
            model.clamp_cursor();
            return;
        }
        b'f' if linewise => {
            model.filter.clear();
            model.mode = Mode::Filter;
            return;
        }
        b'i' if !linewise => {
            model.pending = Some(Pending::Object(ObjectAction::Select));
            return;
        }
        _ => {}
    }
    track_selection_end(model);
}

fn track_selection_end(model: &mut Model) {
    model.clamp_cursor();
    if let Some(selection) = model.selection.as_mut() {
        selection.end = model.window.cursor;
    }
}

/// Leave the cursor on the far end of the selection and drop it.
fn snap_to_selection_end(model: &mut Model) {
    if let Some(selection) = model.selection.take() {
        let (_, last) = selection.normalized();
        model.window.cursor = last;
    }
    model.clamp_cursor();
}

// --- Prompt modes ---

/// Shared editing for the `:`, `/` and `!` prompts. Returns the byte back
/// when it is not a text edit.
fn edit_prompt(prompt: &mut String, byte: u8) -> Option<u8> {
    match byte {
        BACKSPACE | CTRL_H => {
            prompt.pop();
            None
        }
        32..=126 => {
            prompt.push(char::from(byte));
            None
        }
        ESC | ENTER | b'\n' => Some(byte),
        _ => None,
    }
}

fn command_key(model: &mut Model, byte: u8) {
    match edit_prompt(&mut model.command, byte) {
        Some(ESC) => {
            model.command.clear();
            model.mode = Mode::Normal;
        }
        Some(_) => {
            let command = std::mem::take(&mut model.command);
            model.mode = Mode::Normal;
            execute_command(model, &command);
        }
        None => {}
    }
}

fn execute_command(model: &mut Model, command: &str) {
    let buffer = model.window.buffer;
    match command {
        "w" => model.queue(Effect::Save { buffer, quit: false }),
        "x" => model.queue(Effect::Save { buffer, quit: true }),
        "q" => model.should_quit = true,
        "bn" => model.cycle_buffer(true),
        "bp" => model.cycle_buffer(false),
        digits if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
            let row = digits.parse::<usize>().unwrap_or(usize::MAX);
            model.window.cursor = Position::new(row, 1);
            model.clamp_cursor();
        }
        other => tracing::debug!(command = other, "unknown command"),
    }
}

fn search_key(model: &mut Model, byte: u8) {
    match edit_prompt(&mut model.search, byte) {
        Some(ESC) => {
            model.search.clear();
            model.mode = Mode::Normal;
        }
        Some(_) => {
            model.mode = Mode::Normal;
            repeat_search(model, SearchDirection::Forward);
        }
        None => {}
    }
}

fn filter_key(model: &mut Model, byte: u8) {
    match edit_prompt(&mut model.filter, byte) {
        Some(ESC) => {
            model.filter.clear();
            model.mode = Mode::VisualLine;
        }
        Some(_) => {
            let command = std::mem::take(&mut model.filter);
            model.mode = Mode::Normal;
            let Some(selection) = model.selection.take() else {
                return;
            };
            if command.is_empty() {
                return;
            }
            let (first_row, last_row) = selection.rows();
            model.queue(Effect::Filter(FilterRequest {
                command,
                buffer: model.window.buffer,
                first_row,
                last_row,
            }));
        }
        None => {}
    }
}
