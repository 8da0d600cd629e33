//! End-to-end editing scenarios driven through the public API.

use tvi::app::{Message, Mode, Model, update};
use tvi::editor::{Buffer, Position, UndoStack};

fn model(lines: &[&str]) -> Model {
    Model::new(vec![Buffer::from_lines(lines.iter().copied(), None)], (80, 24))
}

fn keys(model: Model, bytes: &[u8]) -> Model {
    bytes
        .iter()
        .fold(model, |model, &byte| update(model, Message::from_byte(byte)))
}

fn text(buffer: &Buffer) -> Vec<String> {
    buffer
        .lines()
        .iter()
        .map(|line| String::from_utf8_lossy(line.as_bytes()).into_owned())
        .collect()
}

#[test]
fn test_insert_at_end_of_line() {
    let mut buffer = Buffer::from_lines(["abc", "def"], None);
    let mut cursor = Position::new(1, 4);
    buffer.insert_char(&mut cursor, b'X').unwrap();

    assert_eq!(text(&buffer), ["abcX", "def"]);
    assert_eq!(cursor, Position::new(1, 5));
}

#[test]
fn test_visual_line_delete() {
    let model = keys(model(&["a", "b", "c"]), b"Vjd");

    assert_eq!(text(model.buffer()), ["c"]);
    assert_eq!(model.cursor().row, 1);
    assert_eq!(model.mode, Mode::Normal);
}

#[test]
fn test_delete_inside_parentheses() {
    let mut model = model(&["foo(bar)baz"]);
    model.window.cursor = Position::new(1, 6);
    let model = keys(model, b"di(");

    assert_eq!(text(model.buffer()), ["foo()baz"]);
    assert_eq!(model.cursor(), Position::new(1, 5));
}

#[test]
fn test_search_wraps_to_only_match() {
    let model = keys(model(&["x", "y", "bar", "z"]), b"/bar\r");
    assert_eq!(model.cursor(), Position::new(3, 1));

    let model = keys(model, b"n");
    assert_eq!(model.cursor(), Position::new(3, 1));
}

#[test]
fn test_goto_line_clamps() {
    let model = keys(model(&["1", "2", "3", "4", "5"]), b":10\r");
    assert_eq!(model.cursor(), Position::new(5, 1));
}

#[test]
fn test_two_undos_restore_starting_text() {
    let mut buffers = vec![Buffer::from_lines(["one", "two", "three"], None)];
    let mut undo = UndoStack::new();
    let mut cursor = Position::new(1, 1);

    undo.push(0, &buffers[0], cursor);
    buffers[0].delete_line(&mut cursor).unwrap();
    undo.push(0, &buffers[0], cursor);
    buffers[0].delete_line(&mut cursor).unwrap();
    assert_eq!(text(&buffers[0]), ["three"]);

    assert!(undo.undo(&mut buffers).is_some());
    assert!(undo.undo(&mut buffers).is_some());
    assert_eq!(text(&buffers[0]), ["one", "two", "three"]);

    assert!(undo.undo(&mut buffers).is_none());
    assert_eq!(text(&buffers[0]), ["one", "two", "three"]);
}

#[test]
fn test_undo_through_keystrokes() {
    let model = keys(model(&["one", "two", "three"]), b"dddd");
    assert_eq!(text(model.buffer()), ["three"]);

    let model = keys(model, b"uuu");
    assert_eq!(text(model.buffer()), ["one", "two", "three"]);
}
