use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Mode, Model, ToastLevel};

/// Text of the status line for the current mode.
///
/// Prompt modes show what has been typed so far; every other mode shows
/// the buffer name, a mode tag and the cursor position.
pub fn status_text(model: &Model) -> String {
    let name = model.buffer().display_name();
    let cursor = model.cursor();
    let (row, col) = (cursor.row, cursor.column);
    match model.mode {
        Mode::Command => format!(":{}", model.command),
        Mode::Search => format!("/{}", model.search),
        Mode::Filter => format!("!{}", model.filter),
        Mode::VisualLine => format!("{name} -- VISUAL LINE -- {row} {col}"),
        Mode::VisualChar => format!("{name} -- VISUAL -- {row} {col}"),
        Mode::Insert => format!("{name} -- INSERT -- {row} {col}"),
        Mode::Normal => format!("{name} {row} {col}"),
    }
}

pub fn render_status_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let prompting = matches!(model.mode, Mode::Command | Mode::Search | Mode::Filter);
    if !prompting && model.active_toast().is_some() {
        render_toast_bar(model, frame, area);
        return;
    }
    let bar = Paragraph::new(status_text(model))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(bar, area);
}

pub fn render_toast_bar(model: &Model, frame: &mut Frame, area: Rect) {
    let Some((message, level)) = model.active_toast() else {
        return;
    };
    let (prefix, style) = match level {
        ToastLevel::Info => (
            "[info]",
            Style::default().bg(Color::DarkGray).fg(Color::White),
        ),
        ToastLevel::Warning => (
            "[warn]",
            Style::default().bg(Color::Yellow).fg(Color::Black),
        ),
        ToastLevel::Error => ("[error]", Style::default().bg(Color::Red).fg(Color::White)),
    };
    let toast = Paragraph::new(format!("{prefix} {message}")).style(style);
    frame.render_widget(toast, area);
}
