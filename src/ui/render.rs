use ratatui::prelude::*;
use ratatui::widgets::Paragraph;

use crate::app::{Mode, Model};

use super::status;

const SELECTION_BG: Color = Color::Indexed(240);

/// Render the complete UI: the text area above a one-row status line.
pub fn render(model: &Model, frame: &mut Frame) {
    let area = frame.area();
    let text_area = Rect {
        height: area.height.saturating_sub(1),
        ..area
    };
    let status_area = Rect {
        y: area.y + area.height.saturating_sub(1),
        height: area.height.min(1),
        ..area
    };

    render_text(model, frame, text_area);
    status::render_status_bar(model, frame, status_area);
}

fn render_text(model: &Model, frame: &mut Frame, area: Rect) {
    let buffer = model.buffer();
    let viewport = &model.window.viewport;
    let total = buffer.line_count();
    let rows = viewport.top()..viewport.top() + area.height as usize;
    let visible = rows.start.min(total)..rows.end.min(total);

    let colours = if model.highlight {
        crate::highlight::colour_lines(buffer.file(), buffer.lines(), visible.clone())
    } else {
        Vec::new()
    };

    let gutter = model.gutter_width();
    let number_width = gutter.saturating_sub(1) as usize;
    let text_width = area.width.saturating_sub(gutter) as usize;
    let left = viewport.left();
    let (cursor_row, cursor_col) = model.cursor().to_zero_based();
    let linewise = model.mode == Mode::VisualLine;
    let selection = model
        .selection
        .filter(|_| model.mode.is_visual() || model.mode == Mode::Filter);

    let mut content: Vec<Line> = Vec::with_capacity(area.height as usize);
    for row in rows {
        let Some(line) = buffer.line(row) else {
            content.push(Line::styled("~", Style::default().fg(Color::DarkGray)));
            continue;
        };

        let mut spans = Vec::new();
        if gutter > 0 {
            spans.push(Span::styled(
                format!("{:>number_width$} ", row + 1),
                Style::default().fg(Color::DarkGray),
            ));
        }

        let row_colours = colours.get(row - visible.start).map_or(&[][..], Vec::as_slice);
        let end = (left + text_width).min(line.len() + 1);
        let mut cells = SpanBuilder::default();
        for col in left..end {
            let byte = line.get(col);
            let mut style = row_colours
                .get(col)
                .map_or_else(Style::default, |fg| Style::default().fg(*fg));
            if byte.is_some()
                && selection.is_some_and(|sel| sel.contains(row + 1, col + 1, linewise))
            {
                style = style.bg(SELECTION_BG);
            }
            if row == cursor_row && col == cursor_col {
                style = Style::default().bg(Color::White).fg(Color::Black);
            } else if byte.is_none() {
                break;
            }
            cells.push(byte.map_or(' ', display_char), style);
        }
        spans.extend(cells.finish());
        content.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(content), area);
}

/// How a byte is drawn: printable ASCII as itself, tabs as `>`, anything
/// else as `?`.
fn display_char(byte: u8) -> char {
    match byte {
        b'\t' => '>',
        0x20..=0x7e => char::from(byte),
        _ => '?',
    }
}

/// Collects cells into spans, merging runs that share a style.
#[derive(Default)]
struct SpanBuilder {
    spans: Vec<Span<'static>>,
    text: String,
    style: Style,
}

impl SpanBuilder {
    fn push(&mut self, ch: char, style: Style) {
        if style != self.style && !self.text.is_empty() {
            self.flush();
        }
        self.style = style;
        self.text.push(ch);
    }

    fn flush(&mut self) {
        let text = std::mem::take(&mut self.text);
        self.spans.push(Span::styled(text, self.style));
    }

    fn finish(mut self) -> Vec<Span<'static>> {
        if !self.text.is_empty() {
            self.flush();
        }
        self.spans
    }
}

/// Calculate the width needed for line numbers.
pub const fn line_number_width(total_lines: usize) -> u16 {
    if total_lines < 10 {
        1
    } else if total_lines < 100 {
        2
    } else if total_lines < 1_000 {
        3
    } else if total_lines < 10_000 {
        4
    } else if total_lines < 100_000 {
        5
    } else {
        6
    }
}
