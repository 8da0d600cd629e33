//! Syntax highlighting for buffer text.
//!
//! Uses syntect with its bundled Sublime Text syntax definitions. The
//! syntax is picked from the file extension, falling back to the first
//! line (shebangs, modelines).

use std::ops::Range;
use std::path::Path;
use std::sync::OnceLock;

use ratatui::style::Color;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};

use crate::editor::Line;

/// Lines above the viewport fed to the highlighter so that constructs
/// opened off screen (block comments, strings) colour correctly.
const CONTEXT_LINES: usize = 200;

/// Per-byte foreground colours for the lines in `visible`.
///
/// The result has one entry per visible line; each entry holds one colour
/// per byte of that line, or is empty when the line is not coloured
/// (unknown file type, or bytes that are not UTF-8).
pub fn colour_lines(file: Option<&Path>, lines: &[Line], visible: Range<usize>) -> Vec<Vec<Color>> {
    let visible = visible.start.min(lines.len())..visible.end.min(lines.len());
    let mut colours = vec![Vec::new(); visible.len()];
    let Some(syntax) = syntax_for(file, lines.first()) else {
        return colours;
    };

    let set = syntax_set();
    let mode = background_mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref());
    let mut highlighter = HighlightLines::new(syntax, theme());
    let start = visible.start.saturating_sub(CONTEXT_LINES);
    let mut text = String::new();
    for (index, line) in lines.iter().enumerate().take(visible.end).skip(start) {
        text.clear();
        let utf8 = std::str::from_utf8(line.as_bytes()).ok();
        text.push_str(utf8.unwrap_or_default());
        text.push('\n');
        let Ok(ranges) = highlighter.highlight_line(&text, set) else {
            tracing::debug!(line = index, "highlighting stopped");
            break;
        };
        if index < visible.start || utf8.is_none() {
            continue;
        }

        let row = &mut colours[index - visible.start];
        for (style, piece) in ranges {
            let fg = adjust_fg_for_background(style.foreground, mode);
            row.extend(std::iter::repeat_n(fg, piece.len()));
        }
        row.truncate(line.len());
    }
    colours
}

fn syntax_for(file: Option<&Path>, first: Option<&Line>) -> Option<&'static SyntaxReference> {
    let set = syntax_set();
    file.and_then(Path::extension)
        .and_then(|ext| ext.to_str())
        .and_then(|ext| set.find_syntax_by_extension(ext))
        .or_else(|| {
            let first = std::str::from_utf8(first?.as_bytes()).ok()?;
            set.find_syntax_by_first_line(first)
        })
        .filter(|syntax| syntax.name != "Plain Text")
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        tracing::debug!("loading syntax definitions");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let theme_set = ThemeSet::load_defaults();
        let mode = background_mode_from_colorfgbg(std::env::var("COLORFGBG").ok().as_deref());
        let preferred = match mode {
            BackgroundMode::Dark => ["base16-ocean.dark", "Solarized (dark)"].as_slice(),
            BackgroundMode::Light => ["InspiredGitHub", "Solarized (light)"].as_slice(),
        };

        for name in preferred {
            if let Some(theme) = theme_set.themes.get(*name) {
                return theme.clone();
            }
        }

        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackgroundMode {
    Dark,
    Light,
}

fn background_mode_from_colorfgbg(colorfgbg: Option<&str>) -> BackgroundMode {
    let Some(value) = colorfgbg else {
        return BackgroundMode::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    let Ok(bg) = bg_str.parse::<u8>() else {
        return BackgroundMode::Dark;
    };

    if bg >= 7 {
        BackgroundMode::Light
    } else {
        BackgroundMode::Dark
    }
}

/// Darken very bright theme colours on light terminals.
fn adjust_fg_for_background(color: syntect::highlighting::Color, mode: BackgroundMode) -> Color {
    let (r, g, b) = (color.r, color.g, color.b);
    if mode == BackgroundMode::Dark {
        return Color::Rgb(r, g, b);
    }
    let luma = 0.2126 * f32::from(r) + 0.7152 * f32::from(g) + 0.0722 * f32::from(b);
    if luma < 155.0 {
        return Color::Rgb(r, g, b);
    }
    let darken = |c: u8| u8::try_from(u16::from(c) * 42 / 100).unwrap_or(u8::MAX);
    Color::Rgb(darken(r), darken(g), darken(b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn lines(text: &[&str]) -> Vec<Line> {
        text.iter().copied().map(Line::from).collect()
    }

    #[test]
    fn test_rust_file_gets_colours() {
        let buf = lines(&["fn main() {", "    let x = 1;", "}"]);
        let path = PathBuf::from("main.rs");
        let colours = colour_lines(Some(&path), &buf, 0..3);

        assert_eq!(colours.len(), 3);
        assert_eq!(colours[0].len(), buf[0].len());
        assert_eq!(colours[1].len(), buf[1].len());
    }

    #[test]
    fn test_keyword_and_identifier_differ() {
        let buf = lines(&["fn main() {}"]);
        let path = PathBuf::from("main.rs");
        let colours = colour_lines(Some(&path), &buf, 0..1);
        assert_ne!(colours[0][0], colours[0][3]);
    }

    #[test]
    fn test_unknown_extension_is_plain() {
        let buf = lines(&["just text"]);
        let path = PathBuf::from("notes.zzz-unknown");
        let colours = colour_lines(Some(&path), &buf, 0..1);
        assert_eq!(colours, vec![Vec::<Color>::new()]);
    }

    #[test]
    fn test_untitled_buffer_with_shebang() {
        let buf = lines(&["#!/bin/sh", "echo hi"]);
        let colours = colour_lines(None, &buf, 0..2);
        assert_eq!(colours[1].len(), buf[1].len());
    }

    #[test]
    fn test_non_utf8_line_is_plain() {
        let buf = vec![Line::from("let a = 1;"), Line::from_bytes(b"\xff\xfe").unwrap()];
        let path = PathBuf::from("x.rs");
        let colours = colour_lines(Some(&path), &buf, 0..2);
        assert!(!colours[0].is_empty());
        assert!(colours[1].is_empty());
    }

    #[test]
    fn test_visible_range_is_clamped() {
        let buf = lines(&["a", "b"]);
        let path = PathBuf::from("x.rs");
        assert_eq!(colour_lines(Some(&path), &buf, 1..10).len(), 1);
    }

    #[test]
    fn test_colorfgbg_dark_background() {
        assert_eq!(background_mode_from_colorfgbg(Some("15;0")), BackgroundMode::Dark);
    }

    #[test]
    fn test_colorfgbg_light_background() {
        assert_eq!(background_mode_from_colorfgbg(Some("0;15")), BackgroundMode::Light);
    }

    #[test]
    fn test_light_mode_darkens_bright_fg() {
        let bright = syntect::highlighting::Color {
            r: 240,
            g: 230,
            b: 120,
            a: 255,
        };
        let adjusted = adjust_fg_for_background(bright, BackgroundMode::Light);
        assert_eq!(adjusted, Color::Rgb(100, 96, 50));
        assert_eq!(
            adjust_fg_for_background(bright, BackgroundMode::Dark),
            Color::Rgb(240, 230, 120)
        );
    }
}
