//! Benchmarks for screen rendering.

use std::path::PathBuf;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tvi::app::Model;
use tvi::editor::{Buffer, Line, Position};
use tvi::highlight::colour_lines;

fn rust_source(lines: usize) -> Vec<String> {
    (0..lines)
        .map(|n| format!("fn item_{n}(x: u32) -> u32 {{ x * {n} }} // note {n}"))
        .collect()
}

fn bench_render_frame(c: &mut Criterion) {
    let text = rust_source(2_000);
    let path = Some(PathBuf::from("bench.rs"));
    let buffer = Buffer::from_lines(text.iter().map(String::as_str), path);
    let mut model = Model::new(vec![buffer], (100, 40));
    model.show_line_numbers = true;
    model.window.cursor = Position::new(1_000, 10);
    model.prepare_frame();
    let mut terminal = Terminal::new(TestBackend::new(100, 40)).unwrap();

    c.bench_function("render_frame", |b| {
        b.iter(|| {
            terminal
                .draw(|frame| tvi::ui::render(black_box(&model), frame))
                .unwrap();
        });
    });
}

fn bench_colour_lines(c: &mut Criterion) {
    let lines: Vec<Line> = rust_source(1_000).iter().map(|s| Line::from(s.as_str())).collect();
    let path = PathBuf::from("bench.rs");

    c.bench_function("colour_lines", |b| {
        b.iter(|| colour_lines(Some(&path), black_box(&lines), 500..540));
    });
}

criterion_group!(benches, bench_render_frame, bench_colour_lines);
criterion_main!(benches);
