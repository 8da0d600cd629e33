//! Application state and main event loop.
//!
//! This module implements The Elm Architecture (TEA):
//! - [`Model`]: The complete editor state
//! - [`Message`]: Input bytes and terminal events
//! - [`update`]: Pure function for state transitions
//! - [`App::run`]: Main event loop with rendering

mod effects;
mod event_loop;
mod input;
mod model;
mod update;

pub use model::{Effect, FilterRequest, Mode, Model, ToastLevel, Window};
pub use update::{Message, update};

use std::path::PathBuf;

use anyhow::Context;

use crate::editor::Buffer;
use crate::filter::{Filter, ShellFilter};

/// Main application struct that owns the terminal and runs the event loop.
pub struct App {
    files: Vec<PathBuf>,
    show_line_numbers: bool,
    highlight: bool,
    record_path: Option<PathBuf>,
    playback_path: Option<PathBuf>,
    filter: Box<dyn Filter>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("files", &self.files)
            .field("show_line_numbers", &self.show_line_numbers)
            .field("highlight", &self.highlight)
            .field("record_path", &self.record_path)
            .field("playback_path", &self.playback_path)
            .finish_non_exhaustive()
    }
}

impl App {
    /// Create a new application editing `files`, one buffer each.
    ///
    /// With no files the editor starts on an untitled buffer.
    pub fn new(files: Vec<PathBuf>) -> Self {
        Self {
            files,
            show_line_numbers: false,
            highlight: true,
            record_path: None,
            playback_path: None,
            filter: Box::new(ShellFilter),
        }
    }

    /// Show the line-number gutter from the start.
    pub const fn with_line_numbers(mut self, enabled: bool) -> Self {
        self.show_line_numbers = enabled;
        self
    }

    /// Enable or disable syntax colouring.
    pub const fn with_highlight(mut self, enabled: bool) -> Self {
        self.highlight = enabled;
        self
    }

    /// Mirror every input byte to `path`.
    pub fn with_record(mut self, path: Option<PathBuf>) -> Self {
        self.record_path = path;
        self
    }

    /// Read input from `path` instead of the keyboard, quitting when it
    /// runs out.
    pub fn with_playback(mut self, path: Option<PathBuf>) -> Self {
        self.playback_path = path;
        self
    }

    /// Replace the command runner used by visual-line `f`.
    pub fn with_filter(mut self, filter: impl Filter + 'static) -> Self {
        self.filter = Box::new(filter);
        self
    }

    /// Open every file and build the starting model for a `size` terminal.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read.
    pub fn load_model(&self, size: (u16, u16)) -> anyhow::Result<Model> {
        let buffers = self
            .files
            .iter()
            .map(|path| {
                Buffer::open(path).with_context(|| format!("Failed to open {}", path.display()))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        let mut model = Model::new(buffers, size);
        model.show_line_numbers = self.show_line_numbers;
        model.highlight = self.highlight;
        Ok(model)
    }
}
