// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. editor::EditError)
    clippy::module_name_repetitions
)]

//! # tvi
//!
//! A small modal terminal text editor in the vi family.
//!
//! tvi edits one or more files as byte-oriented line buffers with:
//! - Normal, insert, visual (line and character) and prompt modes
//! - Counts, composite commands (`dd`, `dw`, `cw`, `gg`, `zz`, `yy`)
//!   and inner text objects (`di"`, `ci(`, `diw`, `dip`)
//! - Yank/paste, multi-level undo and forward search
//! - Filtering a line selection through a shell command
//! - Syntax highlighting and an optional line-number gutter
//! - Recording and replaying keystroke sessions
//!
//! ## Architecture
//!
//! tvi uses The Elm Architecture (TEA) pattern:
//! - **Model**: Editor state
//! - **Message**: Input bytes and terminal events
//! - **Update**: Pure state transitions
//! - **View**: Render to terminal
//!
//! ## Modules
//!
//! - [`app`]: Main application loop and state
//! - [`editor`]: Buffers, cursor, edits, yank, undo and text objects
//! - [`ui`]: Terminal rendering and viewport
//! - [`input`]: Key translation, recording and playback
//! - [`highlight`]: Syntax highlighting
//! - [`search`]: Search functionality
//! - [`filter`]: External filter commands
//! - [`config`]: Persisted default flags

pub mod app;
pub mod config;
pub mod editor;
pub mod error;
pub mod filter;
pub mod highlight;
pub mod input;
pub mod search;
pub mod ui;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::app::{App, Message, Mode, Model, update};
    pub use crate::editor::{Buffer, Position, Selection};
    pub use crate::error::EditError;
    pub use crate::ui::viewport::Viewport;
}
