//! Terminal UI components.
//!
//! This module contains all UI-related code including:
//! - [`viewport`]: Scroll position and visible range management
//! - [`render`]: Drawing the text area and status line

pub mod viewport;

mod render;
mod status;

pub use render::{line_number_width, render};
pub use status::status_text;
