use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::error::EditError;

use super::line::Line;

/// Ordered lines of text plus the file they belong to.
///
/// A buffer built by [`Buffer::new`] has no lines at all; the first
/// insertion materializes one through [`Buffer::ensure_initialized`].
/// Buffers loaded from disk always have at least one line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    lines: Vec<Line>,
    file: Option<PathBuf>,
}

impl Buffer {
    /// Create an untitled buffer with no lines.
    pub const fn new() -> Self {
        Self {
            lines: Vec::new(),
            file: None,
        }
    }

    /// Build a buffer from already-split lines.
    ///
    /// An empty iterator still yields one empty line.
    pub fn from_lines<I, L>(lines: I, file: Option<PathBuf>) -> Self
    where
        I: IntoIterator<Item = L>,
        L: Into<Line>,
    {
        let mut lines: Vec<Line> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            lines.push(Line::new());
        }
        Self { lines, file }
    }

    /// Load `path` into a new buffer.
    ///
    /// Lines are split on `\n` with one trailing `\r` stripped. A file
    /// that does not exist yet gives an empty buffer still bound to
    /// `path`, so saving creates it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Io`] for any read failure other than the file
    /// being absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, EditError> {
        let path = path.into();
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "new file");
                return Ok(Self::from_lines(Vec::<Line>::new(), Some(path)));
            }
            Err(err) => return Err(EditError::io(path, err)),
        };
        let lines = split_lines(&bytes)?;
        tracing::info!(path = %path.display(), lines = lines.len(), "opened file");
        Ok(Self::from_lines(lines, Some(path)))
    }

    /// Write every line followed by `\n` to the buffer's file.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::NoFileName`] for an untitled buffer, or
    /// [`EditError::Io`] if the write fails.
    pub fn save(&self) -> Result<usize, EditError> {
        let path = self.file.as_deref().ok_or(EditError::NoFileName)?;
        self.save_to(path)
    }

    /// Write the buffer to `path` without rebinding it.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Io`] if the file cannot be written.
    pub fn save_to(&self, path: &Path) -> Result<usize, EditError> {
        let mut out = Vec::with_capacity(self.lines.iter().map(|l| l.len() + 1).sum());
        for line in &self.lines {
            out.extend_from_slice(line.as_bytes());
            out.push(b'\n');
        }
        let mut file = fs::File::create(path).map_err(|err| EditError::io(path, err))?;
        file.write_all(&out)
            .map_err(|err| EditError::io(path, err))?;
        tracing::info!(path = %path.display(), bytes = out.len(), "saved file");
        Ok(out.len())
    }

    /// Give an empty buffer its first line.
    pub fn ensure_initialized(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(Line::new());
        }
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Line at zero-based `index`.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Byte length of the line at zero-based `index`, or 0 past the end.
    pub fn line_len(&self, index: usize) -> usize {
        self.lines.get(index).map_or(0, Line::len)
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    /// File name for the status line, `[No Name]` when untitled.
    pub fn display_name(&self) -> String {
        self.file.as_ref().map_or_else(
            || "[No Name]".to_string(),
            |p| p.display().to_string(),
        )
    }

    /// Full text of the buffer, lines joined with `\n`.
    pub fn text(&self) -> String {
        self.lines
            .iter()
            .map(|l| String::from_utf8_lossy(l.as_bytes()))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Swap in a whole new set of lines, returning the old ones.
    pub fn replace_lines(&mut self, lines: Vec<Line>) -> Vec<Line> {
        std::mem::replace(&mut self.lines, lines)
    }

    pub(super) const fn lines_mut(&mut self) -> &mut Vec<Line> {
        &mut self.lines
    }
}

fn split_lines(bytes: &[u8]) -> Result<Vec<Line>, EditError> {
    let body = bytes.strip_suffix(b"\n").unwrap_or(bytes);
    if bytes.is_empty() {
        return Ok(Vec::new());
    }
    body.split(|&b| b == b'\n')
        .map(|raw| Line::from_bytes(raw.strip_suffix(b"\r").unwrap_or(raw)))
        .collect()
}
