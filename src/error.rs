//! Error kinds raised by the editing engine.
//!
//! Most of these never reach the user: the modal state machine treats a
//! failed edit as a no-op and only logs it. File I/O errors are the
//! exception and surface as a toast.

use std::collections::TryReserveError;
use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by buffer, yank and text-object operations.
#[derive(Debug, Error)]
pub enum EditError {
    /// Growing or copying line storage failed.
    #[error("allocation failed: {0}")]
    AllocationFailure(#[from] TryReserveError),

    /// Reading or writing a file failed.
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The buffer has no file name to save to.
    #[error("no file name")]
    NoFileName,

    /// A text-object scan ran off the buffer without finding its delimiter.
    #[error("no enclosing '{0}' found")]
    UnmatchedDelimiter(char),

    /// A selection-consuming command ran without an active selection.
    #[error("nothing selected")]
    EmptySelection,

    /// Paste was requested with nothing yanked.
    #[error("nothing to paste")]
    EmptyYank,

    /// A row or column fell outside the buffer.
    #[error("position {row}:{column} is out of range")]
    OutOfRange { row: usize, column: usize },
}

impl EditError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unmatched_delimiter_names_the_byte() {
        let err = EditError::UnmatchedDelimiter('(');
        assert_eq!(err.to_string(), "no enclosing '(' found");
    }

    #[test]
    fn test_io_error_includes_path() {
        let err = EditError::io(
            "notes.txt",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(err.to_string(), "notes.txt: denied");
    }
}
