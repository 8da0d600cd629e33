//! Raw input bytes: translating terminal key events, recording them to a
//! file, and replaying a recorded session.
//!
//! The editor consumes one byte per step. Key events from crossterm are
//! folded back into the bytes a terminal in raw mode would have sent.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const ESC: u8 = 0x1b;
pub const ENTER: u8 = b'\r';
pub const BACKSPACE: u8 = 0x7f;
pub const CTRL_H: u8 = 0x08;
pub const TAB: u8 = b'\t';
pub const CTRL_C: u8 = 0x03;
pub const CTRL_D: u8 = 0x04;
pub const CTRL_U: u8 = 0x15;

/// Translate a key press into the byte a raw terminal would deliver.
///
/// Returns `None` for releases, non-ASCII characters and keys with no
/// single-byte encoding (arrows, function keys).
pub fn key_to_byte(key: KeyEvent) -> Option<u8> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    match key.code {
        KeyCode::Char(c) if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_lowercase() {
                u8::try_from(c).ok().map(|b| b & 0x1f)
            } else {
                None
            }
        }
        KeyCode::Char(c) => u8::try_from(c).ok().filter(u8::is_ascii),
        KeyCode::Enter => Some(ENTER),
        KeyCode::Esc => Some(ESC),
        KeyCode::Backspace => Some(BACKSPACE),
        KeyCode::Tab => Some(TAB),
        _ => None,
    }
}

/// Appends every input byte to a file, flushed after each byte.
#[derive(Debug)]
pub struct Recorder {
    out: BufWriter<File>,
}

impl Recorder {
    /// Create (or truncate) the recording at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        tracing::info!(path = %path.display(), "recording input");
        Ok(Self {
            out: BufWriter::new(file),
        })
    }

    /// Append one byte.
    ///
    /// # Errors
    ///
    /// Returns an error if the write or flush fails.
    pub fn record(&mut self, byte: u8) -> io::Result<()> {
        self.out.write_all(&[byte])?;
        self.out.flush()
    }
}

/// A recorded byte stream played back in place of the keyboard.
#[derive(Debug, Clone)]
pub struct Playback {
    bytes: std::vec::IntoIter<u8>,
}

impl Playback {
    /// Load a recording from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn open(path: &Path) -> io::Result<Self> {
        let bytes = std::fs::read(path)?;
        tracing::info!(path = %path.display(), bytes = bytes.len(), "playing back input");
        Ok(Self::from_bytes(bytes))
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Self {
        Self {
            bytes: bytes.into_iter(),
        }
    }
}

impl Iterator for Playback {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        self.bytes.next()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn press(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_plain_characters_map_to_ascii() {
        assert_eq!(key_to_byte(press(KeyCode::Char('x'), KeyModifiers::NONE)), Some(b'x'));
        assert_eq!(key_to_byte(press(KeyCode::Char('G'), KeyModifiers::SHIFT)), Some(b'G'));
    }

    #[test]
    fn test_control_keys_map_to_control_bytes() {
        assert_eq!(
            key_to_byte(press(KeyCode::Char('d'), KeyModifiers::CONTROL)),
            Some(CTRL_D)
        );
        assert_eq!(
            key_to_byte(press(KeyCode::Char('u'), KeyModifiers::CONTROL)),
            Some(CTRL_U)
        );
        assert_eq!(
            key_to_byte(press(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(CTRL_C)
        );
    }

    #[test]
    fn test_special_keys() {
        assert_eq!(key_to_byte(press(KeyCode::Esc, KeyModifiers::NONE)), Some(ESC));
        assert_eq!(key_to_byte(press(KeyCode::Enter, KeyModifiers::NONE)), Some(ENTER));
        assert_eq!(
            key_to_byte(press(KeyCode::Backspace, KeyModifiers::NONE)),
            Some(BACKSPACE)
        );
        assert_eq!(key_to_byte(press(KeyCode::Tab, KeyModifiers::NONE)), Some(TAB));
        assert_eq!(key_to_byte(press(KeyCode::Left, KeyModifiers::NONE)), None);
        assert_eq!(key_to_byte(press(KeyCode::Char('é'), KeyModifiers::NONE)), None);
    }

    #[test]
    fn test_recorder_output_plays_back() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("session.keys");
        let mut recorder = Recorder::create(&path).unwrap();
        for &b in b"ihi\x1b:q\r" {
            recorder.record(b).unwrap();
        }
        drop(recorder);

        let played: Vec<u8> = Playback::open(&path).unwrap().collect();
        assert_eq!(played, b"ihi\x1b:q\r");
    }
}
