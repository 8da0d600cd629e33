//! Growable byte storage for a single line of text.

use std::ops::Range;

use crate::error::EditError;

/// Capacity given to a line the first time it needs storage.
pub const MIN_CAPACITY: usize = 16;

/// One line of a buffer, stored as raw bytes without a terminator.
///
/// Capacity starts at [`MIN_CAPACITY`] and doubles whenever an insertion
/// would overflow it. A line that becomes empty gives its storage back, so
/// `capacity() == 0` exactly when `is_empty()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    data: Vec<u8>,
}

impl Line {
    /// Create an empty line with no storage.
    pub const fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Create a line holding a copy of `bytes`.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::AllocationFailure`] if storage cannot be reserved.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, EditError> {
        let mut line = Self::new();
        line.insert_slice(0, bytes)?;
        Ok(line)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Bytes reserved for this line.
    pub fn capacity(&self) -> usize {
        self.data.capacity()
    }

    /// Byte at `index`, if it is inside the line.
    pub fn get(&self, index: usize) -> Option<u8> {
        self.data.get(index).copied()
    }

    /// Number of leading space bytes.
    pub fn indent(&self) -> usize {
        self.data.iter().take_while(|&&b| b == b' ').count()
    }

    /// Insert one byte at `at`, clamped to the end of the line.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::AllocationFailure`] if the line cannot grow.
    pub fn insert(&mut self, at: usize, byte: u8) -> Result<(), EditError> {
        self.insert_slice(at, &[byte])
    }

    /// Insert `bytes` at `at`, clamped to the end of the line.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::AllocationFailure`] if the line cannot grow.
    pub fn insert_slice(&mut self, at: usize, bytes: &[u8]) -> Result<(), EditError> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.grow_for(bytes.len())?;
        let at = at.min(self.data.len());
        self.data.splice(at..at, bytes.iter().copied());
        Ok(())
    }

    /// Append `bytes` to the end of the line.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::AllocationFailure`] if the line cannot grow.
    pub fn push_slice(&mut self, bytes: &[u8]) -> Result<(), EditError> {
        self.insert_slice(self.data.len(), bytes)
    }

    /// Remove the bytes in `range`, clamped to the line.
    pub fn remove_range(&mut self, range: Range<usize>) {
        let end = range.end.min(self.data.len());
        let start = range.start.min(end);
        if start == end {
            return;
        }
        self.data.drain(start..end);
        self.release_if_empty();
    }

    /// Cut the line at `at`, returning everything from `at` onward.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::AllocationFailure`] if the tail cannot be copied.
    pub fn split_off(&mut self, at: usize) -> Result<Self, EditError> {
        let at = at.min(self.data.len());
        let tail = Self::from_bytes(&self.data[at..])?;
        self.data.truncate(at);
        self.release_if_empty();
        Ok(tail)
    }

    /// Drop all content and storage.
    pub fn clear(&mut self) {
        self.data = Vec::new();
    }

    fn grow_for(&mut self, additional: usize) -> Result<(), EditError> {
        let needed = self.data.len() + additional;
        let capacity = self.data.capacity();
        if needed <= capacity {
            return Ok(());
        }
        let mut target = capacity.max(MIN_CAPACITY);
        while target < needed {
            target *= 2;
        }
        self.data.try_reserve_exact(target - self.data.len())?;
        Ok(())
    }

    fn release_if_empty(&mut self) {
        if self.data.is_empty() && self.data.capacity() > 0 {
            self.data = Vec::new();
        }
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        let mut data = Vec::with_capacity(initial_capacity(text.len()));
        data.extend_from_slice(text.as_bytes());
        Self { data }
    }
}

/// Storage a fresh line needs for `len` bytes under the growth policy.
const fn initial_capacity(len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    let mut capacity = MIN_CAPACITY;
    while capacity < len {
        capacity *= 2;
    }
    capacity
}
