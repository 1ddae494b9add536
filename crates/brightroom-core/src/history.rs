//! Versioned edit history with cursor-based undo/redo.

use thiserror::Error;

/// Maximum number of versions kept by default.
pub const DEFAULT_HISTORY_CAPACITY: usize = 50;

/// History errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HistoryError {
    #[error("history is already seeded")]
    AlreadySeeded,
}

/// A linear timeline of versions plus a cursor marking the displayed one.
///
/// Pushing a new version while the cursor is rewound discards everything
/// after the cursor first: there is no branching, only a single timeline.
/// The structure is content-agnostic; every editor panel stores its own
/// version type through the same contract. No I/O happens here.
#[derive(Debug, Clone)]
pub struct EditHistory<V> {
    versions: Vec<V>,
    cursor: usize,
    capacity: usize,
}

impl<V> Default for EditHistory<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> EditHistory<V> {
    /// Create an empty history with the default capacity.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_HISTORY_CAPACITY)
    }

    /// Create an empty history keeping at most `capacity` versions.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            versions: Vec::new(),
            cursor: 0,
            capacity: capacity.max(1),
        }
    }

    /// Install the initial version. Only legal while the history is empty;
    /// use [`reset`](Self::reset) to discard a session intentionally.
    pub fn seed(&mut self, initial: V) -> Result<(), HistoryError> {
        if !self.versions.is_empty() {
            return Err(HistoryError::AlreadySeeded);
        }
        self.versions.push(initial);
        self.cursor = 0;
        Ok(())
    }

    /// Append a new version, discarding any redo branch first.
    ///
    /// This is the only mutator that can shrink the sequence: versions
    /// after the cursor are truncated, and once the capacity is exceeded
    /// the oldest version is dropped.
    pub fn push(&mut self, next: V) {
        if !self.versions.is_empty() && self.cursor < self.versions.len() - 1 {
            self.versions.truncate(self.cursor + 1);
        }
        self.versions.push(next);
        if self.versions.len() > self.capacity {
            self.versions.remove(0);
        }
        self.cursor = self.versions.len() - 1;
    }

    /// Step the cursor back. `None` when there is nothing to undo, so
    /// callers can disable their button.
    pub fn undo(&mut self) -> Option<&V> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.versions.get(self.cursor)
    }

    /// Step the cursor forward. `None` when there is nothing to redo.
    pub fn redo(&mut self) -> Option<&V> {
        if self.versions.is_empty() || self.cursor >= self.versions.len() - 1 {
            return None;
        }
        self.cursor += 1;
        self.versions.get(self.cursor)
    }

    /// The displayed version, if any.
    pub fn current(&self) -> Option<&V> {
        self.versions.get(self.cursor)
    }

    /// Discard every version and reseed. Used when the user loads an
    /// entirely new artifact.
    pub fn reset(&mut self, initial: V) {
        self.versions.clear();
        self.versions.push(initial);
        self.cursor = 0;
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        !self.versions.is_empty() && self.cursor < self.versions.len() - 1
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Index of the displayed version.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
