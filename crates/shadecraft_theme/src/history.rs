//! Bounded undo/redo history of snapshots
//!
//! ```text
//! push(s3), max_len = 4
//! ┌──────────────────────────────┐
//! │ entries: [s0, s1, s2, s3]    │
//! │ index:                 ^     │
//! └──────────────────────────────┘
//!
//! undo() x2
//! ┌──────────────────────────────┐
//! │ entries: [s0, s1, s2, s3]    │
//! │ index:         ^             │
//! └──────────────────────────────┘
//!
//! push(s4): the undone future is discarded
//! ┌──────────────────────────────┐
//! │ entries: [s0, s1, s4]        │
//! │ index:             ^         │
//! └──────────────────────────────┘
//! ```
//!
//! Entries are owned values. Callers push a clone of their live state and
//! clone back out on restore, so no snapshot is ever aliased by live state.

use std::collections::VecDeque;

/// Snapshot history with a cursor.
///
/// # Invariants
///
/// 1. `entries` is never empty.
/// 2. `index < entries.len()` after every operation.
/// 3. `entries.len() <= max_len`.
#[derive(Clone, Debug)]
pub struct History<T> {
    entries: VecDeque<T>,
    index: usize,
    max_len: usize,
}

impl<T> History<T> {
    /// Start a history holding a single snapshot. `max_len` is at least 1.
    pub fn new(initial: T, max_len: usize) -> Self {
        let mut entries = VecDeque::with_capacity(max_len.clamp(1, 64));
        entries.push_back(initial);
        Self {
            entries,
            index: 0,
            max_len: max_len.max(1),
        }
    }

    /// Record a new snapshot after the current one.
    ///
    /// Entries after the cursor are dropped first. When the list grows past
    /// `max_len` the oldest entry is evicted and the cursor stays on the last
    /// entry instead of advancing.
    pub fn push(&mut self, snapshot: T) {
        self.entries.truncate(self.index + 1);
        self.entries.push_back(snapshot);
        if self.entries.len() > self.max_len {
            self.entries.pop_front();
        } else {
            self.index += 1;
        }
        self.assert_in_bounds();
    }

    /// Move the cursor back one entry and return the snapshot there.
    ///
    /// Returns `None` at the oldest entry.
    pub fn undo(&mut self) -> Option<&T> {
        if !self.can_undo() {
            return None;
        }
        self.index -= 1;
        Some(self.current())
    }

    /// Move the cursor forward one entry and return the snapshot there.
    ///
    /// Returns `None` at the newest entry.
    pub fn redo(&mut self) -> Option<&T> {
        if !self.can_redo() {
            return None;
        }
        self.index += 1;
        Some(self.current())
    }

    /// Snapshot under the cursor
    pub fn current(&self) -> &T {
        &self.entries[self.index]
    }

    pub fn can_undo(&self) -> bool {
        self.index > 0
    }

    pub fn can_redo(&self) -> bool {
        self.index + 1 < self.entries.len()
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // An out-of-range cursor would silently corrupt undo/redo, so fail hard.
    fn assert_in_bounds(&self) {
        assert!(
            self.index < self.entries.len(),
            "history index {} out of range for {} entries",
            self.index,
            self.entries.len()
        );
    }
}
