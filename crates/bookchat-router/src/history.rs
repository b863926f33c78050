//! Linear history stack with a cursor, like a browser session history.

use crate::state::NavigationState;

/// History entries plus the index of the current one.
///
/// Pushing while the cursor is not at the top discards the forward entries.
/// With a non-zero limit, the oldest entries are dropped once the stack is
/// full.
#[derive(Debug, Clone, Default)]
pub struct History {
    entries: Vec<NavigationState>,
    cursor: usize,
    limit: usize,
}

impl History {
    /// Create an unbounded history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a history keeping at most `limit` entries (0 = unbounded).
    #[must_use]
    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Add an entry after the cursor and move onto it.
    pub fn push(&mut self, entry: NavigationState) {
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        self.entries.push(entry);

        if self.limit > 0 && self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
        self.cursor = self.entries.len() - 1;
    }

    /// Overwrite the current entry, or push one if the stack is empty.
    pub fn replace(&mut self, entry: NavigationState) {
        match self.entries.get_mut(self.cursor) {
            Some(current) => *current = entry,
            None => self.push(entry),
        }
    }

    /// Move the cursor by `delta`.
    ///
    /// Returns the new current entry, or `None` (cursor unchanged) if the
    /// target lies outside the stack.
    pub fn go(&mut self, delta: isize) -> Option<&NavigationState> {
        if delta == 0 || self.entries.is_empty() {
            return None;
        }

        let target = self.cursor.checked_add_signed(delta)?;
        if target >= self.entries.len() {
            return None;
        }

        self.cursor = target;
        self.entries.get(target)
    }

    /// Entry under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&NavigationState> {
        self.entries.get(self.cursor)
    }

    /// Mutable entry under the cursor.
    pub fn current_mut(&mut self) -> Option<&mut NavigationState> {
        self.entries.get_mut(self.cursor)
    }

    /// Whether `back` would move.
    #[must_use]
    pub fn can_go_back(&self) -> bool {
        self.cursor > 0
    }

    /// Whether `forward` would move.
    #[must_use]
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Position of the cursor.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the stack is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries, oldest first.
    #[must_use]
    pub fn entries(&self) -> &[NavigationState] {
        &self.entries
    }
}
