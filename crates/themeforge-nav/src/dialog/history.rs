//! Back/forward navigation history for a single dialog session.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::file::PathComparison;

/// Browser-style directory history.
///
/// Visiting a new directory while positioned in the middle of the history
/// discards every forward entry. Back and forward only move the cursor.
#[derive(Debug, Clone, Default)]
pub struct PathHistory {
    entries: Vec<PathBuf>,
    cursor: usize,
    comparison: PathComparison,
}

impl PathHistory {
    /// Creates an empty history using the platform path comparison.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty history that compares paths with `comparison`.
    pub fn with_comparison(comparison: PathComparison) -> Self {
        Self {
            entries: Vec::new(),
            cursor: 0,
            comparison,
        }
    }

    /// Records a visit to `path`.
    ///
    /// Visiting the current entry again does nothing.
    pub fn visit(&mut self, path: impl Into<PathBuf>) {
        let path = path.into();
        if let Some(current) = self.entries.get(self.cursor)
            && self.comparison.same_path(current, &path)
        {
            return;
        }
        if !self.entries.is_empty() {
            self.entries.truncate(self.cursor + 1);
        }
        tracing::trace!("history visit {}", path.display());
        self.entries.push(path);
        self.cursor = self.entries.len() - 1;
    }

    /// Moves one entry back and returns it.
    pub fn back(&mut self) -> Result<&Path> {
        if self.entries.is_empty() {
            return Err(Error::Empty);
        }
        if self.cursor == 0 {
            return Err(Error::NoHistory);
        }
        self.cursor -= 1;
        Ok(self.entries[self.cursor].as_path())
    }

    /// Moves one entry forward and returns it.
    pub fn forward(&mut self) -> Result<&Path> {
        if self.entries.is_empty() {
            return Err(Error::Empty);
        }
        if self.cursor + 1 >= self.entries.len() {
            return Err(Error::NoHistory);
        }
        self.cursor += 1;
        Ok(self.entries[self.cursor].as_path())
    }

    /// The entry under the cursor.
    pub fn current(&self) -> Result<&Path> {
        self.entries
            .get(self.cursor)
            .map(PathBuf::as_path)
            .ok_or(Error::Empty)
    }

    /// Whether [`back`](Self::back) would succeed.
    pub fn can_go_back(&self) -> bool {
        !self.entries.is_empty() && self.cursor > 0
    }

    /// Whether [`forward`](Self::forward) would succeed.
    pub fn can_go_forward(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[PathBuf] {
        &self.entries
    }

    /// Index of the current entry.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Returns true if no directory has been visited yet.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}
