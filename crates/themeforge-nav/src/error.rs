//! Error types for the navigation core.

use std::path::PathBuf;

use crate::file::StorageError;

/// Result type alias for navigation operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can surface from the navigation core.
///
/// History navigation surfaces [`Error::NoHistory`] and [`Error::Empty`].
/// Session operations report paths the user typed with [`Error::NotFound`]
/// and a selection without files with [`Error::NothingSelected`].
/// [`Error::Storage`] and [`Error::InvalidFilter`] come only from the
/// explicit `try_save` and `try_parse_filter`; everywhere else those
/// failures are absorbed into safe defaults.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A referenced path no longer exists or has the wrong kind.
    #[error("path not found: {}", .0.display())]
    NotFound(PathBuf),

    /// Durable storage could not be read or written.
    #[error("storage unavailable: {0}")]
    Storage(#[from] StorageError),

    /// A filter description string had no usable label/pattern pairs.
    #[error("invalid filter '{0}'")]
    InvalidFilter(String),

    /// Back or forward was requested at the edge of the history.
    #[error("no history in that direction")]
    NoHistory,

    /// The history has not been positioned on any directory yet.
    #[error("history is empty")]
    Empty,

    /// An open dialog was completed without any file among the selection.
    #[error("no file selected")]
    NothingSelected,
}

impl Error {
    /// Create a not-found error.
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        Self::NotFound(path.into())
    }

    /// Create an invalid-filter error.
    pub fn invalid_filter(filter: impl Into<String>) -> Self {
        Self::InvalidFilter(filter.into())
    }
}
