//! Error types for durable storage access.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error raised while loading or saving persisted dialog state.
///
/// The state store's mutators log and drop these. `try_save` returns them
/// wrapped in [`Error::Storage`](crate::Error::Storage).
#[derive(Debug)]
pub struct StorageError {
    /// The kind of error that occurred.
    kind: StorageErrorKind,
    /// The storage path involved, if any.
    path: Option<PathBuf>,
    /// The underlying source error, if any.
    source: Option<io::Error>,
}

/// The kind of storage error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageErrorKind {
    /// The storage file does not exist yet.
    NotFound,
    /// Permission denied.
    PermissionDenied,
    /// The storage path is a directory or otherwise unusable.
    InvalidPath,
    /// The stored document could not be parsed or produced.
    InvalidData,
    /// No per-user location could be determined on this platform.
    NoLocation,
    /// Read-only filesystem or no space left.
    Unwritable,
    /// An unknown or unclassified error occurred.
    Other,
}

impl StorageError {
    /// Creates a new storage error.
    pub fn new(kind: StorageErrorKind, path: Option<PathBuf>, source: Option<io::Error>) -> Self {
        Self { kind, path, source }
    }

    /// Creates a storage error from an I/O error and path.
    pub fn from_io(err: io::Error, path: impl Into<PathBuf>) -> Self {
        Self {
            kind: kind_of(&err),
            path: Some(path.into()),
            source: Some(err),
        }
    }

    /// Creates an "invalid data" error for a document that failed to parse
    /// or serialize.
    pub fn invalid_data(path: impl Into<PathBuf>, err: serde_json::Error) -> Self {
        Self::new(
            StorageErrorKind::InvalidData,
            Some(path.into()),
            Some(io::Error::new(io::ErrorKind::InvalidData, err)),
        )
    }

    /// Creates the error used when the platform reports no config directory.
    pub fn no_location() -> Self {
        Self::new(StorageErrorKind::NoLocation, None, None)
    }

    /// Returns the kind of error.
    pub fn kind(&self) -> StorageErrorKind {
        self.kind
    }

    /// Returns the path involved in the error, if any.
    pub fn path(&self) -> Option<&PathBuf> {
        self.path.as_ref()
    }

    /// Returns true if the storage file simply does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind == StorageErrorKind::NotFound
    }
}

fn kind_of(err: &io::Error) -> StorageErrorKind {
    match err.kind() {
        io::ErrorKind::NotFound => StorageErrorKind::NotFound,
        io::ErrorKind::PermissionDenied => StorageErrorKind::PermissionDenied,
        io::ErrorKind::InvalidInput
        | io::ErrorKind::IsADirectory
        | io::ErrorKind::NotADirectory => StorageErrorKind::InvalidPath,
        io::ErrorKind::InvalidData | io::ErrorKind::UnexpectedEof => {
            StorageErrorKind::InvalidData
        }
        io::ErrorKind::ReadOnlyFilesystem | io::ErrorKind::StorageFull => {
            StorageErrorKind::Unwritable
        }
        _ => StorageErrorKind::Other,
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}: {}", self.kind, path.display()),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageErrorKind::NotFound => write!(f, "storage file not found"),
            StorageErrorKind::PermissionDenied => write!(f, "permission denied"),
            StorageErrorKind::InvalidPath => write!(f, "invalid storage path"),
            StorageErrorKind::InvalidData => write!(f, "invalid stored data"),
            StorageErrorKind::NoLocation => write!(f, "no storage location available"),
            StorageErrorKind::Unwritable => write!(f, "storage is not writable"),
            StorageErrorKind::Other => write!(f, "storage error"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e as &(dyn std::error::Error + 'static))
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        Self {
            kind: kind_of(&err),
            path: None,
            source: Some(err),
        }
    }
}

/// A specialized Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StorageError::from_io(
            io::Error::new(io::ErrorKind::NotFound, "gone"),
            "/cfg/FileDialogSettings.json",
        );
        assert_eq!(
            err.to_string(),
            "storage file not found: /cfg/FileDialogSettings.json"
        );
        assert!(err.is_not_found());
    }

    #[test]
    fn test_kind_mapping() {
        let err: StorageError = io::Error::new(io::ErrorKind::PermissionDenied, "nope").into();
        assert_eq!(err.kind(), StorageErrorKind::PermissionDenied);
        assert!(err.path().is_none());

        let err: StorageError = io::Error::new(io::ErrorKind::UnexpectedEof, "eof").into();
        assert_eq!(err.kind(), StorageErrorKind::InvalidData);
    }

    #[test]
    fn test_no_location_has_no_path() {
        let err = StorageError::no_location();
        assert_eq!(err.kind(), StorageErrorKind::NoLocation);
        assert_eq!(err.to_string(), "no storage location available");
    }
}
