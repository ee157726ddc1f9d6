//! Filesystem plumbing shared by the dialog core.
//!
//! # Paths
//!
//! Every path stored in persisted lists goes through [`canonical_form`]
//! first, and equality between stored paths follows a [`PathComparison`]:
//!
//! ```ignore
//! use themeforge_nav::file::{canonical_form, PathComparison};
//!
//! let a = canonical_form("/Work/./Themes");
//! let b = canonical_form("/work/themes");
//! assert!(PathComparison::CaseInsensitive.same_path(&a, &b));
//! ```
//!
//! # Host filesystem
//!
//! The core asks the host about existence, listings and well-known folders
//! through [`HostFs`]. [`StdHostFs`] answers from `std::fs` and the
//! `directories` crate; tests substitute their own implementation.
//!
//! # Storage
//!
//! The persisted document is rewritten as a whole through [`AtomicWriter`].
//! Failures are reported as [`StorageError`].

mod error;
mod host;
mod path;
mod writer;

pub use error::{StorageError, StorageErrorKind, StorageResult};
pub use host::{HostFs, StdHostFs, WellKnownDir};
pub use path::{
    absolute_path, canonical_form, default_settings_path, display_name, normalize_path,
    PathComparison, APP_NAME, SETTINGS_FILE_NAME,
};
pub use writer::AtomicWriter;
