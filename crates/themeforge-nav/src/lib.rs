//! Navigation core for the ThemeForge file dialogs.
//!
//! This crate holds everything the custom open and save dialogs remember and
//! compute, without any rendering:
//!
//! - **History**: per-dialog back/forward navigation with branch truncation
//! - **Persisted state**: recent files, visited and frequent directories,
//!   favorites and view preferences, saved to one JSON document
//! - **Suggestions**: ranked history, related folders, address-bar and
//!   file-name completions
//! - **Initial directory**: a prioritized fallback chain
//! - **Filters**: `"label|*.ext;*.ext"` parsing and matching
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use themeforge_nav::prelude::*;
//!
//! let state: SharedDialogState = Arc::new(DialogStateStore::open_default());
//! let mut session = DialogSession::new(state, DialogKind::Open, DialogOptions {
//!     filter: "Themes (*.theme)|*.theme|All files (*.*)|*.*".into(),
//!     ..Default::default()
//! });
//!
//! let listing = session.navigate("palettes")?;
//! for entry in listing.list(&StdHostFs)? {
//!     println!("{} ({})", entry.name, entry.type_description);
//! }
//! ```

pub mod dialog;
pub mod file;

mod error;

pub use error::{Error, Result};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::dialog::{
        DialogKind, DialogOptions, DialogResult, DialogSession, DialogSettings, DialogStateStore,
        Favorite, FavoritesStore, FilterEntry, LazyDialogState, ListingRequest, PathHistory,
        SharedDialogState, StoreConfig, SuggestionItem,
    };
    pub use crate::file::{HostFs, PathComparison, StdHostFs, WellKnownDir};
    pub use crate::{Error, Result};
}
