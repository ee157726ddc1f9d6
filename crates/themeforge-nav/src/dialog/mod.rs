//! Navigation, history and favorites behind the open and save dialogs.
//!
//! # Persisted state
//!
//! [`DialogStateStore`] owns the [`DialogSettings`] record shared by every
//! dialog in the process: recent files, visited and frequent directories,
//! favorites, the last open and save directories and view preferences.
//! Each mutation is written back to disk immediately.
//!
//! ```ignore
//! use std::sync::Arc;
//! use themeforge_nav::dialog::{LazyDialogState, StoreConfig};
//! use themeforge_nav::file::StdHostFs;
//!
//! let state = LazyDialogState::new(StoreConfig::default_location()?, Arc::new(StdHostFs));
//! state.get().record_navigation("/home/user/themes");
//! ```
//!
//! # Sessions
//!
//! A [`DialogSession`] drives one dialog. It keeps its own back/forward
//! [`PathHistory`] and commits the outcome to the store when it completes.
//!
//! # Suggestions
//!
//! [`rank`] merges the remembered directories into one list and
//! [`related_folders`] collects the neighbours of the current directory.
//! Both read a [`DialogSettings`] snapshot and check the host filesystem for
//! entries that disappeared.

mod favorites;
mod filter;
mod history;
mod initial_dir;
mod listing;
mod ranking;
mod related;
mod session;
mod settings;
mod store;

#[cfg(test)]
mod testing;

pub use favorites::FavoritesStore;
pub use filter::{
    parse_filter, try_parse_filter, FilterEntry, ALL_FILES_LABEL, ALL_FILES_PATTERN,
};
pub use history::PathHistory;
pub use initial_dir::resolve_initial_directory;
pub use listing::{
    breadcrumbs, describe_file_type, ListingEntry, ListingRequest, PathDropdown, SuggestionItem,
    FOLDER_DESCRIPTION,
};
pub use ranking::{rank, RankingPolicy, DEFAULT_RANKED_ITEMS};
pub use related::{related_folders, DEFAULT_RELATED_ITEMS};
pub use session::{
    DialogOptions, DialogResult, DialogSession, FileNameAction, OpenFileDialogResult, SavePlan,
    SaveFileDialogResult, MAX_ADDRESS_HISTORY, MAX_ADDRESS_SUGGESTIONS,
    MAX_FILE_NAME_SUGGESTIONS, MAX_PATH_DROPDOWN_ITEMS, MAX_RECENT_FILE_NAMES,
};
pub use settings::{DialogKind, DialogSettings, Favorite, Limits, ViewMode, ViewPreferences};
pub use store::{DialogStateStore, LazyDialogState, SharedDialogState, StoreConfig};
