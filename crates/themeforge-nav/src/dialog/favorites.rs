//! Favorite folders as shown in the dialog sidebar.

use std::path::{Path, PathBuf};

use super::settings::Favorite;
use super::store::SharedDialogState;

/// Number of recent files listed under the favorites.
const SIDEBAR_RECENT_FILES: usize = 10;

/// Sidebar view over the favorites held by a [`DialogStateStore`](super::DialogStateStore).
///
/// Built-in favorites cannot be removed or renamed. Every change is saved
/// immediately through the store.
#[derive(Debug, Clone)]
pub struct FavoritesStore {
    state: SharedDialogState,
}

impl FavoritesStore {
    /// Creates a view over `state`.
    pub fn new(state: SharedDialogState) -> Self {
        Self { state }
    }

    /// All favorites in display order.
    pub fn list(&self) -> Vec<Favorite> {
        self.state.read(|s| s.favorite_folders.clone())
    }

    /// Favorites whose directory still exists.
    pub fn available(&self) -> Vec<Favorite> {
        let host = self.state.host();
        self.state.read(|s| {
            s.favorite_folders
                .iter()
                .filter(|f| host.dir_exists(&f.path))
                .cloned()
                .collect()
        })
    }

    /// Adds a user favorite. See [`DialogStateStore::add_favorite`](super::DialogStateStore::add_favorite).
    pub fn add(&self, name: &str, path: impl AsRef<Path>) -> bool {
        self.state.add_favorite(name, path)
    }

    /// Removes a user favorite.
    pub fn remove(&self, path: impl AsRef<Path>) -> bool {
        self.state.remove_favorite(path)
    }

    /// Renames a user favorite.
    ///
    /// The favorite is removed and added again under the new name, so it
    /// moves to the end of the list. Built-ins, blank names and favorites
    /// whose directory no longer exists are refused and left untouched.
    pub fn rename(&self, path: impl AsRef<Path>, new_name: &str) -> bool {
        let path = path.as_ref();
        if new_name.trim().is_empty() || !self.state.host().dir_exists(path) {
            return false;
        }
        self.remove(path) && self.add(new_name, path)
    }

    /// Recently opened files still on disk, most recent first.
    pub fn recent_files(&self) -> Vec<PathBuf> {
        let host = self.state.host();
        self.state.read(|s| {
            s.recent_files
                .iter()
                .filter(|f| host.file_exists(f))
                .take(SIDEBAR_RECENT_FILES)
                .cloned()
                .collect()
        })
    }

    /// Forgets every recently opened file.
    pub fn clear_recent_files(&self) {
        self.state.clear_recent_files();
    }

    /// Returns true if a favorite points at `path`.
    pub fn contains(&self, path: impl AsRef<Path>) -> bool {
        let path = crate::file::canonical_form(path);
        let comparison = self.state.comparison();
        self.state.read(|s| s.favorite(&path, comparison).is_some())
    }
}
