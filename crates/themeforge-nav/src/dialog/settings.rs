//! The persisted dialog state record.
//!
//! [`DialogSettings`] is the document written to disk. It is plain data: the
//! locking, loading and saving live in [`DialogStateStore`](super::DialogStateStore).
//! Field names are serialized in PascalCase and every field has a default,
//! so documents written by older releases (or hand-edited ones missing
//! fields) still load.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::file::{HostFs, PathComparison, WellKnownDir};

/// Which kind of dialog is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialogKind {
    /// An open-file dialog.
    Open,
    /// A save-file dialog.
    Save,
}

/// How the file list is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ViewMode {
    /// Columns with size, type and modification time.
    #[default]
    Details,
    /// Names only.
    List,
    /// Large icons.
    Tiles,
}

/// A named shortcut to a directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Favorite {
    /// Display name.
    pub name: String,
    /// Target directory.
    pub path: PathBuf,
    /// False for the built-in favorites, which the user cannot delete.
    #[serde(rename = "IsRemovable", default = "default_true")]
    pub removable: bool,
}

impl Favorite {
    /// A user-added favorite.
    pub fn user(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            removable: true,
        }
    }

    /// A built-in favorite.
    pub fn built_in(name: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            path: path.into(),
            removable: false,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Caps on the persisted lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct Limits {
    /// Cap on recently visited directories.
    pub max_history_items: usize,
    /// Cap on recently opened files.
    pub max_recent_files: usize,
    /// Cap on frequently used directories.
    pub max_frequent_folders: usize,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_history_items: 50,
            max_recent_files: 20,
            max_frequent_folders: 10,
        }
    }
}

/// Presentation preferences remembered between sessions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ViewPreferences {
    pub default_view_mode: ViewMode,
    pub remember_window_size: bool,
    pub window_width: f64,
    pub window_height: f64,
    pub show_preview: bool,
    pub show_hidden_files: bool,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            default_view_mode: ViewMode::Details,
            remember_window_size: true,
            window_width: 800.0,
            window_height: 600.0,
            show_preview: true,
            show_hidden_files: false,
        }
    }
}

/// Everything the file dialogs remember across sessions.
///
/// All path lists are ordered most recent first and hold no two entries that
/// compare equal.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct DialogSettings {
    /// Recently visited directories.
    pub navigation_history: Vec<PathBuf>,
    /// Recently opened files.
    pub recent_files: Vec<PathBuf>,
    /// Frequently used directories.
    pub frequent_folders: Vec<PathBuf>,
    /// Named favorites, built-ins first.
    pub favorite_folders: Vec<Favorite>,
    /// Directory of the last completed open dialog.
    pub last_open_directory: Option<PathBuf>,
    /// Directory of the last completed save dialog.
    pub last_save_directory: Option<PathBuf>,
    #[serde(flatten)]
    pub limits: Limits,
    #[serde(flatten)]
    pub view: ViewPreferences,
}

impl DialogSettings {
    /// Returns the last directory used by a dialog of `kind`.
    pub fn last_directory(&self, kind: DialogKind) -> Option<&Path> {
        match kind {
            DialogKind::Open => self.last_open_directory.as_deref(),
            DialogKind::Save => self.last_save_directory.as_deref(),
        }
    }

    /// Seeds the built-in favorites when there are no favorites at all.
    ///
    /// Returns true if anything was added.
    pub fn seed_built_in_favorites(&mut self, host: &dyn HostFs) -> bool {
        if !self.favorite_folders.is_empty() {
            return false;
        }
        for kind in WellKnownDir::BUILT_IN_FAVORITES {
            if let Some(path) = host.well_known_dir(kind) {
                self.favorite_folders
                    .push(Favorite::built_in(kind.label(), path));
            }
        }
        !self.favorite_folders.is_empty()
    }

    /// Drops entries that no longer exist with the expected kind.
    ///
    /// Returns the number of entries removed.
    pub fn prune(&mut self, host: &dyn HostFs) -> usize {
        let before = self.entry_count();
        self.navigation_history.retain(|p| host.dir_exists(p));
        self.recent_files.retain(|p| host.file_exists(p));
        self.frequent_folders.retain(|p| host.dir_exists(p));
        self.favorite_folders.retain(|f| host.dir_exists(&f.path));
        before - self.entry_count()
    }

    /// Drops duplicate entries and truncates every list to its cap.
    ///
    /// The first of several equal entries is kept. Returns the number of
    /// entries removed.
    pub fn enforce_limits(&mut self, comparison: PathComparison) -> usize {
        let before = self.entry_count();
        let limits = self.limits;
        dedupe_capped(
            &mut self.navigation_history,
            limits.max_history_items,
            comparison,
        );
        dedupe_capped(&mut self.recent_files, limits.max_recent_files, comparison);
        dedupe_capped(
            &mut self.frequent_folders,
            limits.max_frequent_folders,
            comparison,
        );

        let mut favorites: Vec<Favorite> = Vec::with_capacity(self.favorite_folders.len());
        for favorite in self.favorite_folders.drain(..) {
            if !favorites
                .iter()
                .any(|f| comparison.same_path(&f.path, &favorite.path))
            {
                favorites.push(favorite);
            }
        }
        self.favorite_folders = favorites;

        before - self.entry_count()
    }

    /// Seeds built-in favorites, prunes, then enforces the list limits.
    pub fn apply_defaults(&mut self, host: &dyn HostFs, comparison: PathComparison) {
        self.seed_built_in_favorites(host);
        let removed = self.prune(host) + self.enforce_limits(comparison);
        if removed > 0 {
            tracing::debug!("dropped {} stale or excess dialog state entries", removed);
        }
    }

    /// Returns the favorite whose path equals `path`.
    pub fn favorite(&self, path: &Path, comparison: PathComparison) -> Option<&Favorite> {
        self.favorite_folders
            .iter()
            .find(|f| comparison.same_path(&f.path, path))
    }

    fn entry_count(&self) -> usize {
        self.navigation_history.len()
            + self.recent_files.len()
            + self.frequent_folders.len()
            + self.favorite_folders.len()
    }
}

/// Moves `path` to the front of an MRU list, dropping equal entries and
/// truncating to `cap`.
pub(crate) fn push_front_unique(
    list: &mut Vec<PathBuf>,
    path: PathBuf,
    cap: usize,
    comparison: PathComparison,
) {
    list.retain(|p| !comparison.same_path(p, &path));
    list.insert(0, path);
    list.truncate(cap);
}

fn dedupe_capped(list: &mut Vec<PathBuf>, cap: usize, comparison: PathComparison) {
    let mut kept: Vec<PathBuf> = Vec::with_capacity(list.len().min(cap));
    for path in list.drain(..) {
        if kept.len() == cap {
            break;
        }
        if !comparison.contains(&kept, &path) {
            kept.push(path);
        }
    }
    *list = kept;
}
