//! Shared, persisted dialog state.
//!
//! A [`DialogStateStore`] owns the [`DialogSettings`] record for the whole
//! process. It is loaded once, mutated by completed dialog interactions and
//! written back to disk after every mutation.
//!
//! Loading never fails: a missing, unreadable or corrupt document yields the
//! default record. Saving failures are logged and counted but do not reach
//! the dialog; call [`DialogStateStore::try_save`] to observe them as
//! [`Error::Storage`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use themeforge_nav::dialog::{DialogStateStore, StoreConfig};
//! use themeforge_nav::file::StdHostFs;
//!
//! let store = DialogStateStore::open(StoreConfig::default_location()?, Arc::new(StdHostFs));
//! store.record_navigation("/home/user/themes");
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, OnceLock};

use parking_lot::Mutex;

use crate::error::{Error, Result};
use crate::file::{
    canonical_form, default_settings_path, AtomicWriter, HostFs, PathComparison, StdHostFs,
    StorageError, StorageResult,
};

use super::ranking::{rank, RankingPolicy};
use super::related::related_folders;
use super::settings::{push_front_unique, DialogKind, DialogSettings, Favorite};

/// Shared handle to the process-wide dialog state.
pub type SharedDialogState = Arc<DialogStateStore>;

/// Where and how the dialog state is stored.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Location of the JSON document. `None` keeps the state in memory.
    pub storage_path: Option<PathBuf>,
    /// Rule used to decide whether two stored paths are the same.
    pub comparison: PathComparison,
    /// Weights used when ranking remembered directories.
    pub ranking: RankingPolicy,
}

impl StoreConfig {
    /// Stores the document at `path`.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self {
            storage_path: Some(path.into()),
            ..Self::in_memory()
        }
    }

    /// Keeps the state in memory only. Every save fails with
    /// [`StorageErrorKind::NoLocation`](crate::file::StorageErrorKind::NoLocation).
    pub fn in_memory() -> Self {
        Self {
            storage_path: None,
            comparison: PathComparison::platform_default(),
            ranking: RankingPolicy::default(),
        }
    }

    /// Stores the document in the per-user configuration directory.
    pub fn default_location() -> StorageResult<Self> {
        default_settings_path().map(Self::at)
    }

    /// Sets the path comparison rule.
    pub fn with_comparison(mut self, comparison: PathComparison) -> Self {
        self.comparison = comparison;
        self
    }

    /// Sets the ranking policy.
    pub fn with_ranking(mut self, ranking: RankingPolicy) -> Self {
        self.ranking = ranking;
        self
    }
}

/// Thread-safe owner of the persisted dialog state.
pub struct DialogStateStore {
    config: StoreConfig,
    host: Arc<dyn HostFs>,
    state: Mutex<DialogSettings>,
    save_failures: AtomicUsize,
}

impl DialogStateStore {
    /// Loads the state described by `config`.
    ///
    /// Built-in favorites are seeded, stale entries pruned and the list caps
    /// enforced after loading.
    pub fn open(config: StoreConfig, host: Arc<dyn HostFs>) -> Self {
        let mut settings = match &config.storage_path {
            Some(path) => match Self::read_document(path) {
                Ok(settings) => settings,
                Err(e) if e.is_not_found() => DialogSettings::default(),
                Err(e) => {
                    tracing::warn!("ignoring unusable dialog state: {}", e);
                    DialogSettings::default()
                }
            },
            None => DialogSettings::default(),
        };
        settings.apply_defaults(host.as_ref(), config.comparison);

        Self {
            config,
            host,
            state: Mutex::new(settings),
            save_failures: AtomicUsize::new(0),
        }
    }

    /// Loads the state from the per-user location using the real filesystem.
    ///
    /// Falls back to an in-memory store if the platform has no home
    /// directory.
    pub fn open_default() -> Self {
        let config = StoreConfig::default_location().unwrap_or_else(|e| {
            tracing::warn!("dialog state will not persist: {}", e);
            StoreConfig::in_memory()
        });
        Self::open(config, Arc::new(StdHostFs))
    }

    /// Reads and parses a state document without applying defaults.
    pub fn read_document(path: &Path) -> StorageResult<DialogSettings> {
        let content = fs::read_to_string(path).map_err(|e| StorageError::from_io(e, path))?;
        serde_json::from_str(&content).map_err(|e| StorageError::invalid_data(path, e))
    }

    /// The configuration this store was opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The host filesystem this store consults.
    pub fn host(&self) -> &dyn HostFs {
        self.host.as_ref()
    }

    /// The path comparison rule.
    pub fn comparison(&self) -> PathComparison {
        self.config.comparison
    }

    /// A copy of the current record.
    pub fn snapshot(&self) -> DialogSettings {
        self.state.lock().clone()
    }

    /// Runs `f` against the current record under the lock.
    pub fn read<R>(&self, f: impl FnOnce(&DialogSettings) -> R) -> R {
        f(&*self.state.lock())
    }

    /// Writes the current record to disk.
    ///
    /// Fails with [`Error::Storage`] when the document cannot be written.
    pub fn try_save(&self) -> Result<()> {
        let state = self.state.lock();
        self.write_document(&state).map_err(Error::from)
    }

    /// Number of saves that have failed since the store was opened.
    pub fn save_failures(&self) -> usize {
        self.save_failures.load(Ordering::Relaxed)
    }

    /// Applies `f` to the record and saves it.
    pub fn update(&self, f: impl FnOnce(&mut DialogSettings)) {
        let mut state = self.state.lock();
        f(&mut *state);
        self.persist(&state);
    }

    /// Records a visit to `dir` in the navigation history.
    pub fn record_navigation(&self, dir: impl AsRef<Path>) {
        self.record_dir(dir.as_ref(), "navigation", |s| {
            (&mut s.navigation_history, s.limits.max_history_items)
        });
    }

    /// Records `dir` as a frequently used folder.
    pub fn record_frequent_folder(&self, dir: impl AsRef<Path>) {
        self.record_dir(dir.as_ref(), "frequent folder", |s| {
            (&mut s.frequent_folders, s.limits.max_frequent_folders)
        });
    }

    /// Records `file` as recently opened.
    pub fn record_recent_file(&self, file: impl AsRef<Path>) {
        let file = canonical_form(file);
        if !self.host.file_exists(&file) {
            tracing::debug!("not recording missing recent file {}", file.display());
            return;
        }
        let mut state = self.state.lock();
        let cap = state.limits.max_recent_files;
        push_front_unique(&mut state.recent_files, file, cap, self.config.comparison);
        self.persist(&state);
    }

    /// Forgets every recently opened file.
    pub fn clear_recent_files(&self) {
        let mut state = self.state.lock();
        if state.recent_files.is_empty() {
            return;
        }
        state.recent_files.clear();
        self.persist(&state);
    }

    /// Remembers the directory of the last completed dialog of `kind`.
    pub fn set_last_directory(&self, kind: DialogKind, dir: impl AsRef<Path>) {
        let dir = canonical_form(dir);
        if !self.host.dir_exists(&dir) {
            tracing::debug!("not recording missing last directory {}", dir.display());
            return;
        }
        let mut state = self.state.lock();
        match kind {
            DialogKind::Open => state.last_open_directory = Some(dir),
            DialogKind::Save => state.last_save_directory = Some(dir),
        }
        self.persist(&state);
    }

    /// Adds a user favorite.
    ///
    /// Nothing happens if `name` is blank, `path` is not an existing
    /// directory or a favorite for `path` already exists. Returns true if the
    /// favorite was added.
    pub fn add_favorite(&self, name: &str, path: impl AsRef<Path>) -> bool {
        let name = name.trim();
        let path = canonical_form(path);
        if name.is_empty() || !self.host.dir_exists(&path) {
            tracing::debug!("refusing favorite '{}' at {}", name, path.display());
            return false;
        }
        let mut state = self.state.lock();
        if state.favorite(&path, self.config.comparison).is_some() {
            return false;
        }
        state.favorite_folders.push(Favorite::user(name, path));
        self.persist(&state);
        true
    }

    /// Removes the user favorite for `path`.
    ///
    /// Built-in favorites are left in place. Returns true if a favorite was
    /// removed.
    pub fn remove_favorite(&self, path: impl AsRef<Path>) -> bool {
        let path = canonical_form(path);
        let comparison = self.config.comparison;
        let mut state = self.state.lock();
        let Some(index) = state
            .favorite_folders
            .iter()
            .position(|f| f.removable && comparison.same_path(&f.path, &path))
        else {
            return false;
        };
        state.favorite_folders.remove(index);
        self.persist(&state);
        true
    }

    /// Remembered directories, best first.
    pub fn ranked(&self, max_items: usize) -> Vec<PathBuf> {
        let state = self.state.lock();
        rank(
            &state,
            self.host.as_ref(),
            &self.config.ranking,
            self.config.comparison,
            max_items,
        )
    }

    /// Folders related to `current`.
    pub fn related(&self, current: &Path, max_items: usize) -> Vec<PathBuf> {
        let state = self.state.lock();
        related_folders(
            &state,
            self.host.as_ref(),
            self.config.comparison,
            current,
            max_items,
        )
    }

    fn record_dir(
        &self,
        dir: &Path,
        what: &str,
        list: impl FnOnce(&mut DialogSettings) -> (&mut Vec<PathBuf>, usize),
    ) {
        let dir = canonical_form(dir);
        if !self.host.dir_exists(&dir) {
            tracing::debug!("not recording missing {} {}", what, dir.display());
            return;
        }
        let mut state = self.state.lock();
        let (entries, cap) = list(&mut *state);
        push_front_unique(entries, dir, cap, self.config.comparison);
        self.persist(&state);
    }

    fn persist(&self, state: &DialogSettings) {
        if let Err(e) = self.write_document(state) {
            self.save_failures.fetch_add(1, Ordering::Relaxed);
            tracing::warn!("failed to save dialog state: {}", e);
        }
    }

    fn write_document(&self, state: &DialogSettings) -> StorageResult<()> {
        let Some(path) = &self.config.storage_path else {
            return Err(StorageError::no_location());
        };
        let json = serde_json::to_string_pretty(state)
            .map_err(|e| StorageError::invalid_data(path, e))?;
        AtomicWriter::write_all_to(path, json.as_bytes())
    }
}

impl std::fmt::Debug for DialogStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DialogStateStore")
            .field("config", &self.config)
            .field("save_failures", &self.save_failures())
            .finish_non_exhaustive()
    }
}

/// Lazily opened dialog state.
///
/// The store is opened on first access; concurrent first accesses still
/// load the document exactly once.
pub struct LazyDialogState {
    config: StoreConfig,
    host: Arc<dyn HostFs>,
    cell: OnceLock<SharedDialogState>,
}

impl LazyDialogState {
    /// Creates an unopened handle.
    pub fn new(config: StoreConfig, host: Arc<dyn HostFs>) -> Self {
        Self {
            config,
            host,
            cell: OnceLock::new(),
        }
    }

    /// Returns the store, opening it on first call.
    pub fn get(&self) -> &SharedDialogState {
        self.cell.get_or_init(|| {
            tracing::debug!("loading dialog state");
            Arc::new(DialogStateStore::open(
                self.config.clone(),
                Arc::clone(&self.host),
            ))
        })
    }

    /// Returns true once the store has been opened.
    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

impl std::fmt::Debug for LazyDialogState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LazyDialogState")
            .field("config", &self.config)
            .field("loaded", &self.is_loaded())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dialog::testing::TempHost;
    use crate::file::{StorageErrorKind, WellKnownDir};

    fn open(host: &Arc<TempHost>) -> DialogStateStore {
        let config = StoreConfig::at(host.root().join("state").join("settings.json"))
            .with_comparison(PathComparison::CaseSensitive);
        DialogStateStore::open(config, host.clone())
    }

    #[test]
    fn test_open_missing_document_seeds_favorites() {
        let host = Arc::new(TempHost::new());
        let store = open(&host);
        let state = store.snapshot();
        assert_eq!(state.favorite_folders.len(), 6);
        assert_eq!(
            state.favorite_folders[1].path,
            host.known(WellKnownDir::Documents)
        );
        assert_eq!(store.save_failures(), 0);
    }

    #[test]
    fn test_corrupt_document_yields_defaults() {
        let host = Arc::new(TempHost::new());
        let path = host.touch("state/settings.json");
        fs::write(&path, "{ not json").unwrap();

        let store = open(&host);
        assert!(store.snapshot().navigation_history.is_empty());

        let err = DialogStateStore::read_document(&path).unwrap_err();
        assert_eq!(err.kind(), StorageErrorKind::InvalidData);
    }

    #[test]
    fn test_recent_files_capped_deduped_mru() {
        let host = Arc::new(TempHost::new());
        let store = open(&host);
        store.update(|s| s.limits.max_recent_files = 3);

        let files: Vec<PathBuf> = (0..5)
            .map(|i| host.touch(&format!("files/f{i}.txt")))
            .collect();
        for f in &files {
            store.record_recent_file(f);
        }
        store.record_recent_file(&files[3]);

        let recent = store.snapshot().recent_files;
        assert_eq!(recent, vec![files[3].clone(), files[4].clone(), files[2].clone()]);
    }

    #[test]
    fn test_missing_paths_are_not_recorded() {
        let host = Arc::new(TempHost::new());
        let store = open(&host);
        let dir = host.mkdir("dir");

        store.record_navigation(host.root().join("nope"));
        store.record_frequent_folder(host.root().join("nope"));
        store.record_recent_file(&dir);
        store.set_last_directory(DialogKind::Open, host.root().join("nope"));

        let state = store.snapshot();
        assert!(state.navigation_history.is_empty());
        assert!(state.frequent_folders.is_empty());
        assert!(state.recent_files.is_empty());
        assert_eq!(state.last_open_directory, None);
    }

    #[test]
    fn test_paths_are_canonicalized() {
        let host = Arc::new(TempHost::new());
        let store = open(&host);
        let dir = host.mkdir("a/b");

        store.record_navigation(host.root().join("a/./b/../b"));
        store.record_navigation(&dir);

        assert_eq!(store.snapshot().navigation_history, vec![dir]);
    }

    #[test]
    fn test_favorites_add_and_remove() {
        let host = Arc::new(TempHost::new());
        let store = open(&host);
        let work = host.mkdir("work");

        assert!(!store.add_favorite("  ", &work));
        assert!(!store.add_favorite("Gone", host.root().join("gone")));
        assert!(store.add_favorite("Work", &work));
        assert!(!store.add_favorite("Work again", &work));
        assert_eq!(store.snapshot().favorite_folders.len(), 7);

        let documents = host.known(WellKnownDir::Documents);
        assert!(!store.remove_favorite(&documents));
        assert!(store.remove_favorite(&work));
        assert_eq!(store.snapshot().favorite_folders.len(), 6);
    }

    #[test]
    fn test_clear_recent_files_persists() {
        let host = Arc::new(TempHost::new());
        let file = host.touch("docs/a.txt");
        let store = open(&host);
        store.record_recent_file(&file);
        assert_eq!(store.snapshot().recent_files, vec![file]);

        store.clear_recent_files();
        assert!(store.snapshot().recent_files.is_empty());
        assert!(open(&host).snapshot().recent_files.is_empty());
    }

    #[test]
    fn test_load_drops_duplicates_and_excess() {
        let host = Arc::new(TempHost::new());
        let dirs: Vec<PathBuf> = (0..12).map(|i| host.mkdir(&format!("freq{i:02}"))).collect();
        let mut frequent = dirs.clone();
        frequent.push(dirs[0].clone());
        let document = DialogSettings {
            frequent_folders: frequent,
            ..Default::default()
        };
        let path = host.root().join("state").join("settings.json");
        AtomicWriter::write_all_to(&path, serde_json::to_string(&document).unwrap().as_bytes())
            .unwrap();

        let loaded = open(&host).snapshot().frequent_folders;
        assert_eq!(loaded, dirs[..10].to_vec());
    }

    #[test]
    fn test_mutations_persist() {
        let host = Arc::new(TempHost::new());
        let dir = host.mkdir("themes");
        {
            let store = open(&host);
            store.record_navigation(&dir);
            store.set_last_directory(DialogKind::Save, &dir);
        }

        let reopened = open(&host);
        let state = reopened.snapshot();
        assert_eq!(state.navigation_history, vec![dir.clone()]);
        assert_eq!(state.last_save_directory, Some(dir));
    }

    #[test]
    fn test_reload_prunes_deleted_entries() {
        let host = Arc::new(TempHost::new());
        let dir = host.mkdir("temp");
        open(&host).record_navigation(&dir);

        fs::remove_dir(&dir).unwrap();
        assert!(open(&host).snapshot().navigation_history.is_empty());
    }

    #[test]
    fn test_save_failure_is_counted() {
        let host = Arc::new(TempHost::new());
        let blocker = host.touch("blocker");
        let config = StoreConfig::at(blocker.join("settings.json"));
        let store = DialogStateStore::open(config, host.clone());

        store.record_navigation(host.mkdir("dir"));
        assert_eq!(store.save_failures(), 1);
        assert_eq!(store.snapshot().navigation_history.len(), 1);
        assert!(matches!(store.try_save(), Err(Error::Storage(_))));
    }

    #[test]
    fn test_in_memory_store() {
        let host = Arc::new(TempHost::new());
        let store = DialogStateStore::open(StoreConfig::in_memory(), host.clone());
        match store.try_save() {
            Err(Error::Storage(e)) => assert_eq!(e.kind(), StorageErrorKind::NoLocation),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_lazy_state_loads_once() {
        let host = Arc::new(TempHost::new());
        let config = StoreConfig::at(host.root().join("lazy.json"));
        let lazy = Arc::new(LazyDialogState::new(config, host.clone()));
        assert!(!lazy.is_loaded());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let lazy = Arc::clone(&lazy);
                std::thread::spawn(move || Arc::as_ptr(lazy.get()) as usize)
            })
            .collect();
        let ptrs: Vec<usize> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert!(lazy.is_loaded());
        assert!(ptrs.iter().all(|p| *p == ptrs[0]));
    }

    #[test]
    fn test_concurrent_mutations() {
        let host = Arc::new(TempHost::new());
        let store: SharedDialogState = Arc::new(open(&host));
        let dirs: Vec<PathBuf> = (0..8).map(|i| host.mkdir(&format!("c{i}"))).collect();

        let handles: Vec<_> = dirs
            .iter()
            .cloned()
            .map(|dir| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || store.record_navigation(dir))
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let reopened = open(&host);
        let mut saved = reopened.snapshot().navigation_history;
        saved.sort();
        let mut expected = dirs;
        expected.sort();
        assert_eq!(saved, expected);
    }
}
