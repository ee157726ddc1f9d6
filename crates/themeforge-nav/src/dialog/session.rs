//! One open or save dialog, from construction to its result.
//!
//! A [`DialogSession`] ties the per-dialog [`PathHistory`] to the shared
//! [`DialogStateStore`](super::DialogStateStore). It starts in the directory
//! chosen by [`resolve_initial_directory`], hands out [`ListingRequest`]s as
//! the user moves around, answers the address-bar and file-name dropdowns
//! and commits the outcome to the persisted state when the dialog completes.
//!
//! # Example
//!
//! ```ignore
//! use themeforge_nav::dialog::{DialogKind, DialogOptions, DialogSession};
//!
//! let mut session = DialogSession::new(state, DialogKind::Save, DialogOptions {
//!     filter: "Themes (*.theme)|*.theme".into(),
//!     ..Default::default()
//! });
//! let plan = session.plan_save("dark")?;
//! if !plan.overwrites {
//!     let result = session.confirm_save(plan);
//! }
//! ```

use std::path::{is_separator, Path, PathBuf};

use crate::error::{Error, Result};
use crate::file::{canonical_form, display_name, WellKnownDir};

use super::favorites::FavoritesStore;
use super::filter::{parse_filter, FilterEntry};
use super::history::PathHistory;
use super::initial_dir::resolve_initial_directory;
use super::listing::{breadcrumbs, ListingRequest, PathDropdown, SuggestionItem};
use super::ranking::DEFAULT_RANKED_ITEMS;
use super::related::DEFAULT_RELATED_ITEMS;
use super::settings::DialogKind;
use super::store::SharedDialogState;

/// Maximum number of address-bar completions.
pub const MAX_ADDRESS_SUGGESTIONS: usize = 10;

/// Maximum number of entries in the default address-bar list.
pub const MAX_ADDRESS_HISTORY: usize = 20;

/// Maximum number of file-name completions.
pub const MAX_FILE_NAME_SUGGESTIONS: usize = 8;

/// Maximum number of recent file names offered in the file-name box.
pub const MAX_RECENT_FILE_NAMES: usize = 10;

/// Maximum number of folders in each group of the breadcrumb dropdown.
pub const MAX_PATH_DROPDOWN_ITEMS: usize = 5;

/// Address-bar text shorter than this gets no completions.
const MIN_ADDRESS_CHARS: usize = 2;

/// Folders offered by the default address-bar list after the history.
const ADDRESS_FOLDERS: [WellKnownDir; 4] = [
    WellKnownDir::Desktop,
    WellKnownDir::Documents,
    WellKnownDir::Pictures,
    WellKnownDir::Downloads,
];

/// How a dialog ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DialogResult {
    /// The user picked a path.
    Selected(PathBuf),
    /// The user picked several files in a multiselect open dialog.
    SelectedMany(Vec<PathBuf>),
    /// The user dismissed the dialog.
    Canceled,
}

impl DialogResult {
    /// The picked path, or the first of several.
    pub fn path(&self) -> Option<&Path> {
        self.paths().first().map(PathBuf::as_path)
    }

    /// Every picked path.
    pub fn paths(&self) -> &[PathBuf] {
        match self {
            DialogResult::Selected(path) => std::slice::from_ref(path),
            DialogResult::SelectedMany(paths) => paths,
            DialogResult::Canceled => &[],
        }
    }
}

/// Result of an open-file dialog.
pub type OpenFileDialogResult = DialogResult;

/// Result of a save-file dialog.
pub type SaveFileDialogResult = DialogResult;

/// Caller-supplied dialog parameters.
#[derive(Debug, Clone, Default)]
pub struct DialogOptions {
    /// Directory requested by the caller.
    pub initial_directory: Option<PathBuf>,
    /// A file whose directory should be shown, e.g. the document being saved.
    pub reference_file: Option<PathBuf>,
    /// Filter string in `"label|pattern|label|pattern"` form.
    pub filter: String,
    /// Whether an open dialog accepts several files at once.
    pub multiselect: bool,
}

/// A resolved save target awaiting confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavePlan {
    /// Full path that will be written.
    pub path: PathBuf,
    /// True if a file already exists there and the user should confirm.
    pub overwrites: bool,
}

/// What pressing Enter in the file-name box did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileNameAction {
    /// The text named a directory, which is now shown.
    Navigated(ListingRequest),
    /// The text named an existing file, which completes an open dialog.
    Opened(OpenFileDialogResult),
}

/// State of one open or save dialog.
#[derive(Debug)]
pub struct DialogSession {
    state: SharedDialogState,
    kind: DialogKind,
    history: PathHistory,
    filters: Vec<FilterEntry>,
    active_filter: usize,
    multiselect: bool,
}

impl DialogSession {
    /// Starts a dialog in the directory chosen by the initial-directory
    /// fallback chain.
    pub fn new(state: SharedDialogState, kind: DialogKind, options: DialogOptions) -> Self {
        let start = state.read(|settings| {
            resolve_initial_directory(
                options.initial_directory.as_deref(),
                options.reference_file.as_deref(),
                kind,
                settings,
                state.host(),
            )
        });
        let mut history = PathHistory::with_comparison(state.comparison());
        history.visit(canonical_form(&start));
        tracing::debug!("{:?} dialog starting in {}", kind, start.display());

        Self {
            state,
            kind,
            history,
            filters: parse_filter(&options.filter),
            active_filter: 0,
            multiselect: options.multiselect,
        }
    }

    /// The kind of dialog.
    pub fn kind(&self) -> DialogKind {
        self.kind
    }

    /// Whether several files can be picked at once.
    pub fn is_multiselect(&self) -> bool {
        self.multiselect
    }

    /// The session's back/forward history.
    pub fn history(&self) -> &PathHistory {
        &self.history
    }

    /// The directory currently shown.
    pub fn current_directory(&self) -> &Path {
        self.history.current().unwrap_or(Path::new("."))
    }

    /// The parsed filter entries.
    pub fn filters(&self) -> &[FilterEntry] {
        &self.filters
    }

    /// The filter entry applied to the listing.
    pub fn active_filter(&self) -> &FilterEntry {
        &self.filters[self.active_filter]
    }

    /// Selects the filter entry at `index`. Out-of-range indices are ignored.
    pub fn set_active_filter(&mut self, index: usize) -> ListingRequest {
        if index < self.filters.len() {
            self.active_filter = index;
        } else {
            tracing::debug!("ignoring filter index {} of {}", index, self.filters.len());
        }
        self.listing()
    }

    /// The listing for the current directory.
    pub fn listing(&self) -> ListingRequest {
        ListingRequest {
            directory: self.current_directory().to_path_buf(),
            filter: self.active_filter().clone(),
            show_hidden: self.state.read(|s| s.view.show_hidden_files),
        }
    }

    /// Moves to `dir`, which may be relative to the current directory.
    ///
    /// Fails with [`Error::NotFound`] if `dir` is not an existing directory.
    pub fn navigate(&mut self, dir: impl AsRef<Path>) -> Result<ListingRequest> {
        let dir = self.resolve(dir.as_ref());
        if !self.state.host().dir_exists(&dir) {
            return Err(Error::not_found(dir));
        }
        self.history.visit(dir.clone());
        self.state.record_navigation(&dir);
        Ok(self.listing())
    }

    /// Moves to the parent directory. At a root the session stays put.
    pub fn navigate_up(&mut self) -> Result<ListingRequest> {
        let parent = self.state.host().parent(self.current_directory());
        match parent {
            Some(parent) => self.navigate(parent),
            None => Ok(self.listing()),
        }
    }

    /// Steps back in the session history.
    pub fn back(&mut self) -> Result<ListingRequest> {
        self.history.back()?;
        Ok(self.listing())
    }

    /// Steps forward in the session history.
    pub fn forward(&mut self) -> Result<ListingRequest> {
        self.history.forward()?;
        Ok(self.listing())
    }

    /// Breadcrumb segments of the current directory.
    pub fn breadcrumbs(&self) -> Vec<SuggestionItem> {
        breadcrumbs(self.current_directory())
    }

    /// Folders related to the current directory.
    pub fn related_folders(&self) -> Vec<PathBuf> {
        self.state
            .related(self.current_directory(), DEFAULT_RELATED_ITEMS)
    }

    /// Recent and frequent folders for the breadcrumb dropdown. Folders that
    /// no longer exist are skipped.
    pub fn path_dropdown(&self) -> PathDropdown {
        let host = self.state.host();
        let group = |paths: &[PathBuf]| -> Vec<SuggestionItem> {
            paths
                .iter()
                .filter(|p| host.dir_exists(p))
                .take(MAX_PATH_DROPDOWN_ITEMS)
                .map(|p| SuggestionItem::new(display_name(p), p.clone()))
                .collect()
        };
        self.state.read(|s| PathDropdown {
            recent: group(&s.navigation_history),
            frequent: group(&s.frequent_folders),
        })
    }

    /// Sidebar favorites.
    pub fn favorites(&self) -> FavoritesStore {
        FavoritesStore::new(self.state.clone())
    }

    /// The dropdown shown before the user types: ranked history, then the
    /// common user folders.
    pub fn address_history(&self) -> Vec<SuggestionItem> {
        let host = self.state.host();
        let comparison = self.state.comparison();
        let mut paths = self.state.ranked(DEFAULT_RANKED_ITEMS);
        for kind in ADDRESS_FOLDERS {
            if let Some(dir) = host.well_known_dir(kind)
                && host.dir_exists(&dir)
                && !comparison.contains(&paths, &dir)
            {
                paths.push(dir);
            }
        }
        paths
            .into_iter()
            .take(MAX_ADDRESS_HISTORY)
            .map(SuggestionItem::from_path)
            .collect()
    }

    /// Completions for text typed in the address bar.
    ///
    /// Text containing a separator completes the child directories of its
    /// directory part. Any text also matches remembered directories whose
    /// full path or final name starts with it. Matching ignores case.
    pub fn suggestions(&self, partial: &str) -> Vec<SuggestionItem> {
        let partial = partial.trim();
        if partial.chars().count() < MIN_ADDRESS_CHARS {
            return Vec::new();
        }
        let host = self.state.host();
        let comparison = self.state.comparison();
        let needle = partial.to_lowercase();
        let mut paths: Vec<PathBuf> = Vec::new();

        if partial.contains(is_separator) {
            let (dir, prefix) = if partial.ends_with(is_separator) {
                (Path::new(partial), String::new())
            } else {
                let path = Path::new(partial);
                let prefix = path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_lowercase())
                    .unwrap_or_default();
                (path.parent().unwrap_or(path), prefix)
            };
            let dir = self.resolve(dir);
            match host.child_dirs(&dir) {
                Ok(children) => paths.extend(
                    children
                        .into_iter()
                        .filter(|c| display_name(c).to_lowercase().starts_with(&prefix)),
                ),
                Err(e) => tracing::trace!("no completions under {}: {}", dir.display(), e),
            }
        }

        for dir in self.state.ranked(DEFAULT_RANKED_ITEMS) {
            let full = dir.display().to_string().to_lowercase();
            let name = display_name(&dir).to_lowercase();
            if (full.starts_with(&needle) || name.starts_with(&needle))
                && !comparison.contains(&paths, &dir)
            {
                paths.push(dir);
            }
        }

        paths
            .into_iter()
            .take(MAX_ADDRESS_SUGGESTIONS)
            .map(SuggestionItem::from_path)
            .collect()
    }

    /// Files in the current directory whose name starts with `partial` and
    /// that pass the active filter.
    pub fn file_name_suggestions(&self, partial: &str) -> Vec<SuggestionItem> {
        if partial.is_empty() {
            return Vec::new();
        }
        let needle = partial.to_lowercase();
        let filter = self.active_filter();
        let files = match self.state.host().child_files(self.current_directory()) {
            Ok(files) => files,
            Err(e) => {
                tracing::trace!("no file completions: {}", e);
                return Vec::new();
            }
        };
        files
            .into_iter()
            .map(|f| (display_name(&f), f))
            .filter(|(name, _)| name.to_lowercase().starts_with(&needle) && filter.matches(name))
            .take(MAX_FILE_NAME_SUGGESTIONS)
            .map(|(name, path)| SuggestionItem::new(name, path))
            .collect()
    }

    /// Recently opened files offered in the file-name box: those in the
    /// current directory first, then the rest, restricted to the active
    /// filter. Labels are bare file names.
    pub fn recent_file_names(&self) -> Vec<SuggestionItem> {
        let host = self.state.host();
        let comparison = self.state.comparison();
        let current = self.current_directory();
        let filter = self.active_filter();

        let recent: Vec<PathBuf> = self.state.read(|s| {
            s.recent_files
                .iter()
                .filter(|f| host.file_exists(f))
                .cloned()
                .collect()
        });
        let (here, elsewhere): (Vec<PathBuf>, Vec<PathBuf>) = recent
            .into_iter()
            .partition(|f| host.parent(f).is_some_and(|p| comparison.same_path(&p, current)));

        let mut items: Vec<SuggestionItem> = Vec::new();
        for file in here.into_iter().chain(elsewhere) {
            let name = display_name(&file);
            if filter.matches(&name) && !items.iter().any(|i| i.label == name) {
                items.push(SuggestionItem::new(name, file));
            }
        }
        items.truncate(MAX_RECENT_FILE_NAMES);
        items
    }

    /// Handles Enter in the file-name box of an open dialog.
    ///
    /// A directory is navigated to; an existing file completes the dialog.
    /// Anything else fails with [`Error::NotFound`].
    pub fn submit_file_name(&mut self, text: &str) -> Result<FileNameAction> {
        let target = self.resolve(Path::new(text.trim()));
        if self.state.host().dir_exists(&target) {
            return self.navigate(target).map(FileNameAction::Navigated);
        }
        if self.state.host().file_exists(&target) {
            return self.complete_open(target).map(FileNameAction::Opened);
        }
        Err(Error::not_found(target))
    }

    /// Completes an open dialog with `file`.
    ///
    /// Records the file as recent and its directory as visited, frequently
    /// used and last opened.
    pub fn complete_open(&mut self, file: impl AsRef<Path>) -> Result<OpenFileDialogResult> {
        let file = self.resolve(file.as_ref());
        if !self.state.host().file_exists(&file) {
            return Err(Error::not_found(file));
        }
        self.state.record_recent_file(&file);
        let dir = self.state.host().parent(&file);
        if let Some(dir) = dir {
            self.commit_directory(DialogKind::Open, &dir);
        }
        tracing::debug!("open dialog selected {}", file.display());
        Ok(DialogResult::Selected(file))
    }

    /// Completes an open dialog with the files among `selection`.
    ///
    /// Directories and missing paths are skipped. Every file is recorded as
    /// recent in selection order and the directory of the first is committed
    /// as in [`complete_open`](Self::complete_open). Without multiselect only
    /// the first file is taken. Fails with [`Error::NothingSelected`] when no
    /// file remains.
    pub fn complete_open_many<I, P>(&mut self, selection: I) -> Result<OpenFileDialogResult>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let host = self.state.host();
        let comparison = self.state.comparison();
        let mut files: Vec<PathBuf> = Vec::new();
        for path in selection {
            let path = self.resolve(path.as_ref());
            if host.file_exists(&path) && !comparison.contains(&files, &path) {
                files.push(path);
            }
        }

        if !self.multiselect {
            return match files.into_iter().next() {
                Some(first) => self.complete_open(first),
                None => Err(Error::NothingSelected),
            };
        }
        if files.is_empty() {
            return Err(Error::NothingSelected);
        }

        for file in &files {
            self.state.record_recent_file(file);
        }
        let dir = self.state.host().parent(&files[0]);
        if let Some(dir) = dir {
            self.commit_directory(DialogKind::Open, &dir);
        }
        tracing::debug!("open dialog selected {} files", files.len());
        Ok(DialogResult::SelectedMany(files))
    }

    /// Resolves a typed save name against the current directory and the
    /// active filter's extension.
    ///
    /// Nothing is recorded until [`confirm_save`](Self::confirm_save).
    pub fn plan_save(&self, name: &str) -> Result<SavePlan> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::not_found(self.current_directory().join(name)));
        }
        let target = self.resolve(Path::new(name));
        let file_name = display_name(&target);
        let file_name = self.active_filter().ensure_extension(&file_name);

        let host = self.state.host();
        let Some(dir) = host.parent(&target).filter(|d| host.dir_exists(d)) else {
            return Err(Error::not_found(target));
        };
        let path = dir.join(file_name);
        if host.dir_exists(&path) {
            return Err(Error::not_found(path));
        }
        Ok(SavePlan {
            overwrites: host.file_exists(&path),
            path,
        })
    }

    /// Completes a save dialog with a plan the user has accepted.
    ///
    /// Records the target directory as visited, frequently used and last
    /// saved to.
    pub fn confirm_save(&mut self, plan: SavePlan) -> SaveFileDialogResult {
        let dir = self.state.host().parent(&plan.path);
        if let Some(dir) = dir {
            self.commit_directory(DialogKind::Save, &dir);
        }
        tracing::debug!("save dialog selected {}", plan.path.display());
        DialogResult::Selected(plan.path)
    }

    /// Dismisses the dialog without touching the persisted state.
    pub fn cancel(self) -> DialogResult {
        DialogResult::Canceled
    }

    fn commit_directory(&mut self, kind: DialogKind, dir: &Path) {
        self.history.visit(dir.to_path_buf());
        self.state.record_navigation(dir);
        self.state.record_frequent_folder(dir);
        self.state.set_last_directory(kind, dir);
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            canonical_form(path)
        } else {
            canonical_form(self.current_directory().join(path))
        }
    }
}
