//! File filters in the `"description|pattern"` format.
//!
//! A filter string is a `|`-separated list of label/pattern pairs. Each
//! pattern segment may hold several patterns separated by `;`:
//!
//! ```ignore
//! use themeforge_nav::dialog::parse_filter;
//!
//! let filters = parse_filter("Themes (*.theme;*.json)|*.theme;*.json|All files (*.*)|*.*");
//! assert_eq!(filters.len(), 2);
//! assert!(filters[0].matches("dark.THEME"));
//! ```

use crate::error::{Error, Result};

/// The catch-all pattern.
pub const ALL_FILES_PATTERN: &str = "*.*";

/// Label of the catch-all filter entry.
pub const ALL_FILES_LABEL: &str = "All files (*.*)";

/// One selectable entry of a file filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterEntry {
    /// Display label (e.g. "Text files (*.txt)").
    pub label: String,
    /// Patterns in declaration order, without duplicates.
    pub patterns: Vec<String>,
}

impl FilterEntry {
    /// Create an entry from a label and patterns.
    pub fn new<I, S>(label: impl Into<String>, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut out: Vec<String> = Vec::new();
        for p in patterns {
            let p = p.into().trim().to_string();
            if !p.is_empty() && !out.contains(&p) {
                out.push(p);
            }
        }
        Self {
            label: label.into(),
            patterns: out,
        }
    }

    /// The entry that shows every file.
    pub fn all_files() -> Self {
        Self::new(ALL_FILES_LABEL, [ALL_FILES_PATTERN])
    }

    /// Returns true if this entry contains the catch-all pattern.
    pub fn is_catch_all(&self) -> bool {
        self.patterns.iter().any(|p| p == ALL_FILES_PATTERN)
    }

    /// Check if a file name passes this entry.
    ///
    /// - `*.*` matches everything
    /// - `*.ext` and `.ext` match names ending in `.ext`, ignoring case
    /// - anything else must equal the name, ignoring case
    pub fn matches(&self, file_name: &str) -> bool {
        let name = file_name.to_lowercase();
        self.patterns.iter().any(|pattern| {
            if pattern == ALL_FILES_PATTERN {
                return true;
            }
            let pattern = pattern.to_lowercase();
            if let Some(ext) = pattern.strip_prefix('*').filter(|e| e.starts_with('.')) {
                return name.ends_with(ext);
            }
            if pattern.starts_with('.') {
                return name.ends_with(&pattern);
            }
            name == pattern
        })
    }

    /// The first concrete extension of this entry, with its leading dot.
    ///
    /// Catch-all entries and entries made only of literal names have none.
    pub fn default_extension(&self) -> Option<&str> {
        if self.is_catch_all() {
            return None;
        }
        self.patterns.iter().find_map(|p| {
            let ext = p.strip_prefix('*').unwrap_or(p);
            let rest = ext.strip_prefix('.')?;
            (!rest.is_empty() && !rest.contains(['*', '?'])).then_some(ext)
        })
    }

    /// Appends the default extension to a save name that does not already
    /// satisfy this entry.
    pub fn ensure_extension(&self, file_name: &str) -> String {
        match self.default_extension() {
            Some(ext) if !self.matches(file_name) => format!("{file_name}{ext}"),
            _ => file_name.to_string(),
        }
    }
}

impl Default for FilterEntry {
    fn default() -> Self {
        Self::all_files()
    }
}

/// Parses a filter string, failing when it yields no usable entry.
///
/// An odd trailing segment and pairs whose pattern segment is blank are
/// dropped before the emptiness check.
pub fn try_parse_filter(filter: &str) -> Result<Vec<FilterEntry>> {
    let segments: Vec<&str> = filter.split('|').collect();
    let entries: Vec<FilterEntry> = segments
        .chunks_exact(2)
        .map(|pair| FilterEntry::new(pair[0].trim(), pair[1].split(';')))
        .filter(|entry| !entry.patterns.is_empty())
        .collect();

    if entries.is_empty() {
        return Err(Error::invalid_filter(filter));
    }
    Ok(entries)
}

/// Parses a filter string, degrading to the single catch-all entry when the
/// string is empty or malformed.
pub fn parse_filter(filter: &str) -> Vec<FilterEntry> {
    match try_parse_filter(filter) {
        Ok(entries) => entries,
        Err(e) => {
            if !filter.is_empty() {
                tracing::debug!("falling back to catch-all filter: {}", e);
            }
            vec![FilterEntry::all_files()]
        }
    }
}
