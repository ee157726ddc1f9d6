//! Path normalization, comparison and the per-user storage location.
//!
//! Persisted lists store paths in a canonical form: absolute, with `.` and
//! `..` components removed lexically. Symbolic links are left alone so that
//! a path the user navigated to is remembered the way they typed it.

use std::path::{Component, Path, PathBuf};

use directories::ProjectDirs;

use super::error::{StorageError, StorageResult};

/// Application name used for the per-user storage directory.
pub const APP_NAME: &str = "ThemeForge";

/// File name of the persisted dialog state document.
pub const SETTINGS_FILE_NAME: &str = "FileDialogSettings.json";

/// Converts a path to an absolute path without resolving symlinks.
///
/// Relative paths are joined onto the current working directory. When the
/// working directory cannot be determined the path is returned unchanged.
pub fn absolute_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

/// Normalizes a path by removing `.` and resolving `..` lexically.
///
/// ```ignore
/// assert_eq!(normalize_path("/foo/./bar/../baz"), PathBuf::from("/foo/baz"));
/// ```
pub fn normalize_path(path: impl AsRef<Path>) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.as_ref().components() {
        match component {
            Component::Prefix(p) => result.push(p.as_os_str()),
            Component::RootDir => result.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !result.pop() {
                    result.push("..");
                }
            }
            Component::Normal(c) => result.push(c),
        }
    }
    if result.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        result
    }
}

/// Returns the canonical form used for every persisted path.
pub fn canonical_form(path: impl AsRef<Path>) -> PathBuf {
    normalize_path(absolute_path(path))
}

/// Returns the default location of the persisted dialog state document.
///
/// - **Linux**: `~/.config/themeforge/FileDialogSettings.json`
/// - **macOS**: `~/Library/Application Support/ThemeForge/FileDialogSettings.json`
/// - **Windows**: `%APPDATA%\ThemeForge\config\FileDialogSettings.json`
pub fn default_settings_path() -> StorageResult<PathBuf> {
    ProjectDirs::from("", "", APP_NAME)
        .map(|dirs| dirs.config_dir().join(SETTINGS_FILE_NAME))
        .ok_or_else(StorageError::no_location)
}

/// How two paths are compared for equality when deduplicating.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathComparison {
    /// Byte-for-byte comparison of path components.
    CaseSensitive,
    /// Unicode-lowercased comparison of path components.
    CaseInsensitive,
}

impl PathComparison {
    /// The convention of the platform's default filesystem.
    pub fn platform_default() -> Self {
        if cfg!(any(target_os = "windows", target_os = "macos")) {
            PathComparison::CaseInsensitive
        } else {
            PathComparison::CaseSensitive
        }
    }

    /// Returns true if both paths name the same location under this rule.
    pub fn same_path(self, a: &Path, b: &Path) -> bool {
        let mut left = a.components();
        let mut right = b.components();
        loop {
            match (left.next(), right.next()) {
                (None, None) => return true,
                (Some(x), Some(y)) => {
                    if !self.component_eq(x, y) {
                        return false;
                    }
                }
                _ => return false,
            }
        }
    }

    /// Returns true if `path` is `base` or nested beneath it.
    pub fn starts_with(self, path: &Path, base: &Path) -> bool {
        let mut inner = path.components();
        for b in base.components() {
            match inner.next() {
                Some(p) if self.component_eq(p, b) => {}
                _ => return false,
            }
        }
        true
    }

    /// Returns true if `list` already holds a path equal to `path`.
    pub fn contains(self, list: &[PathBuf], path: &Path) -> bool {
        list.iter().any(|p| self.same_path(p, path))
    }

    fn component_eq(self, a: Component<'_>, b: Component<'_>) -> bool {
        match self {
            PathComparison::CaseSensitive => a == b,
            PathComparison::CaseInsensitive => {
                a.as_os_str().to_string_lossy().to_lowercase()
                    == b.as_os_str().to_string_lossy().to_lowercase()
            }
        }
    }
}

impl Default for PathComparison {
    fn default() -> Self {
        Self::platform_default()
    }
}

/// Returns the final component of a path for display, or the whole path
/// for roots.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .filter(|n| !n.is_empty())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path("/foo/./bar/../baz"),
            PathBuf::from("/foo/baz")
        );
        assert_eq!(normalize_path("./foo/bar/.."), PathBuf::from("foo"));
        assert_eq!(normalize_path("."), PathBuf::from("."));
    }

    #[test]
    fn test_canonical_form_is_absolute() {
        let p = canonical_form("some/relative/../dir");
        assert!(p.is_absolute());
        assert!(p.ends_with("some/dir"));
    }

    #[test]
    fn test_case_insensitive_eq() {
        let cmp = PathComparison::CaseInsensitive;
        assert!(cmp.same_path(Path::new("/Work/Themes"), Path::new("/work/THEMES")));
        assert!(!cmp.same_path(Path::new("/work/themes"), Path::new("/work/theme")));
    }

    #[test]
    fn test_case_sensitive_eq() {
        let cmp = PathComparison::CaseSensitive;
        assert!(cmp.same_path(Path::new("/work/themes"), Path::new("/work/themes/")));
        assert!(!cmp.same_path(Path::new("/Work"), Path::new("/work")));
    }

    #[test]
    fn test_starts_with_is_component_wise() {
        let cmp = PathComparison::CaseInsensitive;
        assert!(cmp.starts_with(Path::new("/a/Foo/bar"), Path::new("/a/foo")));
        assert!(!cmp.starts_with(Path::new("/a/foobar"), Path::new("/a/foo")));
        assert!(cmp.starts_with(Path::new("/a/foo"), Path::new("/a/foo")));
    }

    #[test]
    fn test_display_name() {
        assert_eq!(display_name(Path::new("/home/user/Themes")), "Themes");
        assert_eq!(display_name(Path::new("/")), "/");
    }

    #[test]
    fn test_default_settings_path_file_name() {
        if let Ok(path) = default_settings_path() {
            assert!(path.is_absolute());
            assert!(path.ends_with(SETTINGS_FILE_NAME));
        }
    }
}
