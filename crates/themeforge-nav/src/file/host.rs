//! Host filesystem queries used by the navigation core.
//!
//! Everything the core knows about the disk comes through [`HostFs`]. The
//! answers are never cached beyond one operation, so a directory deleted
//! between two calls is simply reported missing on the second.

use std::io;
use std::path::{Path, PathBuf};

use directories::{BaseDirs, UserDirs};

/// A platform well-known directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WellKnownDir {
    /// The user's desktop.
    Desktop,
    /// The user's documents folder.
    Documents,
    /// The user's downloads folder.
    Downloads,
    /// The user's pictures folder.
    Pictures,
    /// The user's music folder.
    Music,
    /// The user's videos folder.
    Videos,
    /// The user's home directory.
    Home,
}

impl WellKnownDir {
    /// The directories seeded as built-in favorites, in display order.
    pub const BUILT_IN_FAVORITES: [WellKnownDir; 6] = [
        WellKnownDir::Desktop,
        WellKnownDir::Documents,
        WellKnownDir::Downloads,
        WellKnownDir::Pictures,
        WellKnownDir::Music,
        WellKnownDir::Videos,
    ];

    /// Display label for this directory.
    pub fn label(self) -> &'static str {
        match self {
            WellKnownDir::Desktop => "Desktop",
            WellKnownDir::Documents => "Documents",
            WellKnownDir::Downloads => "Downloads",
            WellKnownDir::Pictures => "Pictures",
            WellKnownDir::Music => "Music",
            WellKnownDir::Videos => "Videos",
            WellKnownDir::Home => "Home",
        }
    }
}

/// Filesystem ground truth consumed by the navigation core.
pub trait HostFs: Send + Sync {
    /// Returns true if `path` is an existing directory.
    fn dir_exists(&self, path: &Path) -> bool;
    /// Returns true if `path` is an existing regular file.
    fn file_exists(&self, path: &Path) -> bool;
    /// Lists the child directories of `dir`, sorted by name.
    fn child_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
    /// Lists the child files of `dir`, sorted by name.
    fn child_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
    /// Returns the parent directory of `path`, if it has one.
    fn parent(&self, path: &Path) -> Option<PathBuf> {
        path.parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
    /// Returns the platform location of a well-known directory.
    fn well_known_dir(&self, kind: WellKnownDir) -> Option<PathBuf>;
}

/// Default implementation backed by `std::fs` and the `directories` crate.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdHostFs;

impl StdHostFs {
    fn list(dir: &Path, want_dirs: bool) -> io::Result<Vec<PathBuf>> {
        let mut out = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            // Unreadable entries are skipped, not fatal.
            let Ok(entry) = entry else { continue };
            let path = entry.path();
            let is_dir = path.is_dir();
            if is_dir == want_dirs && (is_dir || path.is_file()) {
                out.push(path);
            }
        }
        out.sort_by_key(|p| p.file_name().map(|n| n.to_string_lossy().to_lowercase()));
        Ok(out)
    }
}

impl HostFs for StdHostFs {
    fn dir_exists(&self, path: &Path) -> bool {
        !path.as_os_str().is_empty() && path.is_dir()
    }

    fn file_exists(&self, path: &Path) -> bool {
        !path.as_os_str().is_empty() && path.is_file()
    }

    fn child_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        Self::list(dir, true)
    }

    fn child_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        Self::list(dir, false)
    }

    fn well_known_dir(&self, kind: WellKnownDir) -> Option<PathBuf> {
        if kind == WellKnownDir::Home {
            return BaseDirs::new().map(|d| d.home_dir().to_path_buf());
        }
        let dirs = UserDirs::new()?;
        let found = match kind {
            WellKnownDir::Desktop => dirs.desktop_dir(),
            WellKnownDir::Documents => dirs.document_dir(),
            WellKnownDir::Downloads => dirs.download_dir(),
            WellKnownDir::Pictures => dirs.picture_dir(),
            WellKnownDir::Music => dirs.audio_dir(),
            WellKnownDir::Videos => dirs.video_dir(),
            WellKnownDir::Home => None,
        };
        found
            .map(Path::to_path_buf)
            // XDG user dirs may be unset; fall back to the conventional folder.
            .or_else(|| Some(dirs.home_dir().join(kind.label())))
    }
}
