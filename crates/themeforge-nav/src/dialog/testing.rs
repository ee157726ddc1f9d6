//! Scratch host used by the unit tests.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use crate::file::{HostFs, StdHostFs, WellKnownDir};

/// A [`HostFs`] whose well-known directories live in a temporary directory.
pub(crate) struct TempHost {
    dir: TempDir,
}

impl TempHost {
    pub(crate) fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        for kind in WellKnownDir::BUILT_IN_FAVORITES {
            fs::create_dir(dir.path().join(kind.label())).unwrap();
        }
        Self { dir }
    }

    pub(crate) fn root(&self) -> &Path {
        self.dir.path()
    }

    pub(crate) fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    pub(crate) fn touch(&self, rel: &str) -> PathBuf {
        let path = self.dir.path().join(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, b"").unwrap();
        path
    }

    pub(crate) fn known(&self, kind: WellKnownDir) -> PathBuf {
        self.well_known_dir(kind).unwrap()
    }
}

impl HostFs for TempHost {
    fn dir_exists(&self, path: &Path) -> bool {
        StdHostFs.dir_exists(path)
    }

    fn file_exists(&self, path: &Path) -> bool {
        StdHostFs.file_exists(path)
    }

    fn child_dirs(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        StdHostFs.child_dirs(dir)
    }

    fn child_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        StdHostFs.child_files(dir)
    }

    fn well_known_dir(&self, kind: WellKnownDir) -> Option<PathBuf> {
        match kind {
            WellKnownDir::Home => Some(self.dir.path().to_path_buf()),
            _ => Some(self.dir.path().join(kind.label())),
        }
    }
}
