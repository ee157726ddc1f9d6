//! Atomic replacement of the persisted state document.

use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use super::error::{StorageError, StorageResult};

/// Writes a whole document to a temporary sibling file and renames it over
/// the target on commit.
///
/// A reader never observes a half-written document: the target either keeps
/// its previous contents or holds the new ones. Dropping the writer without
/// committing removes the temporary file.
pub struct AtomicWriter {
    target_path: PathBuf,
    temp_path: PathBuf,
    writer: Option<BufWriter<fs::File>>,
    committed: bool,
}

impl AtomicWriter {
    /// Creates a new atomic writer for the given target path.
    ///
    /// Missing parent directories are created first.
    pub fn new(path: impl AsRef<Path>) -> StorageResult<Self> {
        let target_path = path.as_ref().to_path_buf();

        let parent = target_path.parent().unwrap_or(Path::new("."));
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| StorageError::from_io(e, parent))?;
        }
        let file_name = target_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "state".to_string());

        let temp_name = format!(".{}.tmp.{}", file_name, std::process::id());
        let temp_path = parent.join(temp_name);

        let file =
            fs::File::create(&temp_path).map_err(|e| StorageError::from_io(e, &target_path))?;

        Ok(Self {
            target_path,
            temp_path,
            writer: Some(BufWriter::new(file)),
            committed: false,
        })
    }

    /// Writes `contents` to `path` atomically.
    pub fn write_all_to(path: impl AsRef<Path>, contents: &[u8]) -> StorageResult<()> {
        let mut writer = Self::new(path)?;
        writer.write_bytes(contents)?;
        writer.commit()
    }

    /// Returns the target path.
    pub fn target_path(&self) -> &Path {
        &self.target_path
    }

    /// Writes all bytes to the temporary file.
    pub fn write_bytes(&mut self, buf: &[u8]) -> StorageResult<()> {
        let target = &self.target_path;
        match self.writer.as_mut() {
            Some(w) => w.write_all(buf).map_err(|e| StorageError::from_io(e, target)),
            None => Err(StorageError::from_io(
                std::io::Error::other("AtomicWriter already consumed"),
                target,
            )),
        }
    }

    /// Flushes, syncs and renames the temporary file over the target.
    pub fn commit(mut self) -> StorageResult<()> {
        let Some(mut writer) = self.writer.take() else {
            return Err(StorageError::from_io(
                std::io::Error::other("AtomicWriter already consumed"),
                &self.target_path,
            ));
        };

        writer
            .flush()
            .map_err(|e| StorageError::from_io(e, &self.target_path))?;
        writer
            .get_ref()
            .sync_all()
            .map_err(|e| StorageError::from_io(e, &self.target_path))?;

        // The handle must be closed before the rename on Windows.
        drop(writer);

        fs::rename(&self.temp_path, &self.target_path)
            .map_err(|e| StorageError::from_io(e, &self.target_path))?;

        self.committed = true;
        Ok(())
    }
}

impl Drop for AtomicWriter {
    fn drop(&mut self) {
        if !self.committed {
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

impl std::fmt::Debug for AtomicWriter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AtomicWriter")
            .field("target_path", &self.target_path)
            .field("temp_path", &self.temp_path)
            .field("committed", &self.committed)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parents_and_replaces() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested").join("state.json");

        AtomicWriter::write_all_to(&target, b"first").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "first");

        AtomicWriter::write_all_to(&target, b"second").unwrap();
        assert_eq!(fs::read_to_string(&target).unwrap(), "second");

        let leftovers: Vec<_> = fs::read_dir(target.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().contains(".tmp."))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[test]
    fn test_drop_without_commit_keeps_target() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("state.json");
        fs::write(&target, "original").unwrap();

        {
            let mut writer = AtomicWriter::new(&target).unwrap();
            writer.write_bytes(b"partial").unwrap();
        }

        assert_eq!(fs::read_to_string(&target).unwrap(), "original");
    }

    #[test]
    fn test_parent_is_a_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        fs::write(&blocker, "not a dir").unwrap();

        let result = AtomicWriter::write_all_to(blocker.join("state.json"), b"{}");
        assert!(result.is_err());
    }
}
