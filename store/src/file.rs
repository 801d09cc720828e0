//! File-backed blob store with atomic replacement.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{BlobStore, StoreError, StoreResult};

/// A blob store backed by a single file.
///
/// `save` writes to a sibling temporary file, syncs it, and renames it
/// over the destination. The temporary lives in the same directory as the
/// destination so the rename never crosses filesystems; a reader therefore
/// observes either the old blob or the new one, never a torn write.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store over the given file path. The file need not exist.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl BlobStore for FileStore {
    fn load(&self) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Storage(e.to_string())),
        }
    }

    fn save(&self, bytes: &[u8]) -> StoreResult<()> {
        let tmp = self.tmp_path();
        let mut file = File::create(&tmp).map_err(|e| StoreError::Storage(e.to_string()))?;
        file.write_all(bytes)
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        file.sync_all()
            .map_err(|e| StoreError::Storage(e.to_string()))?;
        fs::rename(&tmp, &self.path).map_err(|e| StoreError::Storage(e.to_string()))?;
        Ok(())
    }

    fn delete(&self) -> StoreResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Storage(e.to_string())),
        }
    }

    fn exists(&self) -> StoreResult<bool> {
        Ok(self.path.exists())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn basic_operations() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("voiceprint.dat"));

        assert_eq!(store.load().unwrap(), None);
        assert!(!store.exists().unwrap());

        store.save(b"voiceprint-bytes").unwrap();
        assert_eq!(store.load().unwrap(), Some(b"voiceprint-bytes".to_vec()));
        assert!(store.exists().unwrap());

        store.delete().unwrap();
        assert_eq!(store.load().unwrap(), None);
        assert!(!store.exists().unwrap());
    }

    #[test]
    fn save_replaces_previous_blob() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("voiceprint.dat"));
        store.save(b"first enrollment").unwrap();
        store.save(b"re-enrollment").unwrap();
        assert_eq!(store.load().unwrap(), Some(b"re-enrollment".to_vec()));
    }

    #[test]
    fn no_temp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("voiceprint.dat"));
        store.save(b"blob").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("voiceprint.dat")]);
    }

    #[test]
    fn delete_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("voiceprint.dat"));
        store.delete().unwrap();
        store.save(b"blob").unwrap();
        store.delete().unwrap();
        store.delete().unwrap();
        assert!(!store.exists().unwrap());
    }

    #[test]
    fn save_to_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("missing").join("voiceprint.dat"));
        assert!(store.save(b"blob").is_err());
    }
}
