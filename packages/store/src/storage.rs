//! Keyed string storage seam.
//!
//! The original deployment kept the report set under a single browser
//! `localStorage` key. This module keeps that contract — opaque string
//! blobs addressed by key — so the store never knows where the bytes live.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use thiserror::Error;

/// Errors from the storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage exists but refused the operation (full, read-only, ...).
    #[error("Storage unavailable: {message}")]
    Unavailable {
        /// Description of what went wrong.
        message: String,
    },
}

/// Keyed string storage.
///
/// All failures are recoverable: a failed write leaves previously stored
/// data intact and the caller's in-memory state is expected to be unchanged.
pub trait Storage {
    /// Reads the blob stored under `key`. Returns `None` if the key has
    /// never been written.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the underlying storage cannot be read.
    fn read(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the value cannot be written.
    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed storage: one `<key>.json` file per key under a data
/// directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Creates storage rooted at `dir`. The directory is created lazily on
    /// first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Creates storage at the default data directory
    /// (`EMERGENCY_MAP_DATA_DIR`, falling back to `data/`).
    #[must_use]
    pub fn in_default_location() -> Self {
        Self::new(data_dir())
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for FileStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        ensure_dir(&self.dir)?;
        let path = self.path_for(key);
        std::fs::write(&path, value)?;
        log::debug!("Wrote {} bytes to {}", value.len(), path.display());
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions.
///
/// Clones share the same entries, mirroring how two handles to the same
/// browser storage see each other's writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStorage {
    /// Creates empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn read(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Returns the data directory: `EMERGENCY_MAP_DATA_DIR` if set, otherwise
/// `data/` relative to the working directory.
#[must_use]
pub fn data_dir() -> PathBuf {
    std::env::var("EMERGENCY_MAP_DATA_DIR")
        .map_or_else(|_| PathBuf::from("data"), PathBuf::from)
}

/// Ensures a directory exists, creating it if necessary.
///
/// # Errors
///
/// Returns an I/O error if the directory cannot be created.
pub fn ensure_dir(path: &Path) -> std::io::Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_roundtrips_a_blob() {
        let tmp = std::env::temp_dir().join("emergency_map_storage_test");
        let _ = std::fs::remove_dir_all(&tmp);

        let mut storage = FileStorage::new(&tmp);
        assert!(storage.read("reports").unwrap().is_none());

        storage.write("reports", "[]").unwrap();
        assert_eq!(storage.read("reports").unwrap().unwrap(), "[]");

        storage.write("reports", r#"[{"a":1}]"#).unwrap();
        assert_eq!(storage.read("reports").unwrap().unwrap(), r#"[{"a":1}]"#);

        let _ = std::fs::remove_dir_all(&tmp);
    }

    #[test]
    fn memory_storage_clones_share_entries() {
        let mut a = MemoryStorage::new();
        let b = a.clone();
        a.write("k", "v").unwrap();
        assert_eq!(b.read("k").unwrap().unwrap(), "v");
    }

    #[test]
    fn missing_key_reads_as_none() {
        let storage = MemoryStorage::new();
        assert!(storage.read("nope").unwrap().is_none());
    }
}
