//! Storage backends
//!
//! - [`FileStorage`] keeps the blob in a file. Writes go to a temporary file
//!   in the same directory which is then renamed over the destination, so an
//!   interrupted write never leaves a half-written data file behind.
//! - [`MemoryStorage`] keeps the blob in memory and can simulate write
//!   failures.

use crate::core::traits::Storage;
use crate::types::LedgerError;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::PathBuf;
use tempfile::NamedTempFile;

/// File-backed storage with write-replace semantics
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    fn unavailable(&self, error: impl ToString) -> LedgerError {
        LedgerError::storage_unavailable(&self.location(), error)
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, LedgerError> {
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(self.unavailable(e)),
        }
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), LedgerError> {
        let dir = self.parent_dir();
        fs::create_dir_all(&dir).map_err(|e| self.unavailable(e))?;

        let mut file = NamedTempFile::new_in(&dir).map_err(|e| self.unavailable(e))?;
        file.write_all(bytes).map_err(|e| self.unavailable(e))?;
        file.as_file().sync_all().map_err(|e| self.unavailable(e))?;
        file.persist(&self.path)
            .map_err(|e| self.unavailable(e.error))?;

        Ok(())
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

/// In-memory storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    data: Option<Vec<u8>>,
    fail_writes: bool,
    writes: usize,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage that already holds `bytes`
    pub fn with_data(bytes: Vec<u8>) -> Self {
        MemoryStorage {
            data: Some(bytes),
            ..Self::default()
        }
    }

    /// Make every subsequent write fail (or succeed again)
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }

    pub fn data(&self) -> Option<&[u8]> {
        self.data.as_deref()
    }

    /// Number of successful writes so far
    pub fn write_count(&self) -> usize {
        self.writes
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<Vec<u8>>, LedgerError> {
        Ok(self.data.clone())
    }

    fn write(&mut self, bytes: &[u8]) -> Result<(), LedgerError> {
        if self.fail_writes {
            return Err(LedgerError::storage_unavailable(
                &self.location(),
                "simulated write failure",
            ));
        }
        self.data = Some(bytes.to_vec());
        self.writes += 1;
        Ok(())
    }

    fn location(&self) -> String {
        "memory".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_file_storage_missing_file_reads_none() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("expenses.dat"));

        assert_eq!(storage.read().unwrap(), None);
    }

    #[test]
    fn test_file_storage_write_then_read() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("expenses.dat"));

        storage.write(b"first").unwrap();
        storage.write(b"second").unwrap();

        assert_eq!(storage.read().unwrap(), Some(b"second".to_vec()));
    }

    #[test]
    fn test_file_storage_leaves_no_temporary_files() {
        let dir = tempdir().unwrap();
        let mut storage = FileStorage::new(dir.path().join("expenses.dat"));

        storage.write(b"payload").unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("expenses.dat")]);
    }

    #[test]
    fn test_file_storage_creates_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("ledger").join("expenses.dat");
        let mut storage = FileStorage::new(&path);

        storage.write(b"payload").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_file_storage_unreadable_path_is_unavailable() {
        let dir = tempdir().unwrap();
        // a directory cannot be read as a file
        let storage = FileStorage::new(dir.path());

        let result = storage.read();
        assert!(matches!(
            result,
            Err(LedgerError::StorageUnavailable { .. })
        ));
    }

    #[test]
    fn test_file_storage_failed_replace_keeps_previous_data() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("expenses.dat");
        // The rename cannot replace a non-empty directory
        fs::create_dir(&path).unwrap();
        fs::write(path.join("previous.dat"), b"previous").unwrap();
        let mut storage = FileStorage::new(&path);

        let result = storage.write(b"replacement");

        assert!(matches!(
            result,
            Err(LedgerError::StorageUnavailable { .. })
        ));
        assert_eq!(fs::read(path.join("previous.dat")).unwrap(), b"previous");
        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("expenses.dat")]);
    }

    #[test]
    fn test_memory_storage_simulated_failure() {
        let mut storage = MemoryStorage::with_data(b"old".to_vec());
        storage.set_fail_writes(true);

        assert!(storage.write(b"new").is_err());
        assert_eq!(storage.data(), Some(&b"old"[..]));
        assert_eq!(storage.write_count(), 0);

        storage.set_fail_writes(false);
        storage.write(b"new").unwrap();
        assert_eq!(storage.data(), Some(&b"new"[..]));
        assert_eq!(storage.write_count(), 1);
    }
}
