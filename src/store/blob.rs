//! The persistence collaborator: a key-value blob store.
//!
//! The engine only ever needs `get`/`set` of raw strings under two logical
//! keys; everything else (JSON codecs, fail-open behavior) sits on top in
//! [`crate::store::session`].

use crate::errors::Result;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Key the record collection blob is stored under.
pub const RECORDS_KEY: &str = "records";
/// Key the settings blob is stored under.
pub const SETTINGS_KEY: &str = "settings";

/// Minimal key-value persistence: get a raw string, set a raw string.
pub trait BlobStore {
    /// Reads the blob stored under `key`; `None` when nothing is stored.
    ///
    /// # Errors
    /// Returns an error only for real I/O failures, not for missing keys.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous blob.
    ///
    /// # Errors
    /// Returns an error when the blob cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Blob store backed by one JSON file per key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    #[must_use]
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl BlobStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory blob store. The test double standing in for real persistence,
/// the way an in-memory database would for a SQL store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates a key, for tests that start from persisted state.
    pub fn preload(&self, key: &str, value: &str) {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }
}

impl BlobStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert!(store.get(RECORDS_KEY).unwrap().is_none());

        store.set(RECORDS_KEY, "[]").unwrap();
        assert_eq!(store.get(RECORDS_KEY).unwrap().as_deref(), Some("[]"));

        store.set(RECORDS_KEY, "[1]").unwrap();
        assert_eq!(store.get(RECORDS_KEY).unwrap().as_deref(), Some("[1]"));
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = std::env::temp_dir().join(format!("fintrack-test-{}", uuid::Uuid::new_v4()));
        let store = FileStore::new(&dir);

        assert!(store.get(SETTINGS_KEY).unwrap().is_none());
        store.set(SETTINGS_KEY, r#"{"cap":0}"#).unwrap();
        assert_eq!(
            store.get(SETTINGS_KEY).unwrap().as_deref(),
            Some(r#"{"cap":0}"#)
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_file_store_keys_map_to_separate_files() {
        let dir = std::env::temp_dir().join(format!("fintrack-test-{}", uuid::Uuid::new_v4()));
        let store = FileStore::new(&dir);

        store.set(RECORDS_KEY, "[]").unwrap();
        store.set(SETTINGS_KEY, "{}").unwrap();
        assert!(dir.join("records.json").exists());
        assert!(dir.join("settings.json").exists());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
