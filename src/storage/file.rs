//! JSON file backend.
//!
//! All keys live in one JSON object (`{"key": "value", ...}`). Every
//! write holds an exclusive lock on a sidecar `.lock` file, re-reads the
//! current object, and atomically replaces the data file, so values of
//! other keys written by another process are never lost or truncated.
//! Values under other keys may be any JSON and are written back as found.
//! Reads never create files.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use fs2::FileExt;
use serde_json::{Map, Value};
use tempfile::NamedTempFile;

use super::{KeyValueStore, StorageError};

/// Key-value store backed by a single JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path to the data file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn open_lock(&self) -> Result<File, StorageError> {
        Ok(OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(self.lock_path())?)
    }

    /// Shared lock for readers. No lock file means no writer has run yet.
    fn open_read_lock(&self) -> Result<Option<File>, StorageError> {
        match File::open(self.lock_path()) {
            Ok(lock) => {
                FileExt::lock_shared(&lock)?;
                Ok(Some(lock))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Read the whole object. Missing or blank file is an empty object.
    fn read_map(&self) -> Result<Map<String, Value>, StorageError> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }

        serde_json::from_str(&content).map_err(|_| StorageError::Corrupt {
            path: self.path.clone(),
        })
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        if !self.path.exists() {
            return Ok(None);
        }

        let _lock = self.open_read_lock()?;
        let map = self.read_map()?;

        // Non-string values are handed back as their JSON text
        Ok(map.get(key).map(|value| match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let dir = self.dir();
        fs::create_dir_all(&dir)?;

        let lock = self.open_lock()?;
        lock.lock_exclusive()?;

        // A corrupt file is left alone rather than replaced by our single key
        let mut map = self.read_map()?;
        map.insert(key.to_string(), Value::String(value.to_string()));

        let json = serde_json::to_string_pretty(&map)?;
        let mut temp = NamedTempFile::new_in(&dir)?;
        temp.write_all(json.as_bytes())?;
        temp.flush()?;
        temp.as_file().sync_all()?;
        temp.persist(&self.path).map_err(|e| e.error)?;

        tracing::debug!(path = %self.path.display(), key, "Storage value written");
        Ok(())
    }
}
