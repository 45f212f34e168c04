//! Bookmark store: a persisted set of entry ids.
//!
//! The set is serialized as a JSON array of ids under one namespaced key
//! (default `signedictionary_bookmarks`). Storage problems never reach the
//! caller:
//! - absent key, unreadable storage or malformed JSON load as an empty set
//! - failed writes are logged and swallowed; the in-memory set still
//!   reflects the toggle so the UI can show the intended state
//!
//! Every mutation re-reads the stored array first, so writes made by other
//! sessions since the last read survive. The in-memory set is only used
//! when that read fails.

use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::domain::EntryId;
use crate::storage::{KeyValueStore, StorageError};

/// Storage key used by the dictionary front end
pub const DEFAULT_BOOKMARKS_KEY: &str = "signedictionary_bookmarks";

/// Result of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Membership after the toggle
    pub bookmarked: bool,

    /// Set size after the toggle
    pub count: usize,

    /// Whether the write reached durable storage
    pub persisted: bool,
}

/// Persisted bookmark set
pub struct BookmarkStore<S: KeyValueStore> {
    storage: S,
    key: String,
    ids: BTreeSet<String>,
}

impl<S: KeyValueStore> BookmarkStore<S> {
    /// Open the store under the default key, loading the current set
    pub fn open(storage: S) -> Self {
        Self::with_key(storage, DEFAULT_BOOKMARKS_KEY)
    }

    /// Open the store under a custom key
    pub fn with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let ids = load_ids(&storage, &key);
        Self { storage, key, ids }
    }

    /// Storage key in use
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Re-read the persisted set (picks up writes from other sessions)
    pub fn reload(&mut self) {
        self.ids = load_ids(&self.storage, &self.key);
    }

    pub fn is_bookmarked(&self, id: &EntryId) -> bool {
        self.ids.contains(id.as_str())
    }

    pub fn count(&self) -> usize {
        self.ids.len()
    }

    /// All bookmarked ids
    pub fn list(&self) -> BTreeSet<EntryId> {
        self.ids.iter().map(|id| EntryId::new(id.as_str())).collect()
    }

    /// Add if absent, remove if present, then write the whole set back
    pub fn toggle(&mut self, id: &EntryId) -> ToggleOutcome {
        self.sync();
        let bookmarked = if self.ids.remove(id.as_str()) {
            false
        } else {
            self.ids.insert(id.to_string());
            true
        };

        let persisted = self.flush();
        debug!(entry = %id, bookmarked, count = self.ids.len(), "Bookmark toggled");

        ToggleOutcome {
            bookmarked,
            count: self.ids.len(),
            persisted,
        }
    }

    /// Add a bookmark; no-op when already present
    pub fn insert(&mut self, id: &EntryId) -> bool {
        self.sync();
        if self.ids.insert(id.to_string()) {
            self.flush()
        } else {
            true
        }
    }

    /// Remove a bookmark; no-op when absent
    pub fn remove(&mut self, id: &EntryId) -> bool {
        self.sync();
        if self.ids.remove(id.as_str()) {
            self.flush()
        } else {
            true
        }
    }

    /// Pick up the persisted set before a mutation; keep ours if unreadable
    fn sync(&mut self) {
        match read_ids(&self.storage, &self.key) {
            Ok(ids) => self.ids = ids,
            Err(e) => warn!(key = %self.key, "Bookmark storage unreadable, using cached set: {}", e),
        }
    }

    /// Best-effort write of the full set. Returns whether it succeeded.
    fn flush(&self) -> bool {
        let json = match serde_json::to_string(&self.ids) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize bookmarks: {}", e);
                return false;
            }
        };

        match self.storage.set(&self.key, &json) {
            Ok(()) => true,
            Err(e) => {
                warn!(key = %self.key, "Failed to persist bookmarks: {}", e);
                false
            }
        }
    }
}

/// Read and parse the persisted array, failing open to an empty set
fn load_ids<S: KeyValueStore>(storage: &S, key: &str) -> BTreeSet<String> {
    read_ids(storage, key).unwrap_or_else(|e| {
        warn!(key, "Bookmark storage unavailable, starting empty: {}", e);
        BTreeSet::new()
    })
}

/// Read the persisted array. Absent or malformed data is an empty set;
/// only storage failures are errors.
fn read_ids<S: KeyValueStore>(storage: &S, key: &str) -> Result<BTreeSet<String>, StorageError> {
    let raw = match storage.get(key)? {
        Some(raw) => raw,
        None => return Ok(BTreeSet::new()),
    };

    match serde_json::from_str::<Vec<String>>(&raw) {
        Ok(ids) => Ok(ids.into_iter().collect()),
        Err(e) => {
            warn!(key, "Ignoring malformed bookmark data: {}", e);
            Ok(BTreeSet::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    struct BrokenStore;

    impl KeyValueStore for BrokenStore {
        fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Unavailable("disabled".to_string()))
        }

        fn set(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("quota exceeded".to_string()))
        }
    }

    #[test]
    fn test_toggle_writes_json_array() {
        let storage = MemoryStore::new();
        let mut store = BookmarkStore::open(storage.clone());

        let outcome = store.toggle(&EntryId::from("v1"));
        assert_eq!(
            outcome,
            ToggleOutcome {
                bookmarked: true,
                count: 1,
                persisted: true
            }
        );
        assert_eq!(
            storage.get(DEFAULT_BOOKMARKS_KEY).unwrap(),
            Some(r#"["v1"]"#.to_string())
        );
    }

    #[test]
    fn test_loads_existing_set_and_dedupes() {
        let storage = MemoryStore::new();
        storage
            .set(DEFAULT_BOOKMARKS_KEY, r#"["v2", "v1", "v2"]"#)
            .unwrap();

        let store = BookmarkStore::open(storage);
        assert_eq!(store.count(), 2);
        assert!(store.is_bookmarked(&EntryId::from("v1")));
    }

    #[test]
    fn test_wrong_json_shape_is_empty() {
        let storage = MemoryStore::new();
        storage.set(DEFAULT_BOOKMARKS_KEY, r#"{"v1": true}"#).unwrap();

        assert_eq!(BookmarkStore::open(storage).count(), 0);
    }

    #[test]
    fn test_broken_storage_fails_open() {
        let mut store = BookmarkStore::open(BrokenStore);
        assert_eq!(store.count(), 0);

        let outcome = store.toggle(&EntryId::from("v1"));
        assert!(outcome.bookmarked);
        assert_eq!(outcome.count, 1);
        assert!(!outcome.persisted);
        assert!(store.is_bookmarked(&EntryId::from("v1")));
    }

    #[test]
    fn test_toggle_keeps_writes_from_other_sessions() {
        let storage = MemoryStore::new();
        let mut tab_a = BookmarkStore::open(storage.clone());
        let mut tab_b = BookmarkStore::open(storage.clone());

        tab_b.toggle(&EntryId::from("v1"));
        let outcome = tab_a.toggle(&EntryId::from("v2"));

        assert_eq!(outcome.count, 2);
        assert_eq!(
            storage.get(DEFAULT_BOOKMARKS_KEY).unwrap(),
            Some(r#"["v1","v2"]"#.to_string())
        );
        assert!(tab_a.is_bookmarked(&EntryId::from("v1")));
    }

    #[test]
    fn test_remove_keeps_writes_from_other_sessions() {
        let storage = MemoryStore::new();
        let mut tab_a = BookmarkStore::open(storage.clone());
        tab_a.insert(&EntryId::from("v1"));

        let mut tab_b = BookmarkStore::open(storage.clone());
        tab_b.insert(&EntryId::from("v2"));

        tab_a.remove(&EntryId::from("v1"));
        assert_eq!(
            storage.get(DEFAULT_BOOKMARKS_KEY).unwrap(),
            Some(r#"["v2"]"#.to_string())
        );
    }

    #[test]
    fn test_insert_and_remove_are_idempotent() {
        let mut store = BookmarkStore::open(MemoryStore::new());
        let id = EntryId::from("v1");

        assert!(store.insert(&id));
        assert!(store.insert(&id));
        assert_eq!(store.count(), 1);

        assert!(store.remove(&id));
        assert!(store.remove(&id));
        assert_eq!(store.count(), 0);
    }

    #[test]
    fn test_custom_key_and_reload() {
        let storage = MemoryStore::new();
        let mut store = BookmarkStore::with_key(storage.clone(), "other_key");
        assert_eq!(store.key(), "other_key");

        storage.set("other_key", r#"["v9"]"#).unwrap();
        assert_eq!(store.count(), 0);
        store.reload();
        assert!(store.is_bookmarked(&EntryId::from("v9")));
    }
}
