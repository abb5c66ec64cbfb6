//! Key/value persistence for UI state
//!
//! [`KeyValueStore`] is the seam: the front-ends get a [`FileStore`], tests
//! get a [`MemoryStore`]. [`PersistedValue`] binds one string to one key,
//! reading it once at construction and writing every change back.

use crate::error::{HnSearchError, Result};
use parking_lot::Mutex;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// String key/value store.
///
/// `set` and `remove` must be visible to the next `get` on the same store.
/// Failures to persist are the implementation's business; callers are not
/// told.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for &T {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) {
        (**self).remove(key)
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::new();
        store.set(key, value);
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries.lock().insert(key.to_string(), value.to_string());
    }

    fn remove(&self, key: &str) {
        self.entries.lock().remove(key);
    }
}

/// Store backed by a JSON object file.
///
/// The whole file is rewritten on every change (tmp file + rename). The
/// in-memory map is always updated, so a failed write only costs durability.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: Mutex<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let entries = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => BTreeMap::new(),
            Ok(text) => parse_entries(&path, &text)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(path = %path.display(), entries = entries.len(), "opened storage");

        Ok(Self {
            path,
            entries: Mutex::new(entries),
        })
    }

    /// Default location: `<config dir>/hnsearch/storage.json`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("hnsearch")
            .join("storage.json")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) {
        if let Err(e) = write_atomic(&self.path, entries) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to write storage");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.lock().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        let mut entries = self.entries.lock();
        entries.insert(key.to_string(), value.to_string());
        self.persist(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock();
        if entries.remove(key).is_some() {
            self.persist(&entries);
        }
    }
}

fn parse_entries(path: &Path, text: &str) -> Result<BTreeMap<String, String>> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Object(map) = value else {
        return Err(HnSearchError::StorageFormat {
            path: path.display().to_string(),
        });
    };

    // Non-string values are skipped rather than rejected
    Ok(map
        .into_iter()
        .filter_map(|(k, v)| match v {
            serde_json::Value::String(s) => Some((k, s)),
            _ => None,
        })
        .collect())
}

fn write_atomic(path: &Path, entries: &BTreeMap<String, String>) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("json.tmp");
    {
        let mut file = fs::File::create(&tmp_path)?;
        serde_json::to_writer_pretty(&mut file, entries)?;
        file.write_all(b"\n")?;
        file.sync_all()?;
    }
    fs::rename(&tmp_path, path)?;
    Ok(())
}

/// A string bound to a storage key.
///
/// The initial value comes from the store, or `default` when the key is
/// absent. Every [`set`](PersistedValue::set) writes through immediately.
#[derive(Debug)]
pub struct PersistedValue<S> {
    store: S,
    key: String,
    value: String,
}

impl<S: KeyValueStore> PersistedValue<S> {
    pub fn new(store: S, key: impl Into<String>, default: &str) -> Self {
        let key = key.into();
        let value = store.get(&key).unwrap_or_else(|| default.to_string());
        Self { store, key, value }
    }

    pub fn get(&self) -> &str {
        &self.value
    }

    pub fn set(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.store.set(&self.key, &self.value);
    }

    /// Edit in place, then write back
    pub fn update(&mut self, f: impl FnOnce(&mut String)) {
        f(&mut self.value);
        self.store.set(&self.key, &self.value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_value_prefers_stored_entry() {
        let store = MemoryStore::with_entry("search", "Rust");
        let value = PersistedValue::new(&store, "search", "React");
        assert_eq!(value.get(), "Rust");
    }

    #[test]
    fn persisted_value_falls_back_to_default() {
        let store = MemoryStore::new();
        let value = PersistedValue::new(&store, "search", "React");
        assert_eq!(value.get(), "React");
        // Reading the default does not write it
        assert_eq!(store.get("search"), None);
    }

    #[test]
    fn every_change_is_written_through() {
        let store = MemoryStore::new();
        let mut value = PersistedValue::new(&store, "search", "React");

        value.set("R");
        assert_eq!(store.get("search").as_deref(), Some("R"));

        value.update(|s| s.push_str("ust"));
        assert_eq!(store.get("search").as_deref(), Some("Rust"));
    }

    #[test]
    fn file_store_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("storage.json");

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("search"), None);
        store.set("search", "Rust");

        let reopened = FileStore::open(&path).unwrap();
        assert_eq!(reopened.get("search").as_deref(), Some("Rust"));

        reopened.remove("search");
        let again = FileStore::open(&path).unwrap();
        assert_eq!(again.get("search"), None);
    }

    #[test]
    fn file_store_rejects_non_object_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, "[1, 2, 3]").unwrap();

        let err = FileStore::open(&path).unwrap_err();
        assert!(matches!(err, HnSearchError::StorageFormat { .. }));
    }

    #[test]
    fn file_store_skips_non_string_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("storage.json");
        fs::write(&path, r#"{"search": "Rust", "count": 3}"#).unwrap();

        let store = FileStore::open(&path).unwrap();
        assert_eq!(store.get("search").as_deref(), Some("Rust"));
        assert_eq!(store.get("count"), None);
    }

    #[test]
    fn file_store_survives_unwritable_path() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("blocker");
        let store = FileStore::open(blocker.join("storage.json")).unwrap();
        // Parent "directory" becomes a regular file, so every write fails
        fs::write(&blocker, "").unwrap();

        store.set("search", "Rust");
        assert_eq!(store.get("search").as_deref(), Some("Rust"));
    }
}
