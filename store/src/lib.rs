//! # SubManager Store
//!
//! [`RecordStore`] implementations: a JSON-file store for production and
//! an in-memory store for tests.
//!
//! The store is a thin collaborator: one pretty-printed JSON document per
//! partition key, replaced wholesale on every save. The whole-document
//! replacement mirrors the copy-on-write discipline of the core, so a
//! concurrent reader of the file sees either the old or the new document.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use submanager_core::environment::{RecordError, RecordStore};

/// File-backed record store: `<dir>/<key>.json` per partition.
///
/// A save writes to a temp file in the same directory and renames it into
/// place, so a crash mid-write never leaves a truncated document.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// Creates a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`RecordError::Io`] when the directory cannot be created.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, RecordError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| RecordError::Io(e.to_string()))?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl RecordStore for JsonFileStore {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, RecordError> {
        let path = self.path_for(key);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(RecordError::Io(e.to_string())),
        };
        let value = serde_json::from_slice(&bytes)
            .map_err(|e| RecordError::Serialization(e.to_string()))?;
        tracing::debug!(key, path = %path.display(), "loaded record partition");
        Ok(Some(value))
    }

    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), RecordError> {
        let bytes = serde_json::to_vec_pretty(value)
            .map_err(|e| RecordError::Serialization(e.to_string()))?;
        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        fs::write(&tmp, bytes).map_err(|e| RecordError::Io(e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| RecordError::Io(e.to_string()))?;
        tracing::debug!(key, path = %path.display(), "saved record partition");
        Ok(())
    }
}

/// In-memory record store for tests
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, serde_json::Value>>,
}

impl MemoryStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the stored keys, for assertions
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    #[allow(clippy::unwrap_used)]
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.records.lock().unwrap().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl RecordStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<serde_json::Value>, RecordError> {
        let records = self
            .records
            .lock()
            .map_err(|e| RecordError::Io(e.to_string()))?;
        Ok(records.get(key).cloned())
    }

    fn save(&self, key: &str, value: &serde_json::Value) -> Result<(), RecordError> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| RecordError::Io(e.to_string()))?;
        records.insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// Loads and decodes one partition, falling back to `default` when the
/// partition is absent.
///
/// # Errors
///
/// Returns [`RecordError`] when the store fails or the blob does not
/// decode as `T`.
pub fn load_or_default<T: serde::de::DeserializeOwned + Default>(
    store: &dyn RecordStore,
    key: &str,
) -> Result<T, RecordError> {
    match store.load(key)? {
        Some(value) => {
            serde_json::from_value(value).map_err(|e| RecordError::Serialization(e.to_string()))
        }
        None => Ok(T::default()),
    }
}
