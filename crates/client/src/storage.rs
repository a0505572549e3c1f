//! Durable local key-value storage.
//!
//! [`LocalStore`] is the desktop stand-in for browser local storage: a small
//! JSON object persisted to `{data_dir}/storage.json`, read once on open and
//! written through on every mutation. Last write wins; there is no locking
//! or multi-process coordination - one interactive client at a time.
//!
//! Malformed persisted data is never an error: an unreadable file or an
//! undecodable value behaves exactly like a missing one (with a warning
//! logged), so a corrupted store degrades to a fresh one instead of
//! crashing the client.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

const STORE_FILE: &str = "storage.json";

/// Fixed keys for persisted client-side state.
pub mod storage_keys {
    /// Session bearer token.
    pub const AUTH_TOKEN: &str = "auth_token";
    /// Authenticated user record.
    pub const USER: &str = "user";
    /// Cart contents (JSON array of cart lines).
    pub const CART: &str = "cart";
}

/// Errors that can occur when writing the store to disk.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem write failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Value could not be serialized.
    #[error("storage serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

struct StoreInner {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

/// File-backed key-value store. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<Mutex<StoreInner>>,
}

impl LocalStore {
    /// Open (or create) the store under `data_dir`.
    ///
    /// A missing or malformed store file yields an empty store.
    ///
    /// # Errors
    ///
    /// Returns an error only if the data directory cannot be created.
    pub fn open(data_dir: &Path) -> Result<Self, StorageError> {
        fs::create_dir_all(data_dir)?;
        let path = data_dir.join(STORE_FILE);
        let values = load_values(&path);
        Ok(Self {
            inner: Arc::new(Mutex::new(StoreInner { path, values })),
        })
    }

    /// Read and decode a value.
    ///
    /// Returns `None` when the key is absent or the stored value does not
    /// decode as `T` (the latter is logged and swallowed).
    #[must_use]
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let value = lock(&self.inner).values.get(key)?.clone();
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(e) => {
                warn!(key, error = %e, "Discarding malformed persisted value");
                None
            }
        }
    }

    /// Store a value and write the store through to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the filesystem write fails.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let encoded = serde_json::to_value(value)?;
        let mut inner = lock(&self.inner);
        inner.values.insert(key.to_string(), encoded);
        persist(&inner)
    }

    /// Remove a key and write the store through to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem write fails.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut inner = lock(&self.inner);
        inner.values.remove(key);
        persist(&inner)
    }

    /// Remove every key and write the empty store through to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the filesystem write fails.
    pub fn clear(&self) -> Result<(), StorageError> {
        let mut inner = lock(&self.inner);
        inner.values.clear();
        persist(&inner)
    }
}

impl std::fmt::Debug for LocalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let keys: Vec<String> = self
            .inner
            .lock()
            .map(|inner| inner.values.keys().cloned().collect())
            .unwrap_or_default();
        f.debug_struct("LocalStore").field("keys", &keys).finish()
    }
}

/// Acquire the store lock, recovering from poisoning.
///
/// The store holds plain data; a panic in another thread mid-write leaves at
/// worst a stale in-memory map, which the next write-through corrects.
fn lock(inner: &Arc<Mutex<StoreInner>>) -> std::sync::MutexGuard<'_, StoreInner> {
    inner.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

fn load_values(path: &Path) -> BTreeMap<String, Value> {
    let Ok(raw) = fs::read_to_string(path) else {
        return BTreeMap::new();
    };
    match serde_json::from_str(&raw) {
        Ok(values) => values,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Discarding malformed store file");
            BTreeMap::new()
        }
    }
}

fn persist(inner: &StoreInner) -> Result<(), StorageError> {
    let encoded = serde_json::to_string_pretty(&inner.values)?;
    fs::write(&inner.path, encoded)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();

        store.set(storage_keys::AUTH_TOKEN, &"tok-123").unwrap();
        assert_eq!(
            store.get::<String>(storage_keys::AUTH_TOKEN),
            Some("tok-123".to_string())
        );
    }

    #[test]
    fn test_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        {
            let store = LocalStore::open(dir.path()).unwrap();
            store.set("answer", &42_i64).unwrap();
        }
        let reopened = LocalStore::open(dir.path()).unwrap();
        assert_eq!(reopened.get::<i64>("answer"), Some(42));
    }

    #[test]
    fn test_missing_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        assert_eq!(store.get::<String>("nope"), None);
    }

    #[test]
    fn test_malformed_file_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(STORE_FILE), b"{not json!").unwrap();

        let store = LocalStore::open(dir.path()).unwrap();
        assert_eq!(store.get::<String>(storage_keys::CART), None);

        // and the store still works for writes
        store.set("k", &"v").unwrap();
        assert_eq!(store.get::<String>("k"), Some("v".to_string()));
    }

    #[test]
    fn test_malformed_value_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        store.set("n", &"not a number").unwrap();
        assert_eq!(store.get::<i64>("n"), None);
    }

    #[test]
    fn test_remove_and_clear() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        store.set("a", &1_i64).unwrap();
        store.set("b", &2_i64).unwrap();

        store.remove("a").unwrap();
        assert_eq!(store.get::<i64>("a"), None);
        assert_eq!(store.get::<i64>("b"), Some(2));

        store.clear().unwrap();
        assert_eq!(store.get::<i64>("b"), None);
    }

    #[test]
    fn test_clones_share_state() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalStore::open(dir.path()).unwrap();
        let clone = store.clone();
        clone.set("shared", &true).unwrap();
        assert_eq!(store.get::<bool>("shared"), Some(true));
    }
}
