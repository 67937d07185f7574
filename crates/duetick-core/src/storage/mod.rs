//! Key/value persistence.
//!
//! State lives in a single JSON object file under the app data directory;
//! configuration lives beside it as TOML. Reads degrade silently: a missing,
//! empty, or corrupt store reads as absent values.

mod config;

pub use config::Config;

use std::path::PathBuf;

use serde_json::Value;
use tracing::debug;

use crate::error::StorageError;

/// Narrow persistent key/value capability.
///
/// Implementations overwrite whole values; there are no partial or merge
/// semantics.
pub trait KvStore {
    /// Returns the stored value, or `None` if the key is missing or the
    /// backing store is empty or unreadable.
    fn get(&self, key: &str) -> Option<Value>;

    /// Overwrites the value at `key`.
    fn set(&self, key: &str, value: Value) -> Result<(), StorageError>;
}

/// Returns `~/.config/duetick[-dev]/` based on DUETICK_ENV.
///
/// Set DUETICK_ENV=dev to use a separate development data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StorageError> {
    let base_dir = dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config");

    let env = std::env::var("DUETICK_ENV").unwrap_or_else(|_| "production".to_string());

    let dir = if env == "dev" {
        base_dir.join("duetick-dev")
    } else {
        base_dir.join("duetick")
    };

    std::fs::create_dir_all(&dir).map_err(|source| StorageError::WriteFailed {
        path: dir.clone(),
        source,
    })?;
    Ok(dir)
}

/// Single-file JSON object store.
///
/// The whole file is one JSON object; each `set` is a read-modify-write of
/// that object. Unreadable content is treated as an empty store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Open the default store at `<data_dir>/state.json`.
    ///
    /// # Errors
    /// Returns an error if the data directory cannot be created.
    pub fn open() -> Result<Self, StorageError> {
        Ok(Self {
            path: data_dir()?.join("state.json"),
        })
    }

    /// Open a store backed by an explicit file.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_map(&self) -> serde_json::Map<String, Value> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => match serde_json::from_str::<Value>(&content) {
                Ok(Value::Object(map)) => map,
                Ok(_) | Err(_) => {
                    debug!(path = %self.path.display(), "unreadable store, treating as empty");
                    serde_json::Map::new()
                }
            },
            Err(_) => serde_json::Map::new(),
        }
    }
}

impl KvStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.read_map().remove(key)
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        let mut map = self.read_map();
        map.insert(key.to_string(), value);
        let content = serde_json::to_string_pretty(&Value::Object(map))
            .map_err(|e| StorageError::Encode(e.to_string()))?;
        std::fs::write(&self.path, content).map_err(|source| StorageError::WriteFailed {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory store for tests and embedding.
///
/// Clones share the same underlying map.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: std::sync::Arc<std::sync::Mutex<serde_json::Map<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KvStore for MemoryStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.values.lock().ok()?.get(key).cloned()
    }

    fn set(&self, key: &str, value: Value) -> Result<(), StorageError> {
        match self.values.lock() {
            Ok(mut map) => {
                map.insert(key.to_string(), value);
                Ok(())
            }
            Err(_) => Err(StorageError::Backend("store mutex poisoned".into())),
        }
    }
}
