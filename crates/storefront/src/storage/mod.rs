//! Persistent key-value storage.
//!
//! The storefront keeps all of its state in two string-keyed stores holding
//! JSON-encoded values:
//!
//! - the **local** store, durable across visits (cart, registered shoppers,
//!   current shopper, last order)
//! - the **session** store, dropped when the browsing session ends (loader
//!   flag, music position)
//!
//! Both are reached through [`Storage`], a typed wrapper over any
//! [`KeyValueStore`] backend. Every write goes straight through to the
//! backend before returning.
//!
//! # Backends
//!
//! - [`MemoryStore`] - process-local map, used by tests and short-lived states
//! - [`FileStore`] - one JSON document on disk, rewritten atomically per write

mod file;
mod memory;

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Errors from storage backends and value (de)serialization.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A value could not be encoded as JSON.
    #[error("failed to encode value for {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored value is not valid JSON for the expected type.
    #[error("malformed value under {key}: {source}")]
    Malformed {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The backing file itself is not a JSON object of strings.
    #[error("corrupt store file {path}: {source}")]
    CorruptFile {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// A previous writer panicked while holding the store lock.
    #[error("storage lock poisoned")]
    Poisoned,
}

/// A string-to-string store with browser `localStorage` semantics.
///
/// Implementations must make a completed `set`/`remove` visible to every
/// later `get`, and must be safe to share between the UI flow and the
/// deferred checkout task.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the raw value under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn set(&self, key: &str, value: String) -> Result<(), StorageError>;

    /// Delete `key`. Deleting a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Delete every key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    fn clear(&self) -> Result<(), StorageError>;
}

/// Typed JSON access over a [`KeyValueStore`].
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct Storage {
    backend: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    /// Wrap a backend.
    #[must_use]
    pub fn new(backend: Arc<dyn KeyValueStore>) -> Self {
        Self { backend }
    }

    /// A fresh, empty in-memory storage.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Read the raw string under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be read.
    pub fn raw(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.backend.get(key)
    }

    /// Write a raw string under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub fn set_raw(&self, key: &str, value: impl Into<String>) -> Result<(), StorageError> {
        self.backend.set(key, value.into())
    }

    /// Load and decode the value under `key`.
    ///
    /// Empty strings and the literals `null` and `undefined` count as absent,
    /// matching what a browser page leaves behind after storing a missing
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Malformed` if the value does not decode as `T`,
    /// or a backend error if it cannot be read.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(None);
        };

        if is_absent_literal(&raw) {
            return Ok(None);
        }

        serde_json::from_str(&raw)
            .map(Some)
            .map_err(|source| StorageError::Malformed {
                key: key.to_owned(),
                source,
            })
    }

    /// Load the value under `key`, dropping it if it is malformed.
    ///
    /// A corrupt entry is removed from the store and reported as absent, so
    /// one bad value never blocks a page from loading.
    ///
    /// # Errors
    ///
    /// Returns backend errors only.
    pub fn load_or_discard<T: DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        match self.load(key) {
            Err(StorageError::Malformed { key, source }) => {
                tracing::warn!(key = %key, error = %source, "Discarding malformed stored value");
                self.backend.remove(&key)?;
                Ok(None)
            }
            other => other,
        }
    }

    /// Encode `value` as JSON and write it under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Encode` if serialization fails, or a backend
    /// error if the write fails.
    pub fn save<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_owned(),
            source,
        })?;
        self.backend.set(key, json)
    }

    /// Delete `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }

    /// Delete every key.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backend cannot be written.
    pub fn clear(&self) -> Result<(), StorageError> {
        self.backend.clear()
    }
}

fn is_absent_literal(raw: &str) -> bool {
    matches!(raw.trim(), "" | "null" | "undefined")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Flag {
        on: bool,
    }

    #[test]
    fn test_save_then_load() {
        let storage = Storage::in_memory();
        storage.save("flag", &Flag { on: true }).unwrap();

        assert_eq!(storage.raw("flag").unwrap().as_deref(), Some(r#"{"on":true}"#));
        assert_eq!(storage.load::<Flag>("flag").unwrap(), Some(Flag { on: true }));
    }

    #[test]
    fn test_absent_literals_load_as_none() {
        let storage = Storage::in_memory();
        for literal in ["", "null", "undefined"] {
            storage.set_raw("flag", literal).unwrap();
            assert_eq!(storage.load::<Flag>("flag").unwrap(), None);
        }
    }

    #[test]
    fn test_malformed_value_is_an_error() {
        let storage = Storage::in_memory();
        storage.set_raw("flag", "{not json").unwrap();

        assert!(matches!(
            storage.load::<Flag>("flag"),
            Err(StorageError::Malformed { .. })
        ));
        // A plain load leaves the value in place.
        assert!(storage.raw("flag").unwrap().is_some());
    }

    #[test]
    fn test_load_or_discard_removes_malformed_value() {
        let storage = Storage::in_memory();
        storage.set_raw("flag", r#"{"on":"yes"}"#).unwrap();

        assert_eq!(storage.load_or_discard::<Flag>("flag").unwrap(), None);
        assert_eq!(storage.raw("flag").unwrap(), None);
    }

    #[test]
    fn test_clones_share_backend() {
        let storage = Storage::in_memory();
        let other = storage.clone();
        storage.set_raw("k", "1").unwrap();
        assert_eq!(other.raw("k").unwrap().as_deref(), Some("1"));

        other.clear().unwrap();
        assert_eq!(storage.raw("k").unwrap(), None);
    }
}
