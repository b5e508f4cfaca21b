//! Durable key-value storage for dashboard preferences.
//!
//! The dashboard keeps exactly two pieces of state across restarts: the
//! signed-in identity and the colour theme. Both live under fixed keys in a
//! [`KeyValueStore`]. Callers treat every storage failure as non-fatal: a
//! failed read means "absent" and a failed write leaves the in-memory state
//! authoritative.
//!
//! # Keys
//!
//! - [`keys::USER`] - JSON identity (`{"email": ..., "role": ...}`)
//! - [`keys::THEME`] - `"light"` or `"dark"`

mod file;

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use thiserror::Error;

pub use file::FileStore;

/// Storage keys.
pub mod keys {
    /// Key for the signed-in identity.
    pub const USER: &str = "app-user";

    /// Key for the colour theme.
    pub const THEME: &str = "app-theme";
}

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The backing file or a stored value is not valid JSON.
    #[error("storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A lock guarding the store was poisoned by a panicking writer.
    #[error("storage lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for StorageError {
    fn from(_: PoisonError<T>) -> Self {
        Self::Poisoned
    }
}

/// A string-to-string durable store with local-storage semantics.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be written.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove `key`. Removing an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the backing medium cannot be written.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// In-process store used for tests and ephemeral runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    #[must_use]
    pub fn with_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: RwLock::new(
                entries
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.read()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries
            .write()?
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries.write()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_set_get_remove() {
        let store = MemoryStore::new();
        assert_eq!(store.get(keys::THEME).unwrap(), None);

        store.set(keys::THEME, "dark").unwrap();
        assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("dark"));

        store.remove(keys::THEME).unwrap();
        assert_eq!(store.get(keys::THEME).unwrap(), None);
    }

    #[test]
    fn test_memory_store_remove_absent_key() {
        let store = MemoryStore::new();
        assert!(store.remove("missing").is_ok());
    }

    #[test]
    fn test_memory_store_with_entries() {
        let store = MemoryStore::with_entries([(keys::THEME, "light")]);
        assert_eq!(store.get(keys::THEME).unwrap().as_deref(), Some("light"));
    }
}
