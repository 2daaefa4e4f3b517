use std::{
    path::Path,
    sync::{Arc, PoisonError, RwLock},
};

use ahash::AHashMap;
use async_trait::async_trait;
use subroute_common::config::ron_options;

use crate::{StoreError, r#trait::KeyValueStore};

/// In-memory key-value store
///
/// Entries live in an `AHashMap` behind an `RwLock`. Clones share the same
/// map, so an operator handle can update entries that a running router
/// reads.
///
/// # Performance
/// - Get: O(1) - map lookup + value clone
/// - Insert/Remove: O(1)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub(crate) entries: Arc<RwLock<AHashMap<String, String>>>,
}

impl MemoryStore {
    /// Create a new empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `entries`
    #[must_use]
    pub fn from_entries<K, V>(entries: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            entries: Arc::new(RwLock::new(
                entries
                    .into_iter()
                    .map(|(key, value)| (key.into(), value.into()))
                    .collect(),
            )),
        }
    }

    /// Load a store from a RON map file
    ///
    /// ```ron
    /// {
    ///     "@USERS": "user1",
    ///     "user2": "user2@email.com;user2+spam@email.com",
    ///     "user2+": "subA,subB",
    /// }
    /// ```
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a map of
    /// strings to strings.
    pub fn from_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let entries: AHashMap<String, String> =
            ron_options().from_str(&content).map_err(|e| StoreError::InvalidFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        tracing::debug!(
            "Loaded {} key-value entries from {}",
            entries.len(),
            path.display()
        );

        Ok(Self {
            entries: Arc::new(RwLock::new(entries)),
        })
    }

    /// Add or replace an entry, returning the previous value
    ///
    /// # Errors
    ///
    /// Returns an error if the lock has been poisoned.
    pub fn insert(
        &self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> crate::Result<Option<String>> {
        Ok(self.entries.write()?.insert(key.into(), value.into()))
    }

    /// Remove an entry, returning its value
    ///
    /// # Errors
    ///
    /// Returns an error if the lock has been poisoned.
    pub fn remove(&self, key: &str) -> crate::Result<Option<String>> {
        Ok(self.entries.write()?.remove(key))
    }

    /// Get the current number of entries
    ///
    /// Recovers gracefully if the lock is poisoned by accessing the underlying data.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Check if the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> crate::Result<Option<String>> {
        Ok(self.entries.read()?.get(key).cloned())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use std::io::Write;

    use super::*;

    #[tokio::test]
    async fn test_memory_store_basic_operations() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        assert_eq!(store.get("@USERS").await.unwrap(), None);

        assert_eq!(store.insert("@USERS", "user1").unwrap(), None);
        assert_eq!(store.get("@USERS").await.unwrap().as_deref(), Some("user1"));
        assert_eq!(store.len(), 1);

        assert_eq!(
            store.insert("@USERS", "user1,user2").unwrap().as_deref(),
            Some("user1")
        );
        assert_eq!(
            store.get("@USERS").await.unwrap().as_deref(),
            Some("user1,user2")
        );

        assert_eq!(
            store.remove("@USERS").unwrap().as_deref(),
            Some("user1,user2")
        );
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = MemoryStore::from_entries([("user1", "user1@email.com")]);
        let handle = store.clone();

        handle.insert("user1+", "subA").unwrap();

        assert_eq!(store.get("user1+").await.unwrap().as_deref(), Some("subA"));
        assert_eq!(store.len(), 2);
    }

    #[tokio::test]
    async fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        write!(
            file,
            r#"{{
                "@USERS": "user1",
                "user2": "user2@email.com;user2+spam@email.com",
            }}"#
        )
        .unwrap();

        let store = MemoryStore::from_file(file.path()).expect("Failed to load store");
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get("user2").await.unwrap().as_deref(),
            Some("user2@email.com;user2+spam@email.com")
        );
    }

    #[test]
    fn test_from_file_rejects_non_string_values() {
        let mut file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        write!(file, r#"{{ "@USERS": 3 }}"#).unwrap();

        let err = MemoryStore::from_file(file.path()).unwrap_err();
        assert!(matches!(err, StoreError::InvalidFile { .. }));
    }

    #[test]
    fn test_from_missing_file() {
        let err = MemoryStore::from_file("/nonexistent/subroute.store.ron").unwrap_err();
        assert!(matches!(err, StoreError::Io(_)));
    }
}
