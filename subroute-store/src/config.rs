use std::{collections::BTreeMap, path::PathBuf};

use serde::Deserialize;

use crate::backends::MemoryStore;

/// Configuration for the key-value store
///
/// Selects the backend at runtime through the configuration file.
///
/// # Examples
///
/// Entries inline in the RON config:
/// ```ron
/// Subroute (
///     store: Memory(
///         entries: {
///             "@USERS": "user1",
///             "user2": "user2@email.com;user2+spam@email.com",
///         },
///     ),
/// )
/// ```
///
/// Entries in a separate RON map file:
/// ```ron
/// Subroute (
///     store: File(
///         path: "/etc/subroute/store.ron",
///     ),
/// )
/// ```
#[derive(Debug, Clone, Deserialize)]
pub enum StoreConfig {
    /// Entries listed in the configuration itself
    Memory(MemoryConfig),
    /// Entries loaded from a RON map file at startup
    File(FileConfig),
}

/// Configuration for an inline memory store
#[derive(Debug, Clone, Deserialize, Default)]
pub struct MemoryConfig {
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

/// Configuration for a file-loaded store
#[derive(Debug, Clone, Deserialize)]
pub struct FileConfig {
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::Memory(MemoryConfig::default())
    }
}

impl StoreConfig {
    /// Build the configured store
    ///
    /// # Errors
    ///
    /// Returns an error if a file-backed store cannot be loaded.
    pub fn build(&self) -> crate::Result<MemoryStore> {
        match self {
            Self::Memory(config) => Ok(MemoryStore::from_entries(config.entries.clone())),
            Self::File(config) => MemoryStore::from_file(&config.path),
        }
    }
}
