//! Error types for the subroute-store crate.
//!
//! A missing key is not an error: lookups return `Ok(None)`. Everything in
//! here means the store could not answer.

use std::{io, path::PathBuf, time::Duration};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The store cannot be reached.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// A lookup did not complete in time.
    #[error("Lookup of '{key}' timed out after {timeout:?}")]
    Timeout { key: String, timeout: Duration },

    /// The backend reported an error.
    #[error("Backend error: {0}")]
    Backend(String),

    /// I/O error while loading a store file.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A store file could not be parsed.
    #[error("Invalid store file {}: {reason}", path.display())]
    InvalidFile { path: PathBuf, reason: String },

    /// Internal error (lock poisoning, etc.).
    #[error("Internal error: {0}")]
    Internal(String),
}

impl StoreError {
    /// Returns `true` if retrying the lookup later could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout { .. })
    }
}

/// Specialized `Result` type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

impl<T> From<std::sync::PoisonError<T>> for StoreError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        Self::Internal(format!("Lock poisoned: {e}"))
    }
}
