use std::{fmt::Debug, sync::Arc};

use async_trait::async_trait;

/// Read access to the routing key-value store.
///
/// Implementations must be `Send + Sync`; the router issues independent
/// lookups concurrently.
#[async_trait]
pub trait KeyValueStore: Debug + Send + Sync {
    /// Get the value stored under `key`.
    ///
    /// Returns `Ok(None)` when the key is absent.
    ///
    /// # Errors
    ///
    /// Returns an error when the store cannot answer, which is distinct from
    /// the key being absent.
    async fn get(&self, key: &str) -> crate::Result<Option<String>>;
}

#[async_trait]
impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    async fn get(&self, key: &str) -> crate::Result<Option<String>> {
        (**self).get(key).await
    }
}
