use std::time::Duration;

use async_trait::async_trait;

use crate::{StoreError, r#trait::KeyValueStore};

/// Bounds every lookup of the wrapped store by a fixed duration
#[derive(Debug, Clone)]
pub struct TimedStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: KeyValueStore> TimedStore<S> {
    #[must_use]
    pub const fn new(inner: S, timeout: Duration) -> Self {
        Self { inner, timeout }
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }
}

#[async_trait]
impl<S: KeyValueStore> KeyValueStore for TimedStore<S> {
    async fn get(&self, key: &str) -> crate::Result<Option<String>> {
        tokio::time::timeout(self.timeout, self.inner.get(key))
            .await
            .map_err(|_| StoreError::Timeout {
                key: key.to_string(),
                timeout: self.timeout,
            })?
    }
}
