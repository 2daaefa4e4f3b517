use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading the configuration or building the router
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("Failed to read config from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid RON for [`crate::Subroute`]
    #[error("Invalid config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// The configured store could not be built
    #[error("Failed to build store: {0}")]
    Store(#[from] subroute_store::StoreError),

    /// A lookup timeout of zero would fail every lookup
    #[error("lookup_timeout_secs must be greater than zero")]
    ZeroTimeout,
}
