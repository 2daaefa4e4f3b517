use std::{path::Path, sync::Arc, time::Duration};

use serde::Deserialize;
use subroute_common::{
    EnvironmentConfig,
    audit::{self, AuditConfig},
    config::ron_options,
    internal, logging,
};
use subroute_router::{Router, StoreErrorPolicy};
use subroute_store::{KeyValueStore, StoreConfig, TimedStore};

use crate::{ConfigError, splitter::Splitter};

/// The store handed to the router once the configuration has been applied.
pub type SharedStore = Arc<dyn KeyValueStore>;

/// Top-level configuration
///
/// Every field is optional:
///
/// ```ron
/// Subroute (
///     environment: (
///         users: "user1,user2",
///         destination: "@email.com",
///         failure: "+spam@email.com",
///     ),
///     store: Memory(
///         entries: {
///             "user3": "user3@email.com;user3+spam@email.com",
///             "user3+": "newsletters",
///         },
///     ),
///     store_errors: propagate,
///     lookup_timeout_secs: 5,
/// )
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct Subroute {
    #[serde(default)]
    pub environment: EnvironmentConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub store_errors: StoreErrorPolicy,
    #[serde(default)]
    pub splitter: Splitter,
    #[serde(default)]
    pub lookup_timeout_secs: Option<u64>,
}

impl Subroute {
    /// Load the configuration from the RON file at `path`
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid
    /// configuration.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        ron_options()
            .from_str(&content)
            .map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Install logging and audit configuration
    pub fn init(&self) {
        logging::init();
        audit::init(self.audit.clone());
    }

    /// The per-lookup timeout, if one is configured
    ///
    /// # Errors
    ///
    /// Returns an error if the timeout is configured as zero.
    pub fn lookup_timeout(&self) -> Result<Option<Duration>, ConfigError> {
        match self.lookup_timeout_secs {
            Some(0) => Err(ConfigError::ZeroTimeout),
            secs => Ok(secs.map(Duration::from_secs)),
        }
    }

    /// Build the configured store, wrapped in a timeout when one is set
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be loaded or the timeout is
    /// invalid.
    pub fn store(&self) -> Result<SharedStore, ConfigError> {
        let store = self.store.build()?;
        internal!(level = DEBUG, "Store loaded with {} entries", store.len());

        let store: SharedStore = match self.lookup_timeout()? {
            Some(timeout) => Arc::new(TimedStore::new(store, timeout)),
            None => Arc::new(store),
        };

        Ok(store)
    }

    /// Build a router from this configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be built.
    #[tracing::instrument(level = tracing::Level::TRACE, skip_all, err)]
    pub fn router(&self) -> Result<Router<SharedStore, Splitter>, ConfigError> {
        let router = Router::new(self.environment.clone(), self.store()?)
            .with_splitter(self.splitter)
            .with_store_errors(self.store_errors);

        internal!(
            "Router ready (splitter = {:?}, store_errors = {:?})",
            self.splitter,
            self.store_errors
        );

        Ok(router)
    }
}
