use futures_util::future::{try_join, try_join_all};
use subroute_common::{EnvironmentConfig, PolicyField, lookup};
use subroute_store::KeyValueStore;

use super::{ConfigSource, Policy, StoreErrorPolicy, UserPolicy};
use crate::RouteError;

/// Resolves the effective [`Policy`] for a message
///
/// Resolution runs in two phases. The global phase needs no knowledge of
/// the recipient and yields the separator used to parse the local-part.
/// The user phase then layers the per-user entries on top.
///
/// Lookups within a phase are independent and are awaited jointly.
#[derive(Debug, Clone)]
pub struct ConfigResolver<S> {
    environment: EnvironmentConfig,
    store: S,
    store_errors: StoreErrorPolicy,
}

impl<S: KeyValueStore> ConfigResolver<S> {
    #[must_use]
    pub fn new(environment: EnvironmentConfig, store: S) -> Self {
        Self {
            environment,
            store,
            store_errors: StoreErrorPolicy::default(),
        }
    }

    #[must_use]
    pub const fn with_store_errors(mut self, store_errors: StoreErrorPolicy) -> Self {
        self.store_errors = store_errors;
        self
    }

    #[must_use]
    pub const fn environment(&self) -> &EnvironmentConfig {
        &self.environment
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Resolve the policy from defaults, environment, and global entries.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Store`] if a lookup fails and the resolver
    /// propagates store errors.
    #[tracing::instrument(level = tracing::Level::TRACE, skip_all, err)]
    pub async fn resolve_global(&self) -> Result<Policy, RouteError> {
        let globals =
            try_join_all(PolicyField::ALL.map(|field| self.lookup(field.global_key()))).await?;

        let mut policy = Policy::default();
        for (field, global) in PolicyField::ALL.into_iter().zip(globals) {
            policy.overlay(field, self.environment.get(field), ConfigSource::Environment);
            policy.overlay(field, global.as_deref(), ConfigSource::Global);
        }

        Ok(policy)
    }

    /// Layer the per-user entries for `user` over an already resolved
    /// global policy.
    ///
    /// `<user>` holds `destination[;failure]` and its presence makes the
    /// user valid. `<user><separator>` holds the user's own subaddress
    /// allow-list.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Store`] if a lookup fails and the resolver
    /// propagates store errors.
    #[tracing::instrument(level = tracing::Level::TRACE, skip(self, global), err)]
    pub async fn resolve_user(&self, global: Policy, user: &str) -> Result<UserPolicy, RouteError> {
        let subaddress_key = format!("{user}{}", global.separator);
        let (entry, subaddresses) =
            try_join(self.lookup(user), self.lookup(&subaddress_key)).await?;

        let mut policy = global;
        policy.overlay(
            PolicyField::Subaddresses,
            subaddresses.as_deref(),
            ConfigSource::User,
        );

        let entry = entry.filter(|entry| !entry.is_empty());
        if let Some(entry) = &entry {
            let mut targets = entry.split(';');
            policy.overlay(PolicyField::Destination, targets.next(), ConfigSource::User);
            policy.overlay(PolicyField::Failure, targets.next(), ConfigSource::User);
        }

        Ok(UserPolicy {
            policy,
            has_user_entry: entry.is_some(),
        })
    }

    /// Resolve both phases for `user`.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Store`] if a lookup fails and the resolver
    /// propagates store errors.
    pub async fn resolve(&self, user: &str) -> Result<UserPolicy, RouteError> {
        let global = self.resolve_global().await?;
        self.resolve_user(global, user).await
    }

    async fn lookup(&self, key: &str) -> Result<Option<String>, RouteError> {
        match self.store.get(key).await {
            Ok(value) => {
                lookup!("{key} = {value:?}");
                Ok(value)
            }
            Err(err) if self.store_errors == StoreErrorPolicy::TreatAsAbsent => {
                tracing::warn!("Lookup of '{key}' failed, treating as absent: {err}");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use subroute_store::{MemoryStore, TestStore};

    use super::*;

    fn env() -> EnvironmentConfig {
        EnvironmentConfig::new()
            .with(PolicyField::Users, "env-users")
            .with(PolicyField::Subaddresses, "env-subs")
            .with(PolicyField::Destination, "env@dest.com")
            .with(PolicyField::Separator, "=")
            .with(PolicyField::Failure, "env failure")
            .with(PolicyField::Header, "X-Env")
    }

    #[tokio::test]
    async fn test_defaults_only() {
        let resolver = ConfigResolver::new(EnvironmentConfig::new(), MemoryStore::new());
        let resolved = resolver.resolve("user1").await.unwrap();

        assert_eq!(resolved.policy, Policy::default());
        assert!(!resolved.has_user_entry);
    }

    #[tokio::test]
    async fn test_environment_overrides_defaults() {
        let resolver = ConfigResolver::new(env(), MemoryStore::new());
        let policy = resolver.resolve_global().await.unwrap();

        assert_eq!(policy.users, "env-users");
        assert_eq!(policy.separator, "=");
        for field in PolicyField::ALL {
            assert_eq!(policy.source(field), ConfigSource::Environment);
        }
    }

    #[tokio::test]
    async fn test_global_entries_override_environment_per_field() {
        let store = MemoryStore::from_entries([("@USERS", "kv-users"), ("@HEADER", "X-Kv")]);
        let resolver = ConfigResolver::new(env(), store);
        let policy = resolver.resolve_global().await.unwrap();

        assert_eq!(policy.users, "kv-users");
        assert_eq!(policy.header, "X-Kv");
        assert_eq!(policy.source(PolicyField::Users), ConfigSource::Global);
        assert_eq!(policy.destination, "env@dest.com");
        assert_eq!(
            policy.source(PolicyField::Destination),
            ConfigSource::Environment
        );
    }

    #[tokio::test]
    async fn test_every_source_populated_user_wins() {
        let store = MemoryStore::from_entries([
            ("@USERS", "kv-users"),
            ("@SUBADDRESSES", "kv-subs"),
            ("@DESTINATION", "kv@dest.com"),
            ("@SEPARATOR", "--"),
            ("@FAILURE", "kv failure"),
            ("@HEADER", "X-Kv"),
            ("user1", "user1@dest.com;user1+spam@dest.com"),
            ("user1--", "subX"),
        ]);
        let resolver = ConfigResolver::new(env(), store);
        let resolved = resolver.resolve("user1").await.unwrap();

        assert!(resolved.has_user_entry);
        assert_eq!(resolved.policy.destination, "user1@dest.com");
        assert_eq!(resolved.policy.failure, "user1+spam@dest.com");
        assert_eq!(resolved.policy.subaddresses, "subX");
        for field in [
            PolicyField::Subaddresses,
            PolicyField::Destination,
            PolicyField::Failure,
        ] {
            assert_eq!(resolved.policy.source(field), ConfigSource::User);
        }
        assert_eq!(resolved.policy.separator, "--");
        assert_eq!(resolved.policy.users, "kv-users");
    }

    #[tokio::test]
    async fn test_user_entry_without_failure_keeps_failure() {
        let store = MemoryStore::from_entries([
            ("@FAILURE", "No such recipient"),
            ("user1", "user1@email.com"),
        ]);
        let resolver = ConfigResolver::new(EnvironmentConfig::new(), store);
        let resolved = resolver.resolve("user1").await.unwrap();

        assert_eq!(resolved.policy.destination, "user1@email.com");
        assert_eq!(resolved.policy.failure, "No such recipient");
        assert_eq!(
            resolved.policy.source(PolicyField::Failure),
            ConfigSource::Global
        );
    }

    #[tokio::test]
    async fn test_user_entry_with_empty_segments() {
        let store = MemoryStore::from_entries([("user1", ";user1+spam@email.com;ignored")]);
        let resolver = ConfigResolver::new(
            EnvironmentConfig::new().with(PolicyField::Destination, "@email.com"),
            store,
        );
        let resolved = resolver.resolve("user1").await.unwrap();

        assert!(resolved.has_user_entry);
        assert_eq!(resolved.policy.destination, "@email.com");
        assert_eq!(resolved.policy.failure, "user1+spam@email.com");
    }

    #[tokio::test]
    async fn test_empty_user_entry_is_absent() {
        let store = MemoryStore::from_entries([("user1", "")]);
        let resolver = ConfigResolver::new(EnvironmentConfig::new(), store);
        let resolved = resolver.resolve("user1").await.unwrap();

        assert!(!resolved.has_user_entry);
        assert_eq!(resolved.policy, Policy::default());
    }

    #[tokio::test]
    async fn test_user_subaddress_key_uses_resolved_separator() {
        let store = MemoryStore::from_entries([
            ("@SEPARATOR", "--"),
            ("user1+", "plus-list"),
            ("user1--", "dash-list"),
        ]);
        let resolver = ConfigResolver::new(EnvironmentConfig::new(), store);
        let resolved = resolver.resolve("user1").await.unwrap();

        assert_eq!(resolved.policy.subaddresses, "dash-list");
    }

    #[tokio::test]
    async fn test_every_key_is_looked_up_once() {
        let store = TestStore::new();
        let resolver = ConfigResolver::new(EnvironmentConfig::new(), store.clone());
        resolver.resolve("user1").await.unwrap();

        for field in PolicyField::ALL {
            assert_eq!(store.lookups_of(field.global_key()), 1);
        }
        assert_eq!(store.lookups_of("user1"), 1);
        assert_eq!(store.lookups_of("user1+"), 1);
        assert_eq!(store.total_lookups(), 8);
    }

    #[tokio::test]
    async fn test_store_error_propagates_by_default() {
        let store = TestStore::from_entries([("@USERS", "*")]);
        store.fail_key("@DESTINATION");
        let resolver = ConfigResolver::new(EnvironmentConfig::new(), store);

        let err = resolver.resolve("user1").await.unwrap_err();
        assert!(matches!(err, RouteError::Store(_)));
    }

    #[tokio::test]
    async fn test_store_error_treated_as_absent() {
        let store = TestStore::from_entries([("@USERS", "*"), ("@DESTINATION", "kv@dest.com")]);
        store.fail_key("@DESTINATION");
        let resolver = ConfigResolver::new(
            EnvironmentConfig::new().with(PolicyField::Destination, "env@dest.com"),
            store,
        )
        .with_store_errors(StoreErrorPolicy::TreatAsAbsent);

        let resolved = resolver.resolve("user1").await.unwrap();
        assert_eq!(resolved.policy.users, "*");
        assert_eq!(resolved.policy.destination, "env@dest.com");
    }

    #[tokio::test]
    async fn test_resolution_is_repeatable() {
        let store = MemoryStore::from_entries([("@USERS", "*"), ("user2", "user2@email.com")]);
        let resolver = ConfigResolver::new(env(), store);

        let first = resolver.resolve("user2").await.unwrap();
        let second = resolver.resolve("user2").await.unwrap();
        assert_eq!(first, second);
    }
}
