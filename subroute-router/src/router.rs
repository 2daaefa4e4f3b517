use subroute_common::{EnvironmentConfig, address, audit, internal};
use subroute_store::KeyValueStore;

use crate::{
    AddressParser, AddressSplitter, ConfigResolver, Decision, FirstSeparator, Headers,
    InboundMessage, RouteError, StoreErrorPolicy, validator,
};

/// Decides and carries out the routing of inbound messages
///
/// Each call is independent: the policy is resolved afresh from the store
/// for every message and nothing is retained between calls.
#[derive(Debug, Clone)]
pub struct Router<S, P = FirstSeparator> {
    resolver: ConfigResolver<S>,
    parser: AddressParser<P>,
}

impl<S: KeyValueStore> Router<S> {
    #[must_use]
    pub fn new(environment: EnvironmentConfig, store: S) -> Self {
        Self {
            resolver: ConfigResolver::new(environment, store),
            parser: AddressParser::default(),
        }
    }
}

impl<S: KeyValueStore, P: AddressSplitter> Router<S, P> {
    /// Use `splitter` to split local-parts.
    #[must_use]
    pub fn with_splitter<Q: AddressSplitter>(self, splitter: Q) -> Router<S, Q> {
        Router {
            resolver: self.resolver,
            parser: AddressParser::new(splitter),
        }
    }

    #[must_use]
    pub fn with_store_errors(mut self, store_errors: StoreErrorPolicy) -> Self {
        self.resolver = self.resolver.with_store_errors(store_errors);
        self
    }

    #[must_use]
    pub const fn resolver(&self) -> &ConfigResolver<S> {
        &self.resolver
    }

    /// Decide what should happen to a message addressed to `recipient`,
    /// without acting on it.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Store`] if the configuration could not be
    /// resolved.
    #[tracing::instrument(level = tracing::Level::TRACE, skip(self), err)]
    pub async fn decide(&self, recipient: &str) -> Result<Decision, RouteError> {
        let global = self.resolver.resolve_global().await?;

        let parsed = self
            .parser
            .parse(address::local_part(recipient), &global.separator);
        internal!("Parsed {recipient} as {parsed}");

        let resolved = self.resolver.resolve_user(global, &parsed.user).await?;
        let valid = validator::is_valid(&resolved.policy, &parsed, resolved.has_user_entry);
        internal!("{parsed} valid = {valid}");

        Ok(Decision::decide(&resolved.policy, &parsed.user, valid))
    }

    /// Route `message`, making exactly one outbound call on success.
    ///
    /// On error no outbound call has been made, apart from a forward the
    /// host itself reported as failed.
    ///
    /// # Errors
    ///
    /// Returns [`RouteError::Store`] if the configuration could not be
    /// resolved, or [`RouteError::Delivery`] if the host failed to forward.
    #[tracing::instrument(
        level = tracing::Level::DEBUG,
        skip_all,
        fields(to = message.to(), from = message.from()),
        err
    )]
    pub async fn route<M: InboundMessage>(&self, message: &mut M) -> Result<Decision, RouteError> {
        let recipient = message.to().to_string();
        let sender = message.from().to_string();

        let decision = self.decide(&recipient).await?;

        match &decision {
            Decision::Forward {
                destination,
                header,
            }
            | Decision::FailForward {
                destination,
                header,
            } => {
                let headers = Headers::from([(header.name.clone(), header.verdict.to_string())]);
                message.forward(destination, headers).await?;
                audit::log_forward(&sender, &recipient, destination, header.verdict.as_str());
            }
            Decision::Reject { reason } => {
                message.set_reject(reason);
                audit::log_reject(&sender, &recipient, reason);
            }
        }

        Ok(decision)
    }
}
