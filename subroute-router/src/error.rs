//! Typed error handling for routing.
//!
//! A routing invocation either produces a decision and performs exactly one
//! outbound call, or fails with one of these errors and performs none.

use subroute_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RouteError {
    /// The key-value store could not answer a configuration lookup.
    #[error("Configuration lookup failed: {0}")]
    Store(#[from] StoreError),

    /// The host failed to forward the message.
    #[error("Delivery failed: {0}")]
    Delivery(#[from] ForwardError),
}

impl RouteError {
    /// Returns `true` if redelivering the message later could succeed.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        match self {
            Self::Store(err) => err.is_transient(),
            Self::Delivery(_) => true,
        }
    }
}

/// Failure reported by the host's forward primitive.
#[derive(Debug, Error)]
#[error("Forward to {destination} failed: {reason}")]
pub struct ForwardError {
    pub destination: String,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn test_route_error_display() {
        let err = RouteError::from(StoreError::Unavailable("connection refused".to_string()));
        assert_eq!(
            err.to_string(),
            "Configuration lookup failed: Store unavailable: connection refused"
        );

        let err = RouteError::from(ForwardError {
            destination: "user@email.com".to_string(),
            reason: "destination not verified".to_string(),
        });
        assert_eq!(
            err.to_string(),
            "Delivery failed: Forward to user@email.com failed: destination not verified"
        );
    }

    #[test]
    fn test_route_error_transience() {
        assert!(
            RouteError::from(StoreError::Timeout {
                key: "@USERS".to_string(),
                timeout: Duration::from_secs(1),
            })
            .is_transient()
        );
        assert!(!RouteError::from(StoreError::Backend("corrupt".to_string())).is_transient());
    }
}
