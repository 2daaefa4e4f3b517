//! Subaddress routing for inbound mail
//!
//! For each recipient, the router:
//! - resolves the effective [`Policy`] from defaults, environment, and the
//!   key-value store
//! - splits the local-part into a user and an optional subaddress tag
//! - validates both against the policy's allow-lists
//! - produces a [`Decision`]: forward, fail-forward, or reject

mod decision;
mod error;
mod message;
pub mod policy;
mod router;
pub mod splitter;
pub mod validator;

pub use decision::{AuditHeader, Decision, Verdict};
pub use error::{ForwardError, RouteError};
pub use message::{Headers, InboundMessage, Outbound, RecordingMessage};
pub use policy::{ConfigResolver, ConfigSource, Policy, StoreErrorPolicy, UserPolicy};
pub use router::Router;
pub use splitter::{
    AddressParser, AddressSplitter, DetailSeparator, FirstSeparator, FnSplitter, ParsedAddress,
};
