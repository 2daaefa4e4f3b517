//! Effective routing policy and its resolution
//!
//! Each field is resolved independently from four sources, highest
//! precedence first:
//!
//! 1. Per-user key-value entries (`<user>`, `<user><separator>`)
//! 2. Global key-value entries (`@USERS`, `@SEPARATOR`, ...)
//! 3. The environment configuration
//! 4. Built-in defaults
//!
//! The first source holding a non-empty value wins.

mod allow_list;
mod resolver;

use std::fmt;

use serde::{Deserialize, Serialize};
use subroute_common::{PolicyField, config::defaults};

pub use allow_list::AllowList;
pub use resolver::ConfigResolver;

/// Where a resolved field value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSource {
    Default,
    Environment,
    Global,
    User,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Default => "default",
            Self::Environment => "environment",
            Self::Global => "global",
            Self::User => "user",
        })
    }
}

/// How lookup failures in the key-value store are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreErrorPolicy {
    /// Fail the invocation; no outbound call is made.
    #[default]
    Propagate,
    /// Treat a failed lookup as a missing key and fall through to the next
    /// source.
    TreatAsAbsent,
}

/// The effective configuration for one message.
///
/// Every field is always populated; the built-in defaults guarantee full
/// coverage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Policy {
    /// `*` or a comma-separated allow-list of user names
    pub users: String,
    /// `*` or a comma-separated allow-list of subaddress tags
    pub subaddresses: String,
    /// Target address, or `@domain` to be prefixed with the user name
    pub destination: String,
    /// Marks the start of a subaddress tag within the local-part
    pub separator: String,
    /// Fail-forward address, address fragment, or rejection reason
    pub failure: String,
    /// Name of the audit header attached to forwarded messages
    pub header: String,
    #[serde(skip)]
    pub(crate) sources: [ConfigSource; 6],
}

impl Default for Policy {
    fn default() -> Self {
        Self {
            users: defaults::USERS.to_string(),
            subaddresses: defaults::SUBADDRESSES.to_string(),
            destination: defaults::DESTINATION.to_string(),
            separator: defaults::SEPARATOR.to_string(),
            failure: defaults::FAILURE.to_string(),
            header: defaults::HEADER.to_string(),
            sources: [ConfigSource::Default; 6],
        }
    }
}

impl Policy {
    #[must_use]
    pub fn get(&self, field: PolicyField) -> &str {
        match field {
            PolicyField::Users => &self.users,
            PolicyField::Subaddresses => &self.subaddresses,
            PolicyField::Destination => &self.destination,
            PolicyField::Separator => &self.separator,
            PolicyField::Failure => &self.failure,
            PolicyField::Header => &self.header,
        }
    }

    /// The source the current value of `field` came from.
    #[must_use]
    pub const fn source(&self, field: PolicyField) -> ConfigSource {
        self.sources[field as usize]
    }

    /// Replace `field` if `value` is present, recording `source`.
    ///
    /// Callers apply sources lowest precedence first, so the last present
    /// value wins.
    pub(crate) fn overlay(&mut self, field: PolicyField, value: Option<&str>, source: ConfigSource) {
        let Some(value) = subroute_common::config::present(value) else {
            return;
        };

        let slot = match field {
            PolicyField::Users => &mut self.users,
            PolicyField::Subaddresses => &mut self.subaddresses,
            PolicyField::Destination => &mut self.destination,
            PolicyField::Separator => &mut self.separator,
            PolicyField::Failure => &mut self.failure,
            PolicyField::Header => &mut self.header,
        };

        value.clone_into(slot);
        self.sources[field as usize] = source;
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, field) in PolicyField::ALL.into_iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(
                f,
                "{:<12} = {:?} ({})",
                field.name(),
                self.get(field),
                self.source(field)
            )?;
        }
        Ok(())
    }
}

/// A policy resolved for one user, along with whether that user has a
/// per-user key-value entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPolicy {
    pub policy: Policy,
    pub has_user_entry: bool,
}
