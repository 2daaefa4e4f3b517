//! Recipient address helpers
//!
//! Routing only ever needs to know where the local-part ends. No attempt is
//! made to validate the address against RFC 5321/5322 grammar: the text
//! before the first `@` is the local-part, and everything after it is the
//! domain. An address without an `@` is all local-part.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A recipient split at its first `@`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mailbox {
    /// The local part (before @)
    pub local_part: String,
    /// The domain (after @), `None` if the address had no `@`
    pub domain: Option<String>,
}

impl Mailbox {
    /// Split a recipient address into local-part and domain.
    #[must_use]
    pub fn from_recipient(recipient: &str) -> Self {
        match recipient.split_once('@') {
            Some((local, domain)) => Self {
                local_part: local.to_string(),
                domain: Some(domain.to_string()),
            },
            None => Self {
                local_part: recipient.to_string(),
                domain: None,
            },
        }
    }
}

impl fmt::Display for Mailbox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.domain {
            Some(domain) => write!(f, "{}@{domain}", self.local_part),
            None => f.write_str(&self.local_part),
        }
    }
}

/// The local-part of `recipient`, borrowed.
#[must_use]
pub fn local_part(recipient: &str) -> &str {
    recipient
        .split_once('@')
        .map_or(recipient, |(local, _)| local)
}
