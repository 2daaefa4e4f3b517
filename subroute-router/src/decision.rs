use std::fmt;

use serde::Serialize;

use crate::Policy;

/// Value of the audit header on a forwarded message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    /// The recipient passed validation.
    Pass,
    /// The recipient failed validation and the message was fail-forwarded.
    Fail,
}

impl Verdict {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The audit header attached to a forwarded message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditHeader {
    pub name: String,
    pub verdict: Verdict,
}

impl fmt::Display for AuditHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.verdict)
    }
}

/// The outcome for one message. Exactly one is produced per invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Decision {
    /// Deliver to the configured destination.
    Forward {
        destination: String,
        header: AuditHeader,
    },
    /// Deliver to the failure address.
    FailForward {
        destination: String,
        header: AuditHeader,
    },
    /// Bounce with `reason`.
    Reject { reason: String },
}

impl Decision {
    /// Decide what happens to a message for `user`.
    ///
    /// A valid recipient with a non-empty destination is forwarded; a
    /// destination starting with `@` is a domain that gets the user name
    /// prepended. Otherwise the failure value applies: if its first character
    /// is not ASCII alphanumeric the user name is prepended, and the result
    /// is fail-forwarded when it contains `@` or used verbatim as the
    /// rejection reason when it does not.
    #[must_use]
    pub fn decide(policy: &Policy, user: &str, valid: bool) -> Self {
        if valid && !policy.destination.is_empty() {
            let destination = if policy.destination.starts_with('@') {
                format!("{user}{}", policy.destination)
            } else {
                policy.destination.clone()
            };

            return Self::Forward {
                destination,
                header: AuditHeader {
                    name: policy.header.clone(),
                    verdict: Verdict::Pass,
                },
            };
        }

        let failure = if starts_with_non_alphanumeric(&policy.failure) {
            format!("{user}{}", policy.failure)
        } else {
            policy.failure.clone()
        };

        if failure.contains('@') {
            Self::FailForward {
                destination: failure,
                header: AuditHeader {
                    name: policy.header.clone(),
                    verdict: Verdict::Fail,
                },
            }
        } else {
            Self::Reject { reason: failure }
        }
    }

    /// The address the message is forwarded to, if it is forwarded.
    #[must_use]
    pub fn destination(&self) -> Option<&str> {
        match self {
            Self::Forward { destination, .. } | Self::FailForward { destination, .. } => {
                Some(destination)
            }
            Self::Reject { .. } => None,
        }
    }

    /// The audit header attached to a forwarded message.
    #[must_use]
    pub const fn header(&self) -> Option<&AuditHeader> {
        match self {
            Self::Forward { header, .. } | Self::FailForward { header, .. } => Some(header),
            Self::Reject { .. } => None,
        }
    }

    #[must_use]
    pub const fn is_reject(&self) -> bool {
        matches!(self, Self::Reject { .. })
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Forward {
                destination,
                header,
            }
            | Self::FailForward {
                destination,
                header,
            } => write!(f, "forward to {destination} ({header})"),
            Self::Reject { reason } => write!(f, "reject: {reason}"),
        }
    }
}

fn starts_with_non_alphanumeric(value: &str) -> bool {
    value
        .chars()
        .next()
        .is_some_and(|first| !first.is_ascii_alphanumeric())
}
