//! Recipient validation against a resolved policy.

use crate::{ParsedAddress, Policy, policy::AllowList};

/// Whether the user may receive mail.
///
/// A per-user key-value entry makes the user valid regardless of the
/// `users` allow-list.
#[must_use]
pub fn user_allowed(policy: &Policy, user: &str, has_user_entry: bool) -> bool {
    has_user_entry || AllowList::parse(&policy.users).allows(user)
}

/// Whether the subaddress tag is accepted.
#[must_use]
pub fn subaddress_allowed(policy: &Policy, tag: &str) -> bool {
    AllowList::parse(&policy.subaddresses).allows(tag)
}

/// Whether the parsed recipient is valid under `policy`.
///
/// The tag is only checked once the user is known to be valid, and only
/// when there is a non-empty tag.
#[must_use]
pub fn is_valid(policy: &Policy, parsed: &ParsedAddress, has_user_entry: bool) -> bool {
    if !user_allowed(policy, &parsed.user, has_user_entry) {
        return false;
    }

    parsed
        .tag()
        .is_none_or(|tag| subaddress_allowed(policy, tag))
}
