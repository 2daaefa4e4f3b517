//! Built-in policy values.
//!
//! `USERS` is empty: nobody is accepted unless they have a per-user
//! key-value entry.

use super::PolicyField;

pub const USERS: &str = "";
pub const SUBADDRESSES: &str = "*";
pub const DESTINATION: &str = "";
pub const SEPARATOR: &str = "+";
pub const FAILURE: &str = "Invalid recipient";
pub const HEADER: &str = "X-My-Email-Subaddressing";

/// The built-in value for `field`.
#[must_use]
pub const fn value(field: PolicyField) -> &'static str {
    match field {
        PolicyField::Users => USERS,
        PolicyField::Subaddresses => SUBADDRESSES,
        PolicyField::Destination => DESTINATION,
        PolicyField::Separator => SEPARATOR,
        PolicyField::Failure => FAILURE,
        PolicyField::Header => HEADER,
    }
}
