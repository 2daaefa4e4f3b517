use serde::{Deserialize, Serialize};

use super::{PolicyField, present};

/// Deployment-supplied policy values.
///
/// Sits between the global key-value overrides and the built-in defaults.
/// Every field is optional, and an empty value is treated as absent.
///
/// ```ron
/// environment: (
///     users: "user1,user2",
///     destination: "@email.com",
///     failure: "+spam@email.com",
/// )
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    #[serde(default, alias = "USERS", skip_serializing_if = "Option::is_none")]
    pub users: Option<String>,
    #[serde(default, alias = "SUBADDRESSES", skip_serializing_if = "Option::is_none")]
    pub subaddresses: Option<String>,
    #[serde(default, alias = "DESTINATION", skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, alias = "SEPARATOR", skip_serializing_if = "Option::is_none")]
    pub separator: Option<String>,
    #[serde(default, alias = "FAILURE", skip_serializing_if = "Option::is_none")]
    pub failure: Option<String>,
    #[serde(default, alias = "HEADER", skip_serializing_if = "Option::is_none")]
    pub header: Option<String>,
}

impl EnvironmentConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `field`, consuming and returning `self`.
    #[must_use]
    pub fn with(mut self, field: PolicyField, value: impl Into<String>) -> Self {
        *self.slot_mut(field) = Some(value.into());
        self
    }

    /// The configured value for `field`, if present and non-empty.
    #[must_use]
    pub fn get(&self, field: PolicyField) -> Option<&str> {
        present(self.slot(field).as_deref())
    }

    const fn slot(&self, field: PolicyField) -> &Option<String> {
        match field {
            PolicyField::Users => &self.users,
            PolicyField::Subaddresses => &self.subaddresses,
            PolicyField::Destination => &self.destination,
            PolicyField::Separator => &self.separator,
            PolicyField::Failure => &self.failure,
            PolicyField::Header => &self.header,
        }
    }

    const fn slot_mut(&mut self, field: PolicyField) -> &mut Option<String> {
        match field {
            PolicyField::Users => &mut self.users,
            PolicyField::Subaddresses => &mut self.subaddresses,
            PolicyField::Destination => &mut self.destination,
            PolicyField::Separator => &mut self.separator,
            PolicyField::Failure => &mut self.failure,
            PolicyField::Header => &mut self.header,
        }
    }
}
