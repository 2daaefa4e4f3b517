use std::fmt;

use serde::{Deserialize, Serialize};

/// One field of the effective routing policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PolicyField {
    Users,
    Subaddresses,
    Destination,
    Separator,
    Failure,
    Header,
}

impl PolicyField {
    pub const ALL: [Self; 6] = [
        Self::Users,
        Self::Subaddresses,
        Self::Destination,
        Self::Separator,
        Self::Failure,
        Self::Header,
    ];

    /// The environment name of this field, e.g. `USERS`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Users => "USERS",
            Self::Subaddresses => "SUBADDRESSES",
            Self::Destination => "DESTINATION",
            Self::Separator => "SEPARATOR",
            Self::Failure => "FAILURE",
            Self::Header => "HEADER",
        }
    }

    /// The global key-value key overriding this field, e.g. `@USERS`.
    #[must_use]
    pub const fn global_key(self) -> &'static str {
        match self {
            Self::Users => "@USERS",
            Self::Subaddresses => "@SUBADDRESSES",
            Self::Destination => "@DESTINATION",
            Self::Separator => "@SEPARATOR",
            Self::Failure => "@FAILURE",
            Self::Header => "@HEADER",
        }
    }
}

impl fmt::Display for PolicyField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
