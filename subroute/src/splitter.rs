use serde::Deserialize;
use subroute_router::{AddressSplitter, DetailSeparator, FirstSeparator, ParsedAddress};

/// Splitter selected by the configuration file
///
/// ```ron
/// Subroute (
///     splitter: Detail,
/// )
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Splitter {
    /// `user1+a+b` is `user1` with tag `a`
    #[default]
    First,
    /// `user1+a+b` is `user1` with tag `a+b`
    Detail,
}

impl AddressSplitter for Splitter {
    fn split(&self, local_part: &str, separator: &str) -> ParsedAddress {
        match self {
            Self::First => FirstSeparator.split(local_part, separator),
            Self::Detail => DetailSeparator.split(local_part, separator),
        }
    }
}
