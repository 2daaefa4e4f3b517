//! Local-part splitting strategies
//!
//! RFC 5233 leaves the exact subaddressing convention to the receiving
//! system. The strategy used to split a local-part into a user and a
//! subaddress tag is therefore pluggable: the resolver and the validator
//! only ever see the resulting [`ParsedAddress`].

use std::fmt;

use serde::Serialize;

/// A local-part split into its user and optional subaddress tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedAddress {
    pub user: String,
    pub subaddress: Option<String>,
}

impl ParsedAddress {
    #[must_use]
    pub fn new(user: impl Into<String>, subaddress: Option<String>) -> Self {
        Self {
            user: user.into(),
            subaddress,
        }
    }

    /// The subaddress tag, if there is a non-empty one.
    ///
    /// `user+@domain` carries an empty tag, which is treated as no tag.
    #[must_use]
    pub fn tag(&self) -> Option<&str> {
        self.subaddress.as_deref().filter(|tag| !tag.is_empty())
    }
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.subaddress {
            Some(tag) => write!(f, "{} [{tag}]", self.user),
            None => f.write_str(&self.user),
        }
    }
}

/// A subaddressing convention.
pub trait AddressSplitter: Send + Sync {
    /// Split `local_part` into a user and an optional tag using `separator`.
    fn split(&self, local_part: &str, separator: &str) -> ParsedAddress;
}

/// Splits at each occurrence of the separator and keeps the first two
/// segments.
///
/// `user+tag+more` yields user `user` and tag `tag`; the remainder is
/// discarded. This is the default convention.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstSeparator;

impl AddressSplitter for FirstSeparator {
    fn split(&self, local_part: &str, separator: &str) -> ParsedAddress {
        if separator.is_empty() {
            return ParsedAddress::new(local_part, None);
        }

        let mut segments = local_part.split(separator);
        let user = segments.next().unwrap_or_default();
        ParsedAddress::new(user, segments.next().map(str::to_string))
    }
}

/// RFC 5233 detail semantics: splits once, and the tag is everything after
/// the first separator.
///
/// `user+tag+more` yields user `user` and tag `tag+more`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetailSeparator;

impl AddressSplitter for DetailSeparator {
    fn split(&self, local_part: &str, separator: &str) -> ParsedAddress {
        if separator.is_empty() {
            return ParsedAddress::new(local_part, None);
        }

        match local_part.split_once(separator) {
            Some((user, detail)) => ParsedAddress::new(user, Some(detail.to_string())),
            None => ParsedAddress::new(local_part, None),
        }
    }
}

/// Adapts a closure into an [`AddressSplitter`].
///
/// ```
/// use subroute_router::{AddressSplitter, FnSplitter, ParsedAddress};
///
/// // Tags at the front: `tag+user`
/// let reversed = FnSplitter::new(|local: &str, separator: &str| {
///     match local.rsplit_once(separator) {
///         Some((tag, user)) => ParsedAddress::new(user, Some(tag.to_string())),
///         None => ParsedAddress::new(local, None),
///     }
/// });
///
/// assert_eq!(reversed.split("news+user1", "+").user, "user1");
/// ```
#[derive(Clone, Copy)]
pub struct FnSplitter<F>(F);

impl<F> FnSplitter<F>
where
    F: Fn(&str, &str) -> ParsedAddress + Send + Sync,
{
    pub const fn new(f: F) -> Self {
        Self(f)
    }
}

impl<F> AddressSplitter for FnSplitter<F>
where
    F: Fn(&str, &str) -> ParsedAddress + Send + Sync,
{
    fn split(&self, local_part: &str, separator: &str) -> ParsedAddress {
        (self.0)(local_part, separator)
    }
}

impl<F> fmt::Debug for FnSplitter<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSplitter").finish_non_exhaustive()
    }
}

/// Parses local-parts with a chosen [`AddressSplitter`].
#[derive(Debug, Clone, Default)]
pub struct AddressParser<P = FirstSeparator> {
    splitter: P,
}

impl<P: AddressSplitter> AddressParser<P> {
    pub const fn new(splitter: P) -> Self {
        Self { splitter }
    }

    #[must_use]
    pub fn parse(&self, local_part: &str, separator: &str) -> ParsedAddress {
        self.splitter.split(local_part, separator)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_first_separator_without_tag() {
        assert_eq!(
            FirstSeparator.split("user1", "+"),
            ParsedAddress::new("user1", None)
        );
    }

    #[test]
    fn test_first_separator_with_tag() {
        assert_eq!(
            FirstSeparator.split("user1+subA", "+"),
            ParsedAddress::new("user1", Some("subA".to_string()))
        );
    }

    #[test]
    fn test_first_separator_keeps_only_second_segment() {
        assert_eq!(
            FirstSeparator.split("user1+subA+more", "+"),
            ParsedAddress::new("user1", Some("subA".to_string()))
        );
    }

    #[test]
    fn test_multi_character_separator() {
        assert_eq!(
            FirstSeparator.split("user1--subA", "--"),
            ParsedAddress::new("user1", Some("subA".to_string()))
        );
        assert_eq!(
            FirstSeparator.split("user1+subA", "--"),
            ParsedAddress::new("user1+subA", None)
        );
    }

    #[test]
    fn test_detail_separator_keeps_remainder() {
        assert_eq!(
            DetailSeparator.split("user1+subA+more", "+"),
            ParsedAddress::new("user1", Some("subA+more".to_string()))
        );
        assert_eq!(
            DetailSeparator.split("user1", "+"),
            ParsedAddress::new("user1", None)
        );
    }

    #[test]
    fn test_empty_separator_never_splits() {
        assert_eq!(
            FirstSeparator.split("user1", ""),
            ParsedAddress::new("user1", None)
        );
        assert_eq!(
            DetailSeparator.split("user1", ""),
            ParsedAddress::new("user1", None)
        );
    }

    #[test]
    fn test_empty_tag_is_no_tag() {
        let parsed = FirstSeparator.split("user1+", "+");
        assert_eq!(parsed.subaddress.as_deref(), Some(""));
        assert_eq!(parsed.tag(), None);
    }

    #[test]
    fn test_leading_separator_gives_empty_user() {
        let parsed = FirstSeparator.split("+subA", "+");
        assert_eq!(parsed.user, "");
        assert_eq!(parsed.tag(), Some("subA"));
    }

    #[test]
    fn test_parser_with_closure() {
        let parser = AddressParser::new(FnSplitter::new(|local: &str, separator: &str| {
            ParsedAddress::new(local.to_uppercase(), Some(separator.to_string()))
        }));

        assert_eq!(
            parser.parse("user1", "+"),
            ParsedAddress::new("USER1", Some("+".to_string()))
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(
            ParsedAddress::new("user1", Some("subA".to_string())).to_string(),
            "user1 [subA]"
        );
        assert_eq!(ParsedAddress::new("user1", None).to_string(), "user1");
    }
}
