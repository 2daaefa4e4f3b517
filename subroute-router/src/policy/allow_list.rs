/// A parsed `users` or `subaddresses` policy value.
///
/// `*` (exactly, with no surrounding whitespace) accepts everything.
/// Anything else is a comma-separated list matched after every whitespace
/// character has been removed from the list text; the candidate name itself
/// is compared as-is.
///
/// Whitespace here is Unicode `White_Space` without U+0085 (next line), plus
/// U+FEFF (byte order mark).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowList {
    Any,
    Only(Vec<String>),
}

impl AllowList {
    pub const WILDCARD: &'static str = "*";

    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == Self::WILDCARD {
            return Self::Any;
        }

        let stripped: String = value.chars().filter(|&c| !is_list_whitespace(c)).collect();
        Self::Only(stripped.split(',').map(str::to_string).collect())
    }

    #[must_use]
    pub fn allows(&self, name: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Only(names) => names.iter().any(|allowed| allowed == name),
        }
    }
}

const fn is_list_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{000B}'
            | '\u{000C}'
            | '\r'
            | ' '
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200A}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202F}'
            | '\u{205F}'
            | '\u{3000}'
            | '\u{FEFF}'
    )
}
