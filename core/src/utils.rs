//! Utility functions and types.

use std::fmt::Debug;

/// Number of characters kept visible at each end of a long secret.
const VISIBLE_CHARS: usize = 3;

/// Secrets shorter than this are hidden entirely.
const MIN_PARTIAL_LEN: usize = 12;

/// Redacts a secret when it's formatted with `{:?}`.
///
/// Secrets with fewer than 12 characters are replaced by `***`. Longer
/// secrets keep their first and last three characters so that two different
/// keys can still be told apart in logs. Counting happens on characters, not
/// bytes, so multi-byte input never splits a code point.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        Redact(value.as_deref().unwrap_or_default())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let chars = self.0.chars().count();
        if chars == 0 {
            return f.write_str("EMPTY");
        }
        if chars < MIN_PARTIAL_LEN {
            return f.write_str("***");
        }

        let head: String = self.0.chars().take(VISIBLE_CHARS).collect();
        let tail: String = self.0.chars().skip(chars - VISIBLE_CHARS).collect();
        write!(f, "{head}***{tail}")
    }
}
