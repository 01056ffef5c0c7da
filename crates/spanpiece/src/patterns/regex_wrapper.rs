//! # Regex Wrapper
//!
//! Some split patterns (notably the byte-level pre-tokenizer's default)
//! require lookaround, which the standard [`regex`] crate does not
//! support. This module mixes both engines behind one type; prefer the
//! `Basic` engine whenever the pattern permits it.

use crate::{errors::Result, types::Offsets};

/// A compiled regex from either engine.
#[derive(Debug, Clone)]
pub enum RegexWrapper {
    /// A `regex::Regex`.
    Basic(regex::Regex),

    /// A `fancy_regex::Regex` (lookaround support).
    Fancy(fancy_regex::Regex),
}

impl PartialEq for RegexWrapper {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        match (self, other) {
            (Self::Basic(a), Self::Basic(b)) => a.as_str() == b.as_str(),
            (Self::Fancy(a), Self::Fancy(b)) => a.as_str() == b.as_str(),
            _ => false,
        }
    }
}

impl From<regex::Regex> for RegexWrapper {
    fn from(regex: regex::Regex) -> Self {
        Self::Basic(regex)
    }
}

impl From<fancy_regex::Regex> for RegexWrapper {
    fn from(regex: fancy_regex::Regex) -> Self {
        Self::Fancy(regex)
    }
}

impl RegexWrapper {
    /// The underlying pattern string.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Basic(regex) => regex.as_str(),
            Self::Fancy(regex) => regex.as_str(),
        }
    }

    /// All non-overlapping match spans over `haystack`, in order.
    ///
    /// The fancy engine can fail mid-iteration (e.g. backtracking
    /// limits); those errors are propagated.
    pub fn find_spans(
        &self,
        haystack: &str,
    ) -> Result<Vec<Offsets>> {
        match self {
            Self::Basic(regex) => Ok(regex
                .find_iter(haystack)
                .map(|found| Offsets::new(found.start(), found.end()))
                .collect()),
            Self::Fancy(regex) => {
                let mut spans = Vec::new();
                for found in regex.find_iter(haystack) {
                    let found = found?;
                    spans.push(Offsets::new(found.start(), found.end()));
                }
                Ok(spans)
            }
        }
    }
}
