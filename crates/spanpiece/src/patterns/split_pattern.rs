//! # Split Pattern Variants

use std::sync::Arc;

use crate::{errors::Result, patterns::RegexWrapper, types::Offsets};

/// One element of a pattern's cover of a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Capture {
    /// Byte range of this capture within the input.
    pub offsets: Offsets,

    /// Whether this capture is a pattern match (`true`) or a gap between
    /// matches (`false`).
    pub is_match: bool,
}

/// A pattern for splitting a string.
///
/// [`find_matches`](Self::find_matches) covers the whole input with
/// contiguous, ordered [`Capture`]s; an empty input produces exactly one
/// non-match capture `[0, 0)`.
#[derive(Clone)]
pub enum SplitPattern {
    /// Matches every occurrence of one char.
    Char(char),

    /// Matches all non-overlapping occurrences of a literal string.
    ///
    /// An empty literal matches nothing: the whole input becomes a single
    /// non-match capture.
    Literal(String),

    /// Matches all non-overlapping matches of a compiled regex.
    Regex(RegexWrapper),

    /// Matches every char the predicate accepts.
    Predicate(Arc<dyn Fn(char) -> bool + Send + Sync>),

    /// Flips the match flag of every capture of the inner pattern.
    Inverted(Box<SplitPattern>),
}

impl core::fmt::Debug for SplitPattern {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        match self {
            Self::Char(ch) => f.debug_tuple("Char").field(ch).finish(),
            Self::Literal(literal) => f.debug_tuple("Literal").field(literal).finish(),
            Self::Regex(wrapper) => f.debug_tuple("Regex").field(&wrapper.as_str()).finish(),
            Self::Predicate(_) => f.debug_tuple("Predicate").finish(),
            Self::Inverted(inner) => f.debug_tuple("Inverted").field(inner).finish(),
        }
    }
}

impl From<RegexWrapper> for SplitPattern {
    fn from(wrapper: RegexWrapper) -> Self {
        Self::Regex(wrapper)
    }
}

impl From<regex::Regex> for SplitPattern {
    fn from(regex: regex::Regex) -> Self {
        Self::Regex(regex.into())
    }
}

impl From<fancy_regex::Regex> for SplitPattern {
    fn from(regex: fancy_regex::Regex) -> Self {
        Self::Regex(regex.into())
    }
}

impl SplitPattern {
    /// Pattern matching every occurrence of `ch`.
    pub fn from_char(ch: char) -> Self {
        Self::Char(ch)
    }

    /// Pattern matching non-overlapping occurrences of a literal string.
    pub fn from_literal(literal: impl Into<String>) -> Self {
        Self::Literal(literal.into())
    }

    /// Pattern matching every char the predicate accepts.
    pub fn predicate<F>(predicate: F) -> Self
    where
        F: Fn(char) -> bool + Send + Sync + 'static,
    {
        Self::Predicate(Arc::new(predicate))
    }

    /// Wrap this pattern, flipping the match flag of every capture.
    pub fn inverted(self) -> Self {
        Self::Inverted(Box::new(self))
    }

    /// Cover `s` with ordered, contiguous captures.
    ///
    /// ## Returns
    /// The capture list; concatenating its ranges yields `[0, s.len())`
    /// exactly.
    pub fn find_matches(
        &self,
        s: &str,
    ) -> Result<Vec<Capture>> {
        if s.is_empty() {
            return Ok(vec![Capture {
                offsets: Offsets::new(0, 0),
                is_match: false,
            }]);
        }
        match self {
            Self::Char(ch) => Ok(predicate_captures(s, |other| other == *ch)),
            Self::Predicate(predicate) => Ok(predicate_captures(s, |ch| predicate(ch))),
            Self::Literal(literal) => {
                if literal.is_empty() {
                    return Ok(vec![Capture {
                        offsets: Offsets::new(0, s.len()),
                        is_match: false,
                    }]);
                }
                let spans = s
                    .match_indices(literal.as_str())
                    .map(|(start, found)| Offsets::new(start, start + found.len()))
                    .collect();
                Ok(captures_from_spans(s, spans))
            }
            Self::Regex(wrapper) => {
                let spans = wrapper.find_spans(s)?;
                Ok(captures_from_spans(s, spans))
            }
            Self::Inverted(inner) => {
                let mut captures = inner.find_matches(s)?;
                for capture in &mut captures {
                    capture.is_match = !capture.is_match;
                }
                Ok(captures)
            }
        }
    }
}

fn predicate_captures<F>(
    s: &str,
    matches_char: F,
) -> Vec<Capture>
where
    F: Fn(char) -> bool,
{
    let mut captures = Vec::new();
    let mut last_offset = 0;
    let mut last_seen = 0;

    for (index, ch) in s.char_indices() {
        last_seen = index + ch.len_utf8();
        if !matches_char(ch) {
            continue;
        }
        if last_offset < index {
            // Emit the gap before this match.
            captures.push(Capture {
                offsets: Offsets::new(last_offset, index),
                is_match: false,
            });
        }
        captures.push(Capture {
            offsets: Offsets::new(index, last_seen),
            is_match: true,
        });
        last_offset = last_seen;
    }

    if last_seen > last_offset {
        captures.push(Capture {
            offsets: Offsets::new(last_offset, last_seen),
            is_match: false,
        });
    }

    captures
}

fn captures_from_spans(
    s: &str,
    spans: Vec<Offsets>,
) -> Vec<Capture> {
    let mut captures = Vec::with_capacity(spans.len() * 2 + 1);
    let mut prev = 0;

    for span in spans {
        // Zero-width matches carry no text to split on.
        if span.is_empty() {
            continue;
        }
        if prev != span.start {
            captures.push(Capture {
                offsets: Offsets::new(prev, span.start),
                is_match: false,
            });
        }
        captures.push(Capture {
            offsets: span,
            is_match: true,
        });
        prev = span.end;
    }

    if prev != s.len() {
        captures.push(Capture {
            offsets: Offsets::new(prev, s.len()),
            is_match: false,
        });
    }

    captures
}
