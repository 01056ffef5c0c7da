//! # Whitespace Pre-Tokenizers

use once_cell::sync::Lazy;

use crate::{
    aligned::SplitBehavior,
    errors::Result,
    patterns::SplitPattern,
    pretokenized::{PreTokenizedString, Split},
    pretokenizers::PreTokenizer,
    types::TokenId,
    unicode::is_whitespace,
};

/// Splits on whitespace-like chars; the whitespace is removed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WhitespaceSplitPreTokenizer;

impl<T: TokenId> PreTokenizer<T> for WhitespaceSplitPreTokenizer {
    fn pre_tokenize(
        &self,
        pretokenized: &mut PreTokenizedString<T>,
    ) -> Result<()> {
        let pattern = SplitPattern::predicate(is_whitespace);
        pretokenized.split(|_, aligned| {
            Ok(aligned
                .split(&pattern, SplitBehavior::Removed)?
                .into_iter()
                .map(Split::from)
                .collect())
        })
    }
}

static WORD_REGEX: Lazy<regex::Regex> = Lazy::new(|| regex::Regex::new(r"\w+|[^\w\s]+").unwrap());

/// Splits into runs of word chars and runs of non-whitespace symbols
/// (`\w+|[^\w\s]+`); whitespace between them is removed.
#[derive(Debug, Clone, Default)]
pub struct WhitespacePreTokenizer;

impl<T: TokenId> PreTokenizer<T> for WhitespacePreTokenizer {
    fn pre_tokenize(
        &self,
        pretokenized: &mut PreTokenizedString<T>,
    ) -> Result<()> {
        // Inverting the word pattern marks the separators as the matches
        // to remove.
        let pattern = SplitPattern::from((*WORD_REGEX).clone()).inverted();
        pretokenized.split(|_, aligned| {
            Ok(aligned
                .split(&pattern, SplitBehavior::Removed)?
                .into_iter()
                .map(Split::from)
                .collect())
        })
    }
}
