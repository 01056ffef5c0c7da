//! # Char-Delimiter Pre-Tokenizer

use crate::{
    aligned::SplitBehavior,
    errors::Result,
    patterns::SplitPattern,
    pretokenized::{PreTokenizedString, Split},
    pretokenizers::PreTokenizer,
    types::TokenId,
};

/// Splits on a single delimiter char; the delimiter is removed.
#[derive(Debug, Clone, Copy)]
pub struct CharDelimiterPreTokenizer {
    delimiter: char,
}

impl CharDelimiterPreTokenizer {
    /// Build a new `CharDelimiterPreTokenizer` splitting on `delimiter`.
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }
}

impl<T: TokenId> PreTokenizer<T> for CharDelimiterPreTokenizer {
    fn pre_tokenize(
        &self,
        pretokenized: &mut PreTokenizedString<T>,
    ) -> Result<()> {
        let pattern = SplitPattern::from_char(self.delimiter);
        pretokenized.split(|_, aligned| {
            Ok(aligned
                .split(&pattern, SplitBehavior::Removed)?
                .into_iter()
                .map(Split::from)
                .collect())
        })
    }
}
