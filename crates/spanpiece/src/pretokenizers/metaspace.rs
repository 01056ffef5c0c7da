//! # Metaspace Pre-Tokenizer

use crate::{
    aligned::SplitBehavior,
    errors::Result,
    patterns::SplitPattern,
    pretokenized::{PreTokenizedString, Split},
    pretokenizers::PreTokenizer,
    types::TokenId,
};

/// The default meta-char: lower one eighth block `U+2581`.
pub const DEFAULT_METASPACE_REPLACEMENT: char = '\u{2581}';

/// Pre-tokenization that rewrites every space to a visible meta-char and
/// splits on it, keeping the meta-char attached to the shard that follows
/// it ([`SplitBehavior::MergedWithNext`]).
///
/// A meta-char is optionally prepended when the text does not already
/// start with one.
#[derive(Debug, Clone, Copy)]
pub struct MetaspacePreTokenizer {
    replacement: char,
    prefix_space: bool,
}

impl Default for MetaspacePreTokenizer {
    fn default() -> Self {
        Self::new(DEFAULT_METASPACE_REPLACEMENT, true)
    }
}

impl MetaspacePreTokenizer {
    /// Build a new `MetaspacePreTokenizer` with the given meta-char.
    pub fn new(
        replacement: char,
        prefix_space: bool,
    ) -> Self {
        Self {
            replacement,
            prefix_space,
        }
    }
}

impl<T: TokenId> PreTokenizer<T> for MetaspacePreTokenizer {
    fn pre_tokenize(
        &self,
        pretokenized: &mut PreTokenizedString<T>,
    ) -> Result<()> {
        let replacement = self.replacement.to_string();
        let space = SplitPattern::from_char(' ');
        let meta = SplitPattern::from_char(self.replacement);

        pretokenized.split(|_, mut aligned| {
            if self.prefix_space && !aligned.get().starts_with(self.replacement) {
                aligned.prepend(&replacement);
            }
            aligned.replace(&space, &replacement)?;
            Ok(aligned
                .split(&meta, SplitBehavior::MergedWithNext)?
                .into_iter()
                .map(Split::from)
                .collect())
        })
    }
}
