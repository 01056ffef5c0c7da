//! # BERT Pre-Tokenizer

use crate::{
    aligned::SplitBehavior,
    errors::Result,
    patterns::SplitPattern,
    pretokenized::{PreTokenizedString, Split},
    pretokenizers::PreTokenizer,
    types::TokenId,
    unicode::{is_punctuation, is_whitespace},
};

/// Pre-tokenization suitable for BERT models: split on whitespace
/// (removed), then on punctuation (each punctuation char isolated on its
/// own shard).
#[derive(Debug, Clone, Copy, Default)]
pub struct BertPreTokenizer;

impl<T: TokenId> PreTokenizer<T> for BertPreTokenizer {
    fn pre_tokenize(
        &self,
        pretokenized: &mut PreTokenizedString<T>,
    ) -> Result<()> {
        let whitespace = SplitPattern::predicate(is_whitespace);
        pretokenized.split(|_, aligned| {
            Ok(aligned
                .split(&whitespace, SplitBehavior::Removed)?
                .into_iter()
                .map(Split::from)
                .collect())
        })?;

        let punctuation = SplitPattern::predicate(is_punctuation);
        pretokenized.split(|_, aligned| {
            Ok(aligned
                .split(&punctuation, SplitBehavior::Isolated)?
                .into_iter()
                .map(Split::from)
                .collect())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Offsets;

    #[test]
    fn test_splits_and_original_offsets() {
        let mut pretokenized = PreTokenizedString::<u32>::from("Hey friend!     How are you?!?");
        BertPreTokenizer.pre_tokenize(&mut pretokenized).unwrap();

        let actual: Vec<(String, Offsets)> = pretokenized
            .original_byte_splits()
            .into_iter()
            .map(|split| (split.text, split.offsets))
            .collect();

        let expected: Vec<(String, Offsets)> = [
            ("Hey", (0, 3)),
            ("friend", (4, 10)),
            ("!", (10, 11)),
            ("How", (16, 19)),
            ("are", (20, 23)),
            ("you", (24, 27)),
            ("?", (27, 28)),
            ("!", (28, 29)),
            ("?", (29, 30)),
        ]
        .into_iter()
        .map(|(text, (start, end))| (text.to_string(), Offsets::new(start, end)))
        .collect();

        assert_eq!(actual, expected);
    }
}
