//! # Byte-Level Pre-Tokenizer
//!
//! Splits on a word pattern, then rewrites every UTF-8 byte of each shard
//! into a printable char through a fixed 256-entry table, so that BPE
//! vocabularies built over "mojibake" text (GPT-2 and descendants) apply
//! directly.

use once_cell::sync::Lazy;

use crate::{
    aligned::{CharChange, SplitBehavior},
    errors::Result,
    patterns::SplitPattern,
    pretokenized::{PreTokenizedString, Split},
    pretokenizers::PreTokenizer,
    types::TokenId,
};

/// The GPT-2 contraction + word pattern. The trailing-whitespace
/// alternative needs lookahead, so this compiles on the fancy engine.
pub const DEFAULT_BYTE_LEVEL_PATTERN: &str =
    r"(?i)'s|'t|'re|'ve|'m|'ll|'d| ?\p{L}+| ?\p{N}+| ?[^\s\p{L}\p{N}]+|\s+(?!\S)|\s+";

static DEFAULT_SPLIT_REGEX: Lazy<fancy_regex::Regex> =
    Lazy::new(|| fancy_regex::Regex::new(DEFAULT_BYTE_LEVEL_PATTERN).unwrap());

/// Byte-to-char table: printable bytes map to themselves, the rest map,
/// in ascending byte order, to consecutive chars starting at `U+0100`.
static BYTE_CHARS: Lazy<[char; 256]> = Lazy::new(|| {
    let mut table = ['\0'; 256];
    let mut next = 0u32;
    for (byte, slot) in table.iter_mut().enumerate() {
        let byte = byte as u32;
        let printable = (0x21..=0x7E).contains(&byte)
            || (0xA1..=0xAC).contains(&byte)
            || (0xAE..=0xFF).contains(&byte);
        if printable {
            *slot = char::from_u32(byte).unwrap();
        } else {
            *slot = char::from_u32(0x100 + next).unwrap();
            next += 1;
        }
    }
    table
});

/// The printable char a byte rewrites to.
///
/// The mapping is a bijection from `0..=255` onto 256 distinct chars and
/// is an interoperability contract with byte-level vocabularies.
pub fn byte_char(byte: u8) -> char {
    BYTE_CHARS[byte as usize]
}

/// Pre-tokenization for byte-level BPE models.
///
/// Optionally prepends a space when the text does not already start with
/// whitespace, splits on the configured pattern keeping delimiters
/// ([`SplitBehavior::Isolated`]), then rewrites each shard byte by byte
/// through [`byte_char`].
#[derive(Debug, Clone)]
pub struct ByteLevelPreTokenizer {
    pattern: SplitPattern,
    prefix_space: bool,
}

impl Default for ByteLevelPreTokenizer {
    fn default() -> Self {
        Self::new(SplitPattern::from((*DEFAULT_SPLIT_REGEX).clone()), true)
    }
}

impl ByteLevelPreTokenizer {
    /// Build a new `ByteLevelPreTokenizer`.
    ///
    /// ## Arguments
    /// * `pattern` - The word-splitting pattern.
    /// * `prefix_space` - Whether to prepend a space to text that does
    ///   not start with whitespace.
    pub fn new(
        pattern: SplitPattern,
        prefix_space: bool,
    ) -> Self {
        Self {
            pattern,
            prefix_space,
        }
    }

    /// Set whether a space is prepended to text that does not start with
    /// whitespace.
    pub fn with_prefix_space(
        mut self,
        prefix_space: bool,
    ) -> Self {
        self.prefix_space = prefix_space;
        self
    }
}

impl<T: TokenId> PreTokenizer<T> for ByteLevelPreTokenizer {
    fn pre_tokenize(
        &self,
        pretokenized: &mut PreTokenizedString<T>,
    ) -> Result<()> {
        pretokenized.split(|_, mut aligned| {
            if self.prefix_space
                && !aligned
                    .get()
                    .chars()
                    .next()
                    .is_some_and(|ch| ch.is_whitespace())
            {
                aligned.prepend(" ");
            }
            Ok(aligned
                .split(&self.pattern, SplitBehavior::Isolated)?
                .into_iter()
                .map(Split::from)
                .collect())
        })?;

        pretokenized.normalize(|aligned| {
            let text = aligned.get();
            let mut changes = Vec::with_capacity(text.len());
            let mut buffer = [0u8; 4];
            for ch in text.chars() {
                for (index, byte) in ch.encode_utf8(&mut buffer).bytes().enumerate() {
                    let change = if index == 0 { 0 } else { 1 };
                    changes.push(CharChange::new(byte_char(byte), change));
                }
            }
            aligned.transform(changes, 0);
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Offsets, SpHashSet};

    #[test]
    fn test_byte_char_bijection() {
        let distinct: SpHashSet<char> = (0..=255u8).map(byte_char).collect();
        assert_eq!(distinct.len(), 256);

        // Printable ranges map to themselves.
        assert_eq!(byte_char(b'!'), '!');
        assert_eq!(byte_char(b'~'), '~');
        assert_eq!(byte_char(0xA1), '¡');
        assert_eq!(byte_char(0xFF), 'ÿ');

        // The rest are remapped in ascending order from U+0100.
        assert_eq!(byte_char(0x00), '\u{100}');
        assert_eq!(byte_char(b' '), '\u{120}');
    }

    #[test]
    fn test_splits_without_prefix_space() {
        let mut pretokenized = PreTokenizedString::<u32>::from("i⭢j");
        let pre_tokenizer = ByteLevelPreTokenizer::default().with_prefix_space(false);
        pre_tokenizer.pre_tokenize(&mut pretokenized).unwrap();

        let original: Vec<(String, Offsets)> = pretokenized
            .original_byte_splits()
            .into_iter()
            .map(|split| (split.text, split.offsets))
            .collect();
        assert_eq!(
            original,
            vec![
                ("i".to_string(), Offsets::new(0, 1)),
                ("âŃ¢".to_string(), Offsets::new(1, 4)),
                ("j".to_string(), Offsets::new(4, 5)),
            ]
        );

        let normalized: Vec<(String, Offsets)> = pretokenized
            .normalized_byte_splits()
            .into_iter()
            .map(|split| (split.text, split.offsets))
            .collect();
        assert_eq!(
            normalized,
            vec![
                ("i".to_string(), Offsets::new(0, 1)),
                ("âŃ¢".to_string(), Offsets::new(1, 7)),
                ("j".to_string(), Offsets::new(7, 8)),
            ]
        );
    }

    #[test]
    fn test_prefix_space() {
        let mut pretokenized = PreTokenizedString::<u32>::from("Hello");
        ByteLevelPreTokenizer::default()
            .pre_tokenize(&mut pretokenized)
            .unwrap();

        let splits = pretokenized.original_byte_splits();
        assert_eq!(splits.len(), 1);
        // The prepended space rewrites to the space surrogate Ġ (U+0120).
        assert_eq!(splits[0].text, "ĠHello");
        assert_eq!(splits[0].offsets, Offsets::new(0, 5));
    }

    #[test]
    fn test_contractions_split_apart() {
        let mut pretokenized = PreTokenizedString::<u32>::from("it's");
        let pre_tokenizer = ByteLevelPreTokenizer::default().with_prefix_space(false);
        pre_tokenizer.pre_tokenize(&mut pretokenized).unwrap();

        let texts: Vec<String> = pretokenized
            .original_byte_splits()
            .into_iter()
            .map(|split| split.text)
            .collect();
        assert_eq!(texts, vec!["it", "'s"]);
    }
}
