//! # Pre-Tokenized String Dispatch

use crate::{
    aligned::{AlignedString, TextRange},
    encoding::Encoding,
    errors::{Result, SpanpieceError},
    models::Token,
    pretokenized::{NormalizedByteSplit, OriginalByteSplit, Split},
    types::{Offsets, TokenId},
};

/// An ordered sequence of [`Split`]s over one source text.
///
/// Concatenating the splits' original texts, in order, reproduces the
/// top-level original text whenever no delimiter-removing pass has run.
#[derive(Debug, Clone)]
pub struct PreTokenizedString<T: TokenId> {
    original: String,
    splits: Vec<Split<T>>,
}

impl<T: TokenId> From<AlignedString> for PreTokenizedString<T> {
    fn from(aligned: AlignedString) -> Self {
        Self {
            original: aligned.get_original().to_string(),
            splits: vec![Split::from(aligned)],
        }
    }
}

impl<T: TokenId> From<&str> for PreTokenizedString<T> {
    fn from(s: &str) -> Self {
        AlignedString::new(s).into()
    }
}

impl<T: TokenId> PreTokenizedString<T> {
    /// The top-level original text.
    pub fn original(&self) -> &str {
        &self.original
    }

    /// The current splits.
    pub fn splits(&self) -> &[Split<T>] {
        &self.splits
    }

    /// Subdivide every untokenized split through `split_fn`.
    ///
    /// `split_fn` receives each split's index and aligned string and
    /// returns its replacement splits, which must cover the same original
    /// text. Children with empty normalized text are dropped; splits that
    /// already carry tokens pass through unchanged, so repeated calls
    /// compose.
    pub fn split<F>(
        &mut self,
        mut split_fn: F,
    ) -> Result<()>
    where
        F: FnMut(usize, AlignedString) -> Result<Vec<Split<T>>>,
    {
        let old_splits = core::mem::take(&mut self.splits);
        let mut new_splits = Vec::with_capacity(old_splits.len());

        for (index, split) in old_splits.into_iter().enumerate() {
            if split.tokens.is_some() {
                new_splits.push(split);
                continue;
            }
            for item in split_fn(index, split.aligned)? {
                if item.aligned.is_empty() {
                    continue;
                }
                new_splits.push(item);
            }
        }

        self.splits = new_splits;
        Ok(())
    }

    /// Mutate every untokenized split's aligned string in place.
    pub fn normalize<F>(
        &mut self,
        mut normalize_fn: F,
    ) -> Result<()>
    where
        F: FnMut(&mut AlignedString) -> Result<()>,
    {
        for split in &mut self.splits {
            if split.tokens.is_none() {
                normalize_fn(&mut split.aligned)?;
            }
        }
        Ok(())
    }

    /// Attach tokens to every untokenized split.
    ///
    /// `tokenize_fn` receives each split's normalized text; the tokens it
    /// returns must have offsets relative to that text.
    pub fn tokenize<F>(
        &mut self,
        mut tokenize_fn: F,
    ) -> Result<()>
    where
        F: FnMut(&str) -> Result<Vec<Token<T>>>,
    {
        for split in &mut self.splits {
            if split.tokens.is_none() {
                split.tokens = Some(tokenize_fn(split.aligned.get())?);
            }
        }
        Ok(())
    }

    /// Collapse all splits into an [`Encoding`].
    ///
    /// Token offsets, local to each split's normalized text, are coerced
    /// back through the split's aligned string into the original
    /// referential and shifted to be global to the top-level source. The
    /// word index is `word_index` when given, the split index otherwise.
    ///
    /// ## Returns
    /// The assembled encoding, or an error if any split has no tokens or
    /// a token's offsets cannot be coerced.
    pub fn into_encoding(
        self,
        word_index: Option<u32>,
        type_id: u32,
    ) -> Result<Encoding<T>> {
        let mut encoding = Encoding::with_capacity(self.splits.len());

        for (index, split) in self.splits.into_iter().enumerate() {
            let tokens = split.tokens.ok_or(SpanpieceError::UntokenizedSplit)?;
            let shift = split.aligned.original_offsets().start;
            let word = word_index.unwrap_or(index as u32);

            for token in tokens {
                let local = split
                    .aligned
                    .coerce_to_original(TextRange::normalized(
                        token.offsets.start,
                        token.offsets.end,
                    ))
                    .ok_or(SpanpieceError::BadRange)?;
                let offsets = Offsets::new(shift + local.start, shift + local.end);
                encoding.push(token.id, token.value, offsets, Some(word), type_id);
            }
        }

        Ok(encoding)
    }

    /// The splits with their offsets in the original referential.
    pub fn original_byte_splits(&self) -> Vec<OriginalByteSplit<T>> {
        self.splits
            .iter()
            .map(|split| OriginalByteSplit {
                text: split.aligned.get().to_string(),
                offsets: split.aligned.original_offsets(),
                tokens: split.tokens.clone(),
            })
            .collect()
    }

    /// The splits with their offsets in the concatenated normalized
    /// referential.
    pub fn normalized_byte_splits(&self) -> Vec<NormalizedByteSplit<T>> {
        let mut offset = 0;
        self.splits
            .iter()
            .map(|split| {
                let start = offset;
                offset += split.aligned.len();
                NormalizedByteSplit {
                    text: split.aligned.get().to_string(),
                    offsets: Offsets::new(start, offset),
                    tokens: split.tokens.clone(),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aligned::SplitBehavior, patterns::SplitPattern};

    fn whitespace_splitter(
        _: usize,
        aligned: AlignedString,
    ) -> Result<Vec<Split<u32>>> {
        Ok(aligned
            .split(
                &SplitPattern::predicate(|ch: char| ch.is_whitespace()),
                SplitBehavior::Removed,
            )?
            .into_iter()
            .map(Split::from)
            .collect())
    }

    #[test]
    fn test_split_drops_empty_children() {
        let mut pretokenized = PreTokenizedString::<u32>::from("hey   you ");
        pretokenized.split(whitespace_splitter).unwrap();

        let splits = pretokenized.original_byte_splits();
        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].text, "hey");
        assert_eq!(splits[0].offsets, Offsets::new(0, 3));
        assert_eq!(splits[1].text, "you");
        assert_eq!(splits[1].offsets, Offsets::new(6, 9));
    }

    #[test]
    fn test_tokenized_splits_are_frozen() {
        let mut pretokenized = PreTokenizedString::<u32>::from("ab cd");
        pretokenized.split(whitespace_splitter).unwrap();

        // Tokenize only the first split.
        let mut first = true;
        pretokenized
            .tokenize(|sequence| {
                if first {
                    first = false;
                    Ok(vec![Token::new(
                        0,
                        sequence.to_string(),
                        Offsets::new(0, sequence.len()),
                    )])
                } else {
                    Ok(Vec::new())
                }
            })
            .unwrap();

        // A later pass that would split everything leaves it alone.
        pretokenized
            .split(|_, aligned| {
                Ok(aligned
                    .split(&SplitPattern::from_char('a'), SplitBehavior::Removed)?
                    .into_iter()
                    .map(Split::from)
                    .collect())
            })
            .unwrap();

        let splits = pretokenized.original_byte_splits();
        assert_eq!(splits.len(), 2);
        assert_eq!(splits[0].text, "ab");
        assert!(splits[0].tokens.is_some());
    }

    #[test]
    fn test_normalized_byte_splits_are_cumulative() {
        let mut pretokenized = PreTokenizedString::<u32>::from("one two");
        pretokenized.split(whitespace_splitter).unwrap();

        let splits = pretokenized.normalized_byte_splits();
        assert_eq!(splits[0].offsets, Offsets::new(0, 3));
        assert_eq!(splits[1].offsets, Offsets::new(3, 6));
    }

    #[test]
    fn test_into_encoding_requires_tokens() {
        let mut pretokenized = PreTokenizedString::<u32>::from("ab cd");
        pretokenized.split(whitespace_splitter).unwrap();

        let result = pretokenized.clone().into_encoding(None, 0);
        assert!(matches!(result, Err(SpanpieceError::UntokenizedSplit)));

        pretokenized
            .tokenize(|sequence| {
                Ok(vec![Token::new(
                    1,
                    sequence.to_string(),
                    Offsets::new(0, sequence.len()),
                )])
            })
            .unwrap();
        let encoding = pretokenized.into_encoding(None, 3).unwrap();

        assert_eq!(encoding.len(), 2);
        assert_eq!(encoding.tokens, vec!["ab", "cd"]);
        // Offsets are lifted into the top-level original.
        assert_eq!(
            encoding.offsets,
            vec![Offsets::new(0, 2), Offsets::new(3, 5)]
        );
        assert_eq!(encoding.word_indices, vec![Some(0), Some(1)]);
        assert_eq!(encoding.type_ids, vec![3, 3]);
    }

    #[test]
    fn test_into_encoding_word_index_override() {
        let mut pretokenized = PreTokenizedString::<u32>::from("ab cd");
        pretokenized.split(whitespace_splitter).unwrap();
        pretokenized
            .tokenize(|sequence| {
                Ok(vec![Token::new(
                    1,
                    sequence.to_string(),
                    Offsets::new(0, sequence.len()),
                )])
            })
            .unwrap();

        let encoding = pretokenized.into_encoding(Some(7), 0).unwrap();
        assert_eq!(encoding.word_indices, vec![Some(7), Some(7)]);
    }
}
