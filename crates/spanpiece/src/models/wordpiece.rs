//! # WordPiece
//!
//! Greedy longest-prefix subword matching, as used by BERT-family
//! models. Non-initial subwords are looked up with a continuation prefix
//! (`##` by default).
//!
//! See: <https://static.googleusercontent.com/media/research.google.com/en//pubs/archive/37842.pdf>

use crate::{
    errors::{Result, SpanpieceError},
    models::{Model, Token},
    types::{Offsets, TokenId},
    vocab::Vocabulary,
};

/// Default unknown token.
pub const DEFAULT_UNKNOWN_TOKEN: &str = "[UNK]";

/// Default continuing-subword prefix.
pub const DEFAULT_CONTINUING_SUBWORD_PREFIX: &str = "##";

/// Default maximum word length, in chars.
pub const DEFAULT_MAX_INPUT_CHARS_PER_WORD: usize = 100;

/// A WordPiece model.
#[derive(Debug, Clone)]
pub struct WordPieceModel<T: TokenId> {
    vocab: Vocabulary<T>,
    unknown_token: String,
    continuing_subword_prefix: String,
    max_input_chars_per_word: usize,
}

impl<T: TokenId> WordPieceModel<T> {
    /// Build a new `WordPieceModel` with the default unknown token,
    /// continuation prefix, and word-length limit.
    pub fn new(vocab: Vocabulary<T>) -> Self {
        Self {
            vocab,
            unknown_token: DEFAULT_UNKNOWN_TOKEN.to_string(),
            continuing_subword_prefix: DEFAULT_CONTINUING_SUBWORD_PREFIX.to_string(),
            max_input_chars_per_word: DEFAULT_MAX_INPUT_CHARS_PER_WORD,
        }
    }

    /// Set the unknown token.
    pub fn with_unknown_token(
        mut self,
        token: impl Into<String>,
    ) -> Self {
        self.unknown_token = token.into();
        self
    }

    /// Set the continuing-subword prefix.
    pub fn with_continuing_subword_prefix(
        mut self,
        prefix: impl Into<String>,
    ) -> Self {
        self.continuing_subword_prefix = prefix.into();
        self
    }

    /// Set the maximum word length, in chars; longer words collapse to
    /// one unknown token.
    pub fn with_max_input_chars_per_word(
        mut self,
        max: usize,
    ) -> Self {
        self.max_input_chars_per_word = max;
        self
    }

    /// The vocabulary this model resolves against.
    pub fn vocab(&self) -> &Vocabulary<T> {
        &self.vocab
    }

    fn unknown_for(
        &self,
        sequence: &str,
    ) -> Result<Token<T>> {
        let id = self
            .vocab
            .get_id(&self.unknown_token)
            .ok_or(SpanpieceError::UnknownTokenOutOfVocabulary)?;
        Ok(Token::new(
            id,
            self.unknown_token.clone(),
            Offsets::new(0, sequence.len()),
        ))
    }
}

impl<T: TokenId> Model<T> for WordPieceModel<T> {
    fn tokenize(
        &self,
        sequence: &str,
    ) -> Result<Vec<Token<T>>> {
        if sequence.is_empty() {
            return Ok(Vec::new());
        }

        let char_starts: Vec<usize> = sequence.char_indices().map(|(index, _)| index).collect();
        if char_starts.len() > self.max_input_chars_per_word {
            return Ok(vec![self.unknown_for(sequence)?]);
        }

        // One past the last char maps to the end of the sequence.
        let byte_at = |char_index: usize| {
            char_starts
                .get(char_index)
                .copied()
                .unwrap_or(sequence.len())
        };

        let mut tokens = Vec::new();
        let mut start = 0;

        while start < char_starts.len() {
            // Longest match first: shrink the candidate from the right.
            let mut matched = None;
            let mut end = char_starts.len();
            while start < end {
                let sub = &sequence[byte_at(start)..byte_at(end)];
                let term = if start > 0 {
                    format!("{}{}", self.continuing_subword_prefix, sub)
                } else {
                    sub.to_string()
                };
                if let Some(id) = self.vocab.get_id(&term) {
                    matched = Some(Token::new(
                        id,
                        term,
                        Offsets::new(byte_at(start), byte_at(end)),
                    ));
                    break;
                }
                end -= 1;
            }

            match matched {
                Some(token) => {
                    tokens.push(token);
                    start = end;
                }
                // Some suffix has no match at all: the whole word is
                // unknown.
                None => return Ok(vec![self.unknown_for(sequence)?]),
            }
        }

        Ok(tokens)
    }
}
