//! # Byte Pair Encoding
//!
//! See: <https://www.aclweb.org/anthology/P16-1162/>

mod cache;
mod merge_map;
mod word;

#[doc(inline)]
pub use cache::DEFAULT_CACHE_CAPACITY;
#[doc(inline)]
pub use merge_map::{MergeMap, MergeValue};

use crate::{
    errors::{Result, SpanpieceError},
    models::{
        Model, Token,
        bpe::{cache::WordCache, word::Word},
    },
    types::{Offsets, TokenId},
    vocab::Vocabulary,
};

/// A Byte Pair Encoding model.
///
/// Tokenizes one word at a time: the word is symbolized char by char
/// against the vocabulary, then adjacent symbol pairs are merged greedily
/// in rank order (see [`MergeMap`]).
///
/// ```
/// use spanpiece::models::bpe::{BpeModel, MergeMap, MergeValue};
/// use spanpiece::models::Model;
/// use spanpiece::vocab::Vocabulary;
///
/// let vocab: Vocabulary<u32> = ["a", "b", "ab"].into_iter().collect();
/// let mut merges = MergeMap::new();
/// merges.insert((0, 1), MergeValue { rank: 0, new_id: 2 });
///
/// let model = BpeModel::new(vocab, merges);
/// let tokens = model.tokenize("ab").unwrap();
/// assert_eq!(tokens.len(), 1);
/// assert_eq!(tokens[0].value, "ab");
/// ```
#[derive(Debug, Clone)]
pub struct BpeModel<T: TokenId> {
    vocab: Vocabulary<T>,
    merges: MergeMap<T>,
    cache: WordCache<T>,

    /// Merge dropout probability; 0 disables dropout, 1 suppresses every
    /// merge. See: <https://arxiv.org/abs/1910.13267>
    dropout: f64,

    /// Token emitted for chars missing from the vocabulary. `None` makes
    /// such chars disappear from the output.
    unknown_token: Option<String>,

    /// Whether consecutive unknown chars fuse into one unknown token.
    fuse_unknown: bool,

    /// Prefix marking symbols that continue a word (e.g. `##`).
    continuing_subword_prefix: Option<String>,

    /// Suffix marking the final symbol of a word (e.g. `</w>`).
    end_of_word_suffix: Option<String>,
}

impl<T: TokenId> BpeModel<T> {
    /// Build a new `BpeModel` with the default cache, no dropout, and no
    /// unknown token or subword markers.
    pub fn new(
        vocab: Vocabulary<T>,
        merges: MergeMap<T>,
    ) -> Self {
        Self {
            vocab,
            merges,
            cache: WordCache::new(DEFAULT_CACHE_CAPACITY),
            dropout: 0.0,
            unknown_token: None,
            fuse_unknown: false,
            continuing_subword_prefix: None,
            end_of_word_suffix: None,
        }
    }

    /// Set the word-cache capacity; 0 disables the cache.
    pub fn with_cache_capacity(
        mut self,
        capacity: usize,
    ) -> Self {
        self.cache = WordCache::new(capacity);
        self
    }

    /// Set the merge dropout probability.
    ///
    /// Stochastic merges are never memoized: any non-zero dropout
    /// bypasses the word cache.
    pub fn with_dropout(
        mut self,
        dropout: f64,
    ) -> Self {
        self.dropout = dropout;
        self
    }

    /// Set the unknown token.
    pub fn with_unknown_token(
        mut self,
        token: impl Into<String>,
    ) -> Self {
        self.unknown_token = Some(token.into());
        self
    }

    /// Set whether consecutive unknown chars fuse into one token.
    pub fn with_unknown_fusion(
        mut self,
        fuse: bool,
    ) -> Self {
        self.fuse_unknown = fuse;
        self
    }

    /// Set the continuing-subword prefix.
    pub fn with_continuing_subword_prefix(
        mut self,
        prefix: impl Into<String>,
    ) -> Self {
        self.continuing_subword_prefix = Some(prefix.into());
        self
    }

    /// Set the end-of-word suffix.
    pub fn with_end_of_word_suffix(
        mut self,
        suffix: impl Into<String>,
    ) -> Self {
        self.end_of_word_suffix = Some(suffix.into());
        self
    }

    /// The vocabulary this model resolves against.
    pub fn vocab(&self) -> &Vocabulary<T> {
        &self.vocab
    }

    fn merge_word(
        &self,
        w: &str,
    ) -> Result<Word<T>> {
        let char_count = w.chars().count();
        let mut word = Word::with_capacity(char_count);
        let mut previous_unknown = false;

        for (index, ch) in w.chars().enumerate() {
            let mut term = String::with_capacity(ch.len_utf8());
            if index > 0 && let Some(prefix) = &self.continuing_subword_prefix {
                term.push_str(prefix);
            }
            term.push(ch);
            if index + 1 == char_count && let Some(suffix) = &self.end_of_word_suffix {
                term.push_str(suffix);
            }

            match self.vocab.get_id(&term) {
                Some(id) => {
                    word.add(id, ch.len_utf8());
                    previous_unknown = false;
                }
                None => {
                    let Some(unknown) = &self.unknown_token else {
                        // No unknown token configured: the char is dropped.
                        previous_unknown = false;
                        continue;
                    };
                    if self.fuse_unknown && previous_unknown {
                        word.extend_last(ch.len_utf8());
                    } else {
                        let id = self
                            .vocab
                            .get_id(unknown)
                            .ok_or(SpanpieceError::UnknownTokenOutOfVocabulary)?;
                        word.add(id, ch.len_utf8());
                    }
                    previous_unknown = true;
                }
            }
        }

        word.merge_all(&self.merges, self.dropout);
        Ok(word)
    }

    fn word_to_tokens(
        &self,
        word: &Word<T>,
    ) -> Result<Vec<Token<T>>> {
        let mut tokens = Vec::new();
        let mut offset = 0;
        for symbol in word.live_symbols() {
            let value = self
                .vocab
                .get_term(symbol.id)
                .ok_or_else(|| SpanpieceError::IdNotInVocabulary(symbol.id.to_string()))?
                .to_string();
            tokens.push(Token::new(
                symbol.id,
                value,
                Offsets::new(offset, offset + symbol.byte_len),
            ));
            offset += symbol.byte_len;
        }
        Ok(tokens)
    }
}

impl<T: TokenId> Model<T> for BpeModel<T> {
    fn tokenize(
        &self,
        sequence: &str,
    ) -> Result<Vec<Token<T>>> {
        if sequence.is_empty() {
            return Ok(Vec::new());
        }

        // Stochastic merges must not be memoized.
        if self.dropout > 0.0 {
            let word = self.merge_word(sequence)?;
            return self.word_to_tokens(&word);
        }

        if let Some(word) = self.cache.get(sequence) {
            return self.word_to_tokens(&word);
        }
        let word = self.merge_word(sequence)?;
        let tokens = self.word_to_tokens(&word)?;
        self.cache.set(sequence, word);
        Ok(tokens)
    }
}
