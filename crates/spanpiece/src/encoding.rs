//! # Encoding Container

use crate::types::{Offsets, TokenId};

/// The output of a tokenization pipeline.
///
/// All per-token lists have the same length. `offsets` are byte ranges
/// into the **original** input text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Encoding<T: TokenId> {
    /// Vocabulary ids.
    pub ids: Vec<T>,

    /// Sequence type id of each token.
    pub type_ids: Vec<u32>,

    /// Token surface forms.
    pub tokens: Vec<String>,

    /// Index of the word (pre-tokenization shard) each token came from.
    pub word_indices: Vec<Option<u32>>,

    /// Byte offsets of each token into the original input.
    pub offsets: Vec<Offsets>,

    /// Mask identifying special tokens.
    pub special_tokens_mask: Vec<u32>,

    /// Mask identifying padding for the attention mechanism.
    pub attention_mask: Vec<u32>,

    /// Encodings generated by truncation overflow.
    pub overflowing: Vec<Encoding<T>>,
}

impl<T: TokenId> Encoding<T> {
    /// Build an empty `Encoding` with reserved capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            ids: Vec::with_capacity(capacity),
            type_ids: Vec::with_capacity(capacity),
            tokens: Vec::with_capacity(capacity),
            word_indices: Vec::with_capacity(capacity),
            offsets: Vec::with_capacity(capacity),
            special_tokens_mask: Vec::with_capacity(capacity),
            attention_mask: Vec::with_capacity(capacity),
            overflowing: Vec::new(),
        }
    }

    /// Append one non-special, attended token.
    pub fn push(
        &mut self,
        id: T,
        token: String,
        offsets: Offsets,
        word_index: Option<u32>,
        type_id: u32,
    ) {
        self.ids.push(id);
        self.tokens.push(token);
        self.offsets.push(offsets);
        self.word_indices.push(word_index);
        self.type_ids.push(type_id);
        self.special_tokens_mask.push(0);
        self.attention_mask.push(1);
    }

    /// Number of tokens.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Is this encoding empty?
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
