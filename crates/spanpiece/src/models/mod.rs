//! # Tokenization Models
//!
//! A [`Model`] turns one pre-tokenized shard into tokens. Two models are
//! provided:
//! * [`bpe::BpeModel`] — priority-queue driven byte pair encoding;
//! * [`wordpiece::WordPieceModel`] — greedy longest-prefix matching.

pub mod bpe;
pub mod wordpiece;

use crate::{
    errors::Result,
    types::{Offsets, TokenId},
};

/// A token produced by a [`Model`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<T: TokenId> {
    /// Vocabulary id.
    pub id: T,

    /// Surface form (including any subword markers).
    pub value: String,

    /// Byte offsets relative to the tokenized sequence.
    pub offsets: Offsets,
}

impl<T: TokenId> Token<T> {
    /// Build a new `Token`.
    pub fn new(
        id: T,
        value: String,
        offsets: Offsets,
    ) -> Self {
        Self { id, value, offsets }
    }
}

/// A model used during tokenization, like BPE or WordPiece.
pub trait Model<T: TokenId>: Send + Sync {
    /// Tokenize the given sequence.
    ///
    /// The returned token offsets are byte ranges relative to `sequence`.
    fn tokenize(
        &self,
        sequence: &str,
    ) -> Result<Vec<Token<T>>>;
}
