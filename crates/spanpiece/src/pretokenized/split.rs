//! # Pre-Tokenization Splits

use crate::{
    aligned::AlignedString,
    models::Token,
    types::{Offsets, TokenId},
};

/// One shard of a pre-tokenized string.
///
/// Bundles the shard's [`AlignedString`] (whose `original_shift` locates
/// it in the top-level source) with the tokens a model later produced
/// from it. A split with tokens is frozen: further split and normalize
/// passes leave it untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Split<T: TokenId> {
    /// The underlying aligned string.
    pub aligned: AlignedString,

    /// Tokens attached by a model, if any.
    pub tokens: Option<Vec<Token<T>>>,
}

impl<T: TokenId> From<AlignedString> for Split<T> {
    fn from(aligned: AlignedString) -> Self {
        Self {
            aligned,
            tokens: None,
        }
    }
}

/// A shard view with offsets in the original referential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginalByteSplit<T: TokenId> {
    /// The shard's normalized text.
    pub text: String,

    /// Byte offsets in the top-level original text.
    pub offsets: Offsets,

    /// Tokens attached by a model, if any.
    pub tokens: Option<Vec<Token<T>>>,
}

/// A shard view with offsets in the concatenated normalized referential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedByteSplit<T: TokenId> {
    /// The shard's normalized text.
    pub text: String,

    /// Byte offsets in the concatenation of all shards' normalized texts.
    pub offsets: Offsets,

    /// Tokens attached by a model, if any.
    pub tokens: Option<Vec<Token<T>>>,
}
