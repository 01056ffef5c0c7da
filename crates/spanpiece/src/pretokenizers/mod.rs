//! # Pre-Tokenizers
//!
//! A [`PreTokenizer`] performs the pre-segmentation step: one or more
//! split passes (and possibly normalize passes) over a
//! [`PreTokenizedString`], producing the shards that models tokenize
//! independently.

mod bert;
mod byte_level;
mod delimiter;
mod metaspace;
mod whitespace;

#[doc(inline)]
pub use bert::BertPreTokenizer;
#[doc(inline)]
pub use byte_level::{ByteLevelPreTokenizer, byte_char};
#[doc(inline)]
pub use delimiter::CharDelimiterPreTokenizer;
#[doc(inline)]
pub use metaspace::{DEFAULT_METASPACE_REPLACEMENT, MetaspacePreTokenizer};
#[doc(inline)]
pub use whitespace::{WhitespacePreTokenizer, WhitespaceSplitPreTokenizer};

use crate::{errors::Result, pretokenized::PreTokenizedString, types::TokenId};

/// Splits a [`PreTokenizedString`] into the shards a model tokenizes.
pub trait PreTokenizer<T: TokenId>: Send + Sync {
    /// Run the pre-segmentation passes.
    fn pre_tokenize(
        &self,
        pretokenized: &mut PreTokenizedString<T>,
    ) -> Result<()>;
}
