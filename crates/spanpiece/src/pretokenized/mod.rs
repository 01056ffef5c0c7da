//! # Pre-Tokenized Strings
//!
//! A [`PreTokenizedString`] is an ordered sequence of [`Split`]s over one
//! source text. Splitting, normalizing, and tokenizing passes run over
//! the splits in order, skipping those that already carry tokens; once
//! every split is tokenized the whole thing collapses into an
//! [`Encoding`](crate::encoding::Encoding) with offsets lifted back into
//! the original text.

mod pretokenized_string;
mod split;

#[doc(inline)]
pub use pretokenized_string::PreTokenizedString;
#[doc(inline)]
pub use split::{NormalizedByteSplit, OriginalByteSplit, Split};
