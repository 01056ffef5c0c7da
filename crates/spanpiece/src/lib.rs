//! # `spanpiece` Subword Tokenizer
//!
//! Offset-aligned subword tokenization for neural-network language
//! models: raw text in, vocabulary ids out, with byte-exact spans from
//! every token back to the original input.
//!
//! See:
//! * [`aligned`] — the aligned string engine tracking every text mutation.
//! * [`patterns`] — split patterns covering a string with match captures.
//! * [`normalizers`] / [`pretokenizers`] — the rule sets run before a model.
//! * [`models`] — BPE and WordPiece.
//! * [`tokenizer`] — the assembled pipeline producing an [`encoding::Encoding`].
//!
//! ## Example
//!
//! ```
//! use spanpiece::models::wordpiece::WordPieceModel;
//! use spanpiece::normalizers::BertNormalizer;
//! use spanpiece::pretokenizers::BertPreTokenizer;
//! use spanpiece::tokenizer::Tokenizer;
//! use spanpiece::vocab::Vocabulary;
//!
//! let vocab: Vocabulary<u32> = ["[UNK]", "hello", "world", "!"].into_iter().collect();
//! let tokenizer = Tokenizer::new(WordPieceModel::new(vocab))
//!     .with_normalizer(BertNormalizer::default())
//!     .with_pre_tokenizer(BertPreTokenizer);
//!
//! let encoding = tokenizer.encode("Hello world!", 0).unwrap();
//! assert_eq!(encoding.tokens, vec!["hello", "world", "!"]);
//! // Offsets index the raw input, not the lowercased text.
//! assert_eq!(&"Hello world!"[encoding.offsets[0].start..encoding.offsets[0].end], "Hello");
//! ```

#![warn(missing_docs, unused)]

pub mod aligned;
pub mod encoding;
pub mod errors;
pub mod models;
pub mod normalizers;
pub mod patterns;
pub mod pretokenized;
pub mod pretokenizers;
pub mod tokenizer;
pub mod types;
pub mod vocab;

mod unicode;

#[doc(inline)]
pub use errors::{Result, SpanpieceError};
#[doc(inline)]
pub use types::{Offsets, TokenId};
