//! # Aligned Strings
//!
//! This module provides [`AlignedString`], the data structure that tracks
//! every mutation of a text while keeping a byte-exact alignment between
//! the mutated ("normalized") text and its immutable source ("original").
//!
//! Positions into either text are expressed as a [`TextRange`], which names
//! the referential its offsets index; [`AlignedString`] can coerce a range
//! from one referential to the other.

mod aligned_string;
mod range;

#[doc(inline)]
pub use aligned_string::{AlignedString, CharChange, SplitBehavior};
#[doc(inline)]
pub use range::TextRange;
