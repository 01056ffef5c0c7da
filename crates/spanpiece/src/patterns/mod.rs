//! # Split Patterns
//!
//! A [`SplitPattern`] produces a full cover of a string as an ordered list
//! of [`Capture`]s: concatenating the capture ranges reproduces the input
//! exactly, with each range flagged as a match or a gap between matches.
//!
//! Two regex engines are supported through [`RegexWrapper`]: the standard
//! [`regex`] crate, and [`fancy_regex`] for patterns that need lookaround.

mod regex_wrapper;
mod split_pattern;

#[doc(inline)]
pub use regex_wrapper::RegexWrapper;
#[doc(inline)]
pub use split_pattern::{Capture, SplitPattern};
