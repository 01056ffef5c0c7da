//! # Normalizers
//!
//! A [`Normalizer`] mutates an [`AlignedString`] in place, keeping the
//! alignment back to the original text intact.

mod bert;

#[doc(inline)]
pub use bert::BertNormalizer;

use crate::{aligned::AlignedString, errors::Result};

/// Pre-processes a string before pre-tokenization.
pub trait Normalizer: Send + Sync {
    /// Transform the aligned string in place.
    fn normalize(
        &self,
        aligned: &mut AlignedString,
    ) -> Result<()>;
}

/// Remaps all letters to their lower case.
#[derive(Debug, Clone, Copy, Default)]
pub struct LowercaseNormalizer;

impl Normalizer for LowercaseNormalizer {
    fn normalize(
        &self,
        aligned: &mut AlignedString,
    ) -> Result<()> {
        aligned.lowercase();
        Ok(())
    }
}

/// Removes leading and/or trailing whitespace.
#[derive(Debug, Clone, Copy)]
pub struct StripNormalizer {
    left: bool,
    right: bool,
}

impl Default for StripNormalizer {
    fn default() -> Self {
        Self {
            left: true,
            right: true,
        }
    }
}

impl StripNormalizer {
    /// Build a new `StripNormalizer` stripping leading (`left`) and/or
    /// trailing (`right`) whitespace.
    pub fn new(
        left: bool,
        right: bool,
    ) -> Self {
        Self { left, right }
    }
}

impl Normalizer for StripNormalizer {
    fn normalize(
        &self,
        aligned: &mut AlignedString,
    ) -> Result<()> {
        aligned.trim_ends(self.left, self.right);
        Ok(())
    }
}

/// Runs an ordered list of normalizers against the same aligned string.
///
/// The first error aborts the sequence.
#[derive(Default)]
pub struct SequenceNormalizer {
    normalizers: Vec<Box<dyn Normalizer>>,
}

impl SequenceNormalizer {
    /// Build a new `SequenceNormalizer` from the ordered list.
    pub fn new(normalizers: Vec<Box<dyn Normalizer>>) -> Self {
        Self { normalizers }
    }
}

impl Normalizer for SequenceNormalizer {
    fn normalize(
        &self,
        aligned: &mut AlignedString,
    ) -> Result<()> {
        for normalizer in &self.normalizers {
            normalizer.normalize(aligned)?;
        }
        Ok(())
    }
}
