//! # Common Types and Traits

use core::{
    fmt::{Debug, Display},
    hash::Hash,
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

/// A type that can be used as a vocabulary id.
///
/// Ids are constrained to be unsigned primitive integers; the largest id
/// in a vocabulary must be representable by `T`.
pub trait TokenId:
    'static
    + PrimInt
    + FromPrimitive
    + ToPrimitive
    + Unsigned
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
{
}

impl<T> TokenId for T where
    T: 'static
        + PrimInt
        + FromPrimitive
        + ToPrimitive
        + Unsigned
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
{
}

/// A pair of ids.
pub type Pair<T> = (T, T);

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type alias for hash maps in this crate.
        ///
        /// Note: `ahash::AHashMap` is a specialization of `std::collections::HashMap`.
        pub type SpHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Type alias for hash sets in this crate.
        pub type SpHashSet<V> = ahash::AHashSet<V>;
    } else {
        /// Type alias for hash maps in this crate.
        pub type SpHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Type alias for hash sets in this crate.
        pub type SpHashSet<V> = std::collections::HashSet<V>;
    }
}

/// A half-open `[start, end)` byte range.
///
/// Which text the positions index depends on context; every producer in
/// this crate documents the referential its offsets are relative to.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offsets {
    /// Start byte position, inclusive.
    pub start: usize,

    /// End byte position, exclusive.
    pub end: usize,
}

impl Offsets {
    /// Build a new `Offsets`.
    pub fn new(
        start: usize,
        end: usize,
    ) -> Self {
        Self { start, end }
    }

    /// Length of the range in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Is this range empty?
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

impl From<(usize, usize)> for Offsets {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets() {
        let offsets = Offsets::new(3, 7);
        assert_eq!(offsets.len(), 4);
        assert!(!offsets.is_empty());
        assert_eq!(offsets, (3, 7).into());

        assert!(Offsets::new(5, 5).is_empty());
        assert_eq!(Offsets::default(), Offsets::new(0, 0));
    }
}
