//! # BPE Word Cache

use std::num::NonZeroUsize;

use lru::LruCache;
use parking_lot::Mutex;

use crate::{models::bpe::Word, types::TokenId};

/// Default capacity for the word cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Bounded read-through cache of post-merge words, keyed by the input
/// word string.
///
/// A capacity of zero disables caching entirely. Cache hits are
/// idempotent reconstructions of the same word, so a plain mutex around
/// the LRU state is all the synchronization encoding paths need.
pub(crate) struct WordCache<T: TokenId> {
    capacity: usize,
    cache: Option<Mutex<LruCache<String, Word<T>>>>,
}

impl<T: TokenId> WordCache<T> {
    pub fn new(capacity: usize) -> Self {
        let cache = NonZeroUsize::new(capacity).map(|capacity| Mutex::new(LruCache::new(capacity)));
        if cache.is_none() {
            log::debug!("word cache disabled (capacity 0)");
        }
        Self { capacity, cache }
    }

    pub fn get(
        &self,
        key: &str,
    ) -> Option<Word<T>> {
        self.cache.as_ref()?.lock().get(key).cloned()
    }

    pub fn set(
        &self,
        key: &str,
        word: Word<T>,
    ) {
        if let Some(cache) = &self.cache {
            cache.lock().put(key.to_string(), word);
        }
    }
}

impl<T: TokenId> Clone for WordCache<T> {
    // Clones start cold with the same capacity.
    fn clone(&self) -> Self {
        Self::new(self.capacity)
    }
}

impl<T: TokenId> core::fmt::Debug for WordCache<T> {
    fn fmt(
        &self,
        f: &mut core::fmt::Formatter<'_>,
    ) -> core::fmt::Result {
        f.debug_struct("WordCache")
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_through() {
        let cache: WordCache<u32> = WordCache::new(2);
        assert!(cache.get("ab").is_none());

        let mut word = Word::default();
        word.add(1, 1);
        cache.set("ab", word);

        let cached = cache.get("ab").unwrap();
        assert_eq!(cached.live_symbols().count(), 1);
    }

    #[test]
    fn test_bounded_capacity_evicts() {
        let cache: WordCache<u32> = WordCache::new(1);
        cache.set("a", Word::default());
        cache.set("b", Word::default());
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
    }

    #[test]
    fn test_zero_capacity_disables() {
        let cache: WordCache<u32> = WordCache::new(0);
        cache.set("a", Word::default());
        assert!(cache.get("a").is_none());
    }
}
