//! # BPE Symbol List
//!
//! A [`Word`] is a doubly-linked list of symbols stored as a dense arena:
//! nodes are never relocated, a merge absorbs the right node into the
//! left and tombstones the right one by zeroing its byte length. A binary
//! min-heap over `(rank, position)` drives the merge loop.

use std::{cmp::Reverse, collections::BinaryHeap};

use crate::{models::bpe::MergeMap, types::TokenId};

const NONE: u32 = u32::MAX;

/// A symbol in a [`Word`]: a vocabulary id covering a run of bytes of the
/// input word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Symbol<T> {
    /// Vocabulary id.
    pub id: T,

    /// How many bytes of the input word this symbol covers. Zero marks a
    /// tombstoned node.
    pub byte_len: usize,

    prev: u32,
    next: u32,
}

/// Heap entry representing a potential merge.
///
/// Ordered by `(rank, pos)` so the lowest-rank, leftmost pair is popped
/// first.
#[derive(Debug, Clone, Copy)]
struct PendingMerge<T> {
    rank: u32,
    new_id: T,
    pos: u32,
}

impl<T: TokenId> PartialEq for PendingMerge<T> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.rank == other.rank && self.pos == other.pos
    }
}

impl<T: TokenId> Eq for PendingMerge<T> {}

impl<T: TokenId> Ord for PendingMerge<T> {
    fn cmp(
        &self,
        other: &Self,
    ) -> core::cmp::Ordering {
        self.rank.cmp(&other.rank).then(self.pos.cmp(&other.pos))
    }
}

impl<T: TokenId> PartialOrd for PendingMerge<T> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// A word under merge.
#[derive(Debug, Clone, Default)]
pub(crate) struct Word<T: TokenId> {
    symbols: Vec<Symbol<T>>,
}

impl<T: TokenId> Word<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            symbols: Vec::with_capacity(capacity),
        }
    }

    /// Append a symbol covering `byte_len` bytes.
    pub fn add(
        &mut self,
        id: T,
        byte_len: usize,
    ) {
        let pos = self.symbols.len() as u32;
        let prev = if pos == 0 { NONE } else { pos - 1 };
        if prev != NONE {
            self.symbols[prev as usize].next = pos;
        }
        self.symbols.push(Symbol {
            id,
            byte_len,
            prev,
            next: NONE,
        });
    }

    /// Extend the byte length of the last symbol (unknown fusion).
    /// Returns `false` when the word is still empty.
    pub fn extend_last(
        &mut self,
        byte_len: usize,
    ) -> bool {
        match self.symbols.last_mut() {
            Some(last) => {
                last.byte_len += byte_len;
                true
            }
            None => false,
        }
    }

    /// Apply every applicable merge, lowest rank first, ties broken by
    /// leftmost position.
    ///
    /// With `dropout` in `(0, 1]`, each popped merge is skipped with that
    /// probability; skipped entries are re-queued before the next
    /// surviving merge is applied, so a surviving merge can never jump
    /// ahead of a still-valid earlier one. A dropout of `1.0` applies no
    /// merges at all.
    pub fn merge_all(
        &mut self,
        merges: &MergeMap<T>,
        dropout: f64,
    ) {
        let mut queue: BinaryHeap<Reverse<PendingMerge<T>>> =
            BinaryHeap::with_capacity(self.symbols.len());
        let mut skipped: Vec<Reverse<PendingMerge<T>>> = Vec::new();

        for pos in 0..self.symbols.len().saturating_sub(1) {
            let pair = (self.symbols[pos].id, self.symbols[pos + 1].id);
            if let Some(merge) = merges.get(&pair) {
                queue.push(Reverse(PendingMerge {
                    rank: merge.rank,
                    new_id: merge.new_id,
                    pos: pos as u32,
                }));
            }
        }

        let has_dropout = dropout > 0.0;
        while let Some(top) = queue.pop() {
            if has_dropout && rand::random::<f64>() < dropout {
                skipped.push(top);
                continue;
            }
            // Re-insert the skipped entries before applying this merge.
            queue.extend(skipped.drain(..));

            let Reverse(entry) = top;
            let pos = entry.pos as usize;

            // Tombstoned, or nothing to the right to merge with.
            if self.symbols[pos].byte_len == 0 || self.symbols[pos].next == NONE {
                continue;
            }
            let right_pos = self.symbols[pos].next as usize;

            // Drop expired entries: the pair must still resolve to the
            // same merge.
            let pair = (self.symbols[pos].id, self.symbols[right_pos].id);
            match merges.get(&pair) {
                Some(merge) if merge.new_id == entry.new_id => {}
                _ => continue,
            }

            // Left absorbs right; right is tombstoned.
            let right = self.symbols[right_pos];
            self.symbols[pos].id = entry.new_id;
            self.symbols[pos].byte_len += right.byte_len;
            self.symbols[pos].next = right.next;
            self.symbols[right_pos].byte_len = 0;
            if right.next != NONE {
                self.symbols[right.next as usize].prev = entry.pos;
            }

            // Queue the new pairs formed around the merged symbol.
            let current = self.symbols[pos];
            if current.prev != NONE {
                let prev = self.symbols[current.prev as usize];
                if let Some(merge) = merges.get(&(prev.id, current.id)) {
                    queue.push(Reverse(PendingMerge {
                        rank: merge.rank,
                        new_id: merge.new_id,
                        pos: current.prev,
                    }));
                }
            }
            if current.next != NONE {
                let next = self.symbols[current.next as usize];
                if let Some(merge) = merges.get(&(current.id, next.id)) {
                    queue.push(Reverse(PendingMerge {
                        rank: merge.rank,
                        new_id: merge.new_id,
                        pos: entry.pos,
                    }));
                }
            }
        }
    }

    /// The live symbols, in linked-list order.
    pub fn live_symbols(&self) -> impl Iterator<Item = &Symbol<T>> + '_ {
        let mut pos = if self.symbols.is_empty() { NONE } else { 0 };
        core::iter::from_fn(move || {
            if pos == NONE {
                return None;
            }
            let symbol = &self.symbols[pos as usize];
            pos = symbol.next;
            Some(symbol)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::bpe::MergeValue;

    fn merge_map(entries: &[((u32, u32), (u32, u32))]) -> MergeMap<u32> {
        let mut merges = MergeMap::new();
        for &(pair, (rank, new_id)) in entries {
            merges.insert(pair, MergeValue { rank, new_id });
        }
        merges
    }

    fn live(word: &Word<u32>) -> Vec<(u32, usize)> {
        word.live_symbols()
            .map(|symbol| (symbol.id, symbol.byte_len))
            .collect()
    }

    #[test]
    fn test_add_links_symbols() {
        let mut word: Word<u32> = Word::with_capacity(3);
        word.add(5, 1);
        word.add(6, 2);
        word.add(7, 1);
        assert_eq!(live(&word), vec![(5, 1), (6, 2), (7, 1)]);
    }

    #[test]
    fn test_extend_last() {
        let mut word: Word<u32> = Word::default();
        assert!(!word.extend_last(1));
        word.add(5, 1);
        assert!(word.extend_last(2));
        assert_eq!(live(&word), vec![(5, 3)]);
    }

    #[test]
    fn test_merge_all_applies_lowest_rank_first() {
        // a b c with merges: (b, c) -> bc at rank 0, (a, bc) -> abc at 1,
        // and (a, b) -> ab at rank 2 which must never fire.
        let merges = merge_map(&[
            ((1, 2), (0, 10)),
            ((0, 10), (1, 11)),
            ((0, 1), (2, 12)),
        ]);

        let mut word: Word<u32> = Word::default();
        word.add(0, 1);
        word.add(1, 1);
        word.add(2, 1);
        word.merge_all(&merges, 0.0);

        assert_eq!(live(&word), vec![(11, 3)]);
    }

    #[test]
    fn test_merge_all_breaks_rank_ties_leftmost() {
        // a a a with (a, a) -> aa at rank 0: the leftmost pair merges,
        // leaving aa + a (no (aa, a) merge configured).
        let merges = merge_map(&[((0, 0), (0, 10))]);

        let mut word: Word<u32> = Word::default();
        word.add(0, 1);
        word.add(0, 1);
        word.add(0, 1);
        word.merge_all(&merges, 0.0);

        assert_eq!(live(&word), vec![(10, 2), (0, 1)]);
    }

    #[test]
    fn test_merge_all_discards_stale_entries() {
        // a b b: (a, b) and (b, b) both queued; after (a, b) -> ab fires,
        // the (b, b) entry at position 1 is stale and must be dropped.
        let merges = merge_map(&[((0, 1), (0, 10)), ((1, 1), (1, 11))]);

        let mut word: Word<u32> = Word::default();
        word.add(0, 1);
        word.add(1, 1);
        word.add(1, 1);
        word.merge_all(&merges, 0.0);

        assert_eq!(live(&word), vec![(10, 2), (1, 1)]);
    }

    #[test]
    fn test_merge_all_with_full_dropout_is_identity() {
        let merges = merge_map(&[((0, 1), (0, 10))]);

        let mut word: Word<u32> = Word::default();
        word.add(0, 1);
        word.add(1, 1);
        word.merge_all(&merges, 1.0);

        assert_eq!(live(&word), vec![(0, 1), (1, 1)]);
    }

    #[test]
    fn test_byte_lengths_accumulate_through_merges() {
        // Multi-byte symbols keep the byte accounting.
        let merges = merge_map(&[((3, 4), (0, 30))]);

        let mut word: Word<u32> = Word::default();
        word.add(3, 2);
        word.add(4, 3);
        word.merge_all(&merges, 0.0);

        assert_eq!(live(&word), vec![(30, 5)]);
    }
}
