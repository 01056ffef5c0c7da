//! # Ranked Merge Table

use std::path::Path;

use crate::{
    errors::{Result, SpanpieceError},
    types::{Pair, SpHashMap, TokenId},
    vocab::Vocabulary,
};

/// The merge resolved for a symbol pair: its priority and the id of the
/// merged symbol. Lower rank wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeValue<T> {
    /// Application priority; lower applies first.
    pub rank: u32,

    /// Vocabulary id of the merged symbol.
    pub new_id: T,
}

/// `{ (T, T) -> MergeValue<T> }` ranked merge table.
#[derive(Debug, Clone, Default)]
pub struct MergeMap<T: TokenId> {
    merges: SpHashMap<Pair<T>, MergeValue<T>>,
}

impl<T: TokenId> MergeMap<T> {
    /// Build a new empty `MergeMap`.
    pub fn new() -> Self {
        Self {
            merges: SpHashMap::default(),
        }
    }

    /// Insert a merge for a pair of ids.
    pub fn insert(
        &mut self,
        pair: Pair<T>,
        value: MergeValue<T>,
    ) {
        self.merges.insert(pair, value);
    }

    /// Look up the merge for a pair of ids.
    pub fn get(
        &self,
        pair: &Pair<T>,
    ) -> Option<MergeValue<T>> {
        self.merges.get(pair).copied()
    }

    /// Number of merges.
    pub fn len(&self) -> usize {
        self.merges.len()
    }

    /// Is this table empty?
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    /// Load a merge table from a merges file.
    ///
    /// See [`from_merges_text`](Self::from_merges_text).
    pub fn from_merges_file(
        path: impl AsRef<Path>,
        vocab: &Vocabulary<T>,
        prefix_length: usize,
    ) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_merges_text(&raw, vocab, prefix_length)
    }

    /// Parse a merge table from merges-file text.
    ///
    /// An optional `#version: …` first line is ignored. Every remaining
    /// non-empty line holds two whitespace-separated tokens `left right`;
    /// the merged term is `left ++ right[prefix_length..]`, where
    /// `prefix_length` strips a continuing-subword prefix from the right
    /// part. All three terms must resolve in `vocab`. Rank is the
    /// zero-based index of the merge line.
    pub fn from_merges_text(
        raw: &str,
        vocab: &Vocabulary<T>,
        prefix_length: usize,
    ) -> Result<Self> {
        let malformed = |line: usize, reason: String| SpanpieceError::MalformedMerges {
            line: line + 1,
            reason,
        };

        let mut map = Self::new();
        let mut rank: u32 = 0;

        for (line_number, line) in raw.lines().enumerate() {
            let line = line.trim_end();
            if line.is_empty() {
                continue;
            }
            if line_number == 0 && line.starts_with("#version") {
                continue;
            }

            let mut parts = line.split_whitespace();
            let (Some(left), Some(right), None) = (parts.next(), parts.next(), parts.next())
            else {
                return Err(malformed(
                    line_number,
                    "expected two whitespace-separated tokens".to_string(),
                ));
            };

            let left_id = vocab
                .get_id(left)
                .ok_or_else(|| malformed(line_number, format!("{left:?} is not in the vocabulary")))?;
            let right_id = vocab
                .get_id(right)
                .ok_or_else(|| malformed(line_number, format!("{right:?} is not in the vocabulary")))?;

            let stripped = right.get(prefix_length..).ok_or_else(|| {
                malformed(
                    line_number,
                    format!("prefix length {prefix_length} does not fit {right:?}"),
                )
            })?;
            let merged = format!("{left}{stripped}");
            let new_id = vocab.get_id(&merged).ok_or_else(|| {
                malformed(line_number, format!("{merged:?} is not in the vocabulary"))
            })?;

            map.insert((left_id, right_id), MergeValue { rank, new_id });
            rank += 1;
        }

        log::info!("loaded merge table with {} merges", map.len());
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab() -> Vocabulary<u32> {
        ["a", "b", "c", "ab", "abc"].into_iter().collect()
    }

    #[test]
    fn test_parse_with_version_header() {
        let merges = MergeMap::from_merges_text(
            "#version: 0.2\na b\nab c\n",
            &vocab(),
            0,
        )
        .unwrap();

        assert_eq!(merges.len(), 2);
        assert_eq!(
            merges.get(&(0, 1)),
            Some(MergeValue { rank: 0, new_id: 3 })
        );
        assert_eq!(
            merges.get(&(3, 2)),
            Some(MergeValue { rank: 1, new_id: 4 })
        );
        assert_eq!(merges.get(&(1, 2)), None);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let merges = MergeMap::from_merges_text("a b\n\nab c\n", &vocab(), 0).unwrap();
        assert_eq!(merges.len(), 2);
    }

    #[test]
    fn test_parse_strips_continuing_subword_prefix() {
        let vocab: Vocabulary<u32> = ["a", "##b", "ab"].into_iter().collect();
        let merges = MergeMap::from_merges_text("a ##b\n", &vocab, 2).unwrap();
        assert_eq!(
            merges.get(&(0, 1)),
            Some(MergeValue { rank: 0, new_id: 2 })
        );
    }

    #[test]
    fn test_parse_reports_line_numbers() {
        let err = MergeMap::from_merges_text("a b\na\n", &vocab(), 0).unwrap_err();
        match err {
            SpanpieceError::MalformedMerges { line, .. } => assert_eq!(line, 2),
            other => panic!("unexpected error: {other:?}"),
        }

        let err = MergeMap::from_merges_text("a b c\n", &vocab(), 0).unwrap_err();
        assert!(matches!(
            err,
            SpanpieceError::MalformedMerges { line: 1, .. }
        ));

        // Terms must resolve in the vocabulary.
        let err = MergeMap::from_merges_text("a z\n", &vocab(), 0).unwrap_err();
        assert!(matches!(
            err,
            SpanpieceError::MalformedMerges { line: 1, .. }
        ));
    }
}
