//! # Vocabulary
//!
//! Bidirectional term ↔ id associations, loadable from the standard JSON
//! vocabulary format (an object mapping each term to a non-negative id).
//! The mapping must be bijective: duplicate ids are rejected at load time.

use std::path::Path;

use crate::{
    errors::{Result, SpanpieceError},
    types::{SpHashMap, TokenId},
};

/// Bidirectional term ↔ id vocabulary.
#[derive(Debug, Clone, Default)]
pub struct Vocabulary<T: TokenId> {
    term_to_id: SpHashMap<String, T>,
    id_to_term: SpHashMap<T, String>,
}

impl<T: TokenId> Vocabulary<T> {
    /// Build a new empty vocabulary.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a vocabulary from a JSON file.
    ///
    /// ## Arguments
    /// * `path` - Path to a JSON object mapping terms to ids.
    ///
    /// ## Returns
    /// The loaded vocabulary, or an error for unreadable files, invalid
    /// JSON, ids that do not fit `T`, or duplicate ids.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Load a vocabulary from JSON text. See
    /// [`from_json_file`](Self::from_json_file).
    pub fn from_json(raw: &str) -> Result<Self> {
        let parsed: serde_json::Map<String, serde_json::Value> = serde_json::from_str(raw)?;

        let mut vocab = Self {
            term_to_id: SpHashMap::with_capacity(parsed.len()),
            id_to_term: SpHashMap::with_capacity(parsed.len()),
        };
        for (term, value) in parsed {
            let id = value
                .as_u64()
                .and_then(T::from_u64)
                .ok_or(SpanpieceError::IdOutOfRange)?;
            vocab.try_insert(term, id)?;
        }

        log::info!("loaded vocabulary with {} terms", vocab.len());
        Ok(vocab)
    }

    /// Add a term, assigning it the next id (the current size).
    ///
    /// Adding a term that already exists does nothing.
    ///
    /// ## Panics
    /// Panics if the next id does not fit `T`.
    pub fn add_term(
        &mut self,
        term: &str,
    ) {
        if self.term_to_id.contains_key(term) {
            return;
        }
        let id = T::from_usize(self.len()).expect("vocabulary size exceeds the id type");
        self.term_to_id.insert(term.to_string(), id);
        self.id_to_term.insert(id, term.to_string());
    }

    fn try_insert(
        &mut self,
        term: String,
        id: T,
    ) -> Result<()> {
        if let Some(previous) = self.id_to_term.get(&id) {
            return Err(SpanpieceError::VocabConflict(format!(
                "id {id} maps to both {previous:?} and {term:?}"
            )));
        }
        self.id_to_term.insert(id, term.clone());
        self.term_to_id.insert(term, id);
        Ok(())
    }

    /// Number of terms.
    pub fn len(&self) -> usize {
        self.term_to_id.len()
    }

    /// Is this vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.term_to_id.is_empty()
    }

    /// The id associated with a term.
    pub fn get_id(
        &self,
        term: &str,
    ) -> Option<T> {
        self.term_to_id.get(term).copied()
    }

    /// The term associated with an id.
    pub fn get_term(
        &self,
        id: T,
    ) -> Option<&str> {
        self.id_to_term.get(&id).map(String::as_str)
    }
}

impl<T: TokenId> FromIterator<String> for Vocabulary<T> {
    fn from_iter<I: IntoIterator<Item = String>>(terms: I) -> Self {
        let mut vocab = Self::new();
        for term in terms {
            vocab.add_term(&term);
        }
        vocab
    }
}

impl<'a, T: TokenId> FromIterator<&'a str> for Vocabulary<T> {
    fn from_iter<I: IntoIterator<Item = &'a str>>(terms: I) -> Self {
        let mut vocab = Self::new();
        for term in terms {
            vocab.add_term(term);
        }
        vocab
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_term_assigns_insertion_order_ids() {
        let mut vocab: Vocabulary<u32> = Vocabulary::new();
        vocab.add_term("hello");
        vocab.add_term("world");
        vocab.add_term("hello");

        assert_eq!(vocab.len(), 2);
        assert_eq!(vocab.get_id("hello"), Some(0));
        assert_eq!(vocab.get_id("world"), Some(1));
        assert_eq!(vocab.get_term(1), Some("world"));
        assert_eq!(vocab.get_id("missing"), None);
        assert_eq!(vocab.get_term(9), None);
    }

    #[test]
    fn test_from_json() {
        let vocab: Vocabulary<u32> =
            Vocabulary::from_json(r###"{"foo": 0, "bar": 1, "##baz": 2}"###).unwrap();
        assert_eq!(vocab.len(), 3);
        assert_eq!(vocab.get_id("##baz"), Some(2));
        assert_eq!(vocab.get_term(0), Some("foo"));
    }

    #[test]
    fn test_from_json_rejects_duplicate_ids() {
        let result = Vocabulary::<u32>::from_json(r#"{"a": 0, "b": 0}"#);
        assert!(matches!(result, Err(SpanpieceError::VocabConflict(_))));
    }

    #[test]
    fn test_from_json_rejects_unrepresentable_ids() {
        let result = Vocabulary::<u8>::from_json(r#"{"a": 300}"#);
        assert!(matches!(result, Err(SpanpieceError::IdOutOfRange)));

        let result = Vocabulary::<u32>::from_json(r#"{"a": -1}"#);
        assert!(matches!(result, Err(SpanpieceError::IdOutOfRange)));
    }

    #[test]
    fn test_from_json_rejects_malformed_json() {
        assert!(matches!(
            Vocabulary::<u32>::from_json("not json"),
            Err(SpanpieceError::Json(_))
        ));
    }
}
