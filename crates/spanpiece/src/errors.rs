//! # Error Types

/// Errors from spanpiece operations.
#[derive(Debug, thiserror::Error)]
pub enum SpanpieceError {
    /// The configured unknown token is not in the vocabulary.
    #[error("the provided unknown token is out of vocabulary")]
    UnknownTokenOutOfVocabulary,

    /// A token id produced during tokenization has no vocabulary entry.
    #[error("id {0} not found in vocabulary")]
    IdNotInVocabulary(String),

    /// Two vocabulary terms resolved to the same id, or vice versa.
    #[error("vocabulary conflict: {0}")]
    VocabConflict(String),

    /// An id value does not fit the configured id type.
    #[error("token id out of range for the configured id type")]
    IdOutOfRange,

    /// A merges-file line could not be parsed or resolved.
    #[error("merges line {line}: {reason}")]
    MalformedMerges {
        /// One-based line number of the offending line.
        line: usize,
        /// What went wrong on that line.
        reason: String,
    },

    /// A range could not be coerced onto the target referential.
    #[error("range not coercible onto the target referential")]
    BadRange,

    /// An encoding was assembled while a split still had no tokens.
    #[error("cannot assemble an encoding: a split has no tokens")]
    UntokenizedSplit,

    /// Error from the basic regex engine.
    #[error(transparent)]
    Regex(Box<regex::Error>),

    /// Error from the lookaround regex engine.
    #[error(transparent)]
    FancyRegex(Box<fancy_regex::Error>),

    /// I/O error from a file loader.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Vocabulary JSON decode error.
    #[error("vocabulary parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<regex::Error> for SpanpieceError {
    fn from(err: regex::Error) -> Self {
        Self::Regex(err.into())
    }
}

impl From<fancy_regex::Error> for SpanpieceError {
    fn from(err: fancy_regex::Error) -> Self {
        Self::FancyRegex(err.into())
    }
}

/// Result type for spanpiece operations.
pub type Result<T> = core::result::Result<T, SpanpieceError>;
