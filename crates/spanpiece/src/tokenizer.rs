//! # Tokenizer Surface

use crate::{
    aligned::AlignedString,
    encoding::Encoding,
    errors::Result,
    models::Model,
    normalizers::Normalizer,
    pretokenized::PreTokenizedString,
    pretokenizers::PreTokenizer,
    types::TokenId,
};

/// The assembled tokenization pipeline: optional normalizer, optional
/// pre-tokenizer, and a model.
///
/// One [`encode`](Self::encode) call is purely sequential; a `Tokenizer`
/// can be shared across threads, with the model's cache (if any) doing
/// its own synchronization.
pub struct Tokenizer<T: TokenId, M: Model<T>> {
    normalizer: Option<Box<dyn Normalizer>>,
    pre_tokenizer: Option<Box<dyn PreTokenizer<T>>>,
    model: M,
}

impl<T: TokenId, M: Model<T>> Tokenizer<T, M> {
    /// Build a new `Tokenizer` around a model, with no normalizer and no
    /// pre-tokenizer.
    pub fn new(model: M) -> Self {
        Self {
            normalizer: None,
            pre_tokenizer: None,
            model,
        }
    }

    /// Set the normalizer.
    pub fn with_normalizer(
        mut self,
        normalizer: impl Normalizer + 'static,
    ) -> Self {
        self.normalizer = Some(Box::new(normalizer));
        self
    }

    /// Set the pre-tokenizer.
    pub fn with_pre_tokenizer(
        mut self,
        pre_tokenizer: impl PreTokenizer<T> + 'static,
    ) -> Self {
        self.pre_tokenizer = Some(Box::new(pre_tokenizer));
        self
    }

    /// The underlying model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Tokenize `text` into an [`Encoding`].
    ///
    /// Runs normalize → pre-tokenize → model over the input; the
    /// encoding's offsets are byte ranges into `text` as given.
    pub fn encode(
        &self,
        text: &str,
        type_id: u32,
    ) -> Result<Encoding<T>> {
        log::trace!("encoding {} bytes", text.len());

        let mut aligned = AlignedString::new(text);
        if let Some(normalizer) = &self.normalizer {
            normalizer.normalize(&mut aligned)?;
        }

        let mut pretokenized = PreTokenizedString::from(aligned);
        if let Some(pre_tokenizer) = &self.pre_tokenizer {
            pre_tokenizer.pre_tokenize(&mut pretokenized)?;
        }

        pretokenized.tokenize(|sequence| self.model.tokenize(sequence))?;
        pretokenized.into_encoding(None, type_id)
    }
}
