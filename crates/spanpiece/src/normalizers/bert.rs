//! # BERT Normalizer

use unicode_normalization::char::is_combining_mark;

use crate::{
    aligned::{AlignedString, CharChange},
    errors::Result,
    normalizers::Normalizer,
    unicode::{is_cjk_ideograph, is_control, is_whitespace},
};

/// String normalizations suitable for BERT-based models.
#[derive(Debug, Clone, Copy)]
pub struct BertNormalizer {
    /// Replace whitespace-like chars with plain spaces and drop control
    /// characters (keeping `\t\n\r` as whitespace).
    clean_text: bool,

    /// Put spaces around CJK ideographs so they can be split apart.
    handle_chinese_chars: bool,

    /// Drop non-spacing combining marks (callers provide pre-decomposed
    /// text).
    strip_accents: bool,

    /// Lowercase the text.
    lowercase: bool,
}

impl Default for BertNormalizer {
    fn default() -> Self {
        Self::new(true, true, true, true)
    }
}

impl BertNormalizer {
    /// Build a new `BertNormalizer` with each normalization toggled
    /// individually.
    pub fn new(
        clean_text: bool,
        handle_chinese_chars: bool,
        strip_accents: bool,
        lowercase: bool,
    ) -> Self {
        Self {
            clean_text,
            handle_chinese_chars,
            strip_accents,
            lowercase,
        }
    }

    fn clean_text(
        &self,
        aligned: &mut AlignedString,
    ) {
        aligned.filter(|ch| !(ch == '\0' || ch == '\u{FFFD}' || is_control(ch)));
        aligned.map(|ch| if is_whitespace(ch) { ' ' } else { ch });
    }

    fn pad_cjk_ideographs(
        &self,
        aligned: &mut AlignedString,
    ) {
        let mut changes = Vec::with_capacity(aligned.len());
        for ch in aligned.get().chars() {
            if is_cjk_ideograph(ch) {
                changes.push(CharChange::new(' ', 0));
                changes.push(CharChange::new(ch, 1));
                changes.push(CharChange::new(' ', 1));
            } else {
                changes.push(CharChange::new(ch, 0));
            }
        }
        aligned.transform(changes, 0);
    }
}

impl Normalizer for BertNormalizer {
    fn normalize(
        &self,
        aligned: &mut AlignedString,
    ) -> Result<()> {
        if self.clean_text {
            self.clean_text(aligned);
        }
        if self.handle_chinese_chars {
            self.pad_cjk_ideographs(aligned);
        }
        if self.strip_accents {
            aligned.filter(|ch| !is_combining_mark(ch));
        }
        if self.lowercase {
            aligned.lowercase();
        }
        Ok(())
    }
}
