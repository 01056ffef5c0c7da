//! # Character Classes
//!
//! Hand-rolled classifications for the normalizer and pre-tokenizer
//! rules. These follow the BERT reference definitions; the non-ASCII
//! range tables cover the common blocks rather than the full Unicode
//! database.

/// Whitespace per the BERT cleanup rules.
///
/// `char::is_whitespace` follows Unicode `White_Space`, which already
/// counts `\t`, `\n` and `\r`.
pub(crate) fn is_whitespace(ch: char) -> bool {
    ch.is_whitespace()
}

/// Control characters, with `\t`, `\n` and `\r` counted as whitespace
/// instead.
///
/// Covers `Cc` plus the format characters common in text corpora; the
/// full `Cf`/`Cn`/`Co` sets are not consulted.
pub(crate) fn is_control(ch: char) -> bool {
    if matches!(ch, '\t' | '\n' | '\r') {
        return false;
    }
    ch.is_control()
        || matches!(
            ch as u32,
            0x00AD // soft hyphen
            | 0x200B..=0x200F // zero-width spaces, direction marks
            | 0x202A..=0x202E // directional embedding
            | 0x2060..=0x2064 // word joiner, invisible operators
            | 0xFEFF // zero-width no-break space
        )
}

/// CJK ideographs: the CJK Unified Ideographs block, its extensions, and
/// the compatibility blocks.
///
/// The modern Korean Hangul alphabet and Japanese Hiragana/Katakana are
/// different blocks: those scripts write space-separated words and are
/// handled like any other language.
pub(crate) fn is_cjk_ideograph(ch: char) -> bool {
    matches!(
        ch as u32,
        0x3400..=0x4DBF
            | 0x4E00..=0x9FFF
            | 0xF900..=0xFAFF
            | 0x20000..=0x2A6DF
            | 0x2A700..=0x2B73F
            | 0x2B740..=0x2B81F
            | 0x2B920..=0x2CEAF
            | 0x2F800..=0x2FA1F
    )
}

/// Punctuation: ASCII punctuation plus the common non-ASCII `P` blocks.
pub(crate) fn is_punctuation(ch: char) -> bool {
    if ch.is_ascii_punctuation() {
        return true;
    }
    matches!(
        ch as u32,
        0x00A1..=0x00BF // Latin-1 Supplement punctuation
            | 0x2000..=0x206F // General Punctuation
            | 0x2E00..=0x2E7F // Supplemental Punctuation
            | 0x3000..=0x303F // CJK Symbols and Punctuation
            | 0xFE30..=0xFE4F // CJK Compatibility Forms
            | 0xFE50..=0xFE6F // Small Form Variants
            | 0xFF01..=0xFF0F // Fullwidth punctuation
            | 0xFF1A..=0xFF20
            | 0xFF3B..=0xFF40
            | 0xFF5B..=0xFF65
    )
}
