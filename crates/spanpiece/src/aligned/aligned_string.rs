//! # Aligned String Engine

use crate::{
    aligned::TextRange,
    errors::{Result, SpanpieceError},
    patterns::SplitPattern,
    types::Offsets,
};

/// A single per-char edit consumed by [`AlignedString::transform_range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharChange {
    /// A char of the new normalized text.
    pub ch: char,

    /// How `ch` relates to the old text at its position:
    /// * `1` — `ch` is a fresh insertion, consuming nothing;
    /// * `0` — `ch` replaces one old char;
    /// * `-N` — `ch` replaces one old char and also removes the `N` old
    ///   chars that follow it.
    ///
    /// Values greater than `1` are not allowed; to add several chars, each
    /// must be its own `CharChange` with a change of `1`.
    pub change: isize,
}

impl CharChange {
    /// Build a new `CharChange`.
    pub fn new(
        ch: char,
        change: isize,
    ) -> Self {
        Self { ch, change }
    }
}

/// How delimiter matches are folded by [`AlignedString::split`].
///
/// For example, splitting `the-final--countdown` on `-`:
/// * `Removed`            => `[ "the", "final", "countdown" ]`
/// * `Isolated`           => `[ "the", "-", "final", "-", "-", "countdown" ]`
/// * `MergedWithPrevious` => `[ "the-", "final-", "-", "countdown" ]`
/// * `MergedWithNext`     => `[ "the", "-final", "-", "-countdown" ]`
/// * `Contiguous`         => `[ "the", "-", "final", "--", "countdown" ]`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitBehavior {
    /// Delimiter matches are dropped from the output.
    Removed,
    /// Every capture becomes its own piece, matches included.
    Isolated,
    /// Each match run is absorbed into the piece before it.
    MergedWithPrevious,
    /// Each match run is absorbed into the piece after it.
    MergedWithNext,
    /// Consecutive captures with the same match flag coalesce.
    Contiguous,
}

/// A text value under transformation, with byte alignments back to its
/// immutable source.
///
/// Every mutating operation keeps one alignment entry per byte of the
/// normalized text, giving the half-open byte range of the original text
/// that produced it. Offsets in either referential can be translated to
/// the other via [`coerce_to_normalized`](Self::coerce_to_normalized) and
/// [`coerce_to_original`](Self::coerce_to_original).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignedString {
    /// The source text, before any modification.
    original: String,

    /// The current text, after all modifications.
    normalized: String,

    /// One entry per byte of `normalized`: the original byte range that
    /// byte is attributed to. Zero-width entries mark pure insertions.
    alignments: Vec<Offsets>,

    /// When this value is a slice of a larger aligned string, the byte
    /// offset at which the slice began in that parent's original text.
    original_shift: usize,
}

fn identity_alignments(s: &str) -> Vec<Offsets> {
    let mut alignments = Vec::with_capacity(s.len());
    for (index, ch) in s.char_indices() {
        let end = index + ch.len_utf8();
        for _ in 0..ch.len_utf8() {
            alignments.push(Offsets::new(index, end));
        }
    }
    alignments
}

// Single-char case mapping: multi-char expansions (e.g. `ß` -> `SS`) would
// change byte widths under the alignment entries, so chars whose mapping is
// not one-to-one are kept as-is.
fn lowercase_char(ch: char) -> char {
    let mut mapped = ch.to_lowercase();
    match (mapped.next(), mapped.next()) {
        (Some(lower), None) => lower,
        _ => ch,
    }
}

fn uppercase_char(ch: char) -> char {
    let mut mapped = ch.to_uppercase();
    match (mapped.next(), mapped.next()) {
        (Some(upper), None) => upper,
        _ => ch,
    }
}

impl From<&str> for AlignedString {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl AlignedString {
    /// Build a new `AlignedString` from a source string, with the identity
    /// alignment.
    pub fn new(s: impl Into<String>) -> Self {
        let original: String = s.into();
        Self {
            normalized: original.clone(),
            alignments: identity_alignments(&original),
            original,
            original_shift: 0,
        }
    }

    /// The "normalized" (current) text.
    pub fn get(&self) -> &str {
        &self.normalized
    }

    /// The "original" (source) text.
    pub fn get_original(&self) -> &str {
        &self.original
    }

    /// Length in bytes of the normalized text.
    pub fn len(&self) -> usize {
        self.normalized.len()
    }

    /// Length in bytes of the original text.
    pub fn original_len(&self) -> usize {
        self.original.len()
    }

    /// Is the normalized text empty?
    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// The span of this value's original text within the top-level source
    /// it was sliced from.
    pub fn original_offsets(&self) -> Offsets {
        Offsets::new(
            self.original_shift,
            self.original_shift + self.original_len(),
        )
    }

    /// Coerce a range in either referential onto the normalized text.
    ///
    /// Returns `None` when the range cannot be resolved (reversed, or
    /// targeting positions no alignment covers).
    pub fn coerce_to_normalized(
        &self,
        range: TextRange,
    ) -> Option<Offsets> {
        let (start, end) = (range.start(), range.end());
        if let TextRange::Normalized { .. } = range {
            return Some(Offsets::new(start, end));
        }
        if start == end {
            return Some(Offsets::new(start, end));
        }
        if start > end {
            return None;
        }

        let mut found_start = None;
        let mut found_end = None;
        for (index, alignment) in self.alignments.iter().enumerate() {
            if alignment.end > end {
                break;
            }
            // Zero-width entries are insertions; they cannot begin a span.
            if found_start.is_none() && alignment.start >= start && !alignment.is_empty() {
                found_start = Some(index);
            }
            if alignment.end <= end {
                found_end = Some(index + 1);
            }
        }

        match (found_start, found_end) {
            (Some(s), Some(e)) => Some(Offsets::new(s, e)),
            (Some(s), None) => Some(Offsets::new(s, s)),
            (None, Some(e)) => Some(Offsets::new(e, e)),
            (None, None) => None,
        }
    }

    /// Coerce a range in either referential onto the original text.
    ///
    /// An empty normalized range anchors at the end of the previous byte's
    /// alignment (or at `0` when at the very start). Returns `None` when
    /// the range cannot be resolved.
    pub fn coerce_to_original(
        &self,
        range: TextRange,
    ) -> Option<Offsets> {
        let (start, end) = (range.start(), range.end());
        if let TextRange::Original { .. } = range {
            return Some(Offsets::new(start, end));
        }
        if start > end {
            return None;
        }
        if start == end {
            if self.alignments.is_empty() {
                return Some(Offsets::new(start, end));
            }
            if start == 0 {
                return Some(Offsets::new(0, 0));
            }
            let anchor = self.alignments.get(start - 1)?.end;
            return Some(Offsets::new(anchor, anchor));
        }

        let first = self.alignments.get(start)?;
        let last = self.alignments.get(end - 1)?;
        Some(Offsets::new(first.start, last.end))
    }

    /// The normalized substring a range identifies, or `None` when the
    /// range cannot be coerced.
    pub fn get_range(
        &self,
        range: TextRange,
    ) -> Option<&str> {
        let coerced = self.coerce_to_normalized(range)?;
        self.normalized.get(coerced.start..coerced.end)
    }

    /// The original substring a range identifies, or `None` when the
    /// range cannot be coerced.
    pub fn get_original_range(
        &self,
        range: TextRange,
    ) -> Option<&str> {
        let coerced = self.coerce_to_original(range)?;
        self.original.get(coerced.start..coerced.end)
    }

    /// Apply per-char transformations to a range of the normalized text,
    /// updating the alignments.
    ///
    /// `changes` describes every char of the new text at this range, in
    /// order (see [`CharChange`]). `initial_offset` is the number of
    /// leading **bytes** of the replaced range that were dropped before
    /// the first change entry.
    ///
    /// Inserted chars inherit the alignment of the preceding normalized
    /// byte, or a zero-width `[0, 0)` entry at the very start. Replacing
    /// chars inherit the alignment of the char they consume.
    ///
    /// A range that cannot be coerced leaves the string untouched.
    ///
    /// ## Panics
    /// Panics if the change list consumes more chars than the replaced
    /// range holds, or if `initial_offset` is not at a char boundary.
    pub fn transform_range<I>(
        &mut self,
        range: TextRange,
        changes: I,
        initial_offset: usize,
    ) where
        I: IntoIterator<Item = CharChange>,
    {
        let Some(replaced) = self.coerce_to_normalized(range) else {
            return;
        };

        let mut old_chars = self.normalized[replaced.start + initial_offset..replaced.end].chars();

        // Byte cursor into the pre-splice normalized text and alignments.
        let mut offset = replaced.start + initial_offset;

        let mut new_alignments: Vec<Offsets> = Vec::with_capacity(replaced.len());
        let mut new_normalized = String::with_capacity(replaced.len());

        for change in changes {
            let alignment = if change.change >= 1 {
                if offset == 0 {
                    Offsets::new(0, 0)
                } else {
                    self.alignments[offset - 1]
                }
            } else {
                self.alignments[offset]
            };

            if change.change <= 0 {
                let consumed = old_chars
                    .next()
                    .expect("change list consumes more chars than the replaced range holds");
                offset += consumed.len_utf8();
            }
            if change.change <= -1 {
                for _ in 0..(-change.change) as usize {
                    let removed = old_chars
                        .next()
                        .expect("change list removes more chars than the replaced range holds");
                    offset += removed.len_utf8();
                }
            }

            for _ in 0..change.ch.len_utf8() {
                new_alignments.push(alignment);
            }
            new_normalized.push(change.ch);
        }

        self.alignments
            .splice(replaced.start..replaced.end, new_alignments);
        self.normalized
            .replace_range(replaced.start..replaced.end, &new_normalized);
    }

    /// [`transform_range`](Self::transform_range) over the full normalized
    /// text.
    pub fn transform<I>(
        &mut self,
        changes: I,
        initial_offset: usize,
    ) where
        I: IntoIterator<Item = CharChange>,
    {
        self.transform_range(TextRange::normalized(0, self.len()), changes, initial_offset);
    }

    /// Drop every char the predicate rejects.
    pub fn filter<F>(
        &mut self,
        keep: F,
    ) where
        F: Fn(char) -> bool,
    {
        let mut removed: isize = 0;
        let mut removed_start_bytes = 0usize;
        let mut last: Option<char> = None;
        let mut changes: Vec<CharChange> = Vec::with_capacity(self.normalized.len());

        for ch in self.normalized.chars() {
            if keep(ch) {
                if let Some(kept) = last.replace(ch) {
                    changes.push(CharChange::new(kept, -removed));
                }
                removed = 0;
            } else if last.is_none() {
                removed_start_bytes += ch.len_utf8();
            } else {
                removed += 1;
            }
        }
        if let Some(kept) = last {
            changes.push(CharChange::new(kept, -removed));
        }

        self.transform(changes, removed_start_bytes);
    }

    /// Map every char of the normalized text through `map_fn`.
    ///
    /// The mapping must be one char to one char; byte widths may differ.
    pub fn map<F>(
        &mut self,
        map_fn: F,
    ) where
        F: Fn(char) -> char,
    {
        let changes: Vec<CharChange> = self
            .normalized
            .chars()
            .map(|ch| CharChange::new(map_fn(ch), 0))
            .collect();
        self.transform(changes, 0);
    }

    /// Lowercase the normalized text, one char at a time.
    pub fn lowercase(&mut self) {
        self.map(lowercase_char);
    }

    /// Uppercase the normalized text, one char at a time.
    pub fn uppercase(&mut self) {
        self.map(uppercase_char);
    }

    /// Prepend a string; the new bytes share the alignment of the first
    /// normalized char (zero-width at the start when there is none).
    pub fn prepend(
        &mut self,
        s: &str,
    ) {
        if s.is_empty() {
            return;
        }
        match self.normalized.chars().next() {
            Some(first) => {
                let mut changes: Vec<CharChange> = Vec::with_capacity(s.len() + 1);
                for (index, ch) in s.chars().enumerate() {
                    let change = if index == 0 { 0 } else { 1 };
                    changes.push(CharChange::new(ch, change));
                }
                changes.push(CharChange::new(first, 1));
                self.transform_range(TextRange::normalized(0, first.len_utf8()), changes, 0);
            }
            None => {
                let changes = s.chars().map(|ch| CharChange::new(ch, 1));
                self.transform_range(TextRange::normalized(0, 0), changes, 0);
            }
        }
    }

    /// Append a string; the new bytes share the alignment of the last
    /// normalized char (zero-width at the start when there is none).
    pub fn append(
        &mut self,
        s: &str,
    ) {
        if s.is_empty() {
            return;
        }
        match self.normalized.chars().next_back() {
            Some(last) => {
                let start = self.normalized.len() - last.len_utf8();
                let mut changes = vec![CharChange::new(last, 0)];
                changes.extend(s.chars().map(|ch| CharChange::new(ch, 1)));
                self.transform_range(
                    TextRange::normalized(start, self.normalized.len()),
                    changes,
                    0,
                );
            }
            None => {
                let changes: Vec<CharChange> =
                    s.chars().map(|ch| CharChange::new(ch, 1)).collect();
                self.transform_range(TextRange::normalized(0, 0), changes, 0);
            }
        }
    }

    /// Remove leading and trailing whitespace.
    pub fn trim(&mut self) {
        self.trim_ends(true, true);
    }

    /// Remove leading whitespace.
    pub fn trim_left(&mut self) {
        self.trim_ends(true, false);
    }

    /// Remove trailing whitespace.
    pub fn trim_right(&mut self) {
        self.trim_ends(false, true);
    }

    /// Remove leading (`left`) and/or trailing (`right`) whitespace chars.
    pub fn trim_ends(
        &mut self,
        left: bool,
        right: bool,
    ) {
        let chars: Vec<char> = self.normalized.chars().collect();
        let total = chars.len();

        let leading = if left {
            chars.iter().take_while(|ch| ch.is_whitespace()).count()
        } else {
            0
        };
        let trailing = if right && leading < total {
            chars.iter().rev().take_while(|ch| ch.is_whitespace()).count()
        } else {
            0
        };
        if leading == 0 && trailing == 0 {
            return;
        }

        let leading_bytes: usize = chars[..leading].iter().map(|ch| ch.len_utf8()).sum();
        if leading + trailing >= total {
            self.transform(core::iter::empty(), leading_bytes);
            return;
        }

        let last_index = total - trailing - 1;
        let mut changes: Vec<CharChange> = Vec::with_capacity(last_index + 1 - leading);
        for (index, ch) in chars.iter().enumerate().take(last_index + 1).skip(leading) {
            let change = if index == last_index {
                -(trailing as isize)
            } else {
                0
            };
            changes.push(CharChange::new(*ch, change));
        }
        self.transform(changes, leading_bytes);
    }

    /// Split the normalized text on a pattern, folding delimiter matches
    /// according to `behavior`. Each surviving piece becomes a child
    /// aligned string sliced out of this one.
    pub fn split(
        &self,
        pattern: &SplitPattern,
        behavior: SplitBehavior,
    ) -> Result<Vec<AlignedString>> {
        let captures = pattern.find_matches(&self.normalized)?;

        struct SplitMatch {
            offsets: Offsets,
            remove: bool,
        }

        let mut pieces: Vec<SplitMatch> = Vec::with_capacity(captures.len());
        match behavior {
            SplitBehavior::Removed => {
                for capture in captures {
                    pieces.push(SplitMatch {
                        offsets: capture.offsets,
                        remove: capture.is_match,
                    });
                }
            }
            SplitBehavior::Isolated => {
                for capture in captures {
                    pieces.push(SplitMatch {
                        offsets: capture.offsets,
                        remove: false,
                    });
                }
            }
            SplitBehavior::MergedWithPrevious => {
                let mut previous_match = false;
                for capture in captures {
                    if capture.is_match
                        && !previous_match
                        && let Some(last) = pieces.last_mut()
                    {
                        last.offsets.end = capture.offsets.end;
                    } else {
                        pieces.push(SplitMatch {
                            offsets: capture.offsets,
                            remove: false,
                        });
                    }
                    previous_match = capture.is_match;
                }
            }
            SplitBehavior::MergedWithNext => {
                let mut previous_match = false;
                for capture in captures.into_iter().rev() {
                    if capture.is_match
                        && !previous_match
                        && let Some(last) = pieces.last_mut()
                    {
                        last.offsets.start = capture.offsets.start;
                    } else {
                        pieces.push(SplitMatch {
                            offsets: capture.offsets,
                            remove: false,
                        });
                    }
                    previous_match = capture.is_match;
                }
                pieces.reverse();
            }
            SplitBehavior::Contiguous => {
                let mut previous_match = false;
                let mut first = true;
                for capture in captures {
                    if capture.is_match == previous_match
                        && !first
                        && let Some(last) = pieces.last_mut()
                    {
                        last.offsets.end = capture.offsets.end;
                    } else {
                        pieces.push(SplitMatch {
                            offsets: capture.offsets,
                            remove: false,
                        });
                    }
                    previous_match = capture.is_match;
                    first = false;
                }
            }
        }

        let mut result = Vec::with_capacity(pieces.len());
        for piece in pieces {
            if piece.remove {
                continue;
            }
            let child = self
                .slice(TextRange::normalized(piece.offsets.start, piece.offsets.end))
                .ok_or(SpanpieceError::BadRange)?;
            result.push(child);
        }
        Ok(result)
    }

    /// Overwrite every pattern match with `content`, updating alignments.
    ///
    /// Each replacement consumes the first replaced char, so the new bytes
    /// anchor at the start of the match.
    pub fn replace(
        &mut self,
        pattern: &SplitPattern,
        content: &str,
    ) -> Result<()> {
        let captures = pattern.find_matches(&self.normalized)?;

        let mut offset: isize = 0;
        for capture in captures {
            if !capture.is_match {
                continue;
            }
            let start = (capture.offsets.start as isize + offset).max(0) as usize;
            let end = (capture.offsets.end as isize + offset).max(0) as usize;
            let range = TextRange::normalized(start, end);
            self.coerce_to_normalized(range)
                .ok_or(SpanpieceError::BadRange)?;

            let mut content_chars = content.chars();
            let mut changes: Vec<CharChange> = Vec::with_capacity(content.len());
            if let Some(first) = content_chars.next() {
                changes.push(CharChange::new(first, 0));
            }
            changes.extend(content_chars.map(|ch| CharChange::new(ch, 1)));

            self.transform_range(range, changes, 0);

            offset += content.len() as isize - capture.offsets.len() as isize;
        }
        Ok(())
    }

    /// Slice out a child aligned string over the given range.
    ///
    /// The child's alignments are rebased onto its own original text; its
    /// `original_shift` locates it in the top-level source. Returns `None`
    /// when the range is not on char boundaries or cannot be coerced.
    pub fn slice(
        &self,
        range: TextRange,
    ) -> Option<AlignedString> {
        if !self.range_on_char_boundaries(range) {
            return None;
        }

        let normalized_range = self.coerce_to_normalized(range)?;
        let original_range = self.coerce_to_original(range)?;

        let original = self.get_original_range(range)?.to_string();
        let normalized = self.get_range(range)?.to_string();

        let shift = original_range.start;
        let alignments = self.alignments[normalized_range.start..normalized_range.end]
            .iter()
            .map(|alignment| Offsets::new(alignment.start - shift, alignment.end - shift))
            .collect();

        Some(AlignedString {
            original,
            normalized,
            alignments,
            original_shift: self.original_shift + original_range.start,
        })
    }

    /// The inverse mapping: one entry per byte of the original text,
    /// giving the normalized byte range it contributes to. Original bytes
    /// with no surviving normalized bytes get zero-width entries.
    ///
    /// ## Panics
    /// Panics if the alignment table holds overlapping ranges (an internal
    /// invariant violation).
    pub fn original_alignments(&self) -> Vec<Offsets> {
        if self.alignments.is_empty() {
            return vec![Offsets::new(0, 0); self.original.len()];
        }

        let mut result: Vec<Offsets> = Vec::with_capacity(self.original.len());

        // Gap before the first group.
        for _ in 0..self.alignments[0].start {
            result.push(Offsets::new(0, 0));
        }

        let mut last = self.alignments[0];
        let mut offset = 0usize;
        let mut length = 0usize;

        for &alignment in &self.alignments {
            if last == alignment {
                length += 1;
            } else {
                assert!(
                    alignment.start >= last.end,
                    "invalid overlapping alignment ranges"
                );

                // Emit the finished group.
                for _ in 0..last.len() {
                    result.push(Offsets::new(offset, offset + length));
                }
                offset += length;
                length = 1;

                // Gap between the two groups.
                for _ in 0..(alignment.start - last.end) {
                    result.push(Offsets::new(offset, offset));
                }
            }
            last = alignment;
        }

        for _ in 0..last.len() {
            result.push(Offsets::new(offset, offset + length));
        }
        offset += length;

        // Trailing gap.
        while result.len() < self.original.len() {
            result.push(Offsets::new(offset, offset));
        }

        result
    }

    fn range_on_char_boundaries(
        &self,
        range: TextRange,
    ) -> bool {
        let s = match range {
            TextRange::Original { .. } => &self.original,
            TextRange::Normalized { .. } => &self.normalized,
        };
        s.is_char_boundary(range.start()) && s.is_char_boundary(range.end())
    }

    #[cfg(test)]
    pub(crate) fn alignments(&self) -> &[Offsets] {
        &self.alignments
    }
}
