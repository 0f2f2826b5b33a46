//! Annotation (span) types and the `AnnotationModel` seam.
//!
//! The model is host-owned: the toolbar only ever adds an annotation over a
//! range or removes annotations it found through an overlap query. Categories
//! matter for `clear`, which removes character-level styling only and leaves
//! paragraph styles and opaque markers alone.

use crate::Color;
use std::ops::Range;

bitflags::bitflags! {
    /// Boundary behavior of an annotation when text is inserted exactly at one of its ends.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct SpanFlags: u8 {
        const START_INCLUSIVE = 0b01;
        const END_INCLUSIVE   = 0b10;
    }
}

impl SpanFlags {
    pub const EXCLUSIVE_EXCLUSIVE: SpanFlags = SpanFlags::empty();
    pub const INCLUSIVE_INCLUSIVE: SpanFlags = SpanFlags::all();
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SpanId(pub u64);

/// Styling that affects individual characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterStyle {
    Background(Color),
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

/// Styling that applies to whole paragraphs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParagraphStyle {
    Bullet,
    Quote,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AnnotationKind {
    Character(CharacterStyle),
    Paragraph(ParagraphStyle),
    /// Opaque host data (links, spell-check markers, composing regions).
    Marker(String),
}

impl AnnotationKind {
    pub fn is_character_style(&self) -> bool {
        matches!(self, AnnotationKind::Character(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Annotation {
    pub id: SpanId,
    pub range: Range<usize>,
    pub kind: AnnotationKind,
    pub flags: SpanFlags,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanError {
    #[error("invalid span range {start}..{end}")]
    InvalidRange { start: usize, end: usize },
    #[error("span range {start}..{end} exceeds text length {len}")]
    OutOfBounds { start: usize, end: usize, len: usize },
}

/// Overlap rule shared by every model: non-empty ranges must genuinely intersect
/// (touching endpoints do not count); when either side is empty, touching counts.
pub fn overlaps(span: &Range<usize>, query: &Range<usize>) -> bool {
    if span.start > query.end || span.end < query.start {
        return false;
    }
    if !span.is_empty() && !query.is_empty() {
        return span.start != query.end && span.end != query.start;
    }
    true
}

/// Mutable rich-text annotation storage owned by the host.
pub trait AnnotationModel {
    /// Length of the underlying text in characters.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn add_span(
        &mut self,
        kind: AnnotationKind,
        range: Range<usize>,
        flags: SpanFlags,
    ) -> Result<SpanId, SpanError>;

    /// Every annotation overlapping `range` (see [`overlaps`]).
    fn spans_in(&self, range: Range<usize>) -> Vec<Annotation>;

    /// Returns `false` when `id` is not (or no longer) present.
    fn remove_span(&mut self, id: SpanId) -> bool;

    fn character_spans_in(&self, range: Range<usize>) -> Vec<Annotation> {
        self.spans_in(range)
            .into_iter()
            .filter(|a| a.kind.is_character_style())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touching_ranges_do_not_overlap() {
        assert!(!overlaps(&(0..5), &(5..8)));
        assert!(!overlaps(&(5..8), &(0..5)));
        assert!(overlaps(&(0..6), &(5..8)));
    }

    #[test]
    fn empty_ranges_match_when_touching() {
        assert!(overlaps(&(5..5), &(5..8)));
        assert!(overlaps(&(0..5), &(5..5)));
        assert!(!overlaps(&(9..9), &(5..8)));
    }

    #[test]
    fn only_character_kinds_are_character_styles() {
        assert!(AnnotationKind::Character(CharacterStyle::Underline).is_character_style());
        assert!(!AnnotationKind::Paragraph(ParagraphStyle::Bullet).is_character_style());
        assert!(!AnnotationKind::Marker("link".into()).is_character_style());
    }
}
