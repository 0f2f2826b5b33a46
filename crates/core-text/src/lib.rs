//! Rope-backed styled text: the annotation model the selection toolbar writes to.
//!
//! `StyledText` pairs a `ropey::Rope` with a flat list of annotations over
//! half-open character ranges. Hosts that already own a rich-text model only
//! need to implement [`AnnotationModel`]; `StyledText` is the in-memory
//! implementation used by the headless host, the binary and the tests.
//!
//! Indices are character indices (not bytes). Annotation ranges always satisfy
//! `start <= end <= len_chars()` after every public call.

use ropey::Rope;
use std::fmt;
use std::ops::Range;

pub mod color;
pub mod range;
pub mod span;
pub mod style;

pub use color::{Color, ColorParseError, DEFAULT_HIGHLIGHT};
pub use range::SelectionRange;
pub use span::{
    Annotation, AnnotationKind, AnnotationModel, CharacterStyle, ParagraphStyle, SpanError,
    SpanFlags, SpanId, overlaps,
};
pub use style::{StyleApplicator, StyleKind};

/// Text content plus the annotations laid over it.
#[derive(Clone, Default)]
pub struct StyledText {
    rope: Rope,
    spans: Vec<Annotation>,
    next_id: u64,
}

impl StyledText {
    /// Construct styled text with no annotations.
    pub fn new(content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
            spans: Vec::new(),
            next_id: 0,
        }
    }

    /// Total number of characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Characters in `range` (clamped) as an owned string.
    pub fn slice(&self, range: Range<usize>) -> String {
        let total = self.rope.len_chars();
        let start = range.start.min(total);
        let end = range.end.min(total);
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    /// Iterate the characters of the whole text.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.rope.chars()
    }

    /// All annotations in insertion order.
    pub fn spans(&self) -> &[Annotation] {
        &self.spans
    }

    /// Insert `text` at character index `at`, moving annotation boundaries according to their
    /// flags. Exclusive starts are pushed right by an insertion exactly at the start; exclusive
    /// ends are not extended by an insertion exactly at the end.
    pub fn insert(&mut self, at: usize, text: &str) -> Result<(), SpanError> {
        let len = self.rope.len_chars();
        if at > len {
            return Err(SpanError::OutOfBounds {
                start: at,
                end: at,
                len,
            });
        }
        let inserted = text.chars().count();
        if inserted == 0 {
            return Ok(());
        }
        self.rope.insert(at, text);
        for span in &mut self.spans {
            let Range { mut start, mut end } = span.range.clone();
            if at < start || (at == start && !span.flags.contains(SpanFlags::START_INCLUSIVE)) {
                start += inserted;
            }
            if at < end || (at == end && span.flags.contains(SpanFlags::END_INCLUSIVE)) {
                end += inserted;
            }
            span.range = start..end.max(start);
        }
        Ok(())
    }

    /// Remove the characters in `range`. Annotations are clipped; a non-empty
    /// exclusive-exclusive annotation reduced to zero length is dropped.
    pub fn remove(&mut self, range: Range<usize>) -> Result<(), SpanError> {
        let len = self.rope.len_chars();
        validate(&range, len)?;
        if range.is_empty() {
            return Ok(());
        }
        self.rope.remove(range.clone());
        let removed = range.end - range.start;
        let map = |x: usize| {
            if x <= range.start {
                x
            } else if x >= range.end {
                x - removed
            } else {
                range.start
            }
        };
        self.spans.retain_mut(|span| {
            let was_empty = span.range.is_empty();
            span.range = map(span.range.start)..map(span.range.end);
            was_empty || !span.range.is_empty() || span.flags != SpanFlags::EXCLUSIVE_EXCLUSIVE
        });
        Ok(())
    }
}

fn validate(range: &Range<usize>, len: usize) -> Result<(), SpanError> {
    if range.start > range.end {
        return Err(SpanError::InvalidRange {
            start: range.start,
            end: range.end,
        });
    }
    if range.end > len {
        return Err(SpanError::OutOfBounds {
            start: range.start,
            end: range.end,
            len,
        });
    }
    Ok(())
}

impl AnnotationModel for StyledText {
    fn len(&self) -> usize {
        self.len_chars()
    }

    fn add_span(
        &mut self,
        kind: AnnotationKind,
        range: Range<usize>,
        flags: SpanFlags,
    ) -> Result<SpanId, SpanError> {
        validate(&range, self.len_chars())?;
        let id = SpanId(self.next_id);
        self.next_id += 1;
        self.spans.push(Annotation {
            id,
            range,
            kind,
            flags,
        });
        Ok(id)
    }

    fn spans_in(&self, range: Range<usize>) -> Vec<Annotation> {
        self.spans
            .iter()
            .filter(|a| overlaps(&a.range, &range))
            .cloned()
            .collect()
    }

    fn remove_span(&mut self, id: SpanId) -> bool {
        let before = self.spans.len();
        self.spans.retain(|a| a.id != id);
        self.spans.len() != before
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StyledText")
            .field("len_chars", &self.len_chars())
            .field("spans", &self.spans)
            .finish()
    }
}
