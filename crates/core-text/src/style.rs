//! Style applicator: turns a toolbar style choice into an annotation over the
//! captured selection, and clears character styling from it.
//!
//! Both operations take the range as `Option` because the toolbar may be
//! tapped after the selection was cleared; an absent or empty range is a
//! silent no-op.

use crate::{
    AnnotationKind, AnnotationModel, CharacterStyle, Color, DEFAULT_HIGHLIGHT, SelectionRange,
    SpanFlags, SpanId,
};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StyleKind {
    Highlight,
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl StyleKind {
    pub const ALL: [StyleKind; 5] = [
        StyleKind::Highlight,
        StyleKind::Bold,
        StyleKind::Italic,
        StyleKind::Underline,
        StyleKind::Strikethrough,
    ];

    pub fn character_style(self, highlight: Color) -> CharacterStyle {
        match self {
            StyleKind::Highlight => CharacterStyle::Background(highlight),
            StyleKind::Bold => CharacterStyle::Bold,
            StyleKind::Italic => CharacterStyle::Italic,
            StyleKind::Underline => CharacterStyle::Underline,
            StyleKind::Strikethrough => CharacterStyle::Strikethrough,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StyleApplicator {
    highlight: Color,
}

impl Default for StyleApplicator {
    fn default() -> Self {
        Self::new(DEFAULT_HIGHLIGHT)
    }
}

impl StyleApplicator {
    pub fn new(highlight: Color) -> Self {
        Self { highlight }
    }

    pub fn highlight(&self) -> Color {
        self.highlight
    }

    /// Add the annotation for `kind` over `range` with exclusive-exclusive flags.
    /// Returns the new span id, or `None` when nothing was added.
    pub fn apply<M: AnnotationModel + ?Sized>(
        &self,
        model: &mut M,
        kind: StyleKind,
        range: Option<SelectionRange>,
    ) -> Option<SpanId> {
        let Some(range) = range else {
            debug!(target: "style.apply", ?kind, "missing_range");
            return None;
        };
        if range.is_empty() {
            trace!(target: "style.apply", ?kind, %range, "empty_range");
            return None;
        }
        let style = kind.character_style(self.highlight);
        match model.add_span(
            AnnotationKind::Character(style),
            range.as_range(),
            SpanFlags::EXCLUSIVE_EXCLUSIVE,
        ) {
            Ok(id) => {
                debug!(target: "style.apply", ?kind, %range, span = id.0, "span_added");
                Some(id)
            }
            Err(e) => {
                debug!(target: "style.apply", ?kind, %range, error = %e, "span_rejected");
                None
            }
        }
    }

    /// Remove every character-level annotation overlapping `range`.
    /// Returns how many annotations were removed.
    pub fn clear<M: AnnotationModel + ?Sized>(
        &self,
        model: &mut M,
        range: Option<SelectionRange>,
    ) -> usize {
        let Some(range) = range else {
            debug!(target: "style.clear", "missing_range");
            return 0;
        };
        let mut removed = 0;
        for span in model.character_spans_in(range.as_range()) {
            if model.remove_span(span.id) {
                removed += 1;
            }
        }
        debug!(target: "style.clear", %range, removed, "spans_cleared");
        removed
    }
}
