//! Deferred style work.
//!
//! Toolbar taps can arrive while the host is still committing the selection
//! that triggered them. Instead of mutating annotations inside the click
//! handler, the controller `mark`s a request carrying the range stored at tap
//! time and `consume`s the queue on the next `Event::Frame`.
//!
//! Contract:
//! - Requests run in the order they were marked.
//! - The range is captured at `mark` time; later selection changes do not
//!   retarget already queued work.
//! - `consume` on an empty queue returns an empty batch.

use core_events::ToolbarButton;
use core_text::{SelectionRange, StyleKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleRequest {
    Apply(StyleKind),
    Clear,
}

impl From<ToolbarButton> for StyleRequest {
    fn from(button: ToolbarButton) -> Self {
        match button {
            ToolbarButton::Clear => StyleRequest::Clear,
            ToolbarButton::Highlight => StyleRequest::Apply(StyleKind::Highlight),
            ToolbarButton::Bold => StyleRequest::Apply(StyleKind::Bold),
            ToolbarButton::Italic => StyleRequest::Apply(StyleKind::Italic),
            ToolbarButton::Underline => StyleRequest::Apply(StyleKind::Underline),
            ToolbarButton::Strikethrough => StyleRequest::Apply(StyleKind::Strikethrough),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingStyle {
    pub request: StyleRequest,
    pub range: Option<SelectionRange>,
}

#[derive(Debug, Default)]
pub struct DeferredStyles {
    pending: Vec<PendingStyle>,
}

impl DeferredStyles {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mark(&mut self, request: StyleRequest, range: Option<SelectionRange>) {
        tracing::trace!(target: "style.apply", ?request, ?range, "style_deferred");
        self.pending.push(PendingStyle { request, range });
    }

    pub fn consume(&mut self) -> Vec<PendingStyle> {
        std::mem::take(&mut self.pending)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
