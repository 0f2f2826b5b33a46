//! Selection bridge: turns host accessibility notifications into selection
//! transitions.
//!
//! Only `TextSelectionChanged` is meaningful. The bridge reads the widget's
//! current selection at notification time and reports `Selected(range)` for
//! a non-empty selection or `Unselected` otherwise. Hosts frequently send the
//! same notification several times for one gesture; re-emitting is harmless,
//! so repeats are passed through and only counted.

use crate::TextDisplay;
use core_events::AccessibilityEventKind;
use core_text::SelectionRange;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionChange {
    Selected(SelectionRange),
    Unselected,
}

#[derive(Debug, Default)]
pub struct SelectionBridge {
    last: Option<SelectionChange>,
    repeats: u64,
}

impl SelectionBridge {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classify<V: TextDisplay + ?Sized>(
        &mut self,
        view: &V,
        kind: AccessibilityEventKind,
    ) -> Option<SelectionChange> {
        if kind != AccessibilityEventKind::TextSelectionChanged {
            return None;
        }
        let change = if view.has_selection() {
            let (a, b) = view.selection();
            SelectionChange::Selected(SelectionRange::new(a, b))
        } else {
            SelectionChange::Unselected
        };
        if self.last == Some(change) {
            self.repeats += 1;
            trace!(target: "selection.bridge", ?change, repeats = self.repeats, "selection_repeat");
        } else {
            trace!(target: "selection.bridge", ?change, "selection_transition");
        }
        self.last = Some(change);
        Some(change)
    }

    /// Number of notifications that repeated the previous classification.
    pub fn repeats(&self) -> u64 {
        self.repeats
    }
}
