//! Toolbar session state: the record the lifecycle controller owns.
//!
//! Everything that survives between two events lives here and nowhere else:
//! the stored selection range, the last overlay measurement, the captured
//! reference point, and the anchor computed for the previous show/move.
//!
//! Invariants (maintained by the controller, asserted by `is_consistent`):
//! * `overlay == Showing` iff `range` is `Some` and non-empty.
//! * `reference` and `last_anchor` are only meaningful while showing; they are
//!   reset on every `Hidden` transition so a fresh selection captures a fresh
//!   reference.
//! * `geometry` persists across hide/show cycles; it is re-measured only while
//!   it is absent or was a fallback substitute.

use core_model::Point;
use core_render::{Anchor, OverlayGeometry};
use core_text::SelectionRange;
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverlayState {
    #[default]
    Hidden,
    Showing,
}

#[derive(Debug, Default, Clone)]
pub struct ToolbarSession {
    overlay: OverlayState,
    range: Option<SelectionRange>,
    geometry: Option<OverlayGeometry>,
    reference: Option<Point>,
    last_anchor: Option<Anchor>,
}

impl ToolbarSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self) -> OverlayState {
        self.overlay
    }

    pub fn is_showing(&self) -> bool {
        self.overlay == OverlayState::Showing
    }

    pub fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    pub fn geometry(&self) -> Option<OverlayGeometry> {
        self.geometry
    }

    pub fn reference(&self) -> Option<Point> {
        self.reference
    }

    pub fn last_anchor(&self) -> Option<Anchor> {
        self.last_anchor
    }

    /// True while the next show must (re)measure the overlay content.
    pub fn needs_measure(&self) -> bool {
        self.geometry.is_none_or(|g| g.fallback)
    }

    /// Enter `Showing` with `range`. Clears the previous reference so the
    /// caller captures a new one for this selection.
    pub fn begin_showing(&mut self, range: SelectionRange) {
        trace!(target: "overlay.lifecycle", %range, "session_showing");
        self.overlay = OverlayState::Showing;
        self.range = Some(range);
        self.reference = None;
        self.last_anchor = None;
    }

    /// Overwrite the stored range while already showing.
    pub fn replace_range(&mut self, range: SelectionRange) {
        self.range = Some(range);
    }

    pub fn set_geometry(&mut self, geometry: OverlayGeometry) {
        self.geometry = Some(geometry);
    }

    pub fn set_reference(&mut self, reference: Point) {
        self.reference = Some(reference);
    }

    pub fn set_last_anchor(&mut self, anchor: Anchor) {
        self.last_anchor = Some(anchor);
    }

    /// Return to `Hidden`, dropping the range and per-selection geometry.
    pub fn hide(&mut self) {
        trace!(target: "overlay.lifecycle", "session_hidden");
        self.overlay = OverlayState::Hidden;
        self.range = None;
        self.reference = None;
        self.last_anchor = None;
    }

    pub fn is_consistent(&self) -> bool {
        let has_range = self.range.is_some_and(|r| !r.is_empty());
        self.is_showing() == has_range
    }
}

/// Lifecycle counters, read through [`LifecycleMetricsSnapshot`].
#[derive(Debug, Default, Clone)]
pub struct LifecycleMetrics {
    shows: u64,
    moves: u64,
    dismissals: u64,
    skipped: u64,
    styles_applied: u64,
    styles_cleared: u64,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LifecycleMetricsSnapshot {
    pub shows: u64,
    pub moves: u64,
    pub dismissals: u64,
    /// Events that could not be positioned (detached widget, no layout).
    pub skipped: u64,
    pub styles_applied: u64,
    /// Annotations removed by clear requests.
    pub styles_cleared: u64,
}

impl LifecycleMetrics {
    pub fn snapshot(&self) -> LifecycleMetricsSnapshot {
        LifecycleMetricsSnapshot {
            shows: self.shows,
            moves: self.moves,
            dismissals: self.dismissals,
            skipped: self.skipped,
            styles_applied: self.styles_applied,
            styles_cleared: self.styles_cleared,
        }
    }
    pub fn incr_show(&mut self) {
        self.shows += 1;
    }
    pub fn incr_move(&mut self) {
        self.moves += 1;
    }
    pub fn incr_dismiss(&mut self) {
        self.dismissals += 1;
    }
    pub fn incr_skipped(&mut self) {
        self.skipped += 1;
    }
    pub fn incr_applied(&mut self) {
        self.styles_applied += 1;
    }
    pub fn note_cleared(&mut self, removed: usize) {
        self.styles_cleared += removed as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_render::Side;
    use pretty_assertions::assert_eq;

    fn geometry(fallback: bool) -> OverlayGeometry {
        OverlayGeometry {
            measured_width: 900,
            measured_height: 150,
            fallback,
        }
    }

    #[test]
    fn fresh_session_is_hidden_and_consistent() {
        let s = ToolbarSession::new();
        assert_eq!(s.overlay(), OverlayState::Hidden);
        assert!(s.is_consistent());
        assert!(s.needs_measure());
    }

    #[test]
    fn hide_resets_per_selection_state_but_keeps_geometry() {
        let mut s = ToolbarSession::new();
        s.begin_showing(SelectionRange::new(2, 6));
        s.set_geometry(geometry(false));
        s.set_reference(Point::new(540, -5));
        s.set_last_anchor(Anchor {
            point: Point::new(1, 2),
            side: Side::Above,
        });
        assert!(s.is_consistent());
        s.hide();
        assert_eq!(s.range(), None);
        assert_eq!(s.reference(), None);
        assert_eq!(s.last_anchor(), None);
        assert_eq!(s.geometry(), Some(geometry(false)));
        assert!(!s.needs_measure());
        assert!(s.is_consistent());
    }

    #[test]
    fn fallback_geometry_is_remeasured() {
        let mut s = ToolbarSession::new();
        s.set_geometry(geometry(true));
        assert!(s.needs_measure());
    }

    #[test]
    fn metrics_snapshot_reflects_counters() {
        let mut m = LifecycleMetrics::default();
        m.incr_show();
        m.incr_move();
        m.incr_move();
        m.incr_dismiss();
        m.incr_skipped();
        m.incr_applied();
        m.note_cleared(3);
        assert_eq!(
            m.snapshot(),
            LifecycleMetricsSnapshot {
                shows: 1,
                moves: 2,
                dismissals: 1,
                skipped: 1,
                styles_applied: 1,
                styles_cleared: 3,
            }
        );
    }
}
