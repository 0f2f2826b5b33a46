//! Overlay positioner.
//!
//! Computes where the toolbar goes relative to the current selection. All
//! offsets are relative to a *reference point*: the screen-space center of the
//! toolbar content captured right after it was first shown for a selection,
//! re-expressed in the text widget's window row. Holding the reference fixed
//! while the selection is re-measured keeps the toolbar from jittering.
//!
//! Vertical placement (with `lift = text_size + margin`):
//! * above: `(sel.bottom - ref.y - overlay_height) - lift - widget_scroll_y`
//! * below: `(sel.top - ref.y) - lift`
//!
//! `below` is used once the selection top (adjusted by the ancestor scroll)
//! has moved above the reference row, otherwise `above`. Horizontally the
//! toolbar is centered on the selection: `sel.center_x + padding - ref.x`. The
//! ancestor scroll offset is subtracted from the final vertical coordinate.

use crate::viewport::ScrollContext;
use core_config::OverlayConfig;
use core_model::{FloatingWindow, IntRect, Point, Rect, Size, TextDisplay};
use core_text::SelectionRange;
use tracing::{debug, info, trace};

/// Last known rendered size of the toolbar content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OverlayGeometry {
    pub measured_width: i32,
    pub measured_height: i32,
    /// Set when the measurement was degenerate and the fallback size was substituted.
    pub fallback: bool,
}

impl OverlayGeometry {
    pub fn size(&self) -> Size {
        Size::new(self.measured_width, self.measured_height)
    }

    pub fn bounds(&self) -> IntRect {
        IntRect::from_size(self.size())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Above,
    Below,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Anchor {
    pub point: Point,
    pub side: Side,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PositionError {
    #[error("no active selection range")]
    MissingRange,
    #[error("text display is detached from its window")]
    Detached,
    #[error("selection geometry unavailable for {start}..{end}")]
    GeometryUnavailable { start: usize, end: usize },
}

/// Everything the placement arithmetic reads, already gathered from the host.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionInput {
    pub selection: Rect,
    pub reference: Point,
    pub overlay_height: i32,
    pub text_padding: i32,
    pub text_size: f32,
    pub scroll: ScrollContext,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPositioner {
    margin: f32,
    fallback: Size,
}

impl Default for OverlayPositioner {
    fn default() -> Self {
        Self::from_config(&OverlayConfig::default())
    }
}

impl OverlayPositioner {
    pub fn new(margin: f32, fallback: Size) -> Self {
        Self { margin, fallback }
    }

    pub fn from_config(cfg: &OverlayConfig) -> Self {
        Self::new(
            cfg.margin,
            Size::new(cfg.fallback_width, cfg.fallback_height),
        )
    }

    /// Pure placement arithmetic.
    pub fn compute(&self, input: &PositionInput) -> Anchor {
        let sel = input.selection;
        let ref_x = input.reference.x as f32;
        let ref_y = input.reference.y as f32;
        let lift = input.text_size + self.margin;
        let ancestor_y = input.scroll.ancestor_y;

        let above = (sel.bottom - ref_y - input.overlay_height as f32)
            - lift
            - input.scroll.widget_y as f32;
        let below = (sel.top - ref_y) - lift;
        let (side, vertical) = if sel.top - (ancestor_y as f32) < ref_y {
            (Side::Below, below)
        } else {
            (Side::Above, above)
        };
        let x = (sel.center_x() + input.text_padding as f32 - ref_x).round() as i32;
        let y = vertical.round() as i32 - ancestor_y;
        Anchor {
            point: Point::new(x, y),
            side,
        }
    }

    /// Gather geometry for `range` from the host and compute the anchor.
    pub fn anchor_for<V: TextDisplay + ?Sized>(
        &self,
        view: &V,
        range: Option<SelectionRange>,
        geometry: Option<OverlayGeometry>,
        reference: Point,
    ) -> Result<Anchor, PositionError> {
        let range = range.ok_or(PositionError::MissingRange)?;
        view.location_in_window().ok_or(PositionError::Detached)?;
        let selection = view.selection_bounds(range.as_range()).ok_or(
            PositionError::GeometryUnavailable {
                start: range.start(),
                end: range.end(),
            },
        )?;
        let input = PositionInput {
            selection,
            reference,
            overlay_height: geometry.map_or(0, |g| g.measured_height),
            text_padding: view.padding_left(),
            text_size: view.text_size(),
            scroll: ScrollContext::of(view),
        };
        let anchor = self.compute(&input);
        trace!(
            target: "overlay.position",
            %range,
            x = anchor.point.x,
            y = anchor.point.y,
            side = ?anchor.side,
            sel_top = selection.top,
            sel_bottom = selection.bottom,
            widget_scroll = input.scroll.widget_y,
            ancestor_scroll = input.scroll.ancestor_y,
            "anchor_computed"
        );
        Ok(anchor)
    }

    /// Read the toolbar content size right after it was shown. A degenerate
    /// measurement (content not laid out yet) yields the fallback size.
    pub fn measure<W: FloatingWindow + ?Sized>(&self, window: &W) -> OverlayGeometry {
        let bounds = window.content_bounds();
        if bounds.is_empty() {
            info!(
                target: "overlay.position",
                width = self.fallback.width,
                height = self.fallback.height,
                "overlay_size_fallback"
            );
            return OverlayGeometry {
                measured_width: self.fallback.width,
                measured_height: self.fallback.height,
                fallback: true,
            };
        }
        debug!(
            target: "overlay.position",
            width = bounds.width(),
            height = bounds.height(),
            "overlay_measured"
        );
        OverlayGeometry {
            measured_width: bounds.width(),
            measured_height: bounds.height(),
            fallback: false,
        }
    }

    /// Capture the reference point: center of the visible toolbar content on
    /// screen, shifted into the text widget's window row and ancestor scroll.
    pub fn capture_reference<V, W>(
        &self,
        view: &V,
        window: &W,
        geometry: OverlayGeometry,
    ) -> Result<Point, PositionError>
    where
        V: TextDisplay + ?Sized,
        W: FloatingWindow + ?Sized,
    {
        let text_location = view.location_in_window().ok_or(PositionError::Detached)?;
        let content = window.content_location_on_screen();
        let frame = window.visible_display_frame();
        let bounds = geometry.bounds();
        let ancestor_y = view.ancestor_scroll_y().unwrap_or(0);
        let reference = Point::new(
            content.x + bounds.center_x(),
            content.y + bounds.center_y() - (text_location.y - frame.top) - ancestor_y,
        );
        debug!(
            target: "overlay.position",
            x = reference.x,
            y = reference.y,
            "reference_captured"
        );
        Ok(reference)
    }
}
