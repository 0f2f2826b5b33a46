//! Host-facing model for the selection toolbar.
//!
//! The toolbar never touches a concrete widget toolkit. It talks to two seams:
//!
//! * [`TextDisplay`] – the selectable text widget: selection indices, range
//!   geometry from its layout, scroll offsets, on-screen location, and the
//!   annotation model backing its text.
//! * [`FloatingWindow`] – the popup primitive hosting the toolbar content:
//!   show/update/dismiss at window coordinates plus measurement reads.
//!
//! Geometry contracts:
//! * `TextDisplay::selection_bounds` is in the text widget's local layout
//!   coordinates (no padding, no scroll) and returns `None` when no layout is
//!   available (detached widget, empty text, indices out of range).
//! * `TextDisplay::location_in_window` is `None` while the widget is detached;
//!   no anchor is ever computed in that state.
//! * `FloatingWindow::content_bounds` is empty until the content has been laid
//!   out once; callers substitute a fallback size.
//!
//! `bridge` classifies host notifications; `headless` provides in-memory
//! implementations of both seams for the binary and tests.

use core_text::AnnotationModel;
use std::ops::Range;

pub mod bridge;
mod geometry;
pub mod headless;

pub use bridge::{SelectionBridge, SelectionChange};
pub use geometry::{IntRect, Point, Rect, Size};

/// The selectable text widget the toolbar is attached to.
pub trait TextDisplay {
    /// Raw selection endpoints `(start, end)`; `start` may exceed `end` after a backwards drag.
    fn selection(&self) -> (usize, usize);

    fn has_selection(&self) -> bool {
        let (a, b) = self.selection();
        a != b
    }

    /// Union of the glyph-run rectangles covering `range`, in local layout coordinates.
    fn selection_bounds(&self, range: Range<usize>) -> Option<Rect>;

    /// Widget's own vertical scroll offset.
    fn scroll_y(&self) -> i32;

    /// Vertical scroll offset of the nearest scrollable ancestor, if any.
    fn ancestor_scroll_y(&self) -> Option<i32>;

    fn padding_left(&self) -> i32;

    /// Text size in pixels.
    fn text_size(&self) -> f32;

    /// Top-left of the widget in window coordinates; `None` while detached.
    fn location_in_window(&self) -> Option<Point>;

    fn annotations_mut(&mut self) -> &mut dyn AnnotationModel;

    fn set_selectable(&mut self, _selectable: bool) {}

    /// Hide the host's built-in selection action menu (the toolbar replaces it).
    fn suppress_selection_menu(&mut self) {}
}

/// Popup window primitive hosting the toolbar content.
pub trait FloatingWindow {
    /// Show at `anchor` (top-center gravity, window coordinates).
    fn show(&mut self, anchor: Point, size: Size);

    /// Move an already visible window to `anchor`.
    fn update(&mut self, anchor: Point, size: Size);

    fn dismiss(&mut self);

    fn is_visible(&self) -> bool;

    /// Locally visible bounds of the toolbar content; empty before the first layout pass.
    fn content_bounds(&self) -> IntRect;

    /// Screen location of the toolbar content's top-left corner.
    fn content_location_on_screen(&self) -> Point;

    /// Visible display frame of the window hosting the text widget.
    fn visible_display_frame(&self) -> IntRect;
}
