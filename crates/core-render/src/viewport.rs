//! Scroll context for anchor computation.
//!
//! Two independent offsets matter: the text widget's own vertical scroll
//! (`widget_y`) and the scroll of the nearest scrollable ancestor
//! (`ancestor_y`, `0` when the widget has no such ancestor). They are read
//! fresh on every reposition so a scroll between two events is always honored.

use core_model::TextDisplay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollContext {
    pub widget_y: i32,
    pub ancestor_y: i32,
}

impl ScrollContext {
    pub fn new(widget_y: i32, ancestor_y: i32) -> Self {
        Self {
            widget_y,
            ancestor_y,
        }
    }

    pub fn of<V: TextDisplay + ?Sized>(view: &V) -> Self {
        Self::new(view.scroll_y(), view.ancestor_scroll_y().unwrap_or(0))
    }
}
