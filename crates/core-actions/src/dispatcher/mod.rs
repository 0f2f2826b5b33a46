//! Event dispatch for the selection toolbar.
//!
//! * `selection` - selection transitions (show / move / dismiss)
//! * `scroll`    - repositioning on scroll notifications
//! * `style`     - toolbar taps and deferred style execution on frame ticks
//!
//! Positioning failures never escape a handler: they are logged, counted in
//! `LifecycleMetrics::skipped`, and the state stays as it was.

use crate::SelectionToolbar;
use core_events::Event;
use core_model::{FloatingWindow, SelectionChange, TextDisplay};
use tracing::debug;

mod scroll;
mod selection;
mod style;

/// Outcome of handling one `Event`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DispatchResult {
    /// The window was shown (`Hidden -> Showing`).
    pub shown: bool,
    /// The visible window was moved to a new anchor.
    pub moved: bool,
    pub dismissed: bool,
    /// Annotations added or removed while flushing deferred style work.
    pub styles_changed: usize,
    pub quit: bool,
}

impl DispatchResult {
    pub fn clean() -> Self {
        Self::default()
    }
    pub fn shown() -> Self {
        Self {
            shown: true,
            ..Self::default()
        }
    }
    pub fn moved() -> Self {
        Self {
            moved: true,
            ..Self::default()
        }
    }
    pub fn dismissed() -> Self {
        Self {
            dismissed: true,
            ..Self::default()
        }
    }
    pub fn styles_changed(count: usize) -> Self {
        Self {
            styles_changed: count,
            ..Self::default()
        }
    }
    pub fn quit(dismissed: bool) -> Self {
        Self {
            dismissed,
            quit: true,
            ..Self::default()
        }
    }
}

pub(crate) fn dispatch<V: TextDisplay, W: FloatingWindow>(
    event: &Event,
    toolbar: &mut SelectionToolbar<V, W>,
) -> DispatchResult {
    match event {
        Event::Accessibility(kind) => match toolbar.bridge.classify(&toolbar.view, *kind) {
            Some(SelectionChange::Selected(range)) => selection::on_selected(toolbar, range),
            Some(SelectionChange::Unselected) => selection::on_unselected(toolbar),
            None => DispatchResult::clean(),
        },
        Event::Scroll { x, y } => scroll::on_scroll(toolbar, *x, *y),
        Event::Toolbar(button) => style::on_button(toolbar, *button),
        Event::Frame => style::on_frame(toolbar),
        Event::Shutdown => {
            let dismissed = selection::on_unselected(toolbar).dismissed;
            debug!(target: "overlay.lifecycle", dismissed, "toolbar_shutdown");
            DispatchResult::quit(dismissed)
        }
    }
}
