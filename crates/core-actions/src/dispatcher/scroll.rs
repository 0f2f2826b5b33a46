use super::{DispatchResult, selection};
use crate::SelectionToolbar;
use core_model::{FloatingWindow, TextDisplay};
use tracing::trace;

/// Offsets carried by the event are informational; the positioner re-reads
/// both scroll values from the text display.
pub(super) fn on_scroll<V: TextDisplay, W: FloatingWindow>(
    tb: &mut SelectionToolbar<V, W>,
    x: i32,
    y: i32,
) -> DispatchResult {
    if !tb.session.is_showing() || !tb.window.is_visible() || !tb.view.has_selection() {
        trace!(target: "overlay.lifecycle", x, y, "scroll_ignored");
        return DispatchResult::clean();
    }
    selection::reposition(tb)
}
