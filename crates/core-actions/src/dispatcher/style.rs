use super::DispatchResult;
use crate::{SelectionToolbar, StyleRequest};
use core_events::ToolbarButton;
use core_model::{FloatingWindow, TextDisplay};
use tracing::debug;

pub(super) fn on_button<V: TextDisplay, W: FloatingWindow>(
    tb: &mut SelectionToolbar<V, W>,
    button: ToolbarButton,
) -> DispatchResult {
    let range = tb.session.range();
    debug!(target: "style.apply", button = button.name(), ?range, "toolbar_button");
    tb.deferred.mark(StyleRequest::from(button), range);
    DispatchResult::clean()
}

/// Run every style request queued since the previous frame.
pub(super) fn on_frame<V: TextDisplay, W: FloatingWindow>(
    tb: &mut SelectionToolbar<V, W>,
) -> DispatchResult {
    let mut changed = 0;
    for pending in tb.deferred.consume() {
        let model = tb.view.annotations_mut();
        match pending.request {
            StyleRequest::Apply(kind) => {
                if tb.applicator.apply(model, kind, pending.range).is_some() {
                    tb.metrics.incr_applied();
                    changed += 1;
                }
            }
            StyleRequest::Clear => {
                let removed = tb.applicator.clear(model, pending.range);
                tb.metrics.note_cleared(removed);
                changed += removed;
            }
        }
    }
    if changed == 0 {
        return DispatchResult::clean();
    }
    DispatchResult::styles_changed(changed)
}
