use super::DispatchResult;
use crate::SelectionToolbar;
use core_model::{FloatingWindow, Point, TextDisplay};
use core_render::{PositionError, ScrollContext, window_target};
use core_text::SelectionRange;
use tracing::{debug, info};

pub(super) fn on_selected<V: TextDisplay, W: FloatingWindow>(
    tb: &mut SelectionToolbar<V, W>,
    range: SelectionRange,
) -> DispatchResult {
    if tb.session.is_showing() {
        if tb.window.is_visible() {
            tb.session.replace_range(range);
            return reposition(tb);
        }
        info!(target: "overlay.lifecycle", %range, "window_closed_by_host");
        tb.session.hide();
    }
    if tb.view.location_in_window().is_none() {
        debug!(target: "overlay.lifecycle", %range, "show_skipped_detached");
        tb.metrics.incr_skipped();
        return DispatchResult::clean();
    }
    tb.session.begin_showing(range);
    let size = tb.toolbar_size();
    tb.window.show(Point::ZERO, size);
    tb.metrics.incr_show();
    info!(target: "overlay.lifecycle", %range, "toolbar_shown");

    if tb.session.needs_measure() {
        let geometry = tb.positioner.measure(&tb.window);
        tb.session.set_geometry(geometry);
    }
    if let Err(e) = try_reposition(tb) {
        debug!(target: "overlay.lifecycle", error = %e, "initial_position_skipped");
        tb.metrics.incr_skipped();
    }
    DispatchResult::shown()
}

pub(super) fn on_unselected<V: TextDisplay, W: FloatingWindow>(
    tb: &mut SelectionToolbar<V, W>,
) -> DispatchResult {
    if !tb.session.is_showing() {
        tb.session.hide();
        return DispatchResult::clean();
    }
    if tb.window.is_visible() {
        tb.window.dismiss();
    }
    tb.session.hide();
    tb.metrics.incr_dismiss();
    info!(target: "overlay.lifecycle", "toolbar_dismissed");
    DispatchResult::dismissed()
}

/// Recompute the anchor for the stored range and move the visible window.
/// Captures the reference first if this selection does not have one yet.
pub(super) fn reposition<V: TextDisplay, W: FloatingWindow>(
    tb: &mut SelectionToolbar<V, W>,
) -> DispatchResult {
    match try_reposition(tb) {
        Ok(()) => {
            tb.metrics.incr_move();
            DispatchResult::moved()
        }
        Err(e) => {
            debug!(target: "overlay.lifecycle", error = %e, "reposition_skipped");
            tb.metrics.incr_skipped();
            DispatchResult::clean()
        }
    }
}

fn try_reposition<V: TextDisplay, W: FloatingWindow>(
    tb: &mut SelectionToolbar<V, W>,
) -> Result<(), PositionError> {
    let range = tb.session.range().ok_or(PositionError::MissingRange)?;
    let geometry = match tb.session.geometry() {
        Some(geometry) => geometry,
        None => {
            let geometry = tb.positioner.measure(&tb.window);
            tb.session.set_geometry(geometry);
            geometry
        }
    };
    let reference = match tb.session.reference() {
        Some(reference) => reference,
        None => {
            let reference = tb.positioner.capture_reference(&tb.view, &tb.window, geometry)?;
            tb.session.set_reference(reference);
            reference
        }
    };
    let anchor = tb
        .positioner
        .anchor_for(&tb.view, Some(range), Some(geometry), reference)?;
    let previous = tb.session.last_anchor().map(|a| a.point);
    let target = window_target(tb.placement, previous, anchor, ScrollContext::of(&tb.view));
    let size = tb.toolbar_size();
    tb.window.update(target, size);
    tb.session.set_last_anchor(anchor);
    debug!(
        target: "overlay.lifecycle",
        %range,
        x = target.x,
        y = target.y,
        side = ?anchor.side,
        "toolbar_moved"
    );
    Ok(())
}
