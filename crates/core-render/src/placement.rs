//! Window placement strategies.
//!
//! `Absolute` moves the window to the computed anchor. `LegacyAccumulate`
//! reproduces hosts that fed the previous anchor back into the move call:
//!
//! ```text
//! x = prev.x + (anchor.x + prev.x)
//! y = prev.y + (anchor.y - prev.y - widget_scroll_y)
//! ```
//!
//! where `prev` is the anchor computed for the previous show/move. Without a
//! previous anchor the legacy mode degrades to `Absolute`.

use crate::overlay::Anchor;
use crate::viewport::ScrollContext;
use core_config::PlacementMode;
use core_model::Point;

pub fn window_target(
    mode: PlacementMode,
    previous: Option<Point>,
    anchor: Anchor,
    scroll: ScrollContext,
) -> Point {
    match (mode, previous) {
        (PlacementMode::LegacyAccumulate, Some(prev)) => Point::new(
            prev.x + (anchor.point.x + prev.x),
            prev.y + (anchor.point.y - prev.y - scroll.widget_y),
        ),
        _ => anchor.point,
    }
}
