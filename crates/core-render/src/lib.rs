//! Toolbar placement: anchor computation relative to a captured reference
//! point, the scroll context it reads, and the strategy that turns an anchor
//! into a window move.

pub mod overlay;
pub mod placement;
pub mod viewport;

pub use overlay::{Anchor, OverlayGeometry, OverlayPositioner, PositionError, PositionInput, Side};
pub use placement::window_target;
pub use viewport::ScrollContext;
