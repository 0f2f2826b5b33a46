//! Property tests for anchor computation.

use core_model::{Point, Rect, Size};
use core_render::{OverlayPositioner, PositionInput, ScrollContext, Side};
use proptest::prelude::*;

fn input(
    top: i32,
    height: i32,
    left: i32,
    width: i32,
    ref_y: i32,
    overlay_height: i32,
    scroll: ScrollContext,
) -> PositionInput {
    PositionInput {
        selection: Rect::new(
            left as f32,
            top as f32,
            (left + width) as f32,
            (top + height) as f32,
        ),
        reference: Point::new(540, ref_y),
        overlay_height,
        text_padding: 16,
        text_size: 42.0,
        scroll,
    }
}

proptest! {
    #[test]
    fn same_inputs_same_anchor(
        top in -2000i32..2000,
        height in 1i32..400,
        left in 0i32..1000,
        width in 1i32..1000,
        ref_y in -500i32..1500,
        overlay_height in 0i32..300,
        widget_y in 0i32..500,
        ancestor_y in 0i32..2000,
    ) {
        let p = OverlayPositioner::new(20.0, Size::new(976, 192));
        let i = input(top, height, left, width, ref_y, overlay_height, ScrollContext::new(widget_y, ancestor_y));
        prop_assert_eq!(p.compute(&i), p.compute(&i));
    }

    #[test]
    fn side_follows_reference_row(
        top in -2000i32..2000,
        ref_y in -500i32..1500,
        ancestor_y in 0i32..2000,
    ) {
        let p = OverlayPositioner::new(20.0, Size::new(976, 192));
        let i = input(top, 56, 0, 48, ref_y, 150, ScrollContext::new(0, ancestor_y));
        let expected = if top - ancestor_y < ref_y { Side::Below } else { Side::Above };
        prop_assert_eq!(p.compute(&i).side, expected);
    }

    #[test]
    fn horizontal_offset_ignores_scroll(
        left in 0i32..1000,
        width in 1i32..1000,
        widget_y in 0i32..500,
        ancestor_y in 0i32..2000,
    ) {
        let p = OverlayPositioner::new(20.0, Size::new(976, 192));
        let still = p.compute(&input(0, 56, left, width, 0, 150, ScrollContext::default()));
        let scrolled = p.compute(&input(0, 56, left, width, 0, 150, ScrollContext::new(widget_y, ancestor_y)));
        prop_assert_eq!(still.point.x, scrolled.point.x);
    }
}
