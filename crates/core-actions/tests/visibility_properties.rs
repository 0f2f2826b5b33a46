//! Property tests: overlay visibility tracks the stored selection range.

mod common;

use common::*;
use core_events::ToolbarButton;
use core_model::{FloatingWindow, Point};
use core_state::OverlayState;
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Op {
    Select(usize, usize),
    Unselect,
    Scroll(i32),
    Tap(usize),
    Frame,
    Detach,
    Attach,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..50, 0usize..50).prop_map(|(a, b)| Op::Select(a, b)),
        2 => Just(Op::Unselect),
        2 => (0i32..800).prop_map(Op::Scroll),
        1 => (0usize..ToolbarButton::ALL.len()).prop_map(Op::Tap),
        1 => Just(Op::Frame),
        1 => Just(Op::Detach),
        1 => Just(Op::Attach),
    ]
}

proptest! {
    #[test]
    fn showing_iff_range_stored(ops in prop::collection::vec(op(), 1..40)) {
        let mut tb = toolbar();
        for op in ops {
            match op {
                Op::Select(a, b) => { select(&mut tb, a, b); }
                Op::Unselect => { unselect(&mut tb); }
                Op::Scroll(y) => { scroll_ancestor(&mut tb, y); }
                Op::Tap(i) => { tap(&mut tb, ToolbarButton::ALL[i]); }
                Op::Frame => { frame(&mut tb); }
                Op::Detach => tb.text_view_mut().detach(),
                Op::Attach => tb.text_view_mut().attach_at(Point::new(0, 200)),
            }
            let showing = tb.state() == OverlayState::Showing;
            prop_assert!(tb.session().is_consistent());
            prop_assert_eq!(showing, tb.range().is_some_and(|r| !r.is_empty()));
            prop_assert_eq!(showing, tb.window().is_visible());
        }
    }

    #[test]
    fn repeated_scroll_is_stable(start in 0usize..40, len in 1usize..10, y in 0i32..800) {
        let mut tb = toolbar();
        select(&mut tb, start, start + len);
        prop_assume!(tb.state() == OverlayState::Showing);
        scroll_ancestor(&mut tb, y);
        let first = tb.window().position();
        scroll_ancestor(&mut tb, y);
        prop_assert_eq!(first, tb.window().position());
    }
}
