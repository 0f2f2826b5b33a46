#![allow(dead_code)] // Shared across integration tests; each test binary uses a subset of helpers.

use core_actions::{DispatchResult, SelectionToolbar, ToolbarOptions};
use core_config::Config;
use core_events::{AccessibilityEventKind, Event, ToolbarButton};
use core_model::headless::{HeadlessTextView, HeadlessWindow, TextMetrics};
use core_model::{Point, Size};

pub const TEXT: &str = "The quick brown fox jumps over the lazy dog";

pub type Toolbar = SelectionToolbar<HeadlessTextView, HeadlessWindow>;

/// 1080x2000 screen with a 60px status bar; toolbar content lays out at 900x150.
pub fn window() -> HeadlessWindow {
    HeadlessWindow::new(Size::new(1080, 2000), 60).with_content_size(Size::new(900, 150))
}

/// Text view placed 200px down the window, default monospace metrics.
pub fn text_view() -> HeadlessTextView {
    let mut view = HeadlessTextView::new(TEXT, TextMetrics::default());
    view.attach_at(Point::new(0, 200));
    view
}

pub fn toolbar_with(window: HeadlessWindow, config: &Config) -> Toolbar {
    SelectionToolbar::new(ToolbarOptions::new(text_view(), window), config)
}

pub fn toolbar() -> Toolbar {
    toolbar_with(window(), &Config::default())
}

pub fn selection_changed(tb: &mut Toolbar) -> DispatchResult {
    tb.handle(&Event::Accessibility(
        AccessibilityEventKind::TextSelectionChanged,
    ))
}

pub fn select(tb: &mut Toolbar, start: usize, end: usize) -> DispatchResult {
    tb.text_view_mut().select(start, end);
    selection_changed(tb)
}

pub fn unselect(tb: &mut Toolbar) -> DispatchResult {
    tb.text_view_mut().clear_selection();
    selection_changed(tb)
}

/// Scroll the enclosing scroll container to `y` and notify.
pub fn scroll_ancestor(tb: &mut Toolbar, y: i32) -> DispatchResult {
    tb.text_view_mut().set_ancestor_scroll(Some(y));
    tb.handle(&Event::Scroll { x: 0, y })
}

pub fn tap(tb: &mut Toolbar, button: ToolbarButton) -> DispatchResult {
    tb.handle(&Event::Toolbar(button))
}

pub fn frame(tb: &mut Toolbar) -> DispatchResult {
    tb.handle(&Event::Frame)
}
