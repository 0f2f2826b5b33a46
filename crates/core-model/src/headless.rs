//! In-memory host: a monospace text view and a recording popup window.
//!
//! `HeadlessTextView` lays text out on a fixed character grid (`columns`
//! cells per row, explicit `\n` breaks), which is enough to produce realistic
//! multi-line selection geometry. `HeadlessWindow` records every
//! show/update/dismiss so callers can assert on the exact sequence.

use crate::{FloatingWindow, IntRect, Point, Rect, Size, TextDisplay};
use core_text::{AnnotationModel, StyledText};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub char_width: f32,
    pub line_height: f32,
    /// Cells per row before soft wrapping.
    pub columns: usize,
    pub text_size: f32,
    pub padding_left: i32,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 24.0,
            line_height: 56.0,
            columns: 40,
            text_size: 42.0,
            padding_left: 16,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeadlessTextView {
    text: StyledText,
    selection: (usize, usize),
    metrics: TextMetrics,
    scroll_y: i32,
    ancestor_scroll_y: Option<i32>,
    location: Option<Point>,
    selectable: bool,
    menu_suppressed: bool,
}

impl HeadlessTextView {
    /// Attached at window location `(0, 0)` with no scrollable ancestor.
    pub fn new(content: &str, metrics: TextMetrics) -> Self {
        Self {
            text: StyledText::new(content),
            selection: (0, 0),
            metrics,
            scroll_y: 0,
            ancestor_scroll_y: None,
            location: Some(Point::ZERO),
            selectable: false,
            menu_suppressed: false,
        }
    }

    pub fn text(&self) -> &StyledText {
        &self.text
    }

    pub fn text_mut(&mut self) -> &mut StyledText {
        &mut self.text
    }

    pub fn metrics(&self) -> &TextMetrics {
        &self.metrics
    }

    /// Set raw selection endpoints, clamped to the text length.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.text.len_chars();
        self.selection = (start.min(len), end.min(len));
    }

    pub fn clear_selection(&mut self) {
        let caret = self.selection.1;
        self.selection = (caret, caret);
    }

    pub fn scroll_to(&mut self, y: i32) {
        self.scroll_y = y;
    }

    /// Place the view inside a scrollable ancestor (`None` removes it).
    pub fn set_ancestor_scroll(&mut self, y: Option<i32>) {
        self.ancestor_scroll_y = y;
    }

    pub fn attach_at(&mut self, location: Point) {
        self.location = Some(location);
    }

    pub fn detach(&mut self) {
        self.location = None;
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    pub fn is_menu_suppressed(&self) -> bool {
        self.menu_suppressed
    }

    /// Grid cell `(row, column)` of every character up to `end`.
    fn cells(&self, end: usize) -> Vec<(usize, usize)> {
        let columns = self.metrics.columns.max(1);
        let mut out = Vec::with_capacity(end);
        let (mut row, mut col) = (0usize, 0usize);
        for ch in self.text.chars().take(end) {
            if ch != '\n' && col >= columns {
                row += 1;
                col = 0;
            }
            out.push((row, col));
            if ch == '\n' {
                row += 1;
                col = 0;
            } else {
                col += 1;
            }
        }
        out
    }
}

impl TextDisplay for HeadlessTextView {
    fn selection(&self) -> (usize, usize) {
        self.selection
    }

    fn selection_bounds(&self, range: Range<usize>) -> Option<Rect> {
        self.location?;
        if range.is_empty() || range.end > self.text.len_chars() {
            return None;
        }
        let cells = self.cells(range.end);
        let m = &self.metrics;
        let bounds = cells[range]
            .iter()
            .map(|&(row, col)| {
                let left = col as f32 * m.char_width;
                let top = row as f32 * m.line_height;
                Rect::new(left, top, left + m.char_width, top + m.line_height)
            })
            .fold(Rect::EMPTY, Rect::union);
        (!bounds.is_empty()).then_some(bounds)
    }

    fn scroll_y(&self) -> i32 {
        self.scroll_y
    }

    fn ancestor_scroll_y(&self) -> Option<i32> {
        self.ancestor_scroll_y
    }

    fn padding_left(&self) -> i32 {
        self.metrics.padding_left
    }

    fn text_size(&self) -> f32 {
        self.metrics.text_size
    }

    fn location_in_window(&self) -> Option<Point> {
        self.location
    }

    fn annotations_mut(&mut self) -> &mut dyn AnnotationModel {
        &mut self.text
    }

    fn set_selectable(&mut self, selectable: bool) {
        self.selectable = selectable;
    }

    fn suppress_selection_menu(&mut self) {
        self.menu_suppressed = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowCall {
    Show { anchor: Point, size: Size },
    Update { anchor: Point, size: Size },
    Dismiss,
}

#[derive(Debug, Clone)]
pub struct HeadlessWindow {
    screen: Size,
    frame_top: i32,
    content: Option<Size>,
    visible: bool,
    position: Point,
    size: Size,
    calls: Vec<WindowCall>,
}

impl HeadlessWindow {
    /// `frame_top` is the height of system decorations above the app window.
    /// Content is never measured unless [`HeadlessWindow::with_content_size`] is used.
    pub fn new(screen: Size, frame_top: i32) -> Self {
        Self {
            screen,
            frame_top,
            content: None,
            visible: false,
            position: Point::ZERO,
            size: Size::default(),
            calls: Vec::new(),
        }
    }

    /// Size the toolbar content reports once laid out.
    pub fn with_content_size(mut self, size: Size) -> Self {
        self.content = Some(size);
        self
    }

    /// Content finished laying out after the window was created.
    pub fn set_content_size(&mut self, size: Size) {
        self.content = Some(size);
    }

    /// The host tore the popup down on its own (activity pause, outside
    /// touch). Not recorded as a `Dismiss` call.
    pub fn close_by_host(&mut self) {
        self.visible = false;
    }

    pub fn calls(&self) -> &[WindowCall] {
        &self.calls
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn count(&self, pred: impl Fn(&WindowCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }
}

impl FloatingWindow for HeadlessWindow {
    fn show(&mut self, anchor: Point, size: Size) {
        self.visible = true;
        self.position = anchor;
        self.size = size;
        self.calls.push(WindowCall::Show { anchor, size });
    }

    fn update(&mut self, anchor: Point, size: Size) {
        if !self.visible {
            return;
        }
        self.position = anchor;
        self.size = size;
        self.calls.push(WindowCall::Update { anchor, size });
    }

    fn dismiss(&mut self) {
        self.visible = false;
        self.calls.push(WindowCall::Dismiss);
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn content_bounds(&self) -> IntRect {
        match self.content {
            Some(size) if self.visible => IntRect::from_size(size),
            _ => IntRect::default(),
        }
    }

    fn content_location_on_screen(&self) -> Point {
        let width = self.content.map_or(self.size.width, |s| s.width);
        Point::new(
            (self.screen.width - width) / 2 + self.position.x,
            self.frame_top + self.position.y,
        )
    }

    fn visible_display_frame(&self) -> IntRect {
        IntRect::new(0, self.frame_top, self.screen.width, self.screen.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn metrics() -> TextMetrics {
        TextMetrics {
            char_width: 10.0,
            line_height: 20.0,
            columns: 8,
            text_size: 16.0,
            padding_left: 4,
        }
    }

    #[test]
    fn single_line_bounds() {
        let v = HeadlessTextView::new("abcdefg", metrics());
        assert_eq!(
            v.selection_bounds(2..5),
            Some(Rect::new(20.0, 0.0, 50.0, 20.0))
        );
    }

    #[test]
    fn wrapped_selection_spans_rows() {
        // 8 columns: "abcdefgh" row 0, "ijkl" row 1
        let v = HeadlessTextView::new("abcdefghijkl", metrics());
        let r = v.selection_bounds(6..10).unwrap();
        assert_eq!(r, Rect::new(0.0, 0.0, 80.0, 40.0));
    }

    #[test]
    fn newline_starts_a_row() {
        let v = HeadlessTextView::new("ab\ncd", metrics());
        assert_eq!(
            v.selection_bounds(3..5),
            Some(Rect::new(0.0, 20.0, 20.0, 40.0))
        );
    }

    #[test]
    fn no_bounds_when_detached_or_invalid() {
        let mut v = HeadlessTextView::new("abc", metrics());
        assert_eq!(v.selection_bounds(1..1), None);
        assert_eq!(v.selection_bounds(1..9), None);
        v.detach();
        assert_eq!(v.selection_bounds(0..2), None);
        assert_eq!(v.location_in_window(), None);
        assert_eq!(
            HeadlessTextView::new("", metrics()).selection_bounds(0..0),
            None
        );
    }

    #[test]
    fn select_clamps_and_clear_collapses() {
        let mut v = HeadlessTextView::new("abc", metrics());
        v.select(1, 99);
        assert_eq!(v.selection(), (1, 3));
        assert!(v.has_selection());
        v.clear_selection();
        assert!(!v.has_selection());
    }

    #[test]
    fn window_measures_only_when_visible() {
        let mut w = HeadlessWindow::new(Size::new(1080, 2000), 60)
            .with_content_size(Size::new(900, 150));
        assert!(w.content_bounds().is_empty());
        w.show(Point::ZERO, Size::new(900, 150));
        assert_eq!(w.content_bounds(), IntRect::new(0, 0, 900, 150));
        assert_eq!(w.content_location_on_screen(), Point::new(90, 60));
        w.update(Point::new(5, 7), Size::new(900, 150));
        w.dismiss();
        w.update(Point::new(1, 1), Size::new(900, 150));
        w.show(Point::ZERO, Size::new(900, 150));
        w.close_by_host();
        assert!(!w.is_visible());
        assert!(w.content_bounds().is_empty());
        assert_eq!(w.calls().len(), 4);
        assert_eq!(
            &w.calls()[..3],
            &[
                WindowCall::Show {
                    anchor: Point::ZERO,
                    size: Size::new(900, 150)
                },
                WindowCall::Update {
                    anchor: Point::new(5, 7),
                    size: Size::new(900, 150)
                },
                WindowCall::Dismiss,
            ]
        );
    }
}
