//! Session scripts: a TOML description of a text view, a popup host, and the
//! sequence of host callbacks to replay.
//!
//! ```toml
//! text = "The quick brown fox"
//!
//! [view]          # optional
//! y = 200
//!
//! [window]        # optional; omit content_* to exercise the fallback size
//! content_width = 900
//! content_height = 150
//!
//! [[steps]]
//! kind = "select"
//! start = 4
//! end = 9
//!
//! [[steps]]
//! kind = "button"
//! name = "bold"
//!
//! [[steps]]
//! kind = "frame"
//! ```

use anyhow::{Context, Result, bail};
use core_events::{AccessibilityEventKind, Event, ToolbarButton};
use core_model::headless::{HeadlessTextView, HeadlessWindow, TextMetrics};
use core_model::{Point, Size};
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct Script {
    pub text: String,
    #[serde(default)]
    pub metrics: MetricsSection,
    #[serde(default)]
    pub view: ViewSection,
    #[serde(default)]
    pub window: WindowSection,
    #[serde(default)]
    pub steps: Vec<Step>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MetricsSection {
    pub char_width: f32,
    pub line_height: f32,
    pub columns: usize,
    pub text_size: f32,
    pub padding_left: i32,
}

impl Default for MetricsSection {
    fn default() -> Self {
        let m = TextMetrics::default();
        Self {
            char_width: m.char_width,
            line_height: m.line_height,
            columns: m.columns,
            text_size: m.text_size,
            padding_left: m.padding_left,
        }
    }
}

impl From<&MetricsSection> for TextMetrics {
    fn from(m: &MetricsSection) -> Self {
        TextMetrics {
            char_width: m.char_width,
            line_height: m.line_height,
            columns: m.columns,
            text_size: m.text_size,
            padding_left: m.padding_left,
        }
    }
}

/// Location of the text view inside its window.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ViewSection {
    pub x: i32,
    pub y: i32,
    /// Scroll of an enclosing scroll container; absent when not nested.
    pub ancestor_scroll: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WindowSection {
    pub screen_width: i32,
    pub screen_height: i32,
    pub frame_top: i32,
    pub content_width: Option<i32>,
    pub content_height: Option<i32>,
}

impl Default for WindowSection {
    fn default() -> Self {
        Self {
            screen_width: 1080,
            screen_height: 2000,
            frame_top: 60,
            content_width: None,
            content_height: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollTarget {
    /// The enclosing scroll container.
    #[default]
    Ancestor,
    /// The text view's own scroll offset.
    Widget,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Step {
    Select {
        start: usize,
        end: usize,
    },
    Unselect,
    Scroll {
        y: i32,
        #[serde(default)]
        target: ScrollTarget,
    },
    Button {
        name: String,
    },
    Frame,
    Detach,
    Attach,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("parsing script {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let script: Script = toml::from_str(content)?;
        for step in &script.steps {
            if let Step::Button { name } = step
                && ToolbarButton::from_name(name).is_none()
            {
                bail!("unknown toolbar button `{name}`");
            }
        }
        Ok(script)
    }

    pub fn text_view(&self) -> HeadlessTextView {
        let mut view = HeadlessTextView::new(&self.text, (&self.metrics).into());
        view.attach_at(Point::new(self.view.x, self.view.y));
        view.set_ancestor_scroll(self.view.ancestor_scroll);
        view
    }

    pub fn window(&self) -> HeadlessWindow {
        let w = &self.window;
        let window = HeadlessWindow::new(Size::new(w.screen_width, w.screen_height), w.frame_top);
        match (w.content_width, w.content_height) {
            (Some(width), Some(height)) => window.with_content_size(Size::new(width, height)),
            _ => window,
        }
    }
}

impl Step {
    /// Apply the host-side half of the step and return the callback the host
    /// would deliver for it.
    pub fn apply(&self, view: &mut HeadlessTextView, attach_at: Point) -> Option<Event> {
        let selection_changed = Event::Accessibility(AccessibilityEventKind::TextSelectionChanged);
        match self {
            Step::Select { start, end } => {
                view.select(*start, *end);
                Some(selection_changed)
            }
            Step::Unselect => {
                view.clear_selection();
                Some(selection_changed)
            }
            Step::Scroll { y, target } => {
                match target {
                    ScrollTarget::Ancestor => view.set_ancestor_scroll(Some(*y)),
                    ScrollTarget::Widget => view.scroll_to(*y),
                }
                Some(Event::Scroll { x: 0, y: *y })
            }
            Step::Button { name } => ToolbarButton::from_name(name).map(Event::Toolbar),
            Step::Frame => Some(Event::Frame),
            Step::Detach => {
                view.detach();
                None
            }
            Step::Attach => {
                view.attach_at(attach_at);
                None
            }
        }
    }
}
