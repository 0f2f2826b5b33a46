//! Selection toolbar controller.
//!
//! `SelectionToolbar` owns the text display, the floating window hosting the
//! toolbar, and the session record. Every host callback arrives as an
//! [`Event`] and goes through [`SelectionToolbar::handle`], the single
//! state-transition function:
//!
//! * `Hidden -> Showing` on a non-empty selection: show, measure the content
//!   (once, or again after a fallback), capture the reference point, move to
//!   the computed anchor.
//! * `Showing -> Showing` on a changed selection or a scroll: recompute and
//!   move the visible window; never re-show.
//! * `Showing -> Hidden` on an empty selection: dismiss and drop the range.
//!
//! A window the host closed on its own is treated as `Hidden` by the next
//! selection event, which shows it again with a fresh reference point.
//!
//! Toolbar taps never change visibility. They queue style work against the
//! stored range, which runs on the next `Event::Frame`.

use core_config::{Config, PlacementMode};
use core_events::Event;
use core_model::{FloatingWindow, SelectionBridge, Size, TextDisplay};
use core_render::{Anchor, OverlayPositioner};
use core_state::{LifecycleMetrics, LifecycleMetricsSnapshot, OverlayState, ToolbarSession};
use core_text::{Color, SelectionRange, StyleApplicator};
use tracing::debug;

pub mod dispatcher;
pub mod scheduler;

pub use dispatcher::DispatchResult;
pub use scheduler::{DeferredStyles, PendingStyle, StyleRequest};

/// Construction parameters supplied by the host.
#[derive(Debug)]
pub struct ToolbarOptions<V, W> {
    pub text_view: V,
    pub window: W,
    /// Overrides the configured highlight color when set.
    pub highlight: Option<Color>,
}

impl<V, W> ToolbarOptions<V, W> {
    pub fn new(text_view: V, window: W) -> Self {
        Self {
            text_view,
            window,
            highlight: None,
        }
    }

    pub fn with_highlight(mut self, color: Color) -> Self {
        self.highlight = Some(color);
        self
    }
}

pub struct SelectionToolbar<V, W> {
    pub(crate) view: V,
    pub(crate) window: W,
    pub(crate) session: ToolbarSession,
    pub(crate) bridge: SelectionBridge,
    pub(crate) positioner: OverlayPositioner,
    pub(crate) placement: PlacementMode,
    pub(crate) width: i32,
    pub(crate) fallback_height: i32,
    pub(crate) applicator: StyleApplicator,
    pub(crate) deferred: DeferredStyles,
    pub(crate) metrics: LifecycleMetrics,
}

impl<V: TextDisplay, W: FloatingWindow> SelectionToolbar<V, W> {
    /// Takes ownership of both collaborators, makes the text selectable and
    /// hides the host's own selection menu.
    pub fn new(options: ToolbarOptions<V, W>, config: &Config) -> Self {
        let ToolbarOptions {
            text_view: mut view,
            window,
            highlight,
        } = options;
        view.set_selectable(true);
        view.suppress_selection_menu();
        let overlay = config.overlay();
        let highlight = highlight.unwrap_or_else(|| config.highlight_color());
        debug!(
            target: "overlay.lifecycle",
            %highlight,
            margin = overlay.margin,
            placement = ?overlay.placement,
            "toolbar_attached"
        );
        Self {
            view,
            window,
            session: ToolbarSession::new(),
            bridge: SelectionBridge::new(),
            positioner: OverlayPositioner::from_config(overlay),
            placement: overlay.placement,
            width: overlay.width,
            fallback_height: overlay.fallback_height,
            applicator: StyleApplicator::new(highlight),
            deferred: DeferredStyles::new(),
            metrics: LifecycleMetrics::default(),
        }
    }

    pub fn handle(&mut self, event: &Event) -> DispatchResult {
        dispatcher::dispatch(event, self)
    }

    pub fn text_view(&self) -> &V {
        &self.view
    }

    /// Mutable access for host-side changes (selection drags, scrolling).
    /// Changes only take effect through the next event.
    pub fn text_view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn window(&self) -> &W {
        &self.window
    }

    /// Mutable access for host-side window changes (layout, host-initiated close).
    pub fn window_mut(&mut self) -> &mut W {
        &mut self.window
    }

    pub fn state(&self) -> OverlayState {
        self.session.overlay()
    }

    pub fn range(&self) -> Option<SelectionRange> {
        self.session.range()
    }

    pub fn last_anchor(&self) -> Option<Anchor> {
        self.session.last_anchor()
    }

    pub fn session(&self) -> &ToolbarSession {
        &self.session
    }

    pub fn highlight(&self) -> Color {
        self.applicator.highlight()
    }

    /// Style requests waiting for the next frame.
    pub fn pending_styles(&self) -> usize {
        self.deferred.len()
    }

    pub fn metrics(&self) -> LifecycleMetricsSnapshot {
        self.metrics.snapshot()
    }

    pub(crate) fn toolbar_size(&self) -> Size {
        let height = self
            .session
            .geometry()
            .map_or(self.fallback_height, |g| g.measured_height);
        Size::new(self.width, height)
    }
}
