//! Core event types and the UI-thread event queue for selectbar.
//!
//! Everything runs on the host's UI thread. Host callbacks (accessibility
//! notifications, scroll changes, toolbar clicks, display refresh) are turned
//! into `Event` values and handed to a single state-transition function.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};

// -------------------------------------------------------------------------------------------------
// Queue Policy
// -------------------------------------------------------------------------------------------------
// `EventQueue` models the host message loop: handlers may `post` follow-up events (e.g. deferred
// style work for the next frame) and the loop drains in FIFO order. The queue is bounded by
// `EVENT_QUEUE_CAP`; on overflow the oldest event is dropped and `QUEUE_OVERFLOWS` is bumped.
// Selection and scroll notifications fully supersede their predecessors, so losing the oldest
// entry under a flood is preferable to unbounded growth.
// -------------------------------------------------------------------------------------------------
pub const EVENT_QUEUE_CAP: usize = 1024;

pub static QUEUE_OVERFLOWS: AtomicU64 = AtomicU64::new(0);

/// Top-level event enum consumed by the toolbar's transition function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Accessibility notification sent by the text display.
    Accessibility(AccessibilityEventKind),
    /// The text display (or its scrollable ancestor) scrolled to the given offsets.
    Scroll { x: i32, y: i32 },
    /// A toolbar button was tapped.
    Toolbar(ToolbarButton),
    /// Display refresh tick; deferred work queued during earlier handlers runs here.
    Frame,
    Shutdown,
}

/// Accessibility notification kinds the bridge may receive. Only
/// `TextSelectionChanged` carries selection semantics; the rest are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccessibilityEventKind {
    TextSelectionChanged,
    TextChanged,
    Focused,
    Scrolled,
    ContentChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolbarButton {
    Clear,
    Highlight,
    Bold,
    Italic,
    Underline,
    Strikethrough,
}

impl ToolbarButton {
    pub const ALL: [ToolbarButton; 6] = [
        ToolbarButton::Clear,
        ToolbarButton::Highlight,
        ToolbarButton::Bold,
        ToolbarButton::Italic,
        ToolbarButton::Underline,
        ToolbarButton::Strikethrough,
    ];

    /// Stable lowercase name (used by session scripts and logs).
    pub fn name(self) -> &'static str {
        match self {
            ToolbarButton::Clear => "clear",
            ToolbarButton::Highlight => "highlight",
            ToolbarButton::Bold => "bold",
            ToolbarButton::Italic => "italic",
            ToolbarButton::Underline => "underline",
            ToolbarButton::Strikethrough => "strikethrough",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|b| b.name().eq_ignore_ascii_case(name))
    }
}

// -------------------------------------------------------------------------------------------------
// Event Hooks
// -------------------------------------------------------------------------------------------------
/// Optional hooks observing events at the loop boundary. Must not block.
pub trait EventHooks {
    fn pre_handle(&self, _event: &Event) {}
    fn post_handle(&self, _event: &Event) {}
}

/// Hooks emitting a trace line per event (enabled by the binary at `trace` level).
pub struct TracingEventHooks;

impl EventHooks for TracingEventHooks {
    fn pre_handle(&self, event: &Event) {
        tracing::trace!(target: "events.queue", ?event, "handle_begin");
    }
    fn post_handle(&self, event: &Event) {
        tracing::trace!(target: "events.queue", ?event, "handle_end");
    }
}

/// Bounded FIFO of pending events.
#[derive(Debug)]
pub struct EventQueue {
    pending: VecDeque<Event>,
    cap: usize,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::with_capacity(EVENT_QUEUE_CAP)
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            pending: VecDeque::new(),
            cap: cap.max(1),
        }
    }

    /// Append an event; drops the oldest pending event when full.
    pub fn post(&mut self, event: Event) {
        if self.pending.len() >= self.cap
            && let Some(dropped) = self.pending.pop_front()
        {
            QUEUE_OVERFLOWS.fetch_add(1, Ordering::Relaxed);
            tracing::debug!(target: "events.queue", ?dropped, cap = self.cap, "queue_overflow");
        }
        self.pending.push_back(event);
    }

    pub fn pop(&mut self) -> Option<Event> {
        self.pending.pop_front()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_is_fifo() {
        let mut q = EventQueue::new();
        q.post(Event::Frame);
        q.post(Event::Toolbar(ToolbarButton::Bold));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(Event::Frame));
        assert_eq!(q.pop(), Some(Event::Toolbar(ToolbarButton::Bold)));
        assert!(q.pop().is_none());
    }

    #[test]
    fn overflow_drops_oldest() {
        let before = QUEUE_OVERFLOWS.load(Ordering::Relaxed);
        let mut q = EventQueue::with_capacity(2);
        q.post(Event::Scroll { x: 0, y: 1 });
        q.post(Event::Scroll { x: 0, y: 2 });
        q.post(Event::Scroll { x: 0, y: 3 });
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(Event::Scroll { x: 0, y: 2 }));
        assert!(QUEUE_OVERFLOWS.load(Ordering::Relaxed) > before);
    }

    #[test]
    fn button_names_round_trip() {
        for b in ToolbarButton::ALL {
            assert_eq!(ToolbarButton::from_name(b.name()), Some(b));
        }
        assert_eq!(
            ToolbarButton::from_name("Strikethrough"),
            Some(ToolbarButton::Strikethrough)
        );
        assert_eq!(ToolbarButton::from_name("sparkle"), None);
    }
}
