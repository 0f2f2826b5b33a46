//! Toolbar taps queue style work that runs on the next frame.

mod common;

use common::*;
use core_actions::{SelectionToolbar, ToolbarOptions};
use core_events::ToolbarButton;
use core_text::{AnnotationKind, AnnotationModel, CharacterStyle, Color, SpanFlags};
use pretty_assertions::assert_eq;

#[test]
fn tap_waits_for_frame() {
    let mut tb = toolbar();
    select(&mut tb, 4, 9);
    let r = tap(&mut tb, ToolbarButton::Underline);
    assert_eq!(r.styles_changed, 0);
    assert_eq!(tb.pending_styles(), 1);
    assert!(tb.text_view().text().spans().is_empty());
    assert_eq!(frame(&mut tb).styles_changed, 1);
    assert_eq!(tb.pending_styles(), 0);
    let span = &tb.text_view().text().spans()[0];
    assert_eq!(span.range, 4..9);
    assert_eq!(span.flags, SpanFlags::EXCLUSIVE_EXCLUSIVE);
}

#[test]
fn range_is_captured_at_tap_time() {
    let mut tb = toolbar();
    select(&mut tb, 5, 10);
    tap(&mut tb, ToolbarButton::Italic);
    select(&mut tb, 0, 3);
    frame(&mut tb);
    let spans = tb.text_view().text().spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].range, 5..10);
    assert_eq!(spans[0].kind, AnnotationKind::Character(CharacterStyle::Italic));
}

#[test]
fn tap_without_selection_changes_nothing() {
    let mut tb = toolbar();
    tap(&mut tb, ToolbarButton::Bold);
    tap(&mut tb, ToolbarButton::Clear);
    assert_eq!(frame(&mut tb).styles_changed, 0);
    assert!(tb.text_view().text().spans().is_empty());
    assert_eq!(tb.metrics().styles_applied, 0);
}

#[test]
fn clear_removes_only_overlapping_character_styles() {
    let mut tb = toolbar();
    select(&mut tb, 0, 3);
    tap(&mut tb, ToolbarButton::Bold);
    tap(&mut tb, ToolbarButton::Highlight);
    select(&mut tb, 20, 25);
    tap(&mut tb, ToolbarButton::Strikethrough);
    assert_eq!(frame(&mut tb).styles_changed, 3);

    select(&mut tb, 1, 2);
    tap(&mut tb, ToolbarButton::Clear);
    assert_eq!(frame(&mut tb).styles_changed, 2);

    let spans = tb.text_view().text().spans();
    assert_eq!(spans.len(), 1);
    assert_eq!(spans[0].range, 20..25);
    let m = tb.metrics();
    assert_eq!((m.styles_applied, m.styles_cleared), (3, 2));
}

#[test]
fn clear_keeps_paragraph_annotations() {
    let mut tb = toolbar();
    tb.text_view_mut()
        .text_mut()
        .add_span(
            AnnotationKind::Paragraph(core_text::ParagraphStyle::Quote),
            0..43,
            SpanFlags::EXCLUSIVE_EXCLUSIVE,
        )
        .unwrap();
    select(&mut tb, 0, 3);
    tap(&mut tb, ToolbarButton::Bold);
    tap(&mut tb, ToolbarButton::Clear);
    frame(&mut tb);
    let spans = tb.text_view().text().spans();
    assert_eq!(spans.len(), 1);
    assert!(!spans[0].kind.is_character_style());
}

#[test]
fn explicit_highlight_wins_over_config() {
    let config = core_config::parse("[highlight]\ncolor = \"#FF112233\"\n");
    assert_eq!(config.highlight_color(), Color::from_argb(0xFF11_2233));

    let from_config = toolbar_with(window(), &config);
    assert_eq!(from_config.highlight(), Color::from_argb(0xFF11_2233));

    let explicit = Color::from_rgb(0x44, 0x55, 0x66);
    let mut tb = SelectionToolbar::new(
        ToolbarOptions::new(text_view(), window()).with_highlight(explicit),
        &config,
    );
    select(&mut tb, 0, 3);
    tap(&mut tb, ToolbarButton::Highlight);
    frame(&mut tb);
    assert_eq!(
        tb.text_view().text().spans()[0].kind,
        AnnotationKind::Character(CharacterStyle::Background(explicit))
    );
}
