//! Scrollbar rendering helper shared by the sidebar and document panels

use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Visual style for the scrollbar
#[derive(Debug, Clone, Copy, Default)]
pub enum ScrollbarStyle {
    /// Arrows at top and bottom (↑ ↓)
    Arrows,
    /// Minimal style - no arrows, just the thumb
    #[default]
    Minimal,
}

/// Render a vertical scrollbar on the right edge of `area`
///
/// Only renders if content exceeds the viewport.
pub fn render_scrollbar(
    f: &mut Frame,
    area: Rect,
    scroll: &ScrollState,
    style: ScrollbarStyle,
    thumb: Style,
) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let scrollbar = match style {
        ScrollbarStyle::Arrows => Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓")),
        ScrollbarStyle::Minimal => Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None),
    }
    .thumb_style(thumb);

    // ScrollbarState wants how far the content can scroll, not its length
    let content_length = scroll.total().saturating_sub(scroll.viewport());
    let mut scrollbar_state = ScrollbarState::new(content_length).position(scroll.offset());

    f.render_stateful_widget(scrollbar, area, &mut scrollbar_state);
}
