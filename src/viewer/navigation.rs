//! Navigation controller
//!
//! Tracks the active section and the compact-layout drawer ("mobile menu").
//! The active section changes only through `navigate_to`; scrolling the
//! document by hand does not update it.

use super::Viewer;

/// Something that can bring a named anchor into view
///
/// The request is fire-and-forget: implementations start the scroll and
/// return whether the anchor exists.
pub trait ScrollTarget {
    /// Start a smooth scroll to `anchor`. Returns false if there is no such anchor.
    fn scroll_into_view(&mut self, anchor: &str) -> bool;
}

impl Viewer {
    /// Scroll to a section and make it active
    ///
    /// Unknown ids and missing anchors are a silent no-op. On success the
    /// mobile menu is always closed.
    pub fn navigate_to(&mut self, id: &str, target: &mut dyn ScrollTarget) -> bool {
        if !self.sections.iter().any(|s| s.id == id) {
            tracing::debug!(section = id, "Navigation to unknown section ignored");
            return false;
        }
        if !target.scroll_into_view(id) {
            tracing::debug!(section = id, "Navigation target has no anchor");
            return false;
        }

        self.state.active_section_id = Some(id.to_string());
        self.state.is_mobile_menu_open = false;
        true
    }

    pub fn toggle_mobile_menu(&mut self) {
        self.state.is_mobile_menu_open = !self.state.is_mobile_menu_open;
    }

    /// Overlay dismiss
    pub fn close_mobile_menu(&mut self) {
        self.state.is_mobile_menu_open = false;
    }
}
