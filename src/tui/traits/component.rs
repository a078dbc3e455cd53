//! Core component trait
//!
//! Every panel that can be rendered implements `Component`.

use crate::tui::theme::Theme;
use crate::viewer::UiState;
use ratatui::{layout::Rect, Frame};

/// Identity of a component, used for focus tracking and hints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    Sidebar,
    Document,
}

/// Immutable context passed to components during rendering
///
/// Components see the viewer state read-only; mutation goes through
/// `Viewer` operations in the event loop.
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,

    /// Which component currently has focus
    pub focus: ComponentId,

    /// Animation frame counter (spinner)
    pub animation_frame: usize,

    pub state: &'a UiState,
}

impl<'a> RenderContext<'a> {
    pub fn new(
        theme: &'a Theme,
        focus: ComponentId,
        animation_frame: usize,
        state: &'a UiState,
    ) -> Self {
        Self {
            theme,
            focus,
            animation_frame,
            state,
        }
    }

    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }

    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}

/// Base trait for all UI components
pub trait Component {
    fn id(&self) -> ComponentId;

    /// Render the component to the given area
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
