//! Interactive trait for components that handle keyboard input
//!
//! The App routes keys to the focused component first. Anything the
//! component does not consume bubbles back up for global handling.

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl Handled {
    pub fn was_handled(self) -> bool {
        self == Self::Yes
    }
}

/// Trait for components that handle keyboard input
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// App (global keys: q, /, m, Tab, L, t, r)
///    │
///    ▼
/// Focused component (Interactive::handle_key)
///    │
///    ▼
/// App (fallbacks: Enter navigates, y copies)
/// ```
pub trait Interactive: Component {
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hints for the status bar while this component is focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
