//! Scrollable and Selectable traits
//!
//! Components own their `ScrollState` and expose it here; the default
//! methods give every scrollable panel the same key behavior.

use super::Component;
use crate::tui::scroll::ScrollState;

/// Trait for components with scrollable content
///
/// Implement `scroll_state()` and `scroll_state_mut()`; everything else
/// delegates to `ScrollState`.
pub trait Scrollable: Component {
    fn scroll_state(&self) -> &ScrollState;

    fn scroll_state_mut(&mut self) -> &mut ScrollState;

    fn scroll_up(&mut self) {
        self.scroll_state_mut().scroll_up();
    }

    fn scroll_down(&mut self) {
        self.scroll_state_mut().scroll_down();
    }

    fn scroll_to_top(&mut self) {
        self.scroll_state_mut().scroll_to_top();
    }

    fn scroll_to_bottom(&mut self) {
        self.scroll_state_mut().scroll_to_bottom();
    }

    fn page_up(&mut self) {
        self.scroll_state_mut().page_up();
    }

    fn page_down(&mut self) {
        self.scroll_state_mut().page_down();
    }
}

/// Cursor over the items of a scrollable list
///
/// The cursor is kept inside the viewport by `select`.
pub trait Selectable: Scrollable {
    fn selected_index(&self) -> Option<usize>;

    fn select(&mut self, index: usize);

    fn item_count(&self) -> usize;

    /// Select the next item (with bounds checking)
    fn select_next(&mut self) {
        if let Some(current) = self.selected_index() {
            let max = self.item_count().saturating_sub(1);
            if current < max {
                self.select(current + 1);
            }
        } else if self.item_count() > 0 {
            self.select(0);
        }
    }

    /// Select the previous item (with bounds checking)
    fn select_previous(&mut self) {
        if let Some(current) = self.selected_index() {
            if current > 0 {
                self.select(current - 1);
            }
        } else if self.item_count() > 0 {
            self.select(self.item_count() - 1);
        }
    }

    fn select_first(&mut self) {
        if self.item_count() > 0 {
            self.select(0);
        }
    }

    fn select_last(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.select(count - 1);
        }
    }
}
