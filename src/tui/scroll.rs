// Scroll state for the document panel
//
// The document is a long, fixed list of rendered lines. Navigation requests
// set a target offset and each tick eases the offset toward it, which is the
// terminal's version of a smooth scroll. Manual scrolling cancels any easing
// in progress.

/// Scroll state for a single panel
///
/// Owns position, content size and viewport size, plus an optional easing
/// target for smooth scrolls.
#[derive(Debug, Clone, Default)]
pub struct ScrollState {
    /// Current scroll offset (line index at top of viewport)
    offset: usize,

    /// Total number of lines in content
    total: usize,

    /// Number of lines visible in viewport
    viewport: usize,

    /// Offset a smooth scroll is heading for
    target: Option<usize>,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;
        self.offset = self.offset.min(self.max_offset());
        if let Some(target) = self.target {
            self.target = Some(target.min(self.max_offset()));
        }
    }

    /// Scroll up by one line
    pub fn scroll_up(&mut self) {
        self.target = None;
        self.offset = self.offset.saturating_sub(1);
    }

    /// Scroll down by one line
    pub fn scroll_down(&mut self) {
        self.target = None;
        self.offset = (self.offset + 1).min(self.max_offset());
    }

    pub fn page_up(&mut self) {
        self.target = None;
        self.offset = self.offset.saturating_sub(self.viewport.max(1));
    }

    pub fn page_down(&mut self) {
        self.target = None;
        self.offset = (self.offset + self.viewport.max(1)).min(self.max_offset());
    }

    pub fn scroll_to_top(&mut self) {
        self.target = None;
        self.offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.target = None;
        self.offset = self.max_offset();
    }

    /// Begin a smooth scroll so that `line` ends up at the top of the viewport
    pub fn smooth_scroll_to(&mut self, line: usize) {
        self.target = Some(line.min(self.max_offset()));
    }

    /// Advance a smooth scroll by one step. Returns true while still moving.
    ///
    /// Each step covers half of the remaining distance (at least one line),
    /// so long jumps start fast and settle gently.
    pub fn tick(&mut self) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let distance = target.abs_diff(self.offset);
        let step = (distance / 2).max(1).min(distance);
        if target > self.offset {
            self.offset += step;
        } else {
            self.offset -= step;
        }

        if self.offset == target {
            self.target = None;
        }
        self.target.is_some()
    }

    /// Move the offset just enough that line `index` is inside the viewport
    pub fn ensure_visible(&mut self, index: usize) {
        if self.viewport == 0 {
            return;
        }
        self.target = None;
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    pub fn is_animating(&self) -> bool {
        self.target.is_some()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

/// Panels that can be focused for input routing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusablePanel {
    /// Section list (default focus)
    #[default]
    Sidebar,
    /// Rendered document
    Document,
}

impl FocusablePanel {
    pub fn toggle(self) -> Self {
        match self {
            FocusablePanel::Sidebar => FocusablePanel::Document,
            FocusablePanel::Document => FocusablePanel::Sidebar,
        }
    }
}
