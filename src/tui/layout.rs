/// Screen layout for the viewer.
///
/// Single source of truth for where the sidebar, document, search bar, log
/// strip and status bar go. Below `compact_width` the sidebar stops being a
/// column and becomes a drawer laid over the document.
use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Sidebar column width in wide layout
pub const SIDEBAR_WIDTH: u16 = 34;

/// Height of the log strip when shown (including borders)
pub const LOG_STRIP_HEIGHT: u16 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenLayout {
    pub title: Rect,
    /// Sidebar column (wide) or drawer overlay (compact); None when hidden
    pub sidebar: Option<Rect>,
    pub document: Rect,
    pub logs: Option<Rect>,
    pub status: Rect,
    /// Sidebar is a drawer over the document
    pub compact: bool,
}

impl ScreenLayout {
    pub fn compute(
        area: Rect,
        compact_width: u16,
        drawer_open: bool,
        show_logs: bool,
    ) -> Self {
        let logs_height = if show_logs { LOG_STRIP_HEIGHT } else { 0 };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(logs_height),
                Constraint::Length(1),
            ])
            .split(area);
        let (title, body, logs, status) = (rows[0], rows[1], rows[2], rows[3]);
        let logs = show_logs.then_some(logs);

        let compact = area.width < compact_width;
        if compact {
            let sidebar = drawer_open.then(|| Rect {
                width: SIDEBAR_WIDTH.min(body.width),
                ..body
            });
            return Self {
                title,
                sidebar,
                document: body,
                logs,
                status,
                compact,
            };
        }

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(20)])
            .split(body);

        Self {
            title,
            sidebar: Some(columns[0]),
            document: columns[1],
            logs,
            status,
            compact,
        }
    }

    /// Whether a click at (column, row) landed outside an open drawer
    pub fn is_outside_drawer(&self, column: u16, row: u16) -> bool {
        match self.sidebar {
            Some(drawer) if self.compact => !contains(drawer, column, row),
            _ => false,
        }
    }
}

pub fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}
