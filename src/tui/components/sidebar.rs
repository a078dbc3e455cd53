//! Sidebar component
//!
//! The filtered section list with search-highlighted titles. In wide layout
//! it is a fixed column; in compact layout it is the drawer laid over the
//! document. The cursor only moves the selection; Enter (handled by `App`)
//! navigates.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use super::search_bar;
use crate::content::Section;
use crate::tui::layout::contains;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{
    Component, ComponentId, Handled, Interactive, RenderContext, Scrollable, Selectable,
};
use crate::viewer::{Segment, Viewer};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem},
    Frame,
};

/// One visible row: a matching section and its highlighted title
struct SidebarRow {
    section: &'static Section,
    title: Vec<Segment<'static>>,
}

pub struct SidebarPanel {
    rows: Vec<SidebarRow>,
    /// Size of the unfiltered registry, for the match counter
    total: usize,
    scroll: ScrollState,
    selected: Option<usize>,
    /// Search box shows a cursor while search mode is active
    pub searching: bool,
    /// Drawn over other content (compact layout)
    pub overlay: bool,
}

impl SidebarPanel {
    pub fn new(viewer: &Viewer) -> Self {
        let mut panel = Self {
            rows: Vec::new(),
            total: 0,
            scroll: ScrollState::new(),
            selected: None,
            searching: false,
            overlay: false,
        };
        panel.refresh(viewer);
        panel.reset_selection();
        panel
    }

    /// Split the sidebar area into search box and list
    fn split(area: Rect) -> (Rect, Rect) {
        let [search, list] =
            Layout::vertical([Constraint::Length(search_bar::HEIGHT), Constraint::Min(1)])
                .areas(area);
        (search, list)
    }

    /// Inner list rows (inside the list's borders)
    pub fn list_inner(area: Rect) -> Rect {
        let (_, list) = Self::split(area);
        Block::default().borders(Borders::ALL).inner(list)
    }

    /// Rebuild rows from the viewer's filtered list and highlighted titles
    ///
    /// The cursor is clamped to the new list.
    pub fn refresh(&mut self, viewer: &Viewer) {
        self.total = viewer.sections().len();
        self.rows = viewer
            .filtered_sections()
            .into_iter()
            .map(|section| SidebarRow {
                section,
                title: viewer.highlighted_title(section),
            })
            .collect();
        self.clamp_selection();
    }

    /// Sync viewport dimensions before rendering
    pub fn sync(&mut self, area: Rect) {
        let viewport = Self::list_inner(area).height as usize;
        self.scroll.update_dimensions(self.rows.len(), viewport);
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        match self.selected {
            Some(idx) if idx >= self.rows.len() => {
                self.selected = self.rows.len().checked_sub(1);
            }
            None if !self.rows.is_empty() => self.selected = Some(0),
            _ => {}
        }
    }

    /// The search term changed; put the cursor back on the first match
    pub fn reset_selection(&mut self) {
        self.scroll.scroll_to_top();
        self.selected = (!self.rows.is_empty()).then_some(0);
    }

    /// Section under the cursor
    pub fn selected_section(&self) -> Option<&'static Section> {
        self.selected
            .and_then(|idx| self.rows.get(idx))
            .map(|row| row.section)
    }

    /// Map a click to a list index
    pub fn index_at(&self, area: Rect, column: u16, row: u16) -> Option<usize> {
        let inner = Self::list_inner(area);
        if !contains(inner, column, row) {
            return None;
        }
        let idx = self.scroll_state().offset() + (row - inner.y) as usize;
        (idx < self.rows.len()).then_some(idx)
    }

    fn item(&self, row: &SidebarRow, index: usize, ctx: &RenderContext) -> ListItem<'static> {
        let theme = ctx.theme;
        let active = ctx.state.active_section_id() == Some(row.section.id);
        let selected = self.selected == Some(index);

        let base = if active {
            Style::default()
                .fg(theme.active)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg)
        };

        let mut spans = vec![
            Span::styled(if active { "▍" } else { " " }, base),
            Span::raw(format!("{} ", row.section.icon)),
        ];
        spans.extend(row.title.iter().map(|segment| {
            let style = if segment.is_match {
                theme.match_style()
            } else {
                base
            };
            Span::styled(segment.content, style)
        }));

        let item = ListItem::new(Line::from(spans));
        if selected && ctx.is_focused(self.id()) {
            item.style(
                Style::default()
                    .bg(theme.selected_bg)
                    .fg(theme.selected_fg),
            )
        } else {
            item
        }
    }
}

impl Component for SidebarPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Sidebar
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        if self.overlay {
            f.render_widget(Clear, area);
        }

        let theme = ctx.theme;
        let (search_area, list_area) = Self::split(area);
        search_bar::render(
            f,
            search_area,
            ctx.state.search_term(),
            self.searching,
            theme,
        );

        let (start, end) = self.scroll.visible_range();
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .enumerate()
            .skip(start)
            .take(end.saturating_sub(start))
            .map(|(idx, row)| self.item(row, idx, ctx))
            .collect();

        let title = if ctx.state.search_term().trim().is_empty() {
            " Sections ".to_string()
        } else {
            format!(" Sections ({}/{}) ", self.rows.len(), self.total)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(ctx.is_focused(self.id())))
            .style(Style::default().bg(theme.bg))
            .title(title);

        if items.is_empty() {
            let empty = List::new(vec![ListItem::new(Span::styled(
                " No matching sections",
                Style::default().fg(theme.muted),
            ))])
            .block(block);
            f.render_widget(empty, list_area);
            return;
        }

        f.render_widget(List::new(items).block(block), list_area);
        render_scrollbar(
            f,
            list_area,
            self.scroll_state(),
            ScrollbarStyle::Minimal,
            Style::default().fg(theme.border),
        );
    }
}

impl Scrollable for SidebarPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Selectable for SidebarPanel {
    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn select(&mut self, index: usize) {
        if self.rows.is_empty() {
            self.selected = None;
            return;
        }
        let index = index.min(self.rows.len() - 1);
        self.selected = Some(index);
        self.scroll.ensure_visible(index);
    }

    fn item_count(&self) -> usize {
        self.rows.len()
    }
}

impl Interactive for SidebarPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.select_previous();
                Handled::Yes
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.select_next();
                Handled::Yes
            }
            KeyCode::Home | KeyCode::Char('g') => {
                self.select_first();
                Handled::Yes
            }
            KeyCode::End | KeyCode::Char('G') => {
                self.select_last();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓ select  Enter go")
    }
}
