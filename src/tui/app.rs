// TUI application state
//
// `App` owns the `Viewer` and the two panels and routes input between them.
// Viewer state is never touched directly: every change goes through a
// viewer operation (navigate_to, copy_code, retry, ...). The panels only own
// presentation state such as scroll offsets and cursors.

use super::components::{
    loading, logs_strip, status_bar, title_bar, DocumentPanel, SidebarPanel,
};
use super::input::InputHandler;
use super::layout::{contains, ScreenLayout};
use super::scroll::FocusablePanel;
use super::theme::{Theme, ThemeKind};
use super::traits::{
    Component, ComponentId, Copyable, Interactive, RenderContext, Scrollable, Selectable,
};
use crate::config::Config;
use crate::logging::LogBuffer;
use crate::viewer::{UiState, Viewer};
use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::Frame;

/// Lines scrolled per mouse wheel notch
const WHEEL_LINES: usize = 3;

/// Where typed characters go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    /// Typing edits the search term
    Search,
}

/// Main application state for the TUI
pub struct App {
    pub viewer: Viewer,
    pub sidebar: SidebarPanel,
    pub document: DocumentPanel,

    /// Which panel receives keys in wide layout
    pub focused: FocusablePanel,
    pub mode: InputMode,

    pub theme_kind: ThemeKind,
    pub theme: Theme,

    /// Log buffer for the log strip
    pub log_buffer: LogBuffer,
    pub show_logs: bool,

    pub should_quit: bool,

    compact_width: u16,
    animation_frame: usize,
    input_handler: InputHandler,
    /// Layout of the last frame, for mouse hit-testing
    layout: Option<ScreenLayout>,
    /// Navigated to once the document is ready
    start_section: Option<String>,
}

impl App {
    pub fn new(viewer: Viewer, config: &Config, log_buffer: LogBuffer) -> Self {
        let theme_kind = ThemeKind::from_name(&config.theme);
        let sidebar = SidebarPanel::new(&viewer);
        let document = DocumentPanel::new(viewer.content());

        Self {
            viewer,
            sidebar,
            document,
            focused: FocusablePanel::default(),
            mode: InputMode::default(),
            theme_kind,
            theme: theme_kind.theme(),
            log_buffer,
            show_logs: config.show_logs,
            should_quit: false,
            compact_width: config.compact_width,
            animation_frame: 0,
            input_handler: InputHandler::with_default_config(),
            layout: None,
            start_section: config.start_section.clone(),
        }
    }

    /// Tear down the viewer, aborting its timers and clipboard tasks
    pub fn shutdown(self) -> UiState {
        self.viewer.unmount()
    }

    /// Sidebar is a drawer (terminal narrower than `compact_width`)
    pub fn is_compact(&self) -> bool {
        self.layout.is_some_and(|l| l.compact)
    }

    /// Panel that actually receives keys
    ///
    /// In compact layout the open drawer always has focus and the document
    /// has it otherwise.
    pub fn effective_focus(&self) -> FocusablePanel {
        if self.is_compact() {
            if self.viewer.state().is_mobile_menu_open() {
                FocusablePanel::Sidebar
            } else {
                FocusablePanel::Document
            }
        } else {
            self.focused
        }
    }

    pub fn spinner_char(&self) -> char {
        self.render_context().spinner_char()
    }

    pub fn focus_hint(&self) -> &'static str {
        let hint = match self.effective_focus() {
            FocusablePanel::Sidebar => self.sidebar.focus_hint(),
            FocusablePanel::Document => self.document.focus_hint(),
        };
        hint.unwrap_or("")
    }

    // ─────────────────────────────────────────────────────────────
    // Ticks
    // ─────────────────────────────────────────────────────────────

    /// Advance animations and apply the start section once ready
    pub fn on_tick(&mut self) {
        self.animation_frame = self.animation_frame.wrapping_add(1);
        self.document.tick();

        if self.viewer.state().is_ready() {
            if let Some(id) = self.start_section.take() {
                if !self.viewer.navigate_to(&id, &mut self.document) {
                    tracing::warn!(section = %id, "Configured start section not found");
                }
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Keyboard
    // ─────────────────────────────────────────────────────────────

    /// Layered dispatch: search mode → global → focused panel → fallbacks
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind == KeyEventKind::Release {
            self.input_handler.handle_key_release(key.code);
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.mode == InputMode::Search {
            self.handle_search_key(key);
            return;
        }

        if !self.input_handler.handle_key_press(key.code) {
            return;
        }

        if self.handle_global_key(key) || !self.viewer.state().is_ready() {
            return;
        }

        let focus = self.effective_focus();
        let handled = match focus {
            FocusablePanel::Sidebar => self.sidebar.handle_key(key),
            FocusablePanel::Document => self.document.handle_key(key),
        };
        if handled.was_handled() {
            return;
        }

        match (focus, key.code) {
            (FocusablePanel::Sidebar, KeyCode::Enter) => self.navigate_selected(),
            (_, KeyCode::Char('y')) => self.copy_focused(),
            _ => {}
        }
    }

    /// Keys that work regardless of focus. Returns true if consumed.
    fn handle_global_key(&mut self, key: KeyEvent) -> bool {
        let ready = self.viewer.state().is_ready();
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('r') => {
                self.viewer.retry();
            }
            KeyCode::Char('L') => self.show_logs = !self.show_logs,
            KeyCode::Char('t') => {
                self.theme_kind = self.theme_kind.next();
                self.theme = self.theme_kind.theme();
                tracing::debug!(theme = self.theme_kind.name(), "Theme changed");
            }
            KeyCode::Char('/') if ready => self.enter_search(),
            KeyCode::Char('m') if ready => {
                if self.is_compact() {
                    self.viewer.toggle_mobile_menu();
                } else {
                    tracing::debug!("Menu toggle ignored in wide layout");
                }
            }
            KeyCode::Tab | KeyCode::BackTab if ready => {
                self.focused = self.focused.toggle();
            }
            KeyCode::Esc if ready => {
                if self.viewer.state().is_mobile_menu_open() {
                    self.viewer.close_mobile_menu();
                } else if !self.viewer.state().search_term().is_empty() {
                    self.clear_search();
                }
            }
            _ => return false,
        }
        true
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.clear_search();
                self.exit_search();
            }
            KeyCode::Enter => {
                self.exit_search();
                self.navigate_selected();
            }
            KeyCode::Up => self.sidebar.select_previous(),
            KeyCode::Down => self.sidebar.select_next(),
            KeyCode::Backspace => {
                self.viewer.pop_search_char();
                self.search_changed();
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.viewer.push_search_char(c);
                self.search_changed();
            }
            _ => {}
        }
    }

    fn enter_search(&mut self) {
        self.mode = InputMode::Search;
        self.sidebar.searching = true;
        self.focused = FocusablePanel::Sidebar;
        if self.is_compact() && !self.viewer.state().is_mobile_menu_open() {
            self.viewer.toggle_mobile_menu();
        }
    }

    fn exit_search(&mut self) {
        self.mode = InputMode::Normal;
        self.sidebar.searching = false;
    }

    fn clear_search(&mut self) {
        self.viewer.clear_search();
        self.search_changed();
    }

    fn search_changed(&mut self) {
        self.sidebar.refresh(&self.viewer);
        self.sidebar.reset_selection();
    }

    /// Navigate to the section under the sidebar cursor
    fn navigate_selected(&mut self) {
        let Some(section) = self.sidebar.selected_section() else {
            return;
        };
        if self.viewer.navigate_to(section.id, &mut self.document) && self.is_compact() {
            self.focused = FocusablePanel::Document;
        }
    }

    fn copy_focused(&mut self) {
        let Some(code_id) = self.document.copy_target().map(str::to_string) else {
            tracing::debug!("Nothing to copy on screen");
            return;
        };
        self.viewer.copy_code(&code_id);
    }

    /// Pasted text extends the search term, entering search mode if needed
    ///
    /// Line breaks become spaces so a multi-line paste stays one query.
    pub fn handle_paste(&mut self, text: &str) {
        if !self.viewer.state().is_ready() {
            return;
        }
        if self.mode == InputMode::Normal {
            self.enter_search();
        }
        let pasted: String = text
            .chars()
            .map(|c| if c == '\n' || c == '\r' { ' ' } else { c })
            .collect();
        let term = format!("{}{}", self.viewer.state().search_term(), pasted);
        self.viewer.set_search_term(term);
        self.search_changed();
    }

    // ─────────────────────────────────────────────────────────────
    // Mouse
    // ─────────────────────────────────────────────────────────────

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(layout) = self.layout else {
            return;
        };
        if !self.viewer.state().is_ready() {
            return;
        }
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                if self.viewer.state().is_mobile_menu_open() && layout.is_outside_drawer(column, row)
                {
                    self.viewer.close_mobile_menu();
                    return;
                }
                if let Some(area) = layout.sidebar {
                    if let Some(idx) = self.sidebar.index_at(area, column, row) {
                        self.sidebar.select(idx);
                        self.focused = FocusablePanel::Sidebar;
                        self.navigate_selected();
                        return;
                    }
                    if contains(area, column, row) {
                        self.focused = FocusablePanel::Sidebar;
                        return;
                    }
                }
                if contains(layout.document, column, row) {
                    self.focused = FocusablePanel::Document;
                }
            }
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let down = mouse.kind == MouseEventKind::ScrollDown;
                let over_sidebar = layout.sidebar.is_some_and(|a| contains(a, column, row));
                if over_sidebar {
                    if down {
                        self.sidebar.select_next();
                    } else {
                        self.sidebar.select_previous();
                    }
                } else if contains(layout.document, column, row) {
                    for _ in 0..WHEEL_LINES {
                        if down {
                            self.document.scroll_down();
                        } else {
                            self.document.scroll_up();
                        }
                    }
                }
            }
            _ => {}
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Rendering
    // ─────────────────────────────────────────────────────────────

    pub fn draw(&mut self, f: &mut Frame) {
        let layout = ScreenLayout::compute(
            f.area(),
            self.compact_width,
            self.viewer.state().is_mobile_menu_open(),
            self.show_logs,
        );
        self.layout = Some(layout);

        title_bar::render(f, layout.title, self);

        if self.viewer.state().is_ready() {
            self.document
                .relayout(self.viewer.content(), DocumentPanel::text_width(layout.document));
            self.document
                .sync(layout.document.height.saturating_sub(2) as usize);
            if let Some(area) = layout.sidebar {
                self.sidebar.overlay = layout.compact;
                self.sidebar.sync(area);
            }

            let ctx = self.render_context();
            self.document.render(f, layout.document, &ctx);
            if let Some(area) = layout.sidebar {
                self.sidebar.render(f, area, &ctx);
            }
        } else {
            let body = layout
                .sidebar
                .map_or(layout.document, |s| s.union(layout.document));
            loading::render(f, body, &self.render_context());
        }

        if let Some(area) = layout.logs {
            logs_strip::render(f, area, &self.log_buffer, &self.theme);
        }
        status_bar::render(f, layout.status, self);
    }

    fn render_context(&self) -> RenderContext<'_> {
        let focus = match self.effective_focus() {
            FocusablePanel::Sidebar => ComponentId::Sidebar,
            FocusablePanel::Document => ComponentId::Document,
        };
        RenderContext::new(
            &self.theme,
            focus,
            self.animation_frame,
            self.viewer.state(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::viewer::tests::{mount_fake, mount_with, settle, FakeClipboard};
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
        app.handle_key(KeyEvent::new_with_kind(
            code,
            KeyModifiers::NONE,
            KeyEventKind::Release,
        ));
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn click(app: &mut App, column: u16, row: u16) {
        app.handle_mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Draw one frame and return the screen as text, one row per line
    fn draw(app: &mut App, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let buffer = terminal.backend().buffer();
        let rows: Vec<String> = buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect();
        rows.join("\n")
    }

    fn code_header_with(screen: &str, marker: &str) -> bool {
        screen
            .lines()
            .any(|row| row.contains("┌─") && row.contains(marker))
    }

    async fn ready_app(config: &Config) -> (App, FakeClipboard) {
        let (mut viewer, clipboard) = mount_fake();
        tokio::time::sleep(Duration::from_millis(1001)).await;
        settle(&mut viewer).await;
        assert!(viewer.state().is_ready());
        (App::new(viewer, config, LogBuffer::new()), clipboard)
    }

    #[tokio::test(start_paused = true)]
    async fn test_search_filters_live_and_enter_navigates() {
        let (mut app, _) = ready_app(&Config::default()).await;
        draw(&mut app, 120, 40);

        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, InputMode::Search);

        type_text(&mut app, "hel");
        assert_eq!(app.viewer.state().search_term(), "hel");
        assert_eq!(app.viewer.filtered_sections().len(), 1);
        type_text(&mut app, "m");

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.viewer.state().active_section_id(), Some("helm"));
        assert_eq!(app.viewer.state().search_term(), "helm");
    }

    #[tokio::test(start_paused = true)]
    async fn test_esc_in_search_clears_term() {
        let (mut app, _) = ready_app(&Config::default()).await;
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "k8s");
        press(&mut app, KeyCode::Backspace);
        assert_eq!(app.viewer.state().search_term(), "k8");

        press(&mut app, KeyCode::Esc);
        assert_eq!(app.mode, InputMode::Normal);
        assert_eq!(app.viewer.state().search_term(), "");
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_key_copies_focused_code_block() {
        let (mut app, clipboard) = ready_app(&Config::default()).await;
        draw(&mut app, 120, 40);

        press(&mut app, KeyCode::Tab);
        assert_eq!(app.effective_focus(), FocusablePanel::Document);
        press(&mut app, KeyCode::Char('n'));
        for _ in 0..50 {
            app.on_tick();
        }
        let code_id = app.document.focused_code_id().unwrap().to_string();
        assert_eq!(code_id, "overview-1");
        assert!(code_header_with(&draw(&mut app, 120, 40), "[y] copy"));

        press(&mut app, KeyCode::Char('y'));
        settle(&mut app.viewer).await;

        let expected = app.viewer.content().code(&code_id).unwrap().to_string();
        assert_eq!(clipboard.writes(), vec![expected]);
        assert!(app.viewer.state().is_copied(&code_id));

        let screen = draw(&mut app, 120, 40);
        assert!(code_header_with(&screen, "✓ Copied"));
        assert!(screen.contains("copied overview-1"));

        tokio::time::sleep(Duration::from_millis(2001)).await;
        settle(&mut app.viewer).await;
        assert_eq!(app.viewer.state().copied_code_id(), None);

        let screen = draw(&mut app, 120, 40);
        assert!(!screen.contains("Copied"));
        assert!(!screen.contains("copied overview-1"));
        assert!(code_header_with(&screen, "[y] copy"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_failed_copy_changes_nothing() {
        let (mut viewer, _) = mount_with(FakeClipboard::failing());
        tokio::time::sleep(Duration::from_millis(1001)).await;
        settle(&mut viewer).await;
        let mut app = App::new(viewer, &Config::default(), LogBuffer::new());
        draw(&mut app, 120, 40);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char('y'));
        settle(&mut app.viewer).await;
        assert_eq!(app.viewer.state().copied_code_id(), None);
    }

    #[tokio::test(start_paused = true)]
    async fn test_compact_drawer_toggle_and_outside_click() {
        let (mut app, _) = ready_app(&Config::default()).await;
        draw(&mut app, 80, 30);
        assert!(app.is_compact());
        assert_eq!(app.effective_focus(), FocusablePanel::Document);

        press(&mut app, KeyCode::Char('m'));
        assert!(app.viewer.state().is_mobile_menu_open());
        assert_eq!(app.effective_focus(), FocusablePanel::Sidebar);
        draw(&mut app, 80, 30);

        // Right of the drawer is outside it
        click(&mut app, 70, 10);
        assert!(!app.viewer.state().is_mobile_menu_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_compact_navigation_closes_drawer() {
        let (mut app, _) = ready_app(&Config::default()).await;
        draw(&mut app, 80, 30);
        press(&mut app, KeyCode::Char('m'));
        draw(&mut app, 80, 30);

        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.viewer.state().active_section_id(), Some("cicd-basics"));
        assert!(!app.viewer.state().is_mobile_menu_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_menu_key_ignored_in_wide_layout() {
        let (mut app, _) = ready_app(&Config::default()).await;
        draw(&mut app, 120, 40);
        press(&mut app, KeyCode::Char('m'));
        assert!(!app.viewer.state().is_mobile_menu_open());
    }

    #[tokio::test(start_paused = true)]
    async fn test_error_screen_offers_retry() {
        let (viewer, _) = mount_fake();
        let mut app = App::new(viewer, &Config::default(), LogBuffer::new());
        assert!(app.viewer.fail("network unreachable"));

        let screen = draw(&mut app, 120, 40);
        assert!(screen.contains("Failed to load documentation"));
        assert!(screen.contains("network unreachable"));
        assert!(screen.contains("Press r to retry"));
        assert!(screen.contains("ERROR"));

        press(&mut app, KeyCode::Char('r'));
        assert!(app.viewer.state().is_loading());
        let screen = draw(&mut app, 120, 40);
        assert!(screen.contains("Loading documentation"));
        assert!(!screen.contains("to retry"));
        assert!(!screen.contains("network unreachable"));

        tokio::time::sleep(Duration::from_millis(1001)).await;
        settle(&mut app.viewer).await;
        assert!(app.viewer.state().is_ready());
        let screen = draw(&mut app, 120, 40);
        assert!(!screen.contains("Loading documentation"));
        assert!(screen.contains("Sections"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_paste_extends_search_term() {
        let (mut app, _) = ready_app(&Config::default()).await;
        draw(&mut app, 120, 40);

        app.handle_paste("Hel");
        assert_eq!(app.mode, InputMode::Search);
        app.handle_paste("m");
        assert_eq!(app.viewer.state().search_term(), "Helm");
        assert_eq!(app.sidebar.selected_section().map(|s| s.id), Some("helm"));

        let screen = draw(&mut app, 120, 40);
        assert!(screen.contains("Sections (1/"));

        press(&mut app, KeyCode::Esc);
        app.handle_paste("k8s\r\nbasics");
        assert_eq!(app.viewer.state().search_term(), "k8s  basics");
    }

    #[tokio::test(start_paused = true)]
    async fn test_start_section_applied_once_ready() {
        let config = Config {
            start_section: Some("docker".to_string()),
            ..Config::default()
        };
        let (viewer, _) = mount_fake();
        let mut app = App::new(viewer, &config, LogBuffer::new());

        app.on_tick();
        assert_eq!(app.viewer.state().active_section_id(), None);

        tokio::time::sleep(Duration::from_millis(1001)).await;
        settle(&mut app.viewer).await;
        app.on_tick();
        assert_eq!(app.viewer.state().active_section_id(), Some("docker"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_ignored_while_loading() {
        let (viewer, _) = mount_fake();
        let mut app = App::new(viewer, &Config::default(), LogBuffer::new());
        press(&mut app, KeyCode::Char('/'));
        assert_eq!(app.mode, InputMode::Normal);

        press(&mut app, KeyCode::Char('q'));
        assert!(app.should_quit);
        let state = app.shutdown();
        assert!(state.is_loading());
    }
}
