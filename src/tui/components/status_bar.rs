// Status bar component
//
// Mode, keybind hints for the focused panel, and global keys. Narrow
// terminals get the short form.

use crate::tui::app::{App, InputMode};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let compact = app.is_compact();

    let (mode, hint) = match app.mode {
        InputMode::Search => ("SEARCH", "type to filter  Enter keep  Esc clear"),
        InputMode::Normal if !app.viewer.state().is_ready() => {
            if app.viewer.state().loading_error().is_some() {
                ("ERROR", "r retry")
            } else {
                ("LOADING", "")
            }
        }
        InputMode::Normal => ("NORMAL", app.focus_hint()),
    };

    let globals = if compact {
        " │ m menu  q quit"
    } else {
        " │ / search  Tab focus  L logs  t theme  q quit"
    };

    let mut spans = vec![
        Span::styled(
            format!(" {} ", mode),
            Style::default()
                .fg(theme.status_bar)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(hint.to_string(), Style::default().fg(theme.fg)),
        Span::styled(globals, Style::default().fg(theme.muted)),
    ];
    if app.viewer.pending_copies() > 0 {
        spans.push(Span::styled(
            format!(" │ {} copying", app.spinner_char()),
            Style::default().fg(theme.spinner),
        ));
    }
    if let Some(code_id) = app.viewer.state().copied_code_id() {
        spans.push(Span::styled(
            format!(" │ ✓ copied {}", code_id),
            Style::default().fg(theme.copied),
        ));
    }
    let line = Line::from(spans);

    f.render_widget(Paragraph::new(line), area);
}
