// Title bar component
//
// App name plus the active section, if any.

use crate::content::registry;
use crate::tui::app::App;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let mut spans = vec![Span::styled(
        " 📚 shipdocs",
        Style::default()
            .fg(theme.title)
            .add_modifier(Modifier::BOLD),
    )];

    if let Some(section) = app
        .viewer
        .state()
        .active_section_id()
        .and_then(registry::find)
    {
        spans.push(Span::styled(" ──── ", Style::default().fg(theme.muted)));
        spans.push(Span::styled(
            format!("{} {}", section.icon, section.title),
            Style::default().fg(theme.fg),
        ));
    }

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}
