// Search bar component
//
// Shows the live search term above the section list. Typing while search
// mode is active updates the term on every keystroke.

use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of the search box including borders
pub const HEIGHT: u16 = 3;

pub fn render(f: &mut Frame, area: Rect, term: &str, active: bool, theme: &Theme) {
    let line = if term.is_empty() && !active {
        Line::from(Span::styled(
            "press / to search",
            Style::default()
                .fg(theme.muted)
                .add_modifier(Modifier::ITALIC),
        ))
    } else {
        let mut spans = vec![Span::styled(term.to_string(), Style::default().fg(theme.fg))];
        if active {
            spans.push(Span::styled("▏", Style::default().fg(theme.border_focused)));
        }
        Line::from(spans)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style(active))
        .title(" 🔍 Search ");

    f.render_widget(Paragraph::new(line).block(block), area);
}
