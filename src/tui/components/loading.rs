// Load phase placeholder
//
// Rendered in place of the document until the viewer is ready: a spinner
// while loading, or the error message with the retry action.

use crate::tui::traits::RenderContext;
use crate::viewer::LoadPhase;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let theme = ctx.theme;
    let lines = match ctx.state.load_phase() {
        LoadPhase::Error(message) => vec![
            Line::from(Span::styled(
                "⚠ Failed to load documentation",
                Style::default()
                    .fg(theme.error)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(message.clone(), Style::default().fg(theme.fg))),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(theme.muted)),
                Span::styled(
                    "r",
                    Style::default()
                        .fg(theme.border_focused)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to retry", Style::default().fg(theme.muted)),
            ]),
        ],
        _ => vec![Line::from(vec![
            Span::styled(
                format!("{} ", ctx.spinner_char()),
                Style::default().fg(theme.spinner),
            ),
            Span::styled("Loading documentation…", Style::default().fg(theme.fg)),
        ])],
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(theme.border_type)
        .border_style(theme.border_style(false));
    let inner = block.inner(area);
    f.render_widget(block, area);

    // Vertically center the message
    let height = lines.len() as u16;
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let paragraph = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(paragraph, middle);
}
