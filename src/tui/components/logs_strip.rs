// Logs strip component
//
// The most recent entries from the in-memory log buffer, toggled with 'L'.

use crate::logging::LogBuffer;
use crate::tui::theme::Theme;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn render(f: &mut Frame, area: Rect, buffer: &LogBuffer, theme: &Theme) {
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(theme.border))
        .title(format!(" Logs ({}) ", buffer.len()));
    let inner = block.inner(area);

    let lines: Vec<Line> = buffer
        .recent(inner.height as usize)
        .iter()
        .map(|entry| {
            Line::from(Span::styled(entry.format_line(), theme.log_style(entry)))
        })
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}
