//! Document panel
//!
//! Renders every parsed section as one long scrollable page. Layout happens
//! once per width: blocks are word-wrapped into lines and each section's
//! first line is recorded as its anchor. Navigation eases the scroll offset
//! toward an anchor over several ticks.
//!
//! Code blocks can be focused with `n`/`N`; `y` copies the focused block, or
//! the first one on screen when none is focused. A block whose id is the
//! viewer's `copied_code_id` shows "✓ Copied" in its header.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::content::{Block, DocumentContent, Inline};
use crate::tui::scroll::ScrollState;
use crate::tui::theme::Theme;
use crate::tui::traits::{
    Component, ComponentId, Copyable, Handled, Interactive, RenderContext, Scrollable,
};
use crate::viewer::ScrollTarget;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{self, Borders, Paragraph},
    Frame,
};
use std::collections::HashMap;
use unicode_width::UnicodeWidthStr;

/// Width used before the first render reports the real one
const DEFAULT_WIDTH: u16 = 80;

/// Lines kept above a focused code block when scrolling to it
const CODE_FOCUS_MARGIN: usize = 2;

/// Semantic style of a run of text, resolved against the theme at render
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Text,
    Strong,
    InlineCode,
    Heading,
    SectionTitle,
    Code,
    Muted,
}

impl Tone {
    fn style(self, theme: &Theme) -> Style {
        match self {
            Tone::Text => Style::default().fg(theme.fg),
            Tone::Strong => Style::default()
                .fg(theme.strong)
                .add_modifier(Modifier::BOLD),
            Tone::InlineCode => Style::default().fg(theme.code_inline),
            Tone::Heading => Style::default()
                .fg(theme.heading)
                .add_modifier(Modifier::BOLD),
            Tone::SectionTitle => Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            Tone::Code => Style::default().fg(theme.code_block),
            Tone::Muted => Style::default().fg(theme.code_border),
        }
    }
}

#[derive(Debug, Clone, Default)]
struct DocLine {
    spans: Vec<(String, Tone)>,
    /// Header line of this code block; the copy label is added at render
    code_header: Option<String>,
    /// Body line of this code block
    code_body: Option<String>,
}

impl DocLine {
    fn text(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            spans: vec![(text.into(), tone)],
            ..Self::default()
        }
    }

    fn blank() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone)]
struct CodeAnchor {
    id: String,
    header_line: usize,
}

pub struct DocumentPanel {
    scroll: ScrollState,
    lines: Vec<DocLine>,
    /// Section id -> first line of the section
    anchors: HashMap<String, usize>,
    /// Code blocks in document order
    code_blocks: Vec<CodeAnchor>,
    focused_code: Option<usize>,
    width: u16,
    /// Last navigation target, re-applied if a relayout moves it mid-scroll
    last_anchor: Option<String>,
}

impl DocumentPanel {
    pub fn new(content: &DocumentContent) -> Self {
        let mut panel = Self {
            scroll: ScrollState::new(),
            lines: Vec::new(),
            anchors: HashMap::new(),
            code_blocks: Vec::new(),
            focused_code: None,
            width: 0,
            last_anchor: None,
        };
        panel.relayout(content, DEFAULT_WIDTH);
        panel
    }

    /// Inner text width for a panel area (borders and scrollbar excluded)
    pub fn text_width(area: Rect) -> u16 {
        area.width.saturating_sub(3)
    }

    /// Rebuild lines and anchors for a new width
    pub fn relayout(&mut self, content: &DocumentContent, width: u16) {
        let width = width.max(20);
        if width == self.width && !self.lines.is_empty() {
            return;
        }
        self.width = width;
        self.lines.clear();
        self.anchors.clear();
        self.code_blocks.clear();

        let text_width = width as usize;
        for parsed in &content.sections {
            self.anchors
                .insert(parsed.section.id.to_string(), self.lines.len());
            self.lines.push(DocLine::text(
                format!("{} {}", parsed.section.icon, parsed.section.title),
                Tone::SectionTitle,
            ));
            self.lines.push(DocLine::blank());

            for block in &parsed.blocks {
                self.push_block(block, text_width);
            }
            self.lines.push(DocLine::blank());
        }

        if let Some(idx) = self.focused_code {
            if idx >= self.code_blocks.len() {
                self.focused_code = None;
            }
        }
        self.scroll
            .update_dimensions(self.lines.len(), self.scroll.viewport());
        if self.scroll.is_animating() {
            if let Some(anchor) = self.last_anchor.clone() {
                self.scroll_into_view(&anchor);
            }
        }
        tracing::trace!(width, lines = self.lines.len(), "Document laid out");
    }

    fn push_block(&mut self, block: &Block, width: usize) {
        match block {
            Block::Heading { level, text } => {
                let marker = if *level <= 2 { "▌ " } else { "▸ " };
                let spans = vec![(text.clone(), Tone::Heading)];
                self.push_wrapped(&spans, width, marker, "  ");
                self.lines.push(DocLine::blank());
            }
            Block::Paragraph(inlines) => {
                self.push_wrapped(&tone_inlines(inlines), width, "", "");
                self.lines.push(DocLine::blank());
            }
            Block::Bullet { number, spans } => {
                let marker = match number {
                    Some(n) => format!("  {}. ", n),
                    None => "  • ".to_string(),
                };
                let indent = " ".repeat(marker.width());
                self.push_wrapped(&tone_inlines(spans), width, &marker, &indent);
            }
            Block::Code(code) => {
                self.code_blocks.push(CodeAnchor {
                    id: code.id.clone(),
                    header_line: self.lines.len(),
                });
                let lang = code.lang.as_deref().unwrap_or("text");
                self.lines.push(DocLine {
                    spans: vec![(format!("┌─ {} ", lang), Tone::Muted)],
                    code_header: Some(code.id.clone()),
                    code_body: None,
                });
                for line in code.code.lines() {
                    self.lines.push(DocLine {
                        spans: vec![
                            ("│ ".to_string(), Tone::Muted),
                            (line.to_string(), Tone::Code),
                        ],
                        code_header: None,
                        code_body: Some(code.id.clone()),
                    });
                }
                self.lines.push(DocLine::text("└─", Tone::Muted));
                self.lines.push(DocLine::blank());
            }
        }
    }

    fn push_wrapped(&mut self, spans: &[(String, Tone)], width: usize, first: &str, rest: &str) {
        for spans in wrap(spans, width, first, rest) {
            self.lines.push(DocLine {
                spans,
                ..DocLine::default()
            });
        }
    }

    /// Advance any smooth scroll in progress
    pub fn tick(&mut self) -> bool {
        self.scroll.tick()
    }

    /// Sync viewport height before rendering
    pub fn sync(&mut self, viewport: usize) {
        self.scroll.update_dimensions(self.lines.len(), viewport);
    }

    pub fn anchor_line(&self, id: &str) -> Option<usize> {
        self.anchors.get(id).copied()
    }

    pub fn focused_code_id(&self) -> Option<&str> {
        self.focused_code
            .and_then(|idx| self.code_blocks.get(idx))
            .map(|c| c.id.as_str())
    }

    /// Move code focus one block and bring it into view
    fn focus_code(&mut self, forward: bool) {
        if self.code_blocks.is_empty() {
            return;
        }
        let next = match self.focused_code {
            Some(idx) if forward => (idx + 1).min(self.code_blocks.len() - 1),
            Some(idx) => idx.saturating_sub(1),
            None => {
                // Start from whatever is on screen
                let top = self.scroll.offset();
                let first_visible = self
                    .code_blocks
                    .iter()
                    .position(|c| c.header_line >= top)
                    .unwrap_or(self.code_blocks.len() - 1);
                if forward {
                    first_visible
                } else {
                    first_visible.saturating_sub(1)
                }
            }
        };
        self.focused_code = Some(next);
        let line = self.code_blocks[next].header_line;
        self.scroll
            .smooth_scroll_to(line.saturating_sub(CODE_FOCUS_MARGIN));
    }

    /// First code block whose header is inside the viewport
    fn first_visible_code(&self) -> Option<&str> {
        let (start, end) = self.scroll.visible_range();
        self.code_blocks
            .iter()
            .find(|c| c.header_line >= start && c.header_line < end)
            .map(|c| c.id.as_str())
    }

    fn render_line(&self, line: &DocLine, ctx: &RenderContext) -> Line<'static> {
        let theme = ctx.theme;
        let focused = self.focused_code_id();
        let in_focus = |id: &Option<String>| id.is_some() && id.as_deref() == focused;

        let mut spans: Vec<Span<'static>> = line
            .spans
            .iter()
            .map(|(text, tone)| {
                let mut style = tone.style(theme);
                if *tone == Tone::Muted
                    && (in_focus(&line.code_header) || in_focus(&line.code_body))
                {
                    style = style.fg(theme.border_focused);
                }
                Span::styled(text.clone(), style)
            })
            .collect();

        if let Some(id) = &line.code_header {
            if ctx.state.is_copied(id) {
                spans.push(Span::styled(
                    "✓ Copied",
                    Style::default()
                        .fg(theme.copied)
                        .add_modifier(Modifier::BOLD),
                ));
            } else if in_focus(&line.code_header) {
                spans.push(Span::styled("[y] copy", Style::default().fg(theme.muted)));
            }
        }

        Line::from(spans)
    }
}

/// Flatten inline runs into toned spans
fn tone_inlines(inlines: &[Inline]) -> Vec<(String, Tone)> {
    inlines
        .iter()
        .map(|inline| match inline {
            Inline::Text(s) => (s.clone(), Tone::Text),
            Inline::Strong(s) => (s.clone(), Tone::Strong),
            Inline::Code(s) => (s.clone(), Tone::InlineCode),
        })
        .collect()
}

/// Split text into words that carry their trailing whitespace
fn words(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0;
    let mut prev_space = false;
    for (i, c) in text.char_indices() {
        if prev_space && !c.is_whitespace() {
            out.push(&text[start..i]);
            start = i;
        }
        prev_space = c.is_whitespace();
    }
    if start < text.len() {
        out.push(&text[start..]);
    }
    out
}

fn push_span(line: &mut Vec<(String, Tone)>, text: &str, tone: Tone) {
    match line.last_mut() {
        Some((last, last_tone)) if *last_tone == tone => last.push_str(text),
        _ => line.push((text.to_string(), tone)),
    }
}

/// Greedy word wrap over styled spans
///
/// `first` prefixes the first line and `rest` every continuation line.
/// Words wider than the line are left whole and get clipped on render.
fn wrap(
    spans: &[(String, Tone)],
    width: usize,
    first: &str,
    rest: &str,
) -> Vec<Vec<(String, Tone)>> {
    let mut lines = Vec::new();
    let mut current: Vec<(String, Tone)> = Vec::new();
    if !first.is_empty() {
        current.push((first.to_string(), Tone::Muted));
    }
    let mut used = first.width();
    let mut has_words = false;

    for (text, tone) in spans {
        for word in words(text) {
            let visible = word.trim_end().width();
            if has_words && used + visible > width {
                lines.push(std::mem::take(&mut current));
                if !rest.is_empty() {
                    current.push((rest.to_string(), Tone::Muted));
                }
                used = rest.width();
                has_words = false;
            }
            let word = if has_words { word } else { word.trim_start() };
            if word.is_empty() {
                continue;
            }
            push_span(&mut current, word, *tone);
            used += word.width();
            has_words = true;
        }
    }

    if has_words {
        lines.push(current);
    }
    lines
}

impl ScrollTarget for DocumentPanel {
    fn scroll_into_view(&mut self, anchor: &str) -> bool {
        let Some(line) = self.anchor_line(anchor) else {
            return false;
        };
        self.last_anchor = Some(anchor.to_string());
        self.scroll.smooth_scroll_to(line);
        true
    }
}

impl Component for DocumentPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Document
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let block = widgets::Block::default()
            .borders(Borders::ALL)
            .border_type(theme.border_type)
            .border_style(theme.border_style(ctx.is_focused(self.id())))
            .style(Style::default().bg(theme.bg))
            .title(" Documentation ");

        let (start, end) = self.scroll.visible_range();
        let lines: Vec<Line> = self
            .lines
            .get(start..end)
            .unwrap_or_default()
            .iter()
            .map(|line| self.render_line(line, ctx))
            .collect();

        f.render_widget(Paragraph::new(lines).block(block), area);
        render_scrollbar(
            f,
            area,
            self.scroll_state(),
            ScrollbarStyle::Arrows,
            Style::default().fg(theme.border_focused),
        );
    }
}

impl Scrollable for DocumentPanel {
    fn scroll_state(&self) -> &ScrollState {
        &self.scroll
    }

    fn scroll_state_mut(&mut self) -> &mut ScrollState {
        &mut self.scroll
    }
}

impl Copyable for DocumentPanel {
    fn copy_target(&self) -> Option<&str> {
        self.focused_code_id().or_else(|| self.first_visible_code())
    }
}

impl Interactive for DocumentPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll_down(),
            KeyCode::PageUp => self.page_up(),
            KeyCode::PageDown | KeyCode::Char(' ') => self.page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll_to_bottom(),
            KeyCode::Char('n') => self.focus_code(true),
            KeyCode::Char('N') | KeyCode::Char('p') => self.focus_code(false),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓ scroll  n/N code block  y copy")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn panel() -> DocumentPanel {
        let mut panel = DocumentPanel::new(&DocumentContent::load());
        panel.sync(20);
        panel
    }

    fn plain(spans: &[(String, Tone)]) -> String {
        spans.iter().map(|(s, _)| s.as_str()).collect()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_every_section_has_anchor_in_order() {
        let content = DocumentContent::load();
        let panel = DocumentPanel::new(&content);
        let lines: Vec<usize> = content
            .sections
            .iter()
            .map(|s| panel.anchor_line(s.section.id).unwrap())
            .collect();
        assert_eq!(lines[0], 0);
        assert!(lines.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_scroll_into_view_eases_to_anchor() {
        let mut panel = panel();
        let target = panel.anchor_line("helm").unwrap();
        assert!(panel.scroll_into_view("helm"));

        let mut ticks = 0;
        while panel.tick() {
            ticks += 1;
        }
        assert!(ticks > 0);
        assert_eq!(panel.scroll_state().offset(), target);
    }

    #[test]
    fn test_unknown_anchor_is_rejected() {
        let mut panel = panel();
        assert!(!panel.scroll_into_view("nope"));
        assert!(!panel.scroll_state().is_animating());
    }

    #[test]
    fn test_code_focus_and_copy_target() {
        let mut panel = panel();
        assert_eq!(panel.focused_code_id(), None);

        panel.handle_key(key(KeyCode::Char('n')));
        let first = panel.focused_code_id().map(str::to_string);
        assert!(first.is_some());
        assert_eq!(panel.copy_target(), first.as_deref());

        panel.handle_key(key(KeyCode::Char('n')));
        assert_ne!(panel.focused_code_id().map(str::to_string), first);

        panel.handle_key(key(KeyCode::Char('N')));
        assert_eq!(panel.focused_code_id().map(str::to_string), first);
    }

    #[test]
    fn test_copy_target_falls_back_to_visible_block() {
        let mut panel = panel();
        let k8s = panel.anchor_line("k8s-basics").unwrap();
        panel.scroll_into_view("k8s-basics");
        while panel.tick() {}
        assert_eq!(panel.scroll_state().offset(), k8s);
        assert_eq!(panel.copy_target(), Some("k8s-basics-1"));
    }

    #[test]
    fn test_relayout_keeps_anchors_valid() {
        let content = DocumentContent::load();
        let mut panel = DocumentPanel::new(&content);
        let wide = panel.anchor_line("troubleshooting").unwrap();
        panel.relayout(&content, 30);
        let narrow = panel.anchor_line("troubleshooting").unwrap();
        assert!(narrow >= wide, "narrower text wraps onto more lines");
    }

    #[test]
    fn test_wrap_respects_width() {
        let spans = vec![
            ("alpha beta ".to_string(), Tone::Text),
            ("gamma".to_string(), Tone::Strong),
            (" delta epsilon".to_string(), Tone::Text),
        ];
        let lines = wrap(&spans, 12, "", "");
        let text: Vec<String> = lines.iter().map(|l| plain(l)).collect();
        assert_eq!(text, vec!["alpha beta ", "gamma delta ", "epsilon"]);
        assert!(text.iter().all(|l| l.trim_end().width() <= 12));
    }

    #[test]
    fn test_wrap_hanging_indent() {
        let spans = vec![("one two three four".to_string(), Tone::Text)];
        let lines = wrap(&spans, 10, "  • ", "    ");
        let text: Vec<String> = lines.iter().map(|l| plain(l)).collect();
        assert_eq!(text, vec!["  • one ", "    two ", "    three ", "    four"]);
    }

    #[test]
    fn test_words_keep_trailing_space() {
        assert_eq!(words("a  b c"), vec!["a  ", "b ", "c"]);
        assert_eq!(words("  lead"), vec!["  ", "lead"]);
    }
}
