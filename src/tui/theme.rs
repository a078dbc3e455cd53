// Theme system for the TUI
//
// Two built-in themes, selected by name from config and switchable at
// runtime with 't'.

use crate::logging::LogEntry;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;
use tracing::Level;

/// Available themes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeKind {
    #[default]
    Dark,
    Light,
}

impl ThemeKind {
    /// Parse a config name; unknown names fall back to dark
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "light" => ThemeKind::Light,
            _ => ThemeKind::Dark,
        }
    }

    pub fn next(self) -> Self {
        match self {
            ThemeKind::Dark => ThemeKind::Light,
            ThemeKind::Light => ThemeKind::Dark,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ThemeKind::Dark => "dark",
            ThemeKind::Light => "light",
        }
    }

    pub fn theme(&self) -> Theme {
        match self {
            ThemeKind::Dark => Theme::dark(),
            ThemeKind::Light => Theme::light(),
        }
    }
}

/// Resolved colors for every UI element
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub border: Color,
    pub border_focused: Color,
    pub border_type: BorderType,

    // Title and status
    pub title: Color,
    pub status_bar: Color,

    // Sidebar
    pub selected_bg: Color,
    pub selected_fg: Color,
    pub active: Color,
    pub match_fg: Color,
    pub match_bg: Color,

    // Document
    pub heading: Color,
    pub strong: Color,
    pub code_inline: Color,
    pub code_block: Color,
    pub code_border: Color,
    pub copied: Color,

    // Load phase
    pub spinner: Color,
    pub error: Color,

    // Log levels
    pub log_error: Color,
    pub log_warn: Color,
    pub log_info: Color,
    pub log_debug: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Dark theme (default)
    pub fn dark() -> Self {
        Self {
            bg: Color::Reset,
            fg: Color::White,
            muted: Color::DarkGray,
            border: Color::Gray,
            border_focused: Color::Cyan,
            border_type: BorderType::Rounded,

            title: Color::Cyan,
            status_bar: Color::Green,

            selected_bg: Color::DarkGray,
            selected_fg: Color::Yellow,
            active: Color::Cyan,
            match_fg: Color::Black,
            match_bg: Color::Yellow,

            heading: Color::LightCyan,
            strong: Color::White,
            code_inline: Color::LightYellow,
            code_block: Color::LightGreen,
            code_border: Color::DarkGray,
            copied: Color::Green,

            spinner: Color::Cyan,
            error: Color::Red,

            log_error: Color::Red,
            log_warn: Color::Yellow,
            log_info: Color::Blue,
            log_debug: Color::Gray,
        }
    }

    /// Light theme
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            muted: Color::Gray,
            border: Color::DarkGray,
            border_focused: Color::Blue,
            border_type: BorderType::Plain,

            title: Color::Blue,
            status_bar: Color::DarkGray,

            selected_bg: Color::LightBlue,
            selected_fg: Color::Black,
            active: Color::Blue,
            match_fg: Color::Black,
            match_bg: Color::Rgb(255, 221, 87),

            heading: Color::Blue,
            strong: Color::Black,
            code_inline: Color::Rgb(184, 134, 11), // Dark goldenrod
            code_block: Color::Rgb(0, 110, 0),
            code_border: Color::Gray,
            copied: Color::Green,

            spinner: Color::Blue,
            error: Color::Red,

            log_error: Color::Red,
            log_warn: Color::Rgb(184, 134, 11),
            log_info: Color::Blue,
            log_debug: Color::DarkGray,
        }
    }

    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }

    /// Search-match highlight inside sidebar titles
    pub fn match_style(&self) -> Style {
        Style::default()
            .fg(self.match_fg)
            .bg(self.match_bg)
            .add_modifier(Modifier::BOLD)
    }

    pub fn log_style(&self, entry: &LogEntry) -> Style {
        let color = match entry.level {
            Level::ERROR => self.log_error,
            Level::WARN => self.log_warn,
            Level::INFO => self.log_info,
            _ => self.log_debug,
        };
        Style::default().fg(color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_name() {
        assert_eq!(ThemeKind::from_name("light"), ThemeKind::Light);
        assert_eq!(ThemeKind::from_name(" Light "), ThemeKind::Light);
        assert_eq!(ThemeKind::from_name("solarized"), ThemeKind::Dark);
    }

    #[test]
    fn test_next_cycles() {
        assert_eq!(ThemeKind::Dark.next().next(), ThemeKind::Dark);
    }
}
