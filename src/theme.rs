//! Visual styling for windows and controls
//!
//! A trimmed-down semantic palette: every render method takes a `&Theme`
//! rather than hard-coding colors, so embedding applications can restyle the
//! toolkit wholesale.

use ratatui::style::{Color, Modifier, Style};

/// Semantic color palette consumed by window chrome and controls
#[derive(Debug, Clone)]
pub struct Theme {
    pub name: String,

    // Foreground colors
    pub text: Color,
    pub text_muted: Color,

    // Border colors
    pub border: Color,
    pub border_focus: Color,

    // Surfaces and accents
    pub surface: Color,
    pub primary: Color,
    pub error: Color,
}

impl Theme {
    /// Default dark palette
    pub fn dark() -> Self {
        Self {
            name: "dark".to_string(),
            text: Color::White,
            text_muted: Color::DarkGray,
            border: Color::Gray,
            border_focus: Color::Cyan,
            surface: Color::Black,
            primary: Color::Blue,
            error: Color::Red,
        }
    }

    /// Style for window borders and titles
    pub fn chrome_style(&self) -> Style {
        Style::default().fg(self.border)
    }

    /// Style for body text
    pub fn text_style(&self) -> Style {
        Style::default().fg(self.text)
    }

    /// Style for the focused interactive control
    pub fn focused_control_style(&self) -> Style {
        Style::default()
            .bg(self.primary)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    }

    /// Style for unfocused interactive controls
    pub fn control_style(&self) -> Style {
        Style::default().bg(self.surface).fg(self.text)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}
