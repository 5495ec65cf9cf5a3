//! Read-only wrapped text control

use super::ControlState;
use crate::theme::Theme;
use crate::Frame;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use ratatui::widgets::{Paragraph, Wrap};

pub struct TextArea {
    name: String,
    text: String,
    state: ControlState,
}

impl TextArea {
    pub fn new(name: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            text: String::new(),
            state: ControlState::new(rect),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    pub fn handle_key_event(&mut self, _event: KeyEvent) -> Result<()> {
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.state.is_visible {
            return;
        }

        let widget = Paragraph::new(self.text.clone())
            .style(theme.text_style())
            .wrap(Wrap { trim: true });

        frame.render_widget(widget, area);
    }
}
