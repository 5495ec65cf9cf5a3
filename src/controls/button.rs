//! Push button control
//!
//! A button carries an ordered list of press handlers. Behavior injection
//! registers explicit closures here; pressing the button (Enter/Space while
//! focused, or a programmatic [`Button::press`]) invokes every handler in
//! registration order, synchronously.

use super::ControlState;
use crate::theme::Theme;
use crate::Frame;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::{Alignment, Rect};
use ratatui::widgets::Paragraph;
use tracing::trace;

type PressHandler = Box<dyn FnMut()>;

pub struct Button {
    name: String,
    label: String,
    state: ControlState,
    press_handlers: Vec<PressHandler>,
}

impl std::fmt::Debug for Button {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Button")
            .field("name", &self.name)
            .field("label", &self.label)
            .field("state", &self.state)
            .field("handler_count", &self.press_handlers.len())
            .finish()
    }
}

impl Button {
    pub fn new(name: impl Into<String>, label: impl Into<String>, rect: Rect) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            state: ControlState::new(rect),
            press_handlers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn state(&self) -> &ControlState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut ControlState {
        &mut self.state
    }

    /// Register a press handler; handlers run in registration order
    pub fn on_press(&mut self, handler: impl FnMut() + 'static) {
        self.press_handlers.push(Box::new(handler));
    }

    /// Number of registered press handlers
    pub fn handler_count(&self) -> usize {
        self.press_handlers.len()
    }

    /// Fire the press handlers
    pub fn press(&mut self) {
        trace!(button = %self.name, "button pressed");
        for handler in &mut self.press_handlers {
            handler();
        }
    }

    pub fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        match event.code {
            KeyCode::Enter | KeyCode::Char(' ') => self.press(),
            _ => {}
        }
        Ok(())
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        if !self.state.is_visible {
            return;
        }

        let style = if self.state.has_focus {
            theme.focused_control_style()
        } else {
            theme.control_style()
        };

        let widget = Paragraph::new(format!(" {} ", self.label))
            .style(style)
            .alignment(Alignment::Center);

        frame.render_widget(widget, area);
    }
}
