//! Control types and the named control tree
//!
//! Controls are the leaf widgets a window layout declares. The tree built by
//! the window factory exposes them through name + expected-kind lookup only:
//! asking for the wrong kind is a typed error, never a cast.

mod button;
mod text_area;

pub use button::Button;
pub use text_area::TextArea;

use crate::theme::Theme;
use crate::Frame;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use std::collections::HashMap;
use std::fmt;

/// Common per-control state
#[derive(Debug, Clone, Default)]
pub struct ControlState {
    /// Position and size relative to the window content area
    pub rect: Rect,
    pub has_focus: bool,
    pub is_visible: bool,
}

impl ControlState {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            has_focus: false,
            is_visible: true,
        }
    }
}

/// Discriminant for control kinds, used in lookups and error reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    Button,
    TextArea,
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Button => write!(f, "button"),
            Self::TextArea => write!(f, "text area"),
        }
    }
}

/// Errors raised by typed control lookup
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ControlLookupError {
    #[error("no control named '{name}' in the window layout")]
    NotFound { name: String },

    #[error("control '{name}' is a {actual}, expected a {expected}")]
    TypeMismatch {
        name: String,
        expected: ControlKind,
        actual: ControlKind,
    },
}

/// A control instance, tagged by kind
pub enum Control {
    Button(Button),
    TextArea(TextArea),
}

impl Control {
    pub fn kind(&self) -> ControlKind {
        match self {
            Self::Button(_) => ControlKind::Button,
            Self::TextArea(_) => ControlKind::TextArea,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Button(button) => button.name(),
            Self::TextArea(text_area) => text_area.name(),
        }
    }

    pub fn state(&self) -> &ControlState {
        match self {
            Self::Button(button) => button.state(),
            Self::TextArea(text_area) => text_area.state(),
        }
    }

    pub fn state_mut(&mut self) -> &mut ControlState {
        match self {
            Self::Button(button) => button.state_mut(),
            Self::TextArea(text_area) => text_area.state_mut(),
        }
    }

    /// Whether the control participates in focus traversal
    pub fn is_focusable(&self) -> bool {
        matches!(self, Self::Button(_))
    }

    pub fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        match self {
            Self::Button(button) => button.handle_key_event(event),
            Self::TextArea(text_area) => text_area.handle_key_event(event),
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, theme: &Theme) {
        match self {
            Self::Button(button) => button.render(frame, area, theme),
            Self::TextArea(text_area) => text_area.render(frame, area, theme),
        }
    }
}

/// Named, insertion-ordered set of controls owned by a window
///
/// Names are unique within a tree. Lookup is always by name plus expected
/// kind; the error names the control and both kinds on a mismatch.
#[derive(Default)]
pub struct ControlTree {
    controls: Vec<Control>,
    index: HashMap<String, usize>,
    focused: Option<usize>,
}

impl ControlTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a control, rejecting duplicate names
    ///
    /// On rejection the control is handed back to the caller.
    pub fn insert(&mut self, control: Control) -> std::result::Result<(), Control> {
        if self.index.contains_key(control.name()) {
            return Err(control);
        }
        let position = self.controls.len();
        self.index.insert(control.name().to_string(), position);
        self.controls.push(control);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Control> {
        self.index.get(name).map(|&position| &self.controls[position])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Control> {
        match self.index.get(name) {
            Some(&position) => Some(&mut self.controls[position]),
            None => None,
        }
    }

    /// Look up a button by name
    pub fn button(&self, name: &str) -> std::result::Result<&Button, ControlLookupError> {
        match self.lookup(name)? {
            Control::Button(button) => Ok(button),
            other => Err(mismatch(name, ControlKind::Button, other.kind())),
        }
    }

    /// Look up a button by name, mutably
    pub fn button_mut(
        &mut self,
        name: &str,
    ) -> std::result::Result<&mut Button, ControlLookupError> {
        let kind = self.lookup(name)?.kind();
        match self.get_mut(name) {
            Some(Control::Button(button)) => Ok(button),
            _ => Err(mismatch(name, ControlKind::Button, kind)),
        }
    }

    /// Look up a text area by name
    pub fn text_area(&self, name: &str) -> std::result::Result<&TextArea, ControlLookupError> {
        match self.lookup(name)? {
            Control::TextArea(text_area) => Ok(text_area),
            other => Err(mismatch(name, ControlKind::TextArea, other.kind())),
        }
    }

    /// Look up a text area by name, mutably
    pub fn text_area_mut(
        &mut self,
        name: &str,
    ) -> std::result::Result<&mut TextArea, ControlLookupError> {
        let kind = self.lookup(name)?.kind();
        match self.get_mut(name) {
            Some(Control::TextArea(text_area)) => Ok(text_area),
            _ => Err(mismatch(name, ControlKind::TextArea, kind)),
        }
    }

    fn lookup(&self, name: &str) -> std::result::Result<&Control, ControlLookupError> {
        self.get(name).ok_or_else(|| ControlLookupError::NotFound {
            name: name.to_string(),
        })
    }

    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.controls.iter()
    }

    pub fn controls_mut(&mut self) -> impl Iterator<Item = &mut Control> {
        self.controls.iter_mut()
    }

    /// Focus the first focusable control, if any
    pub fn focus_first(&mut self) {
        let first = self.controls.iter().position(Control::is_focusable);
        self.set_focused(first);
    }

    /// Move focus to the next focusable control, wrapping around
    pub fn focus_next(&mut self) {
        self.cycle_focus(1);
    }

    /// Move focus to the previous focusable control, wrapping around
    pub fn focus_prev(&mut self) {
        self.cycle_focus(-1);
    }

    fn cycle_focus(&mut self, step: isize) {
        let count = self.controls.len() as isize;
        if count == 0 {
            return;
        }
        let start = self.focused.map(|position| position as isize).unwrap_or(-step);
        for offset in 1..=count {
            let candidate = (start + step * offset).rem_euclid(count) as usize;
            if self.controls[candidate].is_focusable() {
                self.set_focused(Some(candidate));
                return;
            }
        }
    }

    fn set_focused(&mut self, position: Option<usize>) {
        if let Some(previous) = self.focused {
            self.controls[previous].state_mut().has_focus = false;
        }
        self.focused = position;
        if let Some(current) = self.focused {
            self.controls[current].state_mut().has_focus = true;
        }
    }

    /// Currently focused control, if any
    pub fn focused(&self) -> Option<&Control> {
        self.focused.map(|position| &self.controls[position])
    }

    /// Currently focused control, mutably
    pub fn focused_mut(&mut self) -> Option<&mut Control> {
        match self.focused {
            Some(position) => Some(&mut self.controls[position]),
            None => None,
        }
    }
}

fn mismatch(name: &str, expected: ControlKind, actual: ControlKind) -> ControlLookupError {
    ControlLookupError::TypeMismatch {
        name: name.to_string(),
        expected,
        actual,
    }
}
