//! Windows
//!
//! A window owns the control tree built from its layout, plus the attributes
//! the window manager steers: origin, visibility, and the top-most flag.
//! Windows are constructed by the window factory and owned by the window
//! manager for their registered lifetime; dropping a window tears down its
//! control tree with it.

use crate::controls::ControlTree;
use crate::theme::Theme;
use crate::Frame;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::widgets::{Block, Borders, Clear};
use serde::{Deserialize, Serialize};

/// Screen position in terminal cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

pub struct Window {
    title: Option<String>,
    origin: Point,
    width: u16,
    height: u16,
    visible: bool,
    top_most: bool,
    tree: ControlTree,
}

impl std::fmt::Debug for Window {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Window")
            .field("title", &self.title)
            .field("origin", &self.origin)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("visible", &self.visible)
            .field("top_most", &self.top_most)
            .field("controls", &self.tree.len())
            .finish()
    }
}

impl Window {
    pub fn new(title: Option<String>, width: u16, height: u16, tree: ControlTree) -> Self {
        Self {
            title,
            origin: Point::default(),
            width,
            height,
            visible: true,
            top_most: false,
            tree,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Window area in screen coordinates
    pub fn area(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.width, self.height)
    }

    pub fn location(&self) -> Point {
        self.origin
    }

    pub fn set_location(&mut self, location: Point) {
        self.origin = location;
    }

    /// Center the window inside `bounds`
    pub fn center(&mut self, bounds: Rect) {
        self.origin = Point::new(
            bounds.x + bounds.width.saturating_sub(self.width) / 2,
            bounds.y + bounds.height.saturating_sub(self.height) / 2,
        );
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn is_top_most(&self) -> bool {
        self.top_most
    }

    pub fn set_top_most(&mut self, top_most: bool) {
        self.top_most = top_most;
    }

    pub fn tree(&self) -> &ControlTree {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut ControlTree {
        &mut self.tree
    }

    /// Route a key event: Tab cycles control focus, everything else goes to
    /// the focused control
    pub fn handle_key_event(&mut self, event: KeyEvent) -> Result<()> {
        match event.code {
            KeyCode::Tab => {
                self.tree.focus_next();
                Ok(())
            }
            KeyCode::BackTab => {
                self.tree.focus_prev();
                Ok(())
            }
            _ => match self.tree.focused_mut() {
                Some(control) => control.handle_key_event(event),
                None => Ok(()),
            },
        }
    }

    /// Render chrome and controls, clamped to `bounds`
    pub fn render(&mut self, frame: &mut Frame, bounds: Rect, theme: &Theme) {
        if !self.visible {
            return;
        }

        let area = self.area().intersection(bounds);
        if area.width == 0 || area.height == 0 {
            return;
        }

        frame.render_widget(Clear, area);

        let mut block = Block::default()
            .borders(Borders::ALL)
            .style(Style::default().bg(theme.surface))
            .border_style(theme.chrome_style());
        if let Some(title) = &self.title {
            block = block.title(title.clone());
        }
        frame.render_widget(block, area);

        let content = Rect {
            x: area.x + 1,
            y: area.y + 1,
            width: area.width.saturating_sub(2),
            height: area.height.saturating_sub(2),
        };

        for control in self.tree.controls_mut() {
            let rect = control.state().rect;
            let control_area = Rect {
                x: content.x.saturating_add(rect.x),
                y: content.y.saturating_add(rect.y),
                width: rect.width,
                height: rect.height,
            }
            .intersection(content);

            if control_area.width > 0 && control_area.height > 0 {
                control.render(frame, control_area, theme);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controls::{Button, Control, TextArea};
    use std::cell::Cell;
    use std::rc::Rc;

    fn window() -> Window {
        let mut tree = ControlTree::new();
        tree.insert(Control::TextArea(TextArea::new(
            "txt_message",
            Rect::new(1, 1, 20, 2),
        )))
        .ok()
        .unwrap();
        tree.insert(Control::Button(Button::new(
            "btn_okay",
            "Okay",
            Rect::new(8, 4, 8, 1),
        )))
        .ok()
        .unwrap();
        tree.focus_first();
        Window::new(Some("Test".to_string()), 30, 8, tree)
    }

    #[test]
    fn test_center_within_bounds() {
        let mut window = window();
        window.center(Rect::new(0, 0, 80, 24));
        assert_eq!(window.location(), Point::new(25, 8));
        assert_eq!(window.area(), Rect::new(25, 8, 30, 8));
    }

    #[test]
    fn test_location_round_trips() {
        let mut window = window();
        window.set_location(Point::new(3, 4));
        assert_eq!(window.location(), Point::new(3, 4));
    }

    #[test]
    fn test_enter_presses_focused_button() {
        let mut window = window();
        let count = Rc::new(Cell::new(0u32));
        {
            let count = Rc::clone(&count);
            window
                .tree_mut()
                .button_mut("btn_okay")
                .unwrap()
                .on_press(move || count.set(count.get() + 1));
        }

        window.handle_key_event(KeyEvent::from(KeyCode::Enter)).unwrap();
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_render_clamps_to_bounds() {
        let mut window = window();
        window.set_location(Point::new(70, 20));

        let backend = ratatui::backend::TestBackend::new(80, 24);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        let theme = Theme::default();

        // Window extends past the screen edge; rendering must not panic.
        terminal
            .draw(|frame| {
                let bounds = frame.size();
                window.render(frame, bounds, &theme);
            })
            .unwrap();
    }
}
