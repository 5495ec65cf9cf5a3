//! Window manager
//!
//! Tracks registered windows in stacking order and owns them for their
//! registered lifetime. The manager is a cheap-clone facade over shared
//! state, so a dialog factory and the handles it returns can both reach the
//! same tracked set.
//!
//! Rendering draws bottom to top, with top-most windows above the rest.
//! Key events go to the top visible window. During dispatch the target
//! window is detached from the tracked set while its handlers run, so a
//! handler — or an observer it notifies — may remove that window through
//! its handle without corrupting the manager's bookkeeping.

use crate::theme::Theme;
use crate::window::{Point, Window};
use crate::Frame;
use anyhow::Result;
use crossterm::event::KeyEvent;
use ratatui::layout::Rect;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, warn};

/// Identifier assigned to a window at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(u64);

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}

struct ManagerInner {
    /// Stacking order, bottom to top; this is the liveness record
    stack: Vec<WindowId>,
    windows: HashMap<WindowId, Window>,
    /// Screen bounds used for centering and rendering
    bounds: Rect,
    next_id: u64,
}

impl ManagerInner {
    /// Ids in draw order: the stack, with top-most windows lifted above it
    fn render_order(&self) -> Vec<WindowId> {
        let mut order: Vec<WindowId> = self
            .stack
            .iter()
            .copied()
            .filter(|id| self.windows.get(id).is_some_and(|w| !w.is_top_most()))
            .collect();
        order.extend(
            self.stack
                .iter()
                .copied()
                .filter(|id| self.windows.get(id).is_some_and(|w| w.is_top_most())),
        );
        order
    }

    fn top_visible_id(&self) -> Option<WindowId> {
        self.render_order()
            .into_iter()
            .rev()
            .find(|id| self.windows.get(id).is_some_and(|w| w.is_visible()))
    }
}

#[derive(Clone)]
pub struct WindowManager {
    inner: Rc<RefCell<ManagerInner>>,
}

impl WindowManager {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ManagerInner {
                stack: Vec::new(),
                windows: HashMap::new(),
                bounds: Rect::new(0, 0, 80, 24),
                next_id: 0,
            })),
        }
    }

    /// Register a window; it joins the top of the stack
    pub fn add_window(&self, window: Window) -> WindowId {
        let mut inner = self.inner.borrow_mut();
        let id = WindowId(inner.next_id);
        inner.next_id += 1;
        inner.stack.push(id);
        inner.windows.insert(id, window);
        debug!(%id, count = inner.stack.len(), "window registered");
        id
    }

    /// Remove a window, dropping it and its control tree
    ///
    /// Idempotent: returns false when the id is not tracked.
    pub fn remove_window(&self, id: WindowId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let tracked = inner.stack.contains(&id);
        inner.stack.retain(|tracked_id| *tracked_id != id);
        inner.windows.remove(&id);
        if tracked {
            debug!(%id, count = inner.stack.len(), "window removed");
        } else {
            warn!(%id, "remove_window for untracked window");
        }
        tracked
    }

    pub fn contains(&self, id: WindowId) -> bool {
        self.inner.borrow().stack.contains(&id)
    }

    pub fn window_count(&self) -> usize {
        self.inner.borrow().stack.len()
    }

    /// Screen bounds used for centering; refreshed from the frame on render
    pub fn set_bounds(&self, bounds: Rect) {
        self.inner.borrow_mut().bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.inner.borrow().bounds
    }

    /// Center a window inside the manager's bounds
    pub fn center(&self, id: WindowId) {
        let bounds = self.bounds();
        self.with_window_mut(id, |window| window.center(bounds));
    }

    pub fn set_location(&self, id: WindowId, location: Point) {
        self.with_window_mut(id, |window| window.set_location(location));
    }

    pub fn location(&self, id: WindowId) -> Option<Point> {
        self.with_window(id, |window| window.location())
    }

    pub fn set_visible(&self, id: WindowId, visible: bool) {
        self.with_window_mut(id, |window| window.set_visible(visible));
    }

    pub fn is_visible(&self, id: WindowId) -> Option<bool> {
        self.with_window(id, |window| window.is_visible())
    }

    pub fn set_top_most(&self, id: WindowId, top_most: bool) {
        self.with_window_mut(id, |window| window.set_top_most(top_most));
    }

    pub fn is_top_most(&self, id: WindowId) -> Option<bool> {
        self.with_window(id, |window| window.is_top_most())
    }

    /// Id of the window that currently receives key events
    pub fn top_window_id(&self) -> Option<WindowId> {
        self.inner.borrow().top_visible_id()
    }

    /// Run `f` against a tracked window
    ///
    /// Returns None (after a warn log) for untracked ids, which is how
    /// post-disposal handle calls degrade to no-ops.
    pub fn with_window<R>(&self, id: WindowId, f: impl FnOnce(&Window) -> R) -> Option<R> {
        let inner = self.inner.borrow();
        match inner.windows.get(&id) {
            Some(window) => Some(f(window)),
            None => {
                warn!(%id, "operation on untracked window");
                None
            }
        }
    }

    /// Run `f` against a tracked window, mutably
    pub fn with_window_mut<R>(&self, id: WindowId, f: impl FnOnce(&mut Window) -> R) -> Option<R> {
        let mut inner = self.inner.borrow_mut();
        match inner.windows.get_mut(&id) {
            Some(window) => Some(f(window)),
            None => {
                warn!(%id, "operation on untracked window");
                None
            }
        }
    }

    /// Deliver a key event to the top visible window
    ///
    /// The target is detached from the tracked set for the duration of the
    /// dispatch and re-attached afterwards unless something removed it in
    /// the meantime.
    pub fn handle_key_event(&self, event: KeyEvent) -> Result<()> {
        let detached = {
            let mut inner = self.inner.borrow_mut();
            match inner.top_visible_id() {
                Some(id) => inner.windows.remove(&id).map(|window| (id, window)),
                None => None,
            }
        };

        let Some((id, mut window)) = detached else {
            return Ok(());
        };

        let result = window.handle_key_event(event);

        let mut inner = self.inner.borrow_mut();
        if inner.stack.contains(&id) {
            inner.windows.insert(id, window);
        } else {
            debug!(%id, "window disposed during event dispatch");
        }
        result
    }

    /// Render all visible windows in stacking order
    pub fn render(&self, frame: &mut Frame, theme: &Theme) {
        let mut inner = self.inner.borrow_mut();
        inner.bounds = frame.size();
        let bounds = inner.bounds;

        for id in inner.render_order() {
            if let Some(window) = inner.windows.get_mut(&id) {
                window.render(frame, bounds, theme);
            }
        }
    }
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new()
    }
}
