//! Modal message box
//!
//! The message box is the canonical dialog of this toolkit: a fixed layout
//! shipped with the crate, a behavior injector that gives its controls
//! meaning, and a lightweight handle for steering the dialog after
//! construction.
//!
//! ```no_run
//! use casement::prelude::*;
//!
//! let manager = WindowManager::new();
//! let mut factory = MessageBoxFactory::new(
//!     manager.clone(),
//!     WindowFactory::new(LayoutRegistry::builtin()),
//! );
//!
//! let message_box = factory.create("Import finished.")?;
//! message_box.observers().subscribe::<MessageBoxEvent>(|_event| {
//!     // react to the okay press
//! });
//! # Ok::<(), casement::WindowConstructionError>(())
//! ```

use crate::controls::{ControlLookupError, ControlTree};
use crate::factory::{WindowConstructionError, WindowFactory};
use crate::injector::BehaviorInjector;
use crate::layout::MESSAGE_BOX_LAYOUT;
use crate::manager::{WindowId, WindowManager};
use crate::observer::{ObserverRegistry, Observers};
use crate::window::Point;
use tracing::debug;

/// Control names the message box layout must declare
pub mod control_names {
    /// Button that raises [`MessageBoxEvent::Okay`](super::MessageBoxEvent)
    pub const OKAY: &str = "btn_okay";
    /// Text area the message is bound into
    pub const MESSAGE: &str = "txt_message";
}

/// Events a message box raises on its observer registry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageBoxEvent {
    /// The okay button was pressed
    Okay,
}

/// Binds the message box layout to its semantics: the okay button raises
/// [`MessageBoxEvent::Okay`] on the captured registry, and the message text
/// is set exactly once.
struct MessageBoxInjector {
    observers: Observers,
    message: String,
}

impl BehaviorInjector for MessageBoxInjector {
    fn inject(&self, tree: &mut ControlTree) -> Result<(), ControlLookupError> {
        let observers = self.observers.clone();
        tree.button_mut(control_names::OKAY)?
            .on_press(move || observers.raise(&MessageBoxEvent::Okay));

        tree.text_area_mut(control_names::MESSAGE)?
            .set_text(self.message.clone());

        Ok(())
    }
}

/// Factory producing ready-to-show message boxes
pub struct MessageBoxFactory {
    manager: WindowManager,
    factory: WindowFactory,
}

impl MessageBoxFactory {
    pub fn new(manager: WindowManager, factory: WindowFactory) -> Self {
        Self { manager, factory }
    }

    /// Create a message box displaying `message` (the empty string shows an
    /// empty message), register it with the window manager, and center it
    ///
    /// Construction and injection complete before registration: a failure
    /// propagates without leaving any window tracked by the manager, and is
    /// never retried internally.
    pub fn create(&mut self, message: &str) -> Result<MessageBox, WindowConstructionError> {
        let observers = Observers::new();
        let injector = MessageBoxInjector {
            observers: observers.clone(),
            message: message.to_string(),
        };

        let window = self.factory.construct_window(MESSAGE_BOX_LAYOUT, &injector)?;
        let id = self.manager.add_window(window);
        self.manager.center(id);
        debug!(%id, "message box created");

        Ok(MessageBox {
            manager: self.manager.clone(),
            window: id,
            observers,
            disposed: false,
        })
    }
}

/// Handle to a live message box
///
/// Hides the window and the raising side of the observer registry behind a
/// narrow control surface. The dialog stays alive until [`dispose`] is
/// called; dropping the handle does not close it.
///
/// [`dispose`]: MessageBox::dispose
pub struct MessageBox {
    manager: WindowManager,
    window: WindowId,
    observers: Observers,
    disposed: bool,
}

impl std::fmt::Debug for MessageBox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageBox")
            .field("window", &self.window)
            .field("disposed", &self.disposed)
            .finish()
    }
}

impl MessageBox {
    /// Id of the underlying window, for manager-side queries
    pub fn window_id(&self) -> WindowId {
        self.window
    }

    pub fn set_location(&self, location: Point) {
        self.manager.set_location(self.window, location);
    }

    pub fn set_visible(&self, visible: bool) {
        self.manager.set_visible(self.window, visible);
    }

    pub fn set_top_most(&self, top_most: bool) {
        self.manager.set_top_most(self.window, top_most);
    }

    /// Subscribe-only view of the dialog's observer registry
    ///
    /// The registry outlives disposal, so late subscriptions still succeed;
    /// no event will reach them once the dialog is gone.
    pub fn observers(&self) -> ObserverRegistry {
        self.observers.registry()
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Tear down the window and its control tree
    ///
    /// Idempotent: repeat calls are no-ops and never disturb the window
    /// manager's bookkeeping.
    pub fn dispose(&mut self) {
        if self.disposed {
            debug!(id = %self.window, "dispose on already disposed message box");
            return;
        }
        self.disposed = true;
        self.manager.remove_window(self.window);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::LayoutRegistry;
    use crate::theme::Theme;
    use crossterm::event::{KeyCode, KeyEvent};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    fn setup() -> (WindowManager, MessageBoxFactory) {
        let manager = WindowManager::new();
        let factory = MessageBoxFactory::new(
            manager.clone(),
            WindowFactory::new(LayoutRegistry::builtin()),
        );
        (manager, factory)
    }

    fn press_okay(manager: &WindowManager) {
        manager
            .handle_key_event(KeyEvent::from(KeyCode::Enter))
            .unwrap();
    }

    #[test]
    fn test_create_binds_message_text() {
        for message in ["Converting tileset...", ""] {
            let (manager, mut factory) = setup();
            let message_box = factory.create(message).unwrap();

            let bound = manager
                .with_window(message_box.window_id(), |window| {
                    window
                        .tree()
                        .text_area(control_names::MESSAGE)
                        .unwrap()
                        .text()
                        .to_string()
                })
                .unwrap();
            assert_eq!(bound, message);
        }
    }

    #[test]
    fn test_create_registers_and_centers() {
        let (manager, mut factory) = setup();
        manager.set_bounds(ratatui::layout::Rect::new(0, 0, 80, 24));

        let message_box = factory.create("hello").unwrap();

        assert_eq!(manager.window_count(), 1);
        // Builtin layout is 44x10, so centering on 80x24 puts it at (18, 7).
        assert_eq!(
            manager.location(message_box.window_id()),
            Some(Point::new(18, 7))
        );
    }

    #[test]
    fn test_okay_press_delivers_in_subscription_order() {
        let (manager, mut factory) = setup();
        let message_box = factory.create("press okay").unwrap();

        let seen = Rc::new(RefCell::new(Vec::new()));
        for label in ["first", "second", "third"] {
            let seen = Rc::clone(&seen);
            message_box
                .observers()
                .subscribe::<MessageBoxEvent>(move |event| {
                    assert_eq!(*event, MessageBoxEvent::Okay);
                    seen.borrow_mut().push(label);
                });
        }

        press_okay(&manager);
        assert_eq!(*seen.borrow(), vec!["first", "second", "third"]);

        press_okay(&manager);
        assert_eq!(seen.borrow().len(), 6);
    }

    #[test]
    fn test_unsubscribed_observer_is_skipped() {
        let (manager, mut factory) = setup();
        let message_box = factory.create("press okay").unwrap();

        let count = Rc::new(Cell::new(0u32));
        let mut ids = Vec::new();
        for _ in 0..3 {
            let count = Rc::clone(&count);
            ids.push(
                message_box
                    .observers()
                    .subscribe::<MessageBoxEvent>(move |_| count.set(count.get() + 1)),
            );
        }
        assert!(message_box.observers().unsubscribe(ids[1]));

        press_okay(&manager);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_missing_okay_control_aborts_without_registration() {
        let (manager, _) = setup();
        let mut layouts = LayoutRegistry::new();
        layouts
            .register_json(
                MESSAGE_BOX_LAYOUT,
                r#"{
                    "width": 30, "height": 8,
                    "controls": [
                        { "type": "text_area", "name": "txt_message",
                          "rect": { "x": 1, "y": 1, "width": 26, "height": 3 } }
                    ]
                }"#,
            )
            .unwrap();
        let mut factory = MessageBoxFactory::new(manager.clone(), WindowFactory::new(layouts));

        let err = factory.create("doomed").unwrap_err();
        assert!(matches!(
            err,
            WindowConstructionError::Inject(ControlLookupError::NotFound { name })
                if name == control_names::OKAY
        ));
        assert_eq!(manager.window_count(), 0);
    }

    #[test]
    fn test_mistyped_message_control_aborts_without_registration() {
        let (manager, _) = setup();
        let mut layouts = LayoutRegistry::new();
        layouts
            .register_json(
                MESSAGE_BOX_LAYOUT,
                r#"{
                    "width": 30, "height": 8,
                    "controls": [
                        { "type": "button", "name": "btn_okay", "label": "Okay",
                          "rect": { "x": 10, "y": 5, "width": 8, "height": 1 } },
                        { "type": "button", "name": "txt_message", "label": "Oops",
                          "rect": { "x": 1, "y": 1, "width": 8, "height": 1 } }
                    ]
                }"#,
            )
            .unwrap();
        let mut factory = MessageBoxFactory::new(manager.clone(), WindowFactory::new(layouts));

        let err = factory.create("doomed").unwrap_err();
        assert!(matches!(
            err,
            WindowConstructionError::Inject(ControlLookupError::TypeMismatch { name, .. })
                if name == control_names::MESSAGE
        ));
        assert_eq!(manager.window_count(), 0);
    }

    #[test]
    fn test_handle_steers_window() {
        let (manager, mut factory) = setup();
        let message_box = factory.create("steerable").unwrap();
        let id = message_box.window_id();

        message_box.set_location(Point::new(2, 3));
        assert_eq!(manager.location(id), Some(Point::new(2, 3)));

        message_box.set_visible(false);
        assert_eq!(manager.is_visible(id), Some(false));
        message_box.set_visible(true);
        assert_eq!(manager.is_visible(id), Some(true));

        message_box.set_top_most(true);
        assert_eq!(manager.is_top_most(id), Some(true));
    }

    #[test]
    fn test_dispose_is_idempotent() {
        let (manager, mut factory) = setup();
        let mut message_box = factory.create("short-lived").unwrap();
        let id = message_box.window_id();

        message_box.dispose();
        assert!(message_box.is_disposed());
        assert!(!manager.contains(id));
        assert_eq!(manager.window_count(), 0);

        // Second dispose must not disturb the manager.
        let unrelated = factory.create("still here").unwrap();
        message_box.dispose();
        assert_eq!(manager.window_count(), 1);
        assert!(manager.contains(unrelated.window_id()));
    }

    #[test]
    fn test_subscribe_after_dispose_still_succeeds() {
        let (_manager, mut factory) = setup();
        let mut message_box = factory.create("gone soon").unwrap();
        message_box.dispose();

        let registry = message_box.observers();
        let id = registry.subscribe::<MessageBoxEvent>(|_| {});
        assert!(registry.unsubscribe(id));
    }

    #[test]
    fn test_dispose_from_inside_okay_observer() {
        let (manager, mut factory) = setup();
        let message_box = factory.create("close me").unwrap();

        let message_box = Rc::new(RefCell::new(message_box));
        {
            let message_box = Rc::clone(&message_box);
            let registry = message_box.borrow().observers();
            registry.subscribe::<MessageBoxEvent>(move |_| {
                message_box.borrow_mut().dispose();
            });
        }

        press_okay(&manager);
        assert_eq!(manager.window_count(), 0);
        assert!(message_box.borrow().is_disposed());
    }

    #[test]
    fn test_rendered_message_is_visible() {
        let (manager, mut factory) = setup();
        let _message_box = factory.create("All maps exported").unwrap();

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let theme = Theme::default();

        terminal
            .draw(|frame| manager.render(frame, &theme))
            .unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol.as_str())
            .collect();
        assert!(text.contains("All maps exported"));
        assert!(text.contains("Okay"));
    }
}
