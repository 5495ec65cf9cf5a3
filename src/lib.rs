//! Declarative windowing and dialog toolkit for terminal applications
//!
//! Windows are described by JSON layout documents and resolved through a
//! [`LayoutRegistry`]. The [`WindowFactory`] turns a layout reference into a
//! live [`Window`] by building its control tree and running a
//! [`BehaviorInjector`] over it — the binding pass that wires named controls
//! to application semantics. Constructed windows register with a
//! [`WindowManager`], which owns them, stacks them, renders them, and routes
//! key events. Dialogs such as the [`message_box`] hand the caller a narrow
//! handle plus a capability-keyed observer registry for the events their
//! controls raise.
//!
//! Everything runs on the single thread that drives the UI loop: window
//! construction, behavior injection, and event delivery are synchronous, and
//! there is no locking anywhere in the crate.

pub mod controls;
pub mod factory;
pub mod injector;
pub mod layout;
pub mod manager;
pub mod message_box;
pub mod observer;
pub mod terminal;
pub mod theme;
pub mod window;

pub use factory::{WindowConstructionError, WindowFactory};
pub use injector::{BehaviorInjector, NoopInjector};
pub use layout::{LayoutDoc, LayoutError, LayoutRegistry, MESSAGE_BOX_LAYOUT};
pub use manager::{WindowId, WindowManager};
pub use message_box::{MessageBox, MessageBoxEvent, MessageBoxFactory};
pub use observer::{ObserverRegistry, Observers, SubscriberId};
pub use theme::Theme;
pub use window::{Point, Window};

/// Commonly used types, importable in one line
pub mod prelude {
    pub use crate::controls::{Button, Control, ControlKind, ControlLookupError, ControlTree, TextArea};
    pub use crate::factory::{WindowConstructionError, WindowFactory};
    pub use crate::injector::BehaviorInjector;
    pub use crate::layout::{LayoutRegistry, MESSAGE_BOX_LAYOUT};
    pub use crate::manager::{WindowId, WindowManager};
    pub use crate::message_box::{MessageBox, MessageBoxEvent, MessageBoxFactory};
    pub use crate::observer::{ObserverRegistry, Observers, SubscriberId};
    pub use crate::theme::Theme;
    pub use crate::window::{Point, Window};
}

use ratatui::backend::CrosstermBackend;
use std::io;

pub type Backend = CrosstermBackend<io::Stdout>;
pub type Frame<'a> = ratatui::Frame<'a>;
