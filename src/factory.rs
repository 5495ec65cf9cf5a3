//! Window factory
//!
//! The factory is the single path from a layout reference to a live
//! [`Window`]: resolve the layout document, build the control tree, run the
//! behavior injector exactly once, and only then wrap the result. Failures at
//! any step propagate as [`WindowConstructionError`]; no partially
//! constructed window ever escapes.

use crate::controls::{ControlLookupError, ControlTree};
use crate::injector::BehaviorInjector;
use crate::layout::{LayoutError, LayoutRegistry};
use crate::window::Window;
use tracing::debug;

/// Umbrella error for failed window construction
#[derive(Debug, thiserror::Error)]
pub enum WindowConstructionError {
    #[error("failed to load window layout")]
    Layout(#[from] LayoutError),

    #[error("behavior injection failed")]
    Inject(#[from] ControlLookupError),
}

pub struct WindowFactory {
    layouts: LayoutRegistry,
}

impl WindowFactory {
    pub fn new(layouts: LayoutRegistry) -> Self {
        Self { layouts }
    }

    pub fn layouts(&self) -> &LayoutRegistry {
        &self.layouts
    }

    pub fn layouts_mut(&mut self) -> &mut LayoutRegistry {
        &mut self.layouts
    }

    /// Construct a window from a layout reference and a behavior injector
    ///
    /// The injector runs exactly once, after the control tree is fully built
    /// and before the window is returned.
    pub fn construct_window(
        &self,
        layout_ref: &str,
        injector: &dyn BehaviorInjector,
    ) -> Result<Window, WindowConstructionError> {
        debug!(layout = %layout_ref, "constructing window");
        let doc = self.layouts.resolve(layout_ref)?;

        let mut tree = ControlTree::new();
        for decl in &doc.controls {
            if tree.insert(decl.instantiate()).is_err() {
                return Err(LayoutError::DuplicateControl {
                    uri: layout_ref.to_string(),
                    name: decl.name().to_string(),
                }
                .into());
            }
        }
        tree.focus_first();

        injector.inject(&mut tree)?;

        Ok(Window::new(doc.title.clone(), doc.width, doc.height, tree))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::injector::NoopInjector;
    use crate::layout::MESSAGE_BOX_LAYOUT;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingInjector {
        calls: Rc<Cell<u32>>,
        fail: bool,
    }

    impl BehaviorInjector for CountingInjector {
        fn inject(&self, tree: &mut ControlTree) -> Result<(), ControlLookupError> {
            self.calls.set(self.calls.get() + 1);
            if self.fail {
                // Ask for a control no layout declares.
                tree.button_mut("btn_absent")?;
            }
            Ok(())
        }
    }

    fn factory() -> WindowFactory {
        WindowFactory::new(LayoutRegistry::builtin())
    }

    #[test]
    fn test_construct_window_runs_injector_once() {
        let calls = Rc::new(Cell::new(0u32));
        let injector = CountingInjector {
            calls: Rc::clone(&calls),
            fail: false,
        };

        let window = factory()
            .construct_window(MESSAGE_BOX_LAYOUT, &injector)
            .unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(window.title(), Some("Message"));
        assert_eq!(window.tree().len(), 2);
        assert_eq!(window.tree().focused().unwrap().name(), "btn_okay");
    }

    #[test]
    fn test_injection_failure_aborts_construction() {
        let calls = Rc::new(Cell::new(0u32));
        let injector = CountingInjector {
            calls: Rc::clone(&calls),
            fail: true,
        };

        let err = factory()
            .construct_window(MESSAGE_BOX_LAYOUT, &injector)
            .unwrap_err();

        assert_eq!(calls.get(), 1);
        assert!(matches!(
            err,
            WindowConstructionError::Inject(ControlLookupError::NotFound { name }) if name == "btn_absent"
        ));
    }

    #[test]
    fn test_unknown_layout_fails() {
        let err = factory()
            .construct_window("local:///missing.json", &NoopInjector)
            .unwrap_err();
        assert!(matches!(
            err,
            WindowConstructionError::Layout(LayoutError::Unknown(_))
        ));
    }

    #[test]
    fn test_duplicate_control_names_fail() {
        let mut factory = factory();
        factory
            .layouts_mut()
            .register_json(
                "local:///dup.json",
                r#"{
                    "width": 20, "height": 5,
                    "controls": [
                        { "type": "button", "name": "btn_one", "label": "A",
                          "rect": { "x": 0, "y": 0, "width": 5, "height": 1 } },
                        { "type": "button", "name": "btn_one", "label": "B",
                          "rect": { "x": 0, "y": 2, "width": 5, "height": 1 } }
                    ]
                }"#,
            )
            .unwrap();

        let err = factory
            .construct_window("local:///dup.json", &NoopInjector)
            .unwrap_err();
        assert!(matches!(
            err,
            WindowConstructionError::Layout(LayoutError::DuplicateControl { name, .. }) if name == "btn_one"
        ));
    }
}
