//! Behavior injection
//!
//! A freshly built control tree is inert: the layout document names the
//! controls but gives them no meaning. A [`BehaviorInjector`] is the binding
//! pass that looks controls up by name and expected kind and wires them to
//! application semantics — press handlers, initial text, captured state.
//!
//! The window factory runs the injector exactly once, after the tree is
//! fully built and before any window exists. A lookup failure aborts window
//! construction; the partially bound tree is dropped and never escapes.

use crate::controls::{ControlLookupError, ControlTree};

pub trait BehaviorInjector {
    /// Perform all lookups and bindings against the tree
    ///
    /// Either every binding succeeds, or the error propagates and the caller
    /// discards the tree — there is no partial-success state to observe.
    fn inject(&self, tree: &mut ControlTree) -> Result<(), ControlLookupError>;
}

/// Injector that binds nothing; useful for purely informational windows
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopInjector;

impl BehaviorInjector for NoopInjector {
    fn inject(&self, _tree: &mut ControlTree) -> Result<(), ControlLookupError> {
        Ok(())
    }
}
