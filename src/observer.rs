//! Capability-keyed observer registry
//!
//! The registry is a process-local publish/subscribe mechanism keyed by the
//! Rust type of the raised event. Window behaviors raise events through an
//! [`Observers`] value they captured at injection time; application code only
//! ever sees an [`ObserverRegistry`], which can subscribe and unsubscribe but
//! never raise.
//!
//! Raising snapshots the subscriber list before iterating, so subscriptions
//! added or removed from inside a callback take effect on the next raise and
//! never disturb the delivery in progress.

use std::any::{Any, TypeId};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use tracing::trace;

/// Token returned by subscribe, used to unsubscribe later
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriberId(u64);

type BoxedCallback = Rc<dyn Fn(&dyn Any)>;

struct Subscriber {
    id: SubscriberId,
    callback: BoxedCallback,
}

#[derive(Default)]
struct RegistryInner {
    /// Per-capability subscriber lists, in subscription order
    subscribers: RefCell<HashMap<TypeId, Vec<Subscriber>>>,
    next_id: Cell<u64>,
}

impl RegistryInner {
    fn subscribe<E: 'static>(&self, callback: impl Fn(&E) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id.get());
        self.next_id.set(id.0 + 1);

        let erased: BoxedCallback = Rc::new(move |event: &dyn Any| {
            if let Some(event) = event.downcast_ref::<E>() {
                callback(event);
            }
        });

        self.subscribers
            .borrow_mut()
            .entry(TypeId::of::<E>())
            .or_default()
            .push(Subscriber { id, callback: erased });

        id
    }

    fn unsubscribe(&self, id: SubscriberId) -> bool {
        let mut map = self.subscribers.borrow_mut();
        for list in map.values_mut() {
            if let Some(index) = list.iter().position(|sub| sub.id == id) {
                list.remove(index);
                return true;
            }
        }
        trace!(?id, "unsubscribe for unknown subscriber id");
        false
    }
}

/// Raising side of the registry
///
/// Cloning is cheap and yields another handle onto the same subscriber
/// lists. The behavior wiring of a window typically captures a clone inside
/// its control callbacks and raises from there.
#[derive(Clone, Default)]
pub struct Observers {
    inner: Rc<RegistryInner>,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe-only view for handing to application callers
    pub fn registry(&self) -> ObserverRegistry {
        ObserverRegistry {
            inner: Rc::clone(&self.inner),
        }
    }

    /// Subscribe a callback for events of capability `E`
    pub fn subscribe<E: 'static>(&self, callback: impl Fn(&E) + 'static) -> SubscriberId {
        self.inner.subscribe(callback)
    }

    /// Remove a subscription; returns false if the id is unknown
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.inner.unsubscribe(id)
    }

    /// Raise an event to every current subscriber of capability `E`,
    /// in subscription order
    ///
    /// The subscriber list is snapshotted before the first callback runs.
    pub fn raise<E: 'static>(&self, event: &E) {
        let snapshot: Vec<BoxedCallback> = {
            let map = self.inner.subscribers.borrow();
            map.get(&TypeId::of::<E>())
                .map(|list| list.iter().map(|sub| Rc::clone(&sub.callback)).collect())
                .unwrap_or_default()
        };

        for callback in snapshot {
            callback(event);
        }
    }
}

/// Subscribe/unsubscribe capability handed to callers
///
/// Holds the same subscriber lists as the [`Observers`] it came from, but
/// deliberately has no raise operation.
#[derive(Clone)]
pub struct ObserverRegistry {
    inner: Rc<RegistryInner>,
}

impl ObserverRegistry {
    /// Subscribe a callback for events of capability `E`
    pub fn subscribe<E: 'static>(&self, callback: impl Fn(&E) + 'static) -> SubscriberId {
        self.inner.subscribe(callback)
    }

    /// Remove a subscription; returns false if the id is unknown
    pub fn unsubscribe(&self, id: SubscriberId) -> bool {
        self.inner.unsubscribe(id)
    }
}
