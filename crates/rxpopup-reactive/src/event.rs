#![forbid(unsafe_code)]

//! Multicast event source and its hot stream wrapper.
//!
//! # Design
//!
//! [`Event<T>`] models a host toolkit's multicast notification as an
//! explicit attach/detach pair: attaching a handler returns a
//! [`HandlerId`], and detaching removes exactly that handler. Handles are
//! cheap to clone and share one underlying handler list, so the side that
//! raises notifications and the sides that listen can each hold their own
//! handle to the same source.
//!
//! [`EventStream<T>`] is the hot observable view: a thin adapter that
//! installs one handler per [`subscribe`](EventStream::subscribe) call and
//! hands back a [`Subscription`] guard whose disposal detaches it again.
//! Streams never complete and never error; they relay each raised payload
//! to whoever is attached at that moment.
//!
//! # Invariants
//!
//! 1. Each emit reaches every live handler exactly once, in attachment
//!    order.
//! 2. Detaching one handler never affects the others.
//! 3. Nothing is buffered: a late subscriber only sees later emits.
//!
//! # Failure Modes
//!
//! - **Detach during delivery**: `emit` snapshots the handler list before
//!   calling out, so a handler detached from within a delivery still
//!   receives the in-flight payload; the detach takes effect on the next
//!   emit.
//! - **Handler leak**: a forgotten [`Subscription`] guard keeps its handler
//!   attached for the source's lifetime. [`SubscriptionSet`] exists to
//!   scope guards to an owner.
//!
//! [`SubscriptionSet`]: crate::subscription::SubscriptionSet

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::subscription::Subscription;

type Handler<T> = Rc<dyn Fn(&T)>;

/// Identifier of one attached handler. Ids are never reused within an
/// event's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

struct EventInner<T> {
    next_id: u64,
    handlers: Vec<(HandlerId, Handler<T>)>,
}

/// A shared multicast notification source.
///
/// Cloning an `Event` creates a new handle to the **same** handler list —
/// every handle sees every handler, and an emit through any handle reaches
/// them all.
pub struct Event<T> {
    inner: Rc<RefCell<EventInner<T>>>,
}

// Manual Clone: shares the same Rc.
impl<T> Clone for Event<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Default for Event<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> Event<T> {
    /// Create a source with no handlers attached.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(EventInner {
                next_id: 0,
                handlers: Vec::new(),
            })),
        }
    }

    /// Attach a handler. It receives every payload emitted from now on,
    /// until detached.
    pub fn attach(&self, handler: impl Fn(&T) + 'static) -> HandlerId {
        let mut inner = self.inner.borrow_mut();
        let id = HandlerId(inner.next_id);
        inner.next_id += 1;
        inner.handlers.push((id, Rc::new(handler)));
        id
    }

    /// Detach the handler registered under `id`.
    ///
    /// Returns `false` when no such handler is attached; detaching twice is
    /// a no-op.
    pub fn detach(&self, id: HandlerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.handlers.len();
        inner.handlers.retain(|(handler_id, _)| *handler_id != id);
        inner.handlers.len() != before
    }

    /// Deliver `value` to every attached handler, in attachment order.
    ///
    /// The handler list is snapshotted before delivery, so handlers may
    /// attach or detach re-entrantly.
    pub fn emit(&self, value: &T) {
        // Collect outside the borrow so handlers can re-enter the source.
        let handlers: Vec<Handler<T>> = self
            .inner
            .borrow()
            .handlers
            .iter()
            .map(|(_, handler)| Rc::clone(handler))
            .collect();
        for handler in &handlers {
            handler(value);
        }
    }

    /// Number of currently attached handlers.
    #[must_use]
    pub fn handler_count(&self) -> usize {
        self.inner.borrow().handlers.len()
    }
}

impl<T> fmt::Debug for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Event")
            .field("handler_count", &self.inner.borrow().handlers.len())
            .finish()
    }
}

/// A hot observable view over a shared [`Event`] source.
///
/// Each [`subscribe`](EventStream::subscribe) call installs exactly one
/// handler on the underlying event; disposing the returned guard removes
/// exactly that handler. Distinct streams over the same source all observe
/// every emit while subscribed — the source is shared, the wrappers are
/// not.
pub struct EventStream<T> {
    source: Event<T>,
}

// Manual Clone: a cloned stream is another view over the same source.
impl<T> Clone for EventStream<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
        }
    }
}

impl<T: 'static> EventStream<T> {
    /// Wrap a source handle.
    #[must_use]
    pub fn new(source: Event<T>) -> Self {
        Self { source }
    }

    /// Attach `handler` to the underlying source.
    ///
    /// The handler is invoked synchronously, on whatever call stack raises
    /// the event, for every payload emitted while the guard lives.
    #[must_use = "dropping the subscription detaches the handler"]
    pub fn subscribe(&self, handler: impl Fn(&T) + 'static) -> Subscription {
        let id = self.source.attach(handler);
        let source = self.source.clone();
        Subscription::new(move || {
            source.detach(id);
        })
    }
}

impl<T> fmt::Debug for EventStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventStream")
            .field("source", &self.source)
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
