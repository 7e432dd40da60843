#![forbid(unsafe_code)]

//! RAII subscription guards.
//!
//! A [`Subscription`] ties an installed handler to a value: while the guard
//! lives the handler stays attached, and dropping the guard runs the
//! release action exactly once. [`SubscriptionSet`] owns a bag of guards
//! that are released together, typically alongside the object that created
//! them.

use std::fmt;

/// RAII guard for one active attachment between a subscriber and a stream.
///
/// The release action runs at most once, no matter how the guard is
/// destroyed, and detaches only the handler the originating subscribe call
/// installed. Sibling subscriptions to the same source are never affected.
pub struct Subscription {
    release: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    /// Create a guard that runs `release` when destroyed.
    #[must_use]
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    /// Dispose of the subscription now.
    ///
    /// Equivalent to dropping the guard. Disposal consumes the guard, so a
    /// second disposal cannot be expressed; the release action runs once.
    pub fn dispose(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

/// An owned collection of [`Subscription`] guards.
///
/// Dropping the set, or calling [`clear`](SubscriptionSet::clear), disposes
/// every guard it holds. Pages use this to keep control bindings alive for
/// exactly as long as the page itself.
#[derive(Default)]
pub struct SubscriptionSet {
    guards: Vec<Subscription>,
}

impl SubscriptionSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a guard, keeping its handler attached until the
    /// set is cleared or dropped.
    pub fn insert(&mut self, subscription: Subscription) {
        self.guards.push(subscription);
    }

    /// Number of guards currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.guards.len()
    }

    /// Whether the set holds no guards.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.guards.is_empty()
    }

    /// Dispose of every held guard.
    pub fn clear(&mut self) {
        self.guards.clear();
    }
}

impl fmt::Debug for SubscriptionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionSet")
            .field("len", &self.guards.len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn drop_runs_release_once() {
        let released = Rc::new(Cell::new(0u32));
        let released_clone = Rc::clone(&released);

        let sub = Subscription::new(move || released_clone.set(released_clone.get() + 1));
        assert_eq!(released.get(), 0);

        drop(sub);
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn dispose_runs_release() {
        let released = Rc::new(Cell::new(0u32));
        let released_clone = Rc::clone(&released);

        let sub = Subscription::new(move || released_clone.set(released_clone.get() + 1));
        sub.dispose();
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn set_releases_all_on_clear() {
        let released = Rc::new(Cell::new(0u32));

        let mut set = SubscriptionSet::new();
        for _ in 0..3 {
            let released_clone = Rc::clone(&released);
            set.insert(Subscription::new(move || {
                released_clone.set(released_clone.get() + 1);
            }));
        }
        assert_eq!(set.len(), 3);
        assert_eq!(released.get(), 0);

        set.clear();
        assert!(set.is_empty());
        assert_eq!(released.get(), 3);
    }

    #[test]
    fn set_releases_all_on_drop() {
        let released = Rc::new(Cell::new(0u32));

        {
            let mut set = SubscriptionSet::new();
            let released_clone = Rc::clone(&released);
            set.insert(Subscription::new(move || {
                released_clone.set(released_clone.get() + 1);
            }));
        }
        assert_eq!(released.get(), 1);
    }

    #[test]
    fn debug_format() {
        let set = SubscriptionSet::new();
        let dbg = format!("{set:?}");
        assert!(dbg.contains("SubscriptionSet"));
    }
}
