#![forbid(unsafe_code)]

//! Recording test double for the navigation capability.
//!
//! [`StubPopupNavigation`] counts invocations, captures the last animate
//! flag and page, can be switched to fail or to never resolve, and lets a
//! test raise each lifecycle event by hand. Available to downstream crates
//! through the `test-helpers` feature.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use async_trait::async_trait;
use rxpopup_reactive::Event;

use crate::events::NavigationEvent;
use crate::service::{NavigationError, PopupNavigation, PopupPage};

/// Minimal page for exercising the adapters.
#[derive(Debug, Default)]
pub struct StubPage;

impl PopupPage for StubPage {}

/// How the stub resolves its asynchronous operations.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StubBehavior {
    /// Resolve immediately with `Ok(())`.
    #[default]
    Succeed,
    /// Resolve immediately with the given error.
    Fail(NavigationError),
    /// Never resolve.
    Hang,
}

/// Recording implementation of [`PopupNavigation`].
#[derive(Default)]
pub struct StubPopupNavigation {
    behavior: RefCell<StubBehavior>,
    pop_all_calls: Cell<u32>,
    pop_calls: Cell<u32>,
    push_calls: Cell<u32>,
    remove_calls: Cell<u32>,
    last_animate: Cell<Option<bool>>,
    last_page: RefCell<Option<Rc<dyn PopupPage>>>,
    popping: Event<NavigationEvent>,
    popped: Event<NavigationEvent>,
    pushing: Event<NavigationEvent>,
    pushed: Event<NavigationEvent>,
}

impl StubPopupNavigation {
    /// A stub that succeeds immediately.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Change how subsequent operations resolve.
    pub fn set_behavior(&self, behavior: StubBehavior) {
        *self.behavior.borrow_mut() = behavior;
    }

    /// Number of `pop_all` invocations.
    #[must_use]
    pub fn pop_all_calls(&self) -> u32 {
        self.pop_all_calls.get()
    }

    /// Number of `pop` invocations.
    #[must_use]
    pub fn pop_calls(&self) -> u32 {
        self.pop_calls.get()
    }

    /// Number of `push` invocations.
    #[must_use]
    pub fn push_calls(&self) -> u32 {
        self.push_calls.get()
    }

    /// Number of `remove_page` invocations.
    #[must_use]
    pub fn remove_calls(&self) -> u32 {
        self.remove_calls.get()
    }

    /// The animate flag of the most recent operation, if any.
    #[must_use]
    pub fn last_animate(&self) -> Option<bool> {
        self.last_animate.get()
    }

    /// The page passed to the most recent `push`/`remove_page`, if any.
    #[must_use]
    pub fn last_page(&self) -> Option<Rc<dyn PopupPage>> {
        self.last_page.borrow().clone()
    }

    /// Raise the pre-dismiss event.
    pub fn raise_popping(&self, event: &NavigationEvent) {
        self.popping.emit(event);
    }

    /// Raise the post-dismiss event.
    pub fn raise_popped(&self, event: &NavigationEvent) {
        self.popped.emit(event);
    }

    /// Raise the pre-present event.
    pub fn raise_pushing(&self, event: &NavigationEvent) {
        self.pushing.emit(event);
    }

    /// Raise the post-present event.
    pub fn raise_pushed(&self, event: &NavigationEvent) {
        self.pushed.emit(event);
    }

    async fn settle(&self) -> Result<(), NavigationError> {
        let behavior = self.behavior.borrow().clone();
        match behavior {
            StubBehavior::Succeed => Ok(()),
            StubBehavior::Fail(err) => Err(err),
            StubBehavior::Hang => futures::future::pending().await,
        }
    }
}

#[async_trait(?Send)]
impl PopupNavigation for StubPopupNavigation {
    async fn pop_all(&self, animate: bool) -> Result<(), NavigationError> {
        self.pop_all_calls.set(self.pop_all_calls.get() + 1);
        self.last_animate.set(Some(animate));
        self.settle().await
    }

    async fn pop(&self, animate: bool) -> Result<(), NavigationError> {
        self.pop_calls.set(self.pop_calls.get() + 1);
        self.last_animate.set(Some(animate));
        self.settle().await
    }

    async fn push(&self, page: Rc<dyn PopupPage>, animate: bool) -> Result<(), NavigationError> {
        self.push_calls.set(self.push_calls.get() + 1);
        self.last_animate.set(Some(animate));
        *self.last_page.borrow_mut() = Some(page);
        self.settle().await
    }

    async fn remove_page(
        &self,
        page: Rc<dyn PopupPage>,
        animate: bool,
    ) -> Result<(), NavigationError> {
        self.remove_calls.set(self.remove_calls.get() + 1);
        self.last_animate.set(Some(animate));
        *self.last_page.borrow_mut() = Some(page);
        self.settle().await
    }

    fn popping(&self) -> Event<NavigationEvent> {
        self.popping.clone()
    }

    fn popped(&self) -> Event<NavigationEvent> {
        self.popped.clone()
    }

    fn pushing(&self) -> Event<NavigationEvent> {
        self.pushing.clone()
    }

    fn pushed(&self) -> Event<NavigationEvent> {
        self.pushed.clone()
    }
}
