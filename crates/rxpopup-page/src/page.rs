#![forbid(unsafe_code)]

//! The reactive popup page and its data-context synchronizer.
//!
//! # Design
//!
//! The page owns two observable slots — the untyped binding context and
//! the typed view-model — and keeps them consistent on every assignment:
//!
//! - Assigning the view model converts it and assigns the binding context
//!   to the same reference.
//! - Assigning the binding context stores the value unchanged and derives
//!   the view model through the page's [`ContextBinding`]; on a typed
//!   page, a value of the wrong type leaves the view-model slot empty
//!   while the context keeps the value.
//! - Assigning either slot's absence clears the other.
//!
//! # Invariants
//!
//! After any assignment the slots observably agree: same reference, or an
//! empty view model when the context failed to convert.
//!
//! The only failing operation is [`on_view_model_changed`] invoked without
//! its owning page — a programming-contract violation, reported as
//! [`PageError::MissingPage`]. Everything else is plain reference
//! reassignment and total.
//!
//! [`on_view_model_changed`]: ReactivePopupPage::on_view_model_changed

use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rxpopup_nav::PopupPage;
use rxpopup_reactive::{Event, EventStream, SubscriptionSet};
use tracing::trace;

use crate::context::{ContextBinding, Untyped, ViewFor};

/// Error from the page's bindable-property change hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageError {
    /// The change notification was delivered without its owning page.
    MissingPage,
}

impl fmt::Display for PageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPage => {
                write!(f, "change notification delivered without an owning page")
            }
        }
    }
}

impl std::error::Error for PageError {}

/// Popup page base with a typed view-model slot kept in lockstep with the
/// untyped binding context.
///
/// `B` selects the binding strategy: the default [`Untyped`] mirrors the
/// context into the view-model slot verbatim, while
/// [`Typed<VM>`](crate::context::Typed) downcasts and degrades to an empty
/// view model when the context holds something else.
pub struct ReactivePopupPage<B: ContextBinding = Untyped> {
    binding_context: RefCell<Option<Rc<dyn Any>>>,
    view_model: RefCell<Option<Rc<B::ViewModel>>>,
    background_clicked: Event<()>,
    background_click: EventStream<()>,
    control_bindings: RefCell<SubscriptionSet>,
}

impl<B: ContextBinding> ReactivePopupPage<B> {
    /// A page with both slots empty.
    ///
    /// The background-click stream is wired here, once, over the page's
    /// own tap notification source.
    #[must_use]
    pub fn new() -> Self {
        let background_clicked = Event::new();
        let background_click = EventStream::new(background_clicked.clone());
        Self {
            binding_context: RefCell::new(None),
            view_model: RefCell::new(None),
            background_clicked,
            background_click,
            control_bindings: RefCell::new(SubscriptionSet::new()),
        }
    }

    /// The current binding context.
    #[must_use]
    pub fn binding_context(&self) -> Option<Rc<dyn Any>> {
        self.binding_context.borrow().clone()
    }

    /// Assign the binding context and derive the view model from it.
    ///
    /// `None` clears both slots. A context value the binding cannot
    /// convert leaves the view model empty while the context keeps the
    /// value.
    pub fn set_binding_context(&self, context: Option<Rc<dyn Any>>) {
        let view_model = context.clone().and_then(B::from_context);
        trace!(
            cleared = context.is_none(),
            matched = view_model.is_some(),
            "binding context changed"
        );
        *self.binding_context.borrow_mut() = context;
        *self.view_model.borrow_mut() = view_model;
    }

    /// Change hook for an external bindable-property engine.
    ///
    /// The engine stores the new view-model value itself and then notifies
    /// with the owning page and the value; this hook performs the
    /// cross-assignment into the binding context. Invoking it without the
    /// owning page is a contract violation.
    ///
    /// # Errors
    ///
    /// [`PageError::MissingPage`] when `page` is `None`.
    pub fn on_view_model_changed(
        page: Option<&Self>,
        value: Option<Rc<dyn Any>>,
    ) -> Result<(), PageError> {
        let page = page.ok_or(PageError::MissingPage)?;
        page.set_binding_context(value);
        Ok(())
    }

    /// Handle to the background-tap notification source.
    ///
    /// The host toolkit raises it when the user taps outside the popup
    /// content; the page only relays.
    #[must_use]
    pub fn background_clicked(&self) -> Event<()> {
        self.background_clicked.clone()
    }

    /// Hot stream of background taps, one unit per tap.
    ///
    /// Follows the lifecycle-stream contract: one handler installed per
    /// subscription, detached on disposal, nothing buffered.
    #[must_use]
    pub fn background_click(&self) -> &EventStream<()> {
        &self.background_click
    }

    /// Keep `subscription` alive for as long as the page itself.
    pub fn retain_binding(&self, subscription: rxpopup_reactive::Subscription) {
        self.control_bindings.borrow_mut().insert(subscription);
    }

    /// Number of control bindings currently held by the page.
    #[must_use]
    pub fn control_binding_count(&self) -> usize {
        self.control_bindings.borrow().len()
    }

    /// Dispose of every control binding now.
    pub fn clear_control_bindings(&self) {
        self.control_bindings.borrow_mut().clear();
    }
}

impl<B: ContextBinding> Default for ReactivePopupPage<B> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: ContextBinding> ViewFor for ReactivePopupPage<B> {
    type ViewModel = B::ViewModel;

    fn view_model(&self) -> Option<Rc<B::ViewModel>> {
        self.view_model.borrow().clone()
    }

    fn set_view_model(&self, view_model: Option<Rc<B::ViewModel>>) {
        self.set_binding_context(view_model.map(B::to_context));
    }
}

impl<B: ContextBinding> PopupPage for ReactivePopupPage<B> {}

impl<B: ContextBinding> fmt::Debug for ReactivePopupPage<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReactivePopupPage")
            .field("has_view_model", &self.view_model.borrow().is_some())
            .field("has_context", &self.binding_context.borrow().is_some())
            .field("control_bindings", &self.control_bindings.borrow().len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
