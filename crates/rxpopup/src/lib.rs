#![forbid(unsafe_code)]

//! Reactive bindings and observable navigation for popup pages.
//!
//! The host toolkit presents popups through an imperative service: async
//! calls to present and dismiss, multicast events around each transition,
//! and an untyped binding context on every page. This crate adapts that
//! surface for reactive callers:
//!
//! - Navigation operations become cold [`Completion`] observables — no
//!   call is issued until an execution is polled, and every subscription
//!   is an independent invocation.
//! - Lifecycle events become hot [`EventStream`]s of [`NavigationEvent`] —
//!   every live subscriber sees every raised event, with exact
//!   attach/detach bookkeeping per subscription.
//! - [`ReactivePopupPage`] keeps a typed view-model slot and the untyped
//!   binding context in lockstep, degrading to an empty view model when
//!   the context holds an incompatible value.
//!
//! # Example
//!
//! ```ignore
//! use std::rc::Rc;
//! use rxpopup::{PopupNavigationExt, ReactivePopupPage, Typed, ViewFor};
//!
//! let service: Rc<dyn rxpopup::PopupNavigation> = host_popup_service();
//! let page = Rc::new(ReactivePopupPage::<Typed<LoginViewModel>>::new());
//! page.set_view_model(Some(Rc::new(LoginViewModel::default())));
//!
//! let _watch = service.pushed_stream().subscribe(|event| {
//!     println!("presented: {event:?}");
//! });
//! let shown = service.push_popup(Rc::clone(&page), true);
//! drive(shown.subscribe()); // host executor polls the execution
//! ```

pub use rxpopup_nav::{
    Completion, NavigationDirection, NavigationError, NavigationEvent, PopupNavigation,
    PopupNavigationExt, PopupPage,
};
pub use rxpopup_page::{ContextBinding, PageError, ReactivePopupPage, Typed, Untyped, ViewFor};
pub use rxpopup_reactive::{
    Deferred, Event, EventStream, Execution, HandlerId, Subscription, SubscriptionSet,
};
