#![forbid(unsafe_code)]

//! Reactive popup pages.
//!
//! A popup page carries two views of one logical "current data context":
//! a typed view-model slot and the untyped binding context the host
//! toolkit binds against. This crate keeps the two in lockstep:
//!
//! - [`ContextBinding`]: the conversion strategy between the slots —
//!   [`Untyped`] (the view model is whatever the context holds) or
//!   [`Typed<VM>`](Typed) (a checked downcast that degrades to an empty
//!   view model on mismatch, never an error).
//! - [`ReactivePopupPage<B>`]: the page itself — the synchronized slots,
//!   a hot background-click stream, and a [`SubscriptionSet`] scoping
//!   control bindings to the page's lifetime.
//! - [`ViewFor`]: "a view bound to a view model", implemented by every
//!   page parameterization.
//!
//! [`SubscriptionSet`]: rxpopup_reactive::SubscriptionSet

pub mod context;
pub mod page;

pub use context::{ContextBinding, Typed, Untyped, ViewFor};
pub use page::{PageError, ReactivePopupPage};
