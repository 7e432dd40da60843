#![forbid(unsafe_code)]

//! Reactive adapters over an imperative popup navigation service.
//!
//! The host toolkit's popup service is imperative twice over: navigation
//! steps are async calls, and lifecycle notifications are multicast events.
//! This crate adapts both shapes into observables:
//!
//! - [`PopupNavigation`]: the injected capability the adapters consume —
//!   four async operations and four lifecycle event handles.
//! - [`PopupNavigationExt`]: the adapter surface — four cold
//!   [`Completion`] factories and four hot [`EventStream`] accessors.
//! - [`NavigationEvent`]: the payload relayed by the lifecycle streams.
//!
//! The service is passed explicitly (an `Rc` handle) rather than reached
//! through process-wide state, so tests substitute a fake without touching
//! globals. With the `test-helpers` feature, the `testing` module provides
//! such a fake.
//!
//! [`EventStream`]: rxpopup_reactive::EventStream

pub mod events;
pub mod mixins;
pub mod service;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use events::{NavigationDirection, NavigationEvent};
pub use mixins::{Completion, PopupNavigationExt};
pub use service::{NavigationError, PopupNavigation, PopupPage};
