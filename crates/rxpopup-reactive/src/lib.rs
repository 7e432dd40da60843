#![forbid(unsafe_code)]

//! Observable primitives for the rxpopup adapters.
//!
//! This crate provides the two sequence shapes the adapter layer is built
//! from, plus the guards that manage their lifetimes:
//!
//! - [`Deferred`]: a cold, single-value observable. Each [`subscribe`]
//!   yields an independent [`Execution`] and no work happens before the
//!   execution's first poll.
//! - [`Event`]: a shared multicast notification source with explicit
//!   attach/detach bookkeeping.
//! - [`EventStream`]: a hot observable view over an [`Event`], handing out
//!   one [`Subscription`] guard per subscriber.
//! - [`Subscription`] / [`SubscriptionSet`]: RAII guards that release
//!   exactly the handler their originating subscribe call installed.
//!
//! # Architecture
//!
//! Everything here is single-threaded by design: shared state lives in
//! `Rc<RefCell<..>>` and asynchronous work is `LocalBoxFuture`-shaped.
//! Nothing is `Send`, nothing locks, and delivery happens synchronously on
//! whichever call stack raised the event or polled the execution.
//!
//! # Invariants
//!
//! 1. Constructing an observable performs zero side effects.
//! 2. Each subscription to a cold observable is an independent run.
//! 3. Hot delivery reaches every live handler exactly once per emit, in
//!    attachment order.
//! 4. Dropping a guard detaches exactly the handler it owns, never a
//!    sibling's.
//!
//! [`subscribe`]: Deferred::subscribe

pub mod deferred;
pub mod event;
pub mod subscription;

pub use deferred::{Deferred, Execution};
pub use event::{Event, EventStream, HandlerId};
pub use subscription::{Subscription, SubscriptionSet};
