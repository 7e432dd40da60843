#![forbid(unsafe_code)]

//! Cold, single-value deferred observables.
//!
//! # Design
//!
//! [`Deferred<T>`] wraps a factory of single-shot asynchronous
//! computations. Constructing one is free of side effects; the work it
//! describes only runs when an [`Execution`] obtained from
//! [`subscribe`](Deferred::subscribe) is polled. Each subscription is an
//! independent run — no sharing, no caching, no multicast between runs.
//!
//! The factory itself is invoked at the execution's *first poll*, not at
//! subscribe time, so even an implementation that performs work before
//! returning its future stays cold until the subscriber actually drives
//! the execution.
//!
//! # Invariants
//!
//! 1. Constructing a `Deferred` (or an undriven `Execution`) performs no
//!    side effects.
//! 2. Each `Execution` resolves exactly once, with the computation's
//!    output, and nothing follows it.
//! 3. Dropping an `Execution` abandons the continuation; no cancellation
//!    of the underlying work is promised beyond detaching it.
//!
//! # Failure Modes
//!
//! - **Poll after completion**: polling a finished execution is a contract
//!   violation and panics.
//! - **Hung computation**: there is no timeout layer here; a future that
//!   never resolves hangs its execution indefinitely.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

use futures::future::{FutureExt, LocalBoxFuture};

type Factory<T> = Rc<dyn Fn() -> LocalBoxFuture<'static, T>>;

/// A cold observable producing a single value per subscription.
///
/// Cloning a `Deferred` clones the factory handle; clones describe the
/// same work and stay equally cold.
pub struct Deferred<T> {
    factory: Factory<T>,
}

// Manual Clone: shares the factory Rc.
impl<T> Clone for Deferred<T> {
    fn clone(&self) -> Self {
        Self {
            factory: Rc::clone(&self.factory),
        }
    }
}

impl<T: 'static> Deferred<T> {
    /// Wrap a factory of boxed futures.
    #[must_use]
    pub fn new(factory: impl Fn() -> LocalBoxFuture<'static, T> + 'static) -> Self {
        Self {
            factory: Rc::new(factory),
        }
    }

    /// Wrap a factory of plain futures.
    #[must_use]
    pub fn from_async<F, Fut>(factory: F) -> Self
    where
        F: Fn() -> Fut + 'static,
        Fut: Future<Output = T> + 'static,
    {
        Self::new(move || factory().boxed_local())
    }

    /// Begin an independent run of the deferred computation.
    ///
    /// The returned [`Execution`] is itself inert: the factory runs at its
    /// first poll. Subscribing twice yields two runs.
    #[must_use = "an execution does nothing until polled"]
    pub fn subscribe(&self) -> Execution<T> {
        Execution {
            state: State::Idle(Rc::clone(&self.factory)),
        }
    }
}

impl<T> fmt::Debug for Deferred<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred").finish_non_exhaustive()
    }
}

enum State<T> {
    Idle(Factory<T>),
    Running(LocalBoxFuture<'static, T>),
    Done,
}

/// One independent run of a [`Deferred`] computation.
///
/// This value is the subscription: it exists from `subscribe` until it
/// resolves or is dropped. Dropping it before completion abandons the
/// result.
pub struct Execution<T> {
    state: State<T>,
}

impl<T: 'static> Future for Execution<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if polled again after the execution resolved.
    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<T> {
        // `LocalBoxFuture` is `Unpin`, so the execution is too.
        let this = self.get_mut();
        loop {
            match &mut this.state {
                State::Idle(factory) => {
                    let future = factory();
                    this.state = State::Running(future);
                }
                State::Running(future) => {
                    return match future.as_mut().poll(cx) {
                        Poll::Ready(value) => {
                            this.state = State::Done;
                            Poll::Ready(value)
                        }
                        Poll::Pending => Poll::Pending,
                    };
                }
                State::Done => panic!("Execution polled after completion"),
            }
        }
    }
}

impl<T> fmt::Debug for Execution<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self.state {
            State::Idle(_) => "idle",
            State::Running(_) => "running",
            State::Done => "done",
        };
        f.debug_struct("Execution").field("state", &state).finish()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
