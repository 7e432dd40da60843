#![forbid(unsafe_code)]

//! Observable extensions over a shared navigation handle.
//!
//! # Design
//!
//! Two families of adapters, both stateless:
//!
//! - The four *operations* return a cold [`Completion`]: nothing reaches
//!   the service until an execution from `subscribe` is polled, and every
//!   subscription issues its own independent service call. Success yields
//!   one unit-valued completion; a service failure travels through the
//!   same channel, untouched.
//! - The four *stream accessors* return a hot
//!   [`EventStream<NavigationEvent>`]. Each call produces a fresh wrapper
//!   value, but all wrappers attach to the service's one shared source per
//!   lifecycle moment, so concurrent subscribers all observe every raised
//!   event. The four streams are independent; no ordering holds across
//!   them.
//!
//! The `animate` flag and the page reference are forwarded exactly as
//! given; the adapters validate nothing.

use std::rc::Rc;

use rxpopup_reactive::{Deferred, EventStream};
use tracing::debug;

use crate::events::NavigationEvent;
use crate::service::{NavigationError, PopupNavigation, PopupPage};

/// Cold, single-value completion observable for one navigation operation.
pub type Completion = Deferred<Result<(), NavigationError>>;

/// Observable adapters over a shared [`PopupNavigation`] handle.
///
/// Implemented for `Rc<N>` so the returned observables can own a handle to
/// the service and stay `'static`.
pub trait PopupNavigationExt {
    /// Dismiss every popup page. Cold; see the module docs for the
    /// subscription contract.
    fn pop_all_popup(&self, animate: bool) -> Completion;

    /// Dismiss the topmost popup page. Cold.
    fn pop_popup(&self, animate: bool) -> Completion;

    /// Present a popup page. Cold; the page is forwarded as-is.
    fn push_popup<P: PopupPage>(&self, page: Rc<P>, animate: bool) -> Completion;

    /// Remove a specific popup page from anywhere in the stack. Cold.
    fn remove_popup<P: PopupPage>(&self, page: Rc<P>, animate: bool) -> Completion;

    /// Hot stream of pre-dismiss notifications.
    fn popping_stream(&self) -> EventStream<NavigationEvent>;

    /// Hot stream of post-dismiss notifications.
    fn popped_stream(&self) -> EventStream<NavigationEvent>;

    /// Hot stream of pre-present notifications.
    fn pushing_stream(&self) -> EventStream<NavigationEvent>;

    /// Hot stream of post-present notifications.
    fn pushed_stream(&self) -> EventStream<NavigationEvent>;
}

impl<N: PopupNavigation + ?Sized + 'static> PopupNavigationExt for Rc<N> {
    fn pop_all_popup(&self, animate: bool) -> Completion {
        let service = Rc::clone(self);
        Deferred::from_async(move || {
            let service = Rc::clone(&service);
            async move {
                debug!(animate, "dismissing all popup pages");
                service.pop_all(animate).await
            }
        })
    }

    fn pop_popup(&self, animate: bool) -> Completion {
        let service = Rc::clone(self);
        Deferred::from_async(move || {
            let service = Rc::clone(&service);
            async move {
                debug!(animate, "dismissing topmost popup page");
                service.pop(animate).await
            }
        })
    }

    fn push_popup<P: PopupPage>(&self, page: Rc<P>, animate: bool) -> Completion {
        let service = Rc::clone(self);
        let page: Rc<dyn PopupPage> = page;
        Deferred::from_async(move || {
            let service = Rc::clone(&service);
            let page = Rc::clone(&page);
            async move {
                debug!(animate, "presenting popup page");
                service.push(page, animate).await
            }
        })
    }

    fn remove_popup<P: PopupPage>(&self, page: Rc<P>, animate: bool) -> Completion {
        let service = Rc::clone(self);
        let page: Rc<dyn PopupPage> = page;
        Deferred::from_async(move || {
            let service = Rc::clone(&service);
            let page = Rc::clone(&page);
            async move {
                debug!(animate, "removing popup page");
                service.remove_page(page, animate).await
            }
        })
    }

    fn popping_stream(&self) -> EventStream<NavigationEvent> {
        EventStream::new(self.popping())
    }

    fn popped_stream(&self) -> EventStream<NavigationEvent> {
        EventStream::new(self.popped())
    }

    fn pushing_stream(&self) -> EventStream<NavigationEvent> {
        EventStream::new(self.pushing())
    }

    fn pushed_stream(&self) -> EventStream<NavigationEvent> {
        EventStream::new(self.pushed())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NavigationDirection;
    use crate::testing::{StubBehavior, StubPage, StubPopupNavigation};
    use futures::executor::block_on;
    use futures::task::noop_waker;
    use std::cell::Cell;
    use std::future::Future;
    use std::pin::Pin;
    use std::task::Context;

    fn stub() -> Rc<StubPopupNavigation> {
        Rc::new(StubPopupNavigation::new())
    }

    #[test]
    fn operations_are_cold_until_driven() {
        let service = stub();

        let _pop_all = service.pop_all_popup(true);
        let _pop = service.pop_popup(true);
        let _push = service.push_popup(Rc::new(StubPage), true);
        let _remove = service.remove_popup(Rc::new(StubPage), true);

        assert_eq!(service.pop_all_calls(), 0);
        assert_eq!(service.pop_calls(), 0);
        assert_eq!(service.push_calls(), 0);
        assert_eq!(service.remove_calls(), 0);
    }

    #[test]
    fn two_subscriptions_issue_two_calls() {
        let service = stub();
        let completion = service.pop_all_popup(true);

        assert!(block_on(completion.subscribe()).is_ok());
        assert!(block_on(completion.subscribe()).is_ok());
        assert_eq!(service.pop_all_calls(), 2);
    }

    #[test]
    fn animate_flag_is_forwarded_exactly() {
        for animate in [true, false] {
            let service = stub();
            assert!(block_on(service.pop_popup(animate).subscribe()).is_ok());
            assert_eq!(service.pop_calls(), 1);
            assert_eq!(service.last_animate(), Some(animate));
        }
    }

    #[test]
    fn push_forwards_the_page_untouched() {
        let service = stub();
        let page = Rc::new(StubPage);

        assert!(block_on(service.push_popup(Rc::clone(&page), false).subscribe()).is_ok());
        assert_eq!(service.push_calls(), 1);
        assert_eq!(service.last_animate(), Some(false));
        let recorded = service.last_page().expect("page recorded");
        let page_dyn: Rc<dyn PopupPage> = page;
        assert!(Rc::ptr_eq(&recorded, &page_dyn));
    }

    #[test]
    fn remove_forwards_the_page_untouched() {
        let service = stub();
        let page = Rc::new(StubPage);

        assert!(block_on(service.remove_popup(Rc::clone(&page), true).subscribe()).is_ok());
        assert_eq!(service.remove_calls(), 1);
        let recorded = service.last_page().expect("page recorded");
        let page_dyn: Rc<dyn PopupPage> = page;
        assert!(Rc::ptr_eq(&recorded, &page_dyn));
    }

    #[test]
    fn service_failure_passes_through_unchanged() {
        let service = stub();
        service.set_behavior(StubBehavior::Fail(NavigationError::EmptyStack));

        let result = block_on(service.pop_popup(true).subscribe());
        assert_eq!(result, Err(NavigationError::EmptyStack));
    }

    #[test]
    fn hung_service_leaves_the_execution_pending() {
        let service = stub();
        service.set_behavior(StubBehavior::Hang);

        let mut execution = service.pop_all_popup(true).subscribe();
        let waker = noop_waker();
        let mut cx = Context::from_waker(&waker);
        assert!(Pin::new(&mut execution).poll(&mut cx).is_pending());
        assert_eq!(service.pop_all_calls(), 1);
        drop(execution);
    }

    #[test]
    fn stream_accessors_share_the_underlying_source() {
        let service = stub();
        let first = service.popping_stream();
        let second = service.popping_stream();

        let a = Rc::new(Cell::new(0u32));
        let b = Rc::new(Cell::new(0u32));
        let a_clone = Rc::clone(&a);
        let b_clone = Rc::clone(&b);
        let _sub_a = first.subscribe(move |_| a_clone.set(a_clone.get() + 1));
        let _sub_b = second.subscribe(move |_| b_clone.set(b_clone.get() + 1));

        service.raise_popping(&NavigationEvent::new(
            Rc::new(StubPage),
            NavigationDirection::Backward,
        ));
        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 1);
    }

    #[test]
    fn disposing_one_stream_subscriber_spares_the_rest() {
        let service = stub();
        let stream = service.pushed_stream();

        let a = Rc::new(Cell::new(0u32));
        let b = Rc::new(Cell::new(0u32));
        let a_clone = Rc::clone(&a);
        let b_clone = Rc::clone(&b);
        let sub_a = stream.subscribe(move |_| a_clone.set(a_clone.get() + 1));
        let _sub_b = stream.subscribe(move |_| b_clone.set(b_clone.get() + 1));

        let event = NavigationEvent::new(Rc::new(StubPage), NavigationDirection::Forward);
        service.raise_pushed(&event);
        sub_a.dispose();
        service.raise_pushed(&event);

        assert_eq!(a.get(), 1);
        assert_eq!(b.get(), 2);
    }

    #[test]
    fn streams_relay_the_payload() {
        let service = stub();
        let page = Rc::new(StubPage);
        let seen: Rc<std::cell::RefCell<Vec<NavigationEvent>>> =
            Rc::new(std::cell::RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);

        let stream = service.pushing_stream();
        let _sub = stream.subscribe(move |event: &NavigationEvent| {
            seen_clone.borrow_mut().push(event.clone());
        });

        let page_dyn: Rc<dyn PopupPage> = page;
        service.raise_pushing(&NavigationEvent::new(
            Rc::clone(&page_dyn),
            NavigationDirection::Forward,
        ));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert!(Rc::ptr_eq(seen[0].page(), &page_dyn));
        assert!(seen[0].is_forward());
    }

    #[test]
    fn lifecycle_streams_are_independent() {
        let service = stub();
        let popped = Rc::new(Cell::new(0u32));
        let popped_clone = Rc::clone(&popped);
        let _sub = service
            .popped_stream()
            .subscribe(move |_| popped_clone.set(popped_clone.get() + 1));

        // Raising the sibling streams must not leak into `popped`.
        let event = NavigationEvent::new(Rc::new(StubPage), NavigationDirection::Backward);
        service.raise_popping(&event);
        service.raise_pushing(&event);
        service.raise_pushed(&event);
        assert_eq!(popped.get(), 0);

        service.raise_popped(&event);
        assert_eq!(popped.get(), 1);
    }

    #[test]
    fn works_through_a_trait_object_handle() {
        let service: Rc<dyn PopupNavigation> = Rc::new(StubPopupNavigation::new());
        let completion = service.pop_all_popup(false);
        assert!(block_on(completion.subscribe()).is_ok());
    }
}
