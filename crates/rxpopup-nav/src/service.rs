#![forbid(unsafe_code)]

//! The popup navigation capability consumed by the adapters.
//!
//! # Design
//!
//! The host toolkit exposes popup navigation as a process-wide service
//! singleton. Here that surface is an injected capability instead: callers
//! hold an `Rc<dyn PopupNavigation>` (or a concrete service type) and the
//! adapters never reach for global state, so a test can substitute a fake
//! without touching anything process-wide.
//!
//! The trait is `?Send`: popup navigation belongs to the UI dispatch
//! context and the whole adapter layer is single-threaded.

use std::any::Any;
use std::fmt;
use std::rc::Rc;

use async_trait::async_trait;
use rxpopup_reactive::Event;

use crate::events::NavigationEvent;

/// Marker bound for values the popup service accepts as pages.
///
/// The adapters forward pages untouched and never inspect them; the bound
/// only records the host-toolkit constraint that navigation payloads are
/// popup pages. Pages travel as `Rc<dyn PopupPage>`.
pub trait PopupPage: Any {}

/// Failures reported by the host popup toolkit.
///
/// The adapters pass these through unchanged — no retry, no wrapping, no
/// translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// A dismissal was requested while the popup stack was empty.
    EmptyStack,
    /// The targeted page is not on the popup stack.
    PageNotOnStack,
    /// Any other failure surfaced by the host toolkit.
    Host(String),
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyStack => write!(f, "popup stack is empty"),
            Self::PageNotOnStack => write!(f, "page is not on the popup stack"),
            Self::Host(msg) => write!(f, "host toolkit failure: {msg}"),
        }
    }
}

impl std::error::Error for NavigationError {}

/// Asynchronous popup navigation plus its four lifecycle notifications.
///
/// The async operations resolve when the host toolkit finishes the
/// corresponding transition. The event accessors return cloned handles to
/// the service's shared notification sources — every caller attaches to
/// the same underlying multicast event.
#[async_trait(?Send)]
pub trait PopupNavigation {
    /// Remove every popup page from the stack, last-in first-out.
    async fn pop_all(&self, animate: bool) -> Result<(), NavigationError>;

    /// Remove the topmost popup page.
    async fn pop(&self, animate: bool) -> Result<(), NavigationError>;

    /// Present `page` on top of the stack.
    async fn push(&self, page: Rc<dyn PopupPage>, animate: bool) -> Result<(), NavigationError>;

    /// Remove `page` from anywhere in the stack.
    async fn remove_page(
        &self,
        page: Rc<dyn PopupPage>,
        animate: bool,
    ) -> Result<(), NavigationError>;

    /// Handle to the pre-dismiss notification source.
    fn popping(&self) -> Event<NavigationEvent>;

    /// Handle to the post-dismiss notification source.
    fn popped(&self) -> Event<NavigationEvent>;

    /// Handle to the pre-present notification source.
    fn pushing(&self) -> Event<NavigationEvent>;

    /// Handle to the post-present notification source.
    fn pushed(&self) -> Event<NavigationEvent>;
}
