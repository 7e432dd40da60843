#![forbid(unsafe_code)]

//! Lifecycle notification payloads.

use std::fmt;
use std::rc::Rc;

use crate::service::PopupPage;

/// Direction of a popup transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationDirection {
    /// The page is being presented (pushed onto the popup stack).
    Forward,
    /// The page is being dismissed (removed from the popup stack).
    Backward,
}

/// Payload of a popup lifecycle notification: which page is in transition
/// and which way it is moving.
///
/// One value is produced per notification; the adapters relay it to
/// subscribers and retain nothing. Cloning clones the page handle, not the
/// page.
#[derive(Clone)]
pub struct NavigationEvent {
    page: Rc<dyn PopupPage>,
    direction: NavigationDirection,
}

impl NavigationEvent {
    /// Pair a page with its transition direction.
    #[must_use]
    pub fn new(page: Rc<dyn PopupPage>, direction: NavigationDirection) -> Self {
        Self { page, direction }
    }

    /// The page in transition.
    #[must_use]
    pub fn page(&self) -> &Rc<dyn PopupPage> {
        &self.page
    }

    /// Which way the page is moving.
    #[must_use]
    pub fn direction(&self) -> NavigationDirection {
        self.direction
    }

    /// Whether this is a presentation (as opposed to a dismissal).
    #[must_use]
    pub fn is_forward(&self) -> bool {
        self.direction == NavigationDirection::Forward
    }
}

impl fmt::Debug for NavigationEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Pages are not required to be Debug; identify them by address.
        f.debug_struct("NavigationEvent")
            .field("page", &Rc::as_ptr(&self.page))
            .field("direction", &self.direction)
            .finish()
    }
}
