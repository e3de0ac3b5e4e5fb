//! Side effects to be executed by the plugin runtime.
//!
//! The handler never talks to the host. It returns actions, and the runtime
//! turns them into host calls: web requests and pane visibility changes.
//!
//! ```rust
//! use shlichus_board::api::requests::listings_request;
//! use shlichus_board::app::Action;
//! use shlichus_board::domain::Role;
//!
//! let actions = vec![Action::Request(listings_request("https://api.test", Role::Unset, 1))];
//! assert_eq!(actions.len(), 1);
//! ```

use crate::api::ApiRequest;

/// Commands for the plugin runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Hides the plugin pane.
    CloseFocus,

    /// Issues an HTTP request through the host.
    ///
    /// The result comes back later as an `Event::WebResponse` tagged with the
    /// request's kind.
    Request(ApiRequest),
}

impl Action {
    /// The wrapped request, if this action issues one.
    #[must_use]
    pub const fn request(&self) -> Option<&ApiRequest> {
        match self {
            Self::Request(request) => Some(request),
            Self::CloseFocus => None,
        }
    }
}
