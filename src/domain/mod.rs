//! Domain layer for the listings board.
//!
//! Core types independent of Zellij APIs: the listing and application
//! records served by the API, the caller's role and session inputs, and the
//! error type.
//!
//! - [`error`]: Error types and result aliases
//! - [`listing`]: Listing, application record, role and volunteer gender
//! - [`session`]: Role and token threaded into fetch and apply operations

pub mod error;
pub mod listing;
pub mod session;

pub use error::{BoardError, Result};
pub use listing::{ApplicationRecord, Listing, ListingRef, Role, VolunteerGender};
pub use session::Session;
