//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the pure core (`api`,
//! `filter`, `domain`). Data flows one way:
//!
//! ```text
//! User Input ─┐
//! Session pipe ├→ Event → handle_event → State Mutations → Actions → Host calls
//! Web results ─┘                                                      │
//!      ↑                                                               │
//!      └──────────────────────── WebRequestResult ────────────────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing logic and state transition coordinator
//! - [`modes`]: Input mode types
//! - [`state`]: Central application state container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{FilterField, InputMode};
pub use state::{AppState, Notice};
