//! Wire layer for the remote listings API.
//!
//! The plugin never performs I/O itself: [`requests`] builds plain
//! [`ApiRequest`] values that the runtime hands to the host's web request
//! facility, and [`responses`] decodes the status and body the host reports
//! back. Each request carries a small context map identifying what it was
//! for, so results can be routed when they arrive in any order.
//!
//! # Endpoints
//!
//! - `GET  {base}/api/listings[?volunteerGender=male|female]`
//! - `GET  {base}/api/applications/my` (bearer token)
//! - `POST {base}/api/applications` (bearer token, `{"listingId": ...}`)

pub mod requests;
pub mod responses;

pub use requests::{ApiRequest, HttpMethod, RequestKind};
pub use responses::{parse_applications, parse_apply, parse_listings};
