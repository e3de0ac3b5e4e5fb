//! Decoding of host-reported HTTP results.
//!
//! The host reports every completed request as a status code and raw body.
//! When no HTTP exchange happened at all it still reports a (client error)
//! status with the failure text as body, so a non-JSON body on a failed
//! request is read as a transport reason.

use crate::domain::{ApplicationRecord, BoardError, Listing, Result};
use serde_json::Value;

fn is_success(status: u16) -> bool {
    (200..300).contains(&status)
}

/// Error for a non-success status, carrying the best available reason.
fn failure(status: u16, body: &[u8]) -> BoardError {
    match serde_json::from_slice::<Value>(body) {
        Ok(value) => BoardError::Http {
            status,
            message: value
                .get("error")
                .and_then(Value::as_str)
                .map(String::from),
        },
        Err(_) => {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                BoardError::Http {
                    status,
                    message: None,
                }
            } else {
                BoardError::Transport(text)
            }
        }
    }
}

/// Decodes the listings read.
///
/// Array items that do not decode as a [`Listing`] are skipped.
///
/// # Errors
///
/// Fails on a non-success status, an unparsable body, or a body that is not
/// a JSON array.
pub fn parse_listings(status: u16, body: &[u8]) -> Result<Vec<Listing>> {
    if !is_success(status) {
        return Err(failure(status, body));
    }
    let Value::Array(items) = serde_json::from_slice::<Value>(body)? else {
        return Err(BoardError::UnexpectedShape(
            "listings response is not an array".to_string(),
        ));
    };

    let total = items.len();
    let listings: Vec<Listing> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<Listing>(item) {
            Ok(listing) => Some(listing),
            Err(e) => {
                tracing::warn!(index, error = %e, "skipping malformed listing");
                None
            }
        })
        .collect();

    tracing::debug!(total, kept = listings.len(), "listings decoded");
    Ok(listings)
}

/// Decodes the own-applications read into the referenced listing ids.
///
/// # Errors
///
/// Fails on a non-success status, an unparsable body, or a body that is not
/// a JSON array. Callers treat every failure as "nothing to add".
pub fn parse_applications(status: u16, body: &[u8]) -> Result<Vec<String>> {
    if !is_success(status) {
        return Err(failure(status, body));
    }
    let Value::Array(items) = serde_json::from_slice::<Value>(body)? else {
        return Err(BoardError::UnexpectedShape(
            "applications response is not an array".to_string(),
        ));
    };

    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value::<ApplicationRecord>(item).ok())
        .map(|record| record.listing.id().to_string())
        .collect())
}

/// Decodes the application submission result.
///
/// Acceptance is decided by the status alone; the success body is ignored.
///
/// # Errors
///
/// Returns [`BoardError::Http`] with the server's `error` string, or
/// [`BoardError::Transport`] when the request never reached the server.
pub fn parse_apply(status: u16, body: &[u8]) -> Result<()> {
    if is_success(status) {
        Ok(())
    } else {
        Err(failure(status, body))
    }
}
