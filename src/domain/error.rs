//! Error types for the listings board.
//!
//! [`BoardError`] covers every failure the core can observe: HTTP statuses
//! and transport failures reported by the host, undecodable payloads, bad
//! date bounds typed by the user, and configuration or theme problems.
//! Read-path errors are logged by the handler and never reach the user;
//! write-path errors are turned into a notice via [`BoardError::user_message`].

use thiserror::Error;

/// The main error type for board operations.
///
/// # Examples
///
/// ```
/// use shlichus_board::BoardError;
///
/// let err = BoardError::Http { status: 409, message: Some("closed".to_string()) };
/// assert_eq!(err.user_message(), "closed");
/// ```
#[derive(Debug, Error)]
pub enum BoardError {
    /// The API answered with a non-success status.
    ///
    /// `message` holds the server's `error` string when the body carried one.
    #[error("API returned status {status}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Server-provided reason, if any.
        message: Option<String>,
    },

    /// The request never produced an HTTP response (DNS, TLS, offline...).
    #[error("Request failed: {0}")]
    Transport(String),

    /// A response body could not be decoded into the expected shape.
    #[error("Decode error: {0}")]
    Decode(#[from] serde_json::Error),

    /// A response body decoded but had the wrong shape.
    #[error("Unexpected response: {0}")]
    UnexpectedShape(String),

    /// A date bound entered by the user is not `YYYY-MM-DD`.
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    /// Configuration is invalid or missing.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Theme parsing failed.
    #[error("Theme error: {0}")]
    Theme(String),

    /// Filesystem or I/O operation failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl BoardError {
    /// Generic reason shown when an application fails without a better one.
    pub const GENERIC_APPLY_FAILURE: &'static str = "Failed to apply";

    /// Returns the human-readable reason to show to the end user.
    ///
    /// Prefers the server-provided reason, then the transport error text,
    /// and falls back to [`Self::GENERIC_APPLY_FAILURE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Http {
                message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::Transport(reason) if !reason.trim().is_empty() => reason.clone(),
            Self::InvalidDate(_) => self.to_string(),
            _ => Self::GENERIC_APPLY_FAILURE.to_string(),
        }
    }
}

/// A specialized `Result` type for board operations.
pub type Result<T> = std::result::Result<T, BoardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_reason_wins() {
        let err = BoardError::Http {
            status: 400,
            message: Some("Listing is closed".to_string()),
        };
        assert_eq!(err.user_message(), "Listing is closed");
    }

    #[test]
    fn blank_reason_falls_back_to_generic() {
        let err = BoardError::Http {
            status: 500,
            message: Some("   ".to_string()),
        };
        assert_eq!(err.user_message(), BoardError::GENERIC_APPLY_FAILURE);

        let err = BoardError::UnexpectedShape("object".to_string());
        assert_eq!(err.user_message(), BoardError::GENERIC_APPLY_FAILURE);
    }

    #[test]
    fn transport_reason_is_surfaced() {
        let err = BoardError::Transport("connection refused".to_string());
        assert_eq!(err.user_message(), "connection refused");
    }
}
