//! Session inputs consumed by the core.
//!
//! The role and token are owned by whoever signs the user in. The board only
//! reads them: they arrive through plugin configuration at load time and
//! through `zellij pipe` messages afterwards, and are threaded explicitly
//! into every operation that needs them.

use super::listing::Role;
use std::collections::BTreeMap;
use std::fmt;

/// Caller role and authentication token.
///
/// `Debug` never prints the token.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub role: Role,
    pub token: Option<String>,
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("role", &self.role)
            .field("signed_in", &self.token.is_some())
            .finish()
    }
}

impl Session {
    /// Builds a session from raw stored values.
    #[must_use]
    pub fn new(role: Option<&str>, token: Option<&str>) -> Self {
        Self {
            role: Role::parse(role),
            token: token
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(String::from),
        }
    }

    /// Bearer token, if the user is signed in.
    #[must_use]
    pub fn bearer(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether the applications read should run for this session.
    #[must_use]
    pub fn tracks_applications(&self) -> bool {
        self.token.is_some() && !self.role.is_organization()
    }

    /// Applies a session update received over a pipe.
    ///
    /// Recognized arguments: `role`, `token` and `logout` (clears both).
    /// Returns the updated session; absent arguments keep their value.
    ///
    /// ```
    /// use std::collections::BTreeMap;
    /// use shlichus_board::domain::{Role, Session};
    ///
    /// let mut args = BTreeMap::new();
    /// args.insert("role".to_string(), "female".to_string());
    /// let session = Session::default().updated_from(&args);
    /// assert_eq!(session.role, Role::Female);
    /// ```
    #[must_use]
    pub fn updated_from(&self, args: &BTreeMap<String, String>) -> Self {
        if args.contains_key("logout") {
            return Self::default();
        }
        let mut next = self.clone();
        if let Some(role) = args.get("role") {
            next.role = Role::parse(Some(role));
        }
        if let Some(token) = args.get("token") {
            next.token = Some(token.trim().to_string()).filter(|t| !t.is_empty());
        }
        next
    }
}
