//! Shlichus board: a Zellij plugin listing volunteer opportunities.
//!
//! The board fetches volunteer-opportunity listings from the Shlichus REST
//! API, filters and sorts them client-side, and lets a signed-in volunteer
//! apply to one:
//! - Role-scoped listings read and own-applications read
//! - Search, gender, date-range and sort filters over the fetched listings
//! - A single guarded apply action with success/failure notices
//! - Organization accounts see the board without apply controls

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! │  keys / pipe messages / web results → Event         │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling                                   │
//! │  - Action dispatching (web requests, hide)          │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ API Layer     │   │ Filter Engine │
//! │ (ui/)         │   │ (api/)        │   │ (filter/)     │
//! │ - Rendering   │   │ - Requests    │   │ - Predicate   │
//! │ - Theming     │   │ - Responses   │   │ - Sorting     │
//! │ - Components  │   │ - Context tag │   │ - Dates       │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │                    │                    │
//! ┌─────────────────────────────────────────────────────┐
//! │  Domain & Infrastructure                            │
//! │  - Listing, Role, Session, errors (domain/)         │
//! │  - Sandbox paths (infrastructure/)                  │
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Observability (observability/)                     │
//! │  - OpenTelemetry tracing to a rotating OTLP file    │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! Everything except `main.rs` is host-independent: HTTP goes out as
//! [`Action::Request`] values and comes back as [`Event::WebResponse`], so
//! the whole board can be driven from plain tests.
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/shlichus-board.wasm" {
//!         api_url "https://shlichus-backend-47a68a0c2980.herokuapp.com"
//!         role "female"
//!         token "eyJhbGciOi..."
//!         theme "catppuccin-latte"
//!         trace_level "debug"
//!     }
//! }
//! ```
//!
//! The session can be replaced at runtime without reloading:
//!
//! ```text
//! zellij pipe --name shlichus-session --args "role=male,token=eyJ..."
//! zellij pipe --name shlichus-session --args "logout=true"
//! ```
//!
//! # Example
//!
//! ```rust
//! use std::collections::BTreeMap;
//! use shlichus_board::{handle_event, initialize, Config, Event};
//!
//! let config = Config::from_zellij_with_env(&BTreeMap::new(), None);
//! let mut state = initialize(&config);
//!
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert_eq!(
//!     actions[0].request().unwrap().url,
//!     "https://shlichus-backend-47a68a0c2980.herokuapp.com/api/listings"
//! );
//! # Ok::<(), shlichus_board::BoardError>(())
//! ```

pub mod api;
pub mod app;
pub mod domain;
pub mod filter;
pub mod infrastructure;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event, InputMode};
pub use domain::{BoardError, Listing, Result, Role, Session};
pub use ui::Theme;

use std::collections::BTreeMap;

/// API used when neither the configuration nor the environment names one.
pub const DEFAULT_API_URL: &str = "https://shlichus-backend-47a68a0c2980.herokuapp.com";

/// Environment variable overriding the default API base URL.
pub const API_URL_ENV: &str = "SHLICHUS_API_URL";

/// Pipe name carrying session updates.
pub const SESSION_PIPE: &str = "shlichus-session";

/// Plugin configuration parsed from Zellij's configuration system.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// API base URL without trailing slash.
    pub api_url: String,

    /// Initial role (`male`, `female`, `organization`).
    pub role: Option<String>,

    /// Initial bearer token.
    pub token: Option<String>,

    /// Built-in theme name: `catppuccin-mocha` or `catppuccin-latte`.
    /// Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. `~` maps to the sandbox home.
    pub theme_file: Option<String>,

    /// `EnvFilter` directive for tracing. Default: `"info"`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            role: None,
            token: None,
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map, reading the
    /// URL override from the process environment.
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let env_url = std::env::var(API_URL_ENV).ok();
        Self::from_zellij_with_env(config, env_url.as_deref())
    }

    /// Parses configuration with an explicit environment override.
    ///
    /// The base URL is taken from `api_url`, then `env_api_url`, then
    /// [`DEFAULT_API_URL`]; blank values are skipped and one trailing `/` is
    /// trimmed.
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use shlichus_board::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("role".to_string(), "male".to_string());
    ///
    /// let config = Config::from_zellij_with_env(&map, Some("http://localhost:5000/"));
    /// assert_eq!(config.api_url, "http://localhost:5000");
    /// assert_eq!(config.role.as_deref(), Some("male"));
    /// ```
    #[must_use]
    pub fn from_zellij_with_env(
        config: &BTreeMap<String, String>,
        env_api_url: Option<&str>,
    ) -> Self {
        let non_blank = |key: &str| {
            config
                .get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let api_url = non_blank("api_url")
            .or_else(|| {
                env_api_url
                    .map(str::trim)
                    .filter(|v| !v.is_empty())
                    .map(String::from)
            })
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let api_url = api_url.strip_suffix('/').unwrap_or(&api_url).to_string();

        Self {
            api_url,
            role: non_blank("role"),
            token: non_blank("token"),
            theme_name: non_blank("theme"),
            theme_file: non_blank("theme_file"),
            trace_level: non_blank("trace_level"),
        }
    }

    /// Session described by the configured role and token.
    #[must_use]
    pub fn session(&self) -> Session {
        Session::new(self.role.as_deref(), self.token.as_deref())
    }

    /// Resolves the theme: file first, then built-in name, then the default.
    ///
    /// Failures are logged and fall back to the default theme.
    #[must_use]
    pub fn theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            let path = infrastructure::expand_tilde(theme_file);
            match Theme::from_file(&path) {
                Ok(theme) => return theme,
                Err(e) => {
                    tracing::warn!(theme_file = %path, error = %e, "failed to load theme from file, using default");
                }
            }
        }
        self.theme_name.as_ref().map_or_else(Theme::default, |name| {
            Theme::from_name(name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Creates the board state for a configuration.
///
/// Nothing is fetched here; the first reads are issued once the host grants
/// permissions (see [`Event::PermissionsGranted`]).
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(api_url = %config.api_url, "initializing shlichus board");
    AppState::new(config.api_url.clone(), config.session(), config.theme())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn url_precedence_is_config_then_env_then_default() {
        let cfg = map(&[("api_url", "https://config.test/")]);
        assert_eq!(
            Config::from_zellij_with_env(&cfg, Some("https://env.test")).api_url,
            "https://config.test"
        );
        assert_eq!(
            Config::from_zellij_with_env(&BTreeMap::new(), Some("https://env.test")).api_url,
            "https://env.test"
        );
        assert_eq!(
            Config::from_zellij_with_env(&map(&[("api_url", "  ")]), Some("")).api_url,
            DEFAULT_API_URL
        );
    }

    #[test]
    fn session_comes_from_role_and_token() {
        let cfg = Config::from_zellij_with_env(
            &map(&[("role", "organization"), ("token", "abc")]),
            None,
        );
        let session = cfg.session();
        assert_eq!(session.role, Role::Organization);
        assert_eq!(session.bearer(), Some("abc"));
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let cfg = Config::from_zellij_with_env(&map(&[("theme", "nope")]), None);
        assert_eq!(cfg.theme().name, "catppuccin-mocha");
        let cfg = Config::from_zellij_with_env(&map(&[("theme", "catppuccin-latte")]), None);
        assert_eq!(cfg.theme().name, "catppuccin-latte");
    }

    #[test]
    fn missing_theme_file_falls_back() {
        let cfg = Config::from_zellij_with_env(&map(&[("theme_file", "/nope/theme.toml")]), None);
        assert_eq!(cfg.theme().name, "catppuccin-mocha");
    }

    #[test]
    fn initialize_starts_loading_with_config_session() {
        let cfg = Config::from_zellij_with_env(&map(&[("role", "female")]), None);
        let state = initialize(&cfg);
        assert!(state.loading);
        assert_eq!(state.session.role, Role::Female);
        assert_eq!(state.base_url, DEFAULT_API_URL);
    }
}
