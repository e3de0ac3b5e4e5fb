//! Zellij plugin wrapper and entry point.
//!
//! This is the thin integration layer between the board library and the
//! Zellij plugin system. It translates host events into library events,
//! feeds them to `handle_event`, and turns the returned actions into host
//! calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Request `WebAccess`, `ReadCliPipes`,
//!    `ChangeApplicationState`; the first fetch starts once granted
//! 3. **Update**: Keys and web results become library events
//! 4. **Pipe**: `shlichus-session` messages replace the role and token
//! 5. **Render**: Call library render function
//!
//! # Event Mapping
//!
//! - `Key(..)` → navigation, filter and apply events (see keybindings)
//! - `WebRequestResult(status, _, body, context)` → `Event::WebResponse`
//!   with the request kind decoded from `context`
//! - `PermissionRequestResult` → `Event::PermissionsGranted` / `PermissionsDenied`
//!
//! # Keybindings
//!
//! Global (all modes):
//! - `Ctrl+n`: Move down
//! - `Ctrl+p`: Move up
//!
//! In normal mode:
//! - `j`/`Down`, `k`/`Up`: Move selection
//! - `Enter`/`a`: Apply to selected listing
//! - `/`: Edit search
//! - `g`: Cycle gender filter
//! - `[` / `]`: Edit start / end date bound
//! - `o`: Cycle sort order
//! - `c`: Clear filters
//! - `r`: Refetch
//! - `Esc`: Dismiss notice
//! - `q`: Close plugin
//!
//! While editing a filter:
//! - Characters: Edit the field
//! - `Backspace`: Delete a character
//! - `Enter`: Commit
//! - `Esc`: Cancel

#![allow(clippy::multiple_crate_versions)]

#[cfg(target_family = "wasm")]
use std::collections::BTreeMap;
#[cfg(target_family = "wasm")]
use zellij_tile::prelude::*;

#[cfg(target_family = "wasm")]
use shlichus_board::api::{HttpMethod, RequestKind};
#[cfg(target_family = "wasm")]
use shlichus_board::{handle_event, Action, Config, Event, InputMode, Session, SESSION_PIPE};

#[cfg(target_family = "wasm")]
register_plugin!(State);

/// Native builds only exist so the library's tests can link.
#[cfg(not(target_family = "wasm"))]
fn main() {
    eprintln!("shlichus-board is a Zellij plugin; build it for wasm32-wasip1");
}

/// Plugin state wrapper around the library's `AppState`.
#[cfg(target_family = "wasm")]
struct State {
    app: shlichus_board::AppState,
}

#[cfg(target_family = "wasm")]
impl Default for State {
    fn default() -> Self {
        Self {
            app: shlichus_board::initialize(&Config::default()),
        }
    }
}

#[cfg(target_family = "wasm")]
impl ZellijPlugin for State {
    /// Parses configuration, initializes state, requests permissions and
    /// subscribes to events.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        shlichus_board::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(
            api_url = %config.api_url,
            role = ?config.role,
            has_token = config.token.is_some(),
            "parsed configuration"
        );
        self.app = shlichus_board::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ReadCliPipes,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a host event, delegates to `handle_event`, and executes the
    /// resulting actions. Returns whether to re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Granted) => {
                tracing::debug!("permissions granted");
                Event::PermissionsGranted
            }
            zellij_tile::prelude::Event::PermissionRequestResult(PermissionStatus::Denied) => {
                Event::PermissionsDenied
            }
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    /// Accepts session updates from `zellij pipe --name shlichus-session`.
    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        if pipe_message.name != SESSION_PIPE {
            tracing::debug!(pipe = %pipe_message.name, "ignoring pipe message");
            return false;
        }
        let next: Session = self.app.session.updated_from(&pipe_message.args);
        self.dispatch(&Event::SessionChanged(next))
    }

    fn render(&mut self, rows: usize, cols: usize) {
        shlichus_board::ui::render(&self.app, rows, cols);
    }
}

#[cfg(target_family = "wasm")]
impl State {
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(
                    action_count = actions.len(),
                    should_render = should_render,
                    "event handled successfully"
                );
                for a in actions {
                    Self::execute_action(&a);
                }
                should_render
            }
            Err(e) => {
                tracing::error!(error = %e, "error handling event");
                false
            }
        }
    }

    /// Gets a string name for a Zellij event for logging purposes.
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => {
                format!("WebRequestResult({status})")
            }
            zellij_tile::prelude::Event::PermissionRequestResult(..) => {
                "PermissionRequestResult".to_string()
            }
            _ => "Other".to_string(),
        }
    }

    fn map_web_result(
        status: u16,
        body: Vec<u8>,
        context: &BTreeMap<String, String>,
    ) -> Option<Event> {
        let Some(kind) = RequestKind::from_context(context) else {
            tracing::warn!(status, context = ?context, "web result with unknown context");
            return None;
        };
        tracing::debug!(status, kind = ?kind, body_len = body.len(), "web result");
        Some(Event::WebResponse { kind, status, body })
    }

    /// Maps keyboard events to application events.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.bare_key == BareKey::Char('n') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyDown);
        }
        if key.bare_key == BareKey::Char('p') && key.has_modifiers(&[KeyModifier::Ctrl]) {
            return Some(Event::KeyUp);
        }

        if self.app.input_mode.is_editing() {
            return Some(match key.bare_key {
                BareKey::Enter => Event::CommitEdit,
                BareKey::Esc => Event::CancelEdit,
                BareKey::Backspace => Event::Backspace,
                BareKey::Down => Event::KeyDown,
                BareKey::Up => Event::KeyUp,
                BareKey::Char(c) => Event::Char(c),
                _ => return None,
            });
        }

        debug_assert_eq!(self.app.input_mode, InputMode::Normal);
        Some(match key.bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter | BareKey::Char('a') => Event::ApplySelected,
            BareKey::Char('/') => Event::EditSearch,
            BareKey::Char('g') => Event::CycleGender,
            BareKey::Char('o') => Event::CycleSort,
            BareKey::Char('[') => Event::EditStartDate,
            BareKey::Char(']') => Event::EditEndDate,
            BareKey::Char('c') => Event::ClearFilters,
            BareKey::Char('r') => Event::Refresh,
            BareKey::Esc => Event::DismissNotice,
            BareKey::Char('q') => Event::CloseFocus,
            _ => return None,
        })
    }

    /// Executes an action returned from event handling.
    ///
    /// - `CloseFocus`: Hide the plugin pane
    /// - `Request`: Issue the HTTP request through the host, tagging it with
    ///   its kind so the result can be routed back
    #[tracing::instrument(level = "debug", skip(action))]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Request(request) => {
                tracing::debug!(
                    url = %request.url,
                    method = ?request.method,
                    headers = ?request.redacted_headers(),
                    "issuing web request"
                );
                let verb = match request.method {
                    HttpMethod::Get => HttpVerb::Get,
                    HttpMethod::Post => HttpVerb::Post,
                };
                web_request(
                    &request.url,
                    verb,
                    request.headers.clone(),
                    request.body.clone(),
                    request.kind.to_context(),
                );
            }
        }
    }
}
