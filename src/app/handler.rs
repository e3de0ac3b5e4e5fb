//! Event handling and state transition logic.
//!
//! This module implements the handler that turns user input, session updates
//! and completed web requests into state changes and action sequences. It is
//! the only place where the fetcher, the filter engine and the apply action
//! meet.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `CloseFocus`
//! - **Filters**: `EditSearch`, `EditStartDate`, `EditEndDate`, `Char`,
//!   `Backspace`, `CommitEdit`, `CancelEdit`, `CycleGender`, `CycleSort`,
//!   `ClearFilters`
//! - **Fetching**: `PermissionsGranted`, `PermissionsDenied`, `Refresh`,
//!   `SessionChanged`, `WebResponse`
//! - **Applying**: `ApplySelected`, `Apply`, `DismissNotice`
//!
//! # Example
//!
//! ```rust
//! use shlichus_board::app::{handle_event, AppState, Event};
//! use shlichus_board::domain::Session;
//! use shlichus_board::ui::Theme;
//!
//! let mut state = AppState::new("https://api.test", Session::default(), Theme::default());
//! let (render, actions) = handle_event(&mut state, &Event::PermissionsGranted)?;
//! assert!(render);
//! assert_eq!(actions.len(), 1); // listings read only, nobody is signed in
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use super::modes::{FilterField, InputMode};
use super::state::{Notice, APPLY_SUCCESS_MESSAGE, SIGN_IN_REQUIRED_MESSAGE};
use crate::api::requests::{applications_request, apply_request, listings_request};
use crate::api::{parse_applications, parse_apply, parse_listings, RequestKind};
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::Session;
use crate::filter::dates;
use std::collections::BTreeSet;

/// Events triggered by user input, the session owner, or the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves selection down by one row (wraps to top).
    KeyDown,
    /// Moves selection up by one row (wraps to bottom).
    KeyUp,
    /// Hides the plugin pane.
    CloseFocus,

    /// Applies to the highlighted listing.
    ApplySelected,
    /// Applies to a listing by id.
    Apply { listing_id: String },
    /// Clears the notice line.
    DismissNotice,

    /// Starts editing the search text.
    EditSearch,
    /// Starts editing the start-date lower bound.
    EditStartDate,
    /// Starts editing the end-date upper bound.
    EditEndDate,
    /// Appends a character to the field being edited.
    Char(char),
    /// Removes the last character of the field being edited.
    Backspace,
    /// Finishes the current edit.
    CommitEdit,
    /// Abandons the current edit, restoring the previous value.
    CancelEdit,

    CycleGender,
    CycleSort,
    ClearFilters,

    /// Re-issues the listings and applications reads.
    Refresh,

    /// The host granted the permissions needed for web access.
    PermissionsGranted,
    /// The host refused them.
    PermissionsDenied,

    /// New role and token from the session owner.
    SessionChanged(Session),

    /// A web request issued by this plugin completed.
    ///
    /// `status` and `body` are exactly what the host reported; decoding
    /// happens here so the event stays plain data.
    WebResponse {
        kind: RequestKind,
        status: u16,
        body: Vec<u8>,
    },
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// Whether the UI needs a re-render, and the actions to execute in order.
///
/// # Errors
///
/// Currently infallible; the `Result` mirrors the runtime contract so new
/// fallible transitions propagate with `?`. Failed reads are logged and
/// failed writes become notices rather than errors.
///
/// # Example
///
/// ```rust
/// use shlichus_board::app::{handle_event, AppState, Event};
/// use shlichus_board::domain::Session;
/// use shlichus_board::ui::Theme;
///
/// let mut state = AppState::new("https://api.test", Session::default(), Theme::default());
/// let (render, actions) = handle_event(&mut state, &Event::KeyDown)?;
/// assert!(render);
/// assert!(actions.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),

        Event::ApplySelected => {
            let Some(listing) = state.selected_listing() else {
                tracing::debug!("no listing selected");
                return Ok((false, vec![]));
            };
            let listing_id = listing.id.clone();
            Ok(begin_apply(state, &listing_id))
        }
        Event::Apply { listing_id } => Ok(begin_apply(state, listing_id)),
        Event::DismissNotice => Ok((state.notice.take().is_some(), vec![])),

        Event::EditSearch => {
            state.search_backup.clone_from(&state.criteria.search);
            state.input_mode = InputMode::Editing(FilterField::Search);
            Ok((true, vec![]))
        }
        Event::EditStartDate => {
            state.edit_buffer.clone_from(&state.criteria.start_after);
            state.input_mode = InputMode::Editing(FilterField::StartDate);
            Ok((true, vec![]))
        }
        Event::EditEndDate => {
            state.edit_buffer.clone_from(&state.criteria.end_before);
            state.input_mode = InputMode::Editing(FilterField::EndDate);
            Ok((true, vec![]))
        }
        Event::Char(c) => match state.input_mode {
            InputMode::Normal => Ok((false, vec![])),
            InputMode::Editing(FilterField::Search) => {
                state.criteria.search.push(*c);
                tracing::trace!(search = %state.criteria.search, "search updated");
                state.refresh_view();
                Ok((true, vec![]))
            }
            InputMode::Editing(_) => {
                state.edit_buffer.push(*c);
                Ok((true, vec![]))
            }
        },
        Event::Backspace => match state.input_mode {
            InputMode::Normal => Ok((false, vec![])),
            InputMode::Editing(FilterField::Search) => {
                state.criteria.search.pop();
                state.refresh_view();
                Ok((true, vec![]))
            }
            InputMode::Editing(_) => {
                state.edit_buffer.pop();
                Ok((true, vec![]))
            }
        },
        Event::CommitEdit => {
            let InputMode::Editing(field) = state.input_mode else {
                return Ok((false, vec![]));
            };
            if field == FilterField::Search {
                state.input_mode = InputMode::Normal;
                return Ok((true, vec![]));
            }
            match dates::validate_bound(&state.edit_buffer) {
                Ok(bound) => {
                    if field == FilterField::StartDate {
                        state.criteria.start_after = bound;
                    } else {
                        state.criteria.end_before = bound;
                    }
                    state.edit_buffer.clear();
                    state.input_mode = InputMode::Normal;
                    state.refresh_view();
                }
                Err(e) => {
                    tracing::debug!(error = %e, "rejected date bound");
                    state.notice = Some(Notice::failure(e.user_message()));
                }
            }
            Ok((true, vec![]))
        }
        Event::CancelEdit => {
            let InputMode::Editing(field) = state.input_mode else {
                return Ok((false, vec![]));
            };
            if field == FilterField::Search {
                state.criteria.search = std::mem::take(&mut state.search_backup);
                state.refresh_view();
            }
            state.edit_buffer.clear();
            state.input_mode = InputMode::Normal;
            Ok((true, vec![]))
        }

        Event::CycleGender => {
            state.criteria.cycle_gender();
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::CycleSort => {
            state.criteria.sort = state.criteria.sort.next();
            state.refresh_view();
            Ok((true, vec![]))
        }
        Event::ClearFilters => {
            state.criteria.clear();
            state.refresh_view();
            Ok((true, vec![]))
        }

        Event::Refresh => {
            if !state.permissions_granted {
                tracing::debug!("refresh ignored before permissions are granted");
                return Ok((false, vec![]));
            }
            Ok((true, fetch_all(state)))
        }
        Event::PermissionsGranted => {
            state.permissions_granted = true;
            Ok((true, fetch_all(state)))
        }
        Event::PermissionsDenied => {
            tracing::warn!("web access permission denied");
            state.permissions_granted = false;
            state.loading = false;
            state.notice = Some(Notice::failure("Web access permission was denied"));
            Ok((true, vec![]))
        }

        Event::SessionChanged(session) => {
            if &state.session == session {
                return Ok((false, vec![]));
            }
            let role_changed = state.session.role != session.role;
            let token_changed = state.session.token != session.token;
            tracing::info!(
                role = session.role.label(),
                signed_in = session.bearer().is_some(),
                role_changed,
                token_changed,
                "session updated"
            );
            state.session = session.clone();
            state.session_generation += 1;
            state.applications_generation += 1;
            if token_changed {
                state.applied.clear();
                state.applied_since_read.clear();
            }

            if !state.permissions_granted {
                return Ok((true, vec![]));
            }
            if role_changed {
                return Ok((true, fetch_all(state)));
            }
            Ok((true, read_applications(state).into_iter().collect()))
        }

        Event::WebResponse { kind, status, body } => {
            Ok((settle(state, kind, *status, body), vec![]))
        }
    }
}

/// Issues the listings read under a fresh generation, plus the applications
/// read when the session tracks them.
fn fetch_all(state: &mut AppState) -> Vec<Action> {
    state.listings_generation += 1;
    state.loading = true;

    let mut actions = vec![Action::Request(listings_request(
        &state.base_url,
        state.session.role,
        state.listings_generation,
    ))];
    actions.extend(read_applications(state));

    tracing::debug!(
        generation = state.listings_generation,
        requests = actions.len(),
        "fetching"
    );
    actions
}

/// Issues the applications read under a fresh generation, if the session
/// tracks applications.
fn read_applications(state: &mut AppState) -> Option<Action> {
    let request = applications_request(
        &state.base_url,
        &state.session,
        state.applications_generation + 1,
    )?;
    state.applications_generation += 1;
    state.applied_since_read.clear();
    Some(Action::Request(request))
}

fn begin_apply(state: &mut AppState, listing_id: &str) -> (bool, Vec<Action>) {
    if state.applying {
        tracing::debug!(listing_id, "apply ignored, another application is in flight");
        return (false, vec![]);
    }
    if state.session.role.is_organization() {
        tracing::debug!(listing_id, "organizations cannot apply");
        return (false, vec![]);
    }
    if state.applied.contains(listing_id) {
        tracing::debug!(listing_id, "already applied");
        return (false, vec![]);
    }
    let Some(token) = state.session.bearer() else {
        state.notice = Some(Notice::failure(SIGN_IN_REQUIRED_MESSAGE));
        return (true, vec![]);
    };

    let request = apply_request(&state.base_url, token, listing_id, state.session_generation);
    state.applying = true;
    tracing::info!(listing_id, "applying");
    (true, vec![Action::Request(request)])
}

/// Folds a completed request into the state. Returns whether to re-render.
fn settle(state: &mut AppState, kind: &RequestKind, status: u16, body: &[u8]) -> bool {
    match kind {
        RequestKind::Listings { generation } => {
            if *generation != state.listings_generation {
                tracing::debug!(
                    generation,
                    latest = state.listings_generation,
                    "ignoring stale listings response"
                );
                return false;
            }
            state.loading = false;
            match parse_listings(status, body) {
                Ok(listings) => {
                    tracing::info!(count = listings.len(), "listings loaded");
                    state.listings = listings;
                    state.refresh_view();
                }
                Err(e) => {
                    tracing::error!(status, error = %e, "failed to fetch listings");
                }
            }
            true
        }
        RequestKind::Applications { generation } => {
            if *generation != state.applications_generation {
                tracing::debug!(
                    generation,
                    latest = state.applications_generation,
                    "ignoring stale applications response"
                );
                return false;
            }
            match parse_applications(status, body) {
                Ok(ids) => {
                    tracing::info!(count = ids.len(), "applications loaded");
                    let mut applied: BTreeSet<String> = ids.into_iter().collect();
                    applied.append(&mut state.applied_since_read);
                    state.applied = applied;
                    true
                }
                Err(e) => {
                    tracing::warn!(status, error = %e, "failed to fetch applications");
                    false
                }
            }
        }
        RequestKind::Apply {
            listing_id,
            session,
        } => {
            state.applying = false;
            if *session != state.session_generation {
                tracing::debug!(listing_id = %listing_id, "ignoring apply result from a previous session");
                return true;
            }
            match parse_apply(status, body) {
                Ok(()) => {
                    tracing::info!(listing_id = %listing_id, "application accepted");
                    state.applied.insert(listing_id.clone());
                    state.applied_since_read.insert(listing_id.clone());
                    state.notice = Some(Notice::success(APPLY_SUCCESS_MESSAGE));
                }
                Err(e) => {
                    tracing::warn!(listing_id = %listing_id, status, error = %e, "application failed");
                    state.notice = Some(Notice::failure(e.user_message()));
                }
            }
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HttpMethod;
    use crate::domain::Listing;
    use crate::ui::viewmodel::NoticeTone;
    use crate::ui::Theme;

    fn signed_in(role: &str) -> AppState {
        let mut state = AppState::new(
            "https://api.test",
            Session::new(Some(role), Some("tok")),
            Theme::default(),
        );
        state.permissions_granted = true;
        state.loading = false;
        state
    }

    fn load(state: &mut AppState, listings: Vec<Listing>) {
        state.listings = listings;
        state.refresh_view();
    }

    fn requests(actions: &[Action]) -> Vec<&crate::api::ApiRequest> {
        actions.iter().filter_map(Action::request).collect()
    }

    #[test]
    fn mount_fetches_listings_and_applications() {
        let mut state = AppState::new(
            "https://api.test",
            Session::new(Some("female"), Some("tok")),
            Theme::default(),
        );
        let (_, actions) = handle_event(&mut state, &Event::PermissionsGranted).unwrap();
        let sent = requests(&actions);
        assert_eq!(sent.len(), 2);
        assert_eq!(
            sent[0].url,
            "https://api.test/api/listings?volunteerGender=female"
        );
        assert_eq!(sent[1].url, "https://api.test/api/applications/my");
        assert!(state.loading);
        assert_eq!(state.listings_generation, 1);
    }

    #[test]
    fn organization_mount_skips_applications() {
        let mut state = signed_in("organization");
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        assert_eq!(requests(&actions).len(), 1);
    }

    #[test]
    fn refresh_waits_for_permissions() {
        let mut state = AppState::new("https://api.test", Session::default(), Theme::default());
        let (render, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn listings_failure_keeps_previous_collection() {
        let mut state = signed_in("male");
        load(&mut state, vec![Listing::new("a", "A")]);
        handle_event(&mut state, &Event::Refresh).unwrap();

        let event = Event::WebResponse {
            kind: RequestKind::Listings { generation: 1 },
            status: 500,
            body: b"boom".to_vec(),
        };
        handle_event(&mut state, &event).unwrap();
        assert!(!state.loading);
        assert_eq!(state.listings.len(), 1);
        assert!(state.notice.is_none());
    }

    #[test]
    fn applications_failure_leaves_applied_set() {
        let mut state = signed_in("male");
        state.applied.insert("kept".to_string());
        let event = Event::WebResponse {
            kind: RequestKind::Applications { generation: 0 },
            status: 200,
            body: br#"{"message":"not a list"}"#.to_vec(),
        };
        let (render, _) = handle_event(&mut state, &event).unwrap();
        assert!(!render);
        assert!(state.applied.contains("kept"));
    }

    #[test]
    fn apply_without_token_asks_to_sign_in() {
        let mut state = signed_in("male");
        state.session.token = None;
        load(&mut state, vec![Listing::new("a", "A")]);
        let (_, actions) = handle_event(&mut state, &Event::ApplySelected).unwrap();
        assert!(actions.is_empty());
        assert!(!state.applying);
        let notice = state.notice.unwrap();
        assert_eq!(notice.tone, NoticeTone::Failure);
        assert_eq!(notice.message, SIGN_IN_REQUIRED_MESSAGE);
    }

    #[test]
    fn apply_is_blocked_for_organizations_and_applied_listings() {
        let mut state = signed_in("organization");
        let apply = Event::Apply {
            listing_id: "a".to_string(),
        };
        assert!(handle_event(&mut state, &apply).unwrap().1.is_empty());

        let mut state = signed_in("male");
        state.applied.insert("a".to_string());
        assert!(handle_event(&mut state, &apply).unwrap().1.is_empty());
        assert!(!state.applying);
    }

    #[test]
    fn apply_posts_once_and_settles() {
        let mut state = signed_in("male");
        let apply = Event::Apply {
            listing_id: "X1".to_string(),
        };
        let (_, actions) = handle_event(&mut state, &apply).unwrap();
        let sent = requests(&actions);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].method, HttpMethod::Post);
        assert!(state.applying);

        let (_, again) = handle_event(&mut state, &apply).unwrap();
        assert!(again.is_empty());

        let done = Event::WebResponse {
            kind: RequestKind::Apply {
                listing_id: "X1".to_string(),
                session: 0,
            },
            status: 201,
            body: br#"{"ok":true}"#.to_vec(),
        };
        handle_event(&mut state, &done).unwrap();
        assert!(!state.applying);
        assert!(state.applied.contains("X1"));
        assert_eq!(
            state.notice.as_ref().map(|n| n.message.as_str()),
            Some(APPLY_SUCCESS_MESSAGE)
        );
    }

    #[test]
    fn apply_failure_falls_back_to_generic_reason() {
        let mut state = signed_in("male");
        handle_event(
            &mut state,
            &Event::Apply {
                listing_id: "X1".to_string(),
            },
        )
        .unwrap();
        let failed = Event::WebResponse {
            kind: RequestKind::Apply {
                listing_id: "X1".to_string(),
                session: 0,
            },
            status: 500,
            body: b"{}".to_vec(),
        };
        handle_event(&mut state, &failed).unwrap();
        assert!(state.applied.is_empty());
        assert_eq!(state.notice.unwrap().message, "Failed to apply");
    }

    #[test]
    fn search_edits_apply_live_and_cancel_restores() {
        let mut state = signed_in("male");
        load(
            &mut state,
            vec![Listing::new("a", "Cook"), Listing::new("b", "Driver")],
        );
        handle_event(&mut state, &Event::EditSearch).unwrap();
        handle_event(&mut state, &Event::Char('d')).unwrap();
        assert_eq!(state.visible.len(), 1);

        handle_event(&mut state, &Event::CancelEdit).unwrap();
        assert_eq!(state.criteria.search, "");
        assert_eq!(state.visible.len(), 2);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn invalid_date_bound_stays_in_edit() {
        let mut state = signed_in("male");
        handle_event(&mut state, &Event::EditStartDate).unwrap();
        for c in "2024-13-01".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::CommitEdit).unwrap();
        assert_eq!(state.input_mode, InputMode::Editing(FilterField::StartDate));
        assert_eq!(state.criteria.start_after, "");
        assert_eq!(state.notice.as_ref().unwrap().tone, NoticeTone::Failure);

        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        handle_event(&mut state, &Event::Backspace).unwrap();
        for c in "02-01".chars() {
            handle_event(&mut state, &Event::Char(c)).unwrap();
        }
        handle_event(&mut state, &Event::CommitEdit).unwrap();
        assert_eq!(state.criteria.start_after, "2024-02-01");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn token_change_refetches_applications_only() {
        let mut state = signed_in("male");
        state.applied.insert("old".to_string());
        let next = Session::new(Some("male"), Some("other"));
        let (_, actions) = handle_event(&mut state, &Event::SessionChanged(next)).unwrap();
        let sent = requests(&actions);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].kind, RequestKind::Applications { generation: 2 });
        assert!(state.applied.is_empty());
    }

    #[test]
    fn role_change_starts_new_generation() {
        let mut state = signed_in("male");
        handle_event(&mut state, &Event::Refresh).unwrap();
        let next = Session::new(Some("female"), Some("tok"));
        let (_, actions) = handle_event(&mut state, &Event::SessionChanged(next)).unwrap();
        assert_eq!(state.listings_generation, 2);
        assert_eq!(
            requests(&actions)[0].kind,
            RequestKind::Listings { generation: 2 }
        );
    }

    #[test]
    fn dismiss_clears_notice() {
        let mut state = signed_in("male");
        state.notice = Some(Notice::success("ok"));
        let (render, _) = handle_event(&mut state, &Event::DismissNotice).unwrap();
        assert!(render);
        assert!(state.notice.is_none());
        let (render, _) = handle_event(&mut state, &Event::DismissNotice).unwrap();
        assert!(!render);
    }

    #[test]
    fn applications_response_replaces_set_but_keeps_fresh_applies() {
        let mut state = signed_in("male");
        state.applied.insert("withdrawn".to_string());
        let (_, actions) = handle_event(&mut state, &Event::Refresh).unwrap();
        let read = requests(&actions)[1].kind.clone();

        handle_event(
            &mut state,
            &Event::Apply {
                listing_id: "fresh".to_string(),
            },
        )
        .unwrap();
        handle_event(
            &mut state,
            &Event::WebResponse {
                kind: RequestKind::Apply {
                    listing_id: "fresh".to_string(),
                    session: 0,
                },
                status: 201,
                body: b"{}".to_vec(),
            },
        )
        .unwrap();

        let settled = Event::WebResponse {
            kind: read,
            status: 200,
            body: br#"[{"listingId":"server"}]"#.to_vec(),
        };
        handle_event(&mut state, &settled).unwrap();
        assert_eq!(
            state.applied.iter().map(String::as_str).collect::<Vec<_>>(),
            ["fresh", "server"]
        );
    }

    #[test]
    fn stale_applications_response_is_ignored() {
        let mut state = signed_in("male");
        let (_, first) = handle_event(&mut state, &Event::Refresh).unwrap();
        let stale = requests(&first)[1].kind.clone();
        handle_event(&mut state, &Event::Refresh).unwrap();

        let event = Event::WebResponse {
            kind: stale,
            status: 200,
            body: br#"[{"listingId":"old"}]"#.to_vec(),
        };
        let (render, _) = handle_event(&mut state, &event).unwrap();
        assert!(!render);
        assert!(state.applied.is_empty());
    }

    #[test]
    fn apply_result_after_sign_out_is_dropped() {
        let mut state = signed_in("male");
        let (_, actions) = handle_event(
            &mut state,
            &Event::Apply {
                listing_id: "X1".to_string(),
            },
        )
        .unwrap();
        let kind = requests(&actions)[0].kind.clone();

        handle_event(
            &mut state,
            &Event::SessionChanged(Session::new(Some("male"), Some("other"))),
        )
        .unwrap();
        handle_event(
            &mut state,
            &Event::WebResponse {
                kind,
                status: 201,
                body: b"{}".to_vec(),
            },
        )
        .unwrap();

        assert!(!state.applying);
        assert!(state.applied.is_empty());
        assert!(state.notice.is_none());
    }
}
