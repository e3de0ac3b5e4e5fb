//! Application state and view model computation.
//!
//! [`AppState`] is the single source of truth for the board: fetched
//! listings, filter criteria, the applied-set, the loading and applying
//! flags, the session inputs, and transient UI state (selection, input mode,
//! notice). The visible listings are recomputed from scratch by
//! [`AppState::refresh_view`] whenever the listings or criteria change.
//!
//! # Example
//!
//! ```rust
//! use shlichus_board::app::AppState;
//! use shlichus_board::domain::Session;
//! use shlichus_board::ui::Theme;
//!
//! let state = AppState::new("https://api.test", Session::default(), Theme::default());
//! let viewmodel = state.compute_viewmodel(24, 100);
//! assert!(viewmodel.header.status.ends_with("loading..."));
//! ```

use super::modes::{FilterField, InputMode};
use crate::domain::{Listing, Session};
use crate::filter::{self, dates, FilterCriteria};
use crate::ui::helpers::{accent_index, truncate_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{
    ApplyBadge, DetailInfo, EmptyState, FilterBarInfo, FilterFieldInfo, FooterInfo, HeaderInfo,
    ListingRow, NoticeInfo, NoticeTone, UIViewModel,
};
use std::collections::BTreeSet;

/// Maximum description length shown in the detail panel.
const DESCRIPTION_PREVIEW_CHARS: usize = 120;

/// Maximum title length shown in the table.
const TITLE_COLUMN_CHARS: usize = 34;

/// Rows taken by header, filter bar, summary, table header, detail panel,
/// notice, borders and footer.
const CHROME_ROWS: usize = 15;

/// User-facing message after the server accepts an application.
pub const APPLY_SUCCESS_MESSAGE: &str =
    "Successfully applied and message sent to the organization.";

/// User-facing message when applying without a token.
pub const SIGN_IN_REQUIRED_MESSAGE: &str = "Please sign in to apply";

/// A success or failure message shown until dismissed or replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub tone: NoticeTone,
    pub message: String,
}

impl Notice {
    #[must_use]
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            tone: NoticeTone::Success,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            tone: NoticeTone::Failure,
            message: message.into(),
        }
    }
}

/// Central application state container.
#[derive(Debug, Clone)]
pub struct AppState {
    /// API base URL without trailing slash.
    pub base_url: String,

    /// Role and token, replaced by session updates.
    pub session: Session,

    /// Last successfully fetched listings, in server order.
    pub listings: Vec<Listing>,

    /// Current filter fields.
    pub criteria: FilterCriteria,

    /// Listings matching `criteria`, ordered. Derived; never edited directly.
    pub visible: Vec<Listing>,

    /// Zero-based index into `visible`.
    pub selected_index: usize,

    /// Listing ids the user has applied to.
    pub applied: BTreeSet<String>,

    /// Ids accepted since the latest applications read was issued. They are
    /// kept when that read replaces `applied`.
    pub applied_since_read: BTreeSet<String>,

    /// True from issuing a listings read until the latest one settles.
    pub loading: bool,

    /// Global in-flight flag for the apply action.
    pub applying: bool,

    /// Generation of the most recent listings read.
    pub listings_generation: u64,

    /// Generation of the most recent applications read. Also bumped on every
    /// session change so reads for a previous session are dropped.
    pub applications_generation: u64,

    /// Bumped on every session change; tags apply requests.
    pub session_generation: u64,

    /// Whether the host granted the permissions needed to fetch.
    pub permissions_granted: bool,

    pub input_mode: InputMode,

    /// Pending text of a date bound being edited.
    pub edit_buffer: String,

    /// Search text before the current edit, restored on cancel.
    pub search_backup: String,

    pub notice: Option<Notice>,

    pub theme: Theme,
}

impl AppState {
    /// Creates an empty board. Nothing is fetched until the runtime mounts it.
    #[must_use]
    pub fn new(base_url: impl Into<String>, session: Session, theme: Theme) -> Self {
        Self {
            base_url: base_url.into(),
            session,
            listings: Vec::new(),
            criteria: FilterCriteria::default(),
            visible: Vec::new(),
            selected_index: 0,
            applied: BTreeSet::new(),
            applied_since_read: BTreeSet::new(),
            loading: true,
            applying: false,
            listings_generation: 0,
            applications_generation: 0,
            session_generation: 0,
            permissions_granted: false,
            input_mode: InputMode::Normal,
            edit_buffer: String::new(),
            search_backup: String::new(),
            notice: None,
            theme,
        }
    }

    /// Recomputes `visible` from `listings` and `criteria`, clamping the selection.
    pub fn refresh_view(&mut self) {
        self.visible = filter::derive_view(&self.listings, &self.criteria);

        if self.visible.is_empty() {
            self.selected_index = 0;
        } else {
            self.selected_index = self.selected_index.min(self.visible.len() - 1);
        }

        tracing::debug!(
            total = self.listings.len(),
            visible = self.visible.len(),
            "view refreshed"
        );
    }

    /// Moves selection down, wrapping to the top.
    pub fn move_selection_down(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.visible.len();
    }

    /// Moves selection up, wrapping to the bottom.
    pub fn move_selection_up(&mut self) {
        if self.visible.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.visible.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    #[must_use]
    pub fn selected_listing(&self) -> Option<&Listing> {
        self.visible.get(self.selected_index)
    }

    /// Apply control state for a listing.
    #[must_use]
    pub fn badge_for(&self, listing_id: &str) -> ApplyBadge {
        if self.session.role.is_organization() {
            ApplyBadge::Hidden
        } else if self.applied.contains(listing_id) {
            ApplyBadge::Applied
        } else if self.applying {
            ApplyBadge::Applying
        } else {
            ApplyBadge::Available
        }
    }

    /// Computes the view model for a terminal of the given size.
    #[must_use]
    pub fn compute_viewmodel(&self, rows: usize, cols: usize) -> UIViewModel {
        let available_rows = rows.saturating_sub(CHROME_ROWS).max(1);

        let mut visible_start = self.selected_index.saturating_sub(available_rows / 2);
        let visible_end = (visible_start + available_rows).min(self.visible.len());
        if visible_end - visible_start < available_rows && self.visible.len() >= available_rows {
            visible_start = visible_end.saturating_sub(available_rows);
        }

        let listing_rows = if self.loading && self.listings.is_empty() {
            Vec::new()
        } else {
            self.visible[visible_start..visible_end]
                .iter()
                .enumerate()
                .map(|(offset, listing)| {
                    self.compute_row(listing, visible_start + offset == self.selected_index, cols)
                })
                .collect()
        };

        UIViewModel {
            header: self.compute_header(),
            filter_bar: self.compute_filter_bar(),
            summary: Self::summary(self.visible.len()),
            rows: listing_rows,
            selected_index: self.selected_index.saturating_sub(visible_start),
            detail: self.selected_listing().map(Self::compute_detail),
            notice: self.notice.as_ref().map(|n| NoticeInfo {
                tone: n.tone,
                message: n.message.clone(),
            }),
            empty_state: self.compute_empty_state(),
            footer: self.compute_footer(),
        }
    }

    fn compute_row(&self, listing: &Listing, is_selected: bool, cols: usize) -> ListingRow {
        let title = truncate_text(listing.title(), TITLE_COLUMN_CHARS.min(cols / 3));
        let highlight = filter::match_span(&title, &self.criteria.search);
        let palette = &self.theme.colors.accents;
        let accent = palette
            .get(accent_index(listing.title(), palette.len()))
            .cloned()
            .unwrap_or_else(|| self.theme.colors.text_normal.clone());

        ListingRow {
            title,
            organization: listing.organization_name.clone().unwrap_or_default(),
            audience: listing
                .volunteer_gender
                .as_deref()
                .map(|g| format!("For {g} volunteers"))
                .unwrap_or_default(),
            dates: Self::date_range(listing),
            badge: self.badge_for(&listing.id),
            accent,
            is_selected,
            highlight,
        }
    }

    fn compute_detail(listing: &Listing) -> DetailInfo {
        DetailInfo {
            location: listing.location.clone().unwrap_or_default(),
            dates: Self::date_range(listing),
            description: truncate_text(
                listing.description.as_deref().unwrap_or_default(),
                DESCRIPTION_PREVIEW_CHARS,
            ),
            image_url: listing.image_url.clone().filter(|u| !u.is_empty()),
        }
    }

    /// `M/D/YYYY - M/D/YYYY`, with either side omitted when absent.
    fn date_range(listing: &Listing) -> String {
        let show = |value: &Option<String>| {
            value
                .as_deref()
                .filter(|v| !v.is_empty())
                .map(|v| dates::display_date(v).unwrap_or_else(|| v.to_string()))
        };
        match (show(&listing.start_date), show(&listing.end_date)) {
            (Some(start), Some(end)) => format!("{start} - {end}"),
            (Some(start), None) => start,
            (None, Some(end)) => format!("until {end}"),
            (None, None) => String::new(),
        }
    }

    fn summary(count: usize) -> String {
        let plural = if count == 1 { "" } else { "s" };
        format!("{count} listing{plural} found")
    }

    fn compute_header(&self) -> HeaderInfo {
        let signed_in = if self.session.bearer().is_some() {
            "signed in"
        } else {
            "signed out"
        };
        let mut status = format!("{} · {signed_in}", self.session.role.label());
        if self.loading {
            status.push_str(" · loading...");
        }
        HeaderInfo {
            title: " Volunteer Opportunities ".to_string(),
            status,
        }
    }

    fn compute_filter_bar(&self) -> FilterBarInfo {
        let editing = |field: FilterField| self.input_mode == InputMode::Editing(field);
        let bound_value = |field: FilterField, committed: &str| {
            if editing(field) {
                self.edit_buffer.clone()
            } else if committed.is_empty() {
                "any".to_string()
            } else {
                committed.to_string()
            }
        };

        FilterBarInfo {
            fields: vec![
                FilterFieldInfo {
                    label: FilterField::Search.label(),
                    value: self.criteria.search.clone(),
                    is_editing: editing(FilterField::Search),
                },
                FilterFieldInfo {
                    label: "Gender",
                    value: self.criteria.gender_label().to_string(),
                    is_editing: false,
                },
                FilterFieldInfo {
                    label: FilterField::StartDate.label(),
                    value: bound_value(FilterField::StartDate, &self.criteria.start_after),
                    is_editing: editing(FilterField::StartDate),
                },
                FilterFieldInfo {
                    label: FilterField::EndDate.label(),
                    value: bound_value(FilterField::EndDate, &self.criteria.end_before),
                    is_editing: editing(FilterField::EndDate),
                },
                FilterFieldInfo {
                    label: "Sort By",
                    value: self.criteria.sort.label().to_string(),
                    is_editing: false,
                },
            ],
        }
    }

    fn compute_empty_state(&self) -> Option<EmptyState> {
        if self.loading && self.listings.is_empty() {
            return Some(EmptyState {
                message: "Loading listings...".to_string(),
                subtitle: String::new(),
            });
        }
        if !self.visible.is_empty() {
            return None;
        }
        let subtitle = if self.criteria.is_active() {
            "Press c to clear filters"
        } else {
            "Press r to refresh"
        };
        Some(EmptyState {
            message: "No listings match your filters.".to_string(),
            subtitle: subtitle.to_string(),
        })
    }

    fn compute_footer(&self) -> FooterInfo {
        let keybindings = match self.input_mode {
            InputMode::Editing(FilterField::Search) => {
                "Type to search  Enter: done  Esc: cancel".to_string()
            }
            InputMode::Editing(_) => "YYYY-MM-DD  Enter: set  Esc: cancel".to_string(),
            InputMode::Normal if self.session.role.is_organization() => {
                "j/k: navigate  /: search  g: gender  [ ]: dates  o: sort  c: clear  r: refresh  q: quit"
                    .to_string()
            }
            InputMode::Normal => {
                "j/k: navigate  Enter: apply  /: search  g: gender  [ ]: dates  o: sort  c: clear  q: quit"
                    .to_string()
            }
        };
        FooterInfo { keybindings }
    }
}
