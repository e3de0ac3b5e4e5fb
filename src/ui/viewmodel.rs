//! View model types representing renderable UI state.
//!
//! View models are computed by `AppState::compute_viewmodel()` and consumed
//! by the renderer. They hold display-ready strings and flags only; no
//! filtering or sorting happens past this point.

/// Complete UI view model for one frame.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub filter_bar: FilterBarInfo,
    /// "N listings found".
    pub summary: String,
    /// Visible window of listing rows.
    pub rows: Vec<ListingRow>,
    /// Index of the selected row within `rows`.
    pub selected_index: usize,
    pub detail: Option<DetailInfo>,
    pub notice: Option<NoticeInfo>,
    pub empty_state: Option<EmptyState>,
    pub footer: FooterInfo,
}

/// Title bar contents.
#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
    /// Role and sign-in status, right-aligned.
    pub status: String,
}

/// One filter control in the filter bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterFieldInfo {
    pub label: &'static str,
    pub value: String,
    pub is_editing: bool,
}

/// The five filter controls.
#[derive(Debug, Clone)]
pub struct FilterBarInfo {
    pub fields: Vec<FilterFieldInfo>,
}

/// State of the apply control on a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyBadge {
    /// Organization accounts never see apply controls.
    Hidden,
    /// Already applied.
    Applied,
    /// An application is in flight; every apply control is disabled.
    Applying,
    /// Ready to apply.
    Available,
}

impl ApplyBadge {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Hidden => "",
            Self::Applied => "Applied ✓",
            Self::Applying => "Applying...",
            Self::Available => "Apply",
        }
    }
}

/// Display information for one listing.
#[derive(Debug, Clone)]
pub struct ListingRow {
    pub title: String,
    pub organization: String,
    /// "For male volunteers".
    pub audience: String,
    pub dates: String,
    pub badge: ApplyBadge,
    /// Accent colour picked from the job title.
    pub accent: String,
    pub is_selected: bool,
    /// Character range of the search match within `title`.
    pub highlight: Option<(usize, usize)>,
}

/// Detail panel for the selected listing.
#[derive(Debug, Clone)]
pub struct DetailInfo {
    pub location: String,
    pub dates: String,
    /// Description truncated for display.
    pub description: String,
    pub image_url: Option<String>,
}

/// Tone of a notice line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeTone {
    Success,
    Failure,
}

/// Notice line contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoticeInfo {
    pub tone: NoticeTone,
    pub message: String,
}

/// Empty state message shown instead of the table.
#[derive(Debug, Clone)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Keybinding hints.
#[derive(Debug, Clone)]
pub struct FooterInfo {
    pub keybindings: String,
}
