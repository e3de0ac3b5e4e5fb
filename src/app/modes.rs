//! Input mode state for the board.
//!
//! The board is either in normal mode, where single keys drive navigation,
//! filters and applying, or editing one of the free-text filter fields.
//!
//! ```rust
//! use shlichus_board::app::modes::{FilterField, InputMode};
//!
//! let mode = InputMode::Editing(FilterField::Search);
//! assert!(mode.is_editing());
//! ```

/// Free-text filter field being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Search text. Edits apply to the view on every keystroke.
    Search,
    /// Start-date lower bound. Applied on commit after validation.
    StartDate,
    /// End-date upper bound. Applied on commit after validation.
    EndDate,
}

impl FilterField {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Search => "Search",
            Self::StartDate => "Start Date",
            Self::EndDate => "End Date",
        }
    }
}

/// Current input handling mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// Navigation and command keys.
    Normal,
    /// Characters go into the given filter field.
    Editing(FilterField),
}

impl InputMode {
    #[must_use]
    pub const fn is_editing(self) -> bool {
        matches!(self, Self::Editing(_))
    }
}
