//! User-adjustable filter criteria.

use crate::domain::VolunteerGender;

/// Ordering applied to the matched listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortMode {
    /// Most recent start (or creation) date first.
    #[default]
    Newest,
    /// Oldest start (or creation) date first.
    Oldest,
    /// Job title A to Z.
    TitleAsc,
    /// Job title Z to A.
    TitleDesc,
}

impl SortMode {
    /// Next mode in the cycle used by the sort keybinding.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::Newest => Self::Oldest,
            Self::Oldest => Self::TitleAsc,
            Self::TitleAsc => Self::TitleDesc,
            Self::TitleDesc => Self::Newest,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Newest => "Newest First",
            Self::Oldest => "Oldest First",
            Self::TitleAsc => "A-Z (Title)",
            Self::TitleDesc => "Z-A (Title)",
        }
    }
}

/// The five independent filter fields.
///
/// Date bounds are kept as entered (`YYYY-MM-DD` or empty); the engine
/// parses them on every derivation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub search: String,
    pub gender: Option<VolunteerGender>,
    pub start_after: String,
    pub end_before: String,
    pub sort: SortMode,
}

impl FilterCriteria {
    /// Resets every field to its default in a single transition.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Whether any field differs from its default.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self != &Self::default()
    }

    /// Cycles the gender selector: all, male, female, all.
    pub fn cycle_gender(&mut self) {
        self.gender = match self.gender {
            None => Some(VolunteerGender::Male),
            Some(VolunteerGender::Male) => Some(VolunteerGender::Female),
            Some(VolunteerGender::Female) => None,
        };
    }

    /// Label for the gender selector.
    #[must_use]
    pub const fn gender_label(&self) -> &'static str {
        match self.gender {
            None => "All Genders",
            Some(VolunteerGender::Male) => "Male Volunteers",
            Some(VolunteerGender::Female) => "Female Volunteers",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_cycle_visits_every_mode() {
        let mut mode = SortMode::default();
        let mut seen = vec![mode];
        for _ in 0..3 {
            mode = mode.next();
            seen.push(mode);
        }
        assert_eq!(
            seen,
            vec![SortMode::Newest, SortMode::Oldest, SortMode::TitleAsc, SortMode::TitleDesc]
        );
        assert_eq!(mode.next(), SortMode::Newest);
    }

    #[test]
    fn clear_resets_all_fields() {
        let mut criteria = FilterCriteria {
            search: "camp".to_string(),
            gender: Some(VolunteerGender::Female),
            start_after: "2024-01-01".to_string(),
            end_before: "2024-12-31".to_string(),
            sort: SortMode::TitleDesc,
        };
        assert!(criteria.is_active());
        criteria.clear();
        assert_eq!(criteria, FilterCriteria::default());
        assert!(!criteria.is_active());
    }

    #[test]
    fn gender_cycle_returns_to_all() {
        let mut criteria = FilterCriteria::default();
        criteria.cycle_gender();
        assert_eq!(criteria.gender, Some(VolunteerGender::Male));
        criteria.cycle_gender();
        assert_eq!(criteria.gender, Some(VolunteerGender::Female));
        criteria.cycle_gender();
        assert_eq!(criteria.gender, None);
    }
}
