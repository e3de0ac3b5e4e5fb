//! Listing and application records as served by the remote API.
//!
//! Both types are read-only snapshots: listings are replaced wholesale on
//! every fetch and application records only contribute their listing
//! reference to the applied-set.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Volunteer category a listing targets or a volunteer belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VolunteerGender {
    /// Male volunteers.
    Male,
    /// Female volunteers.
    Female,
}

impl VolunteerGender {
    /// Wire value used by the API (`volunteerGender` field and query).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Male => "male",
            Self::Female => "female",
        }
    }

    /// Parses the wire value. Matching is exact, like the API's.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "male" => Some(Self::Male),
            "female" => Some(Self::Female),
            _ => None,
        }
    }
}

impl fmt::Display for VolunteerGender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller classification controlling API scoping and UI affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Role {
    /// Male volunteer; listings are scoped to male-targeted postings.
    Male,
    /// Female volunteer; listings are scoped to female-targeted postings.
    Female,
    /// Organization account; apply controls are hidden.
    Organization,
    /// No role stored.
    #[default]
    Unset,
}

impl Role {
    /// Parses a stored role string. Unknown values are treated as unset.
    ///
    /// ```
    /// use shlichus_board::domain::Role;
    ///
    /// assert_eq!(Role::parse(Some("female")), Role::Female);
    /// assert_eq!(Role::parse(Some("admin")), Role::Unset);
    /// assert_eq!(Role::parse(None), Role::Unset);
    /// ```
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("male") => Self::Male,
            Some("female") => Self::Female,
            Some("organization") => Self::Organization,
            _ => Self::Unset,
        }
    }

    /// Volunteer category used to scope the listings read, if any.
    #[must_use]
    pub const fn volunteer_gender(self) -> Option<VolunteerGender> {
        match self {
            Self::Male => Some(VolunteerGender::Male),
            Self::Female => Some(VolunteerGender::Female),
            Self::Organization | Self::Unset => None,
        }
    }

    /// Whether this role sees the organization-facing UI.
    #[must_use]
    pub const fn is_organization(self) -> bool {
        matches!(self, Self::Organization)
    }

    /// Short label for the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Male => "male volunteer",
            Self::Female => "female volunteer",
            Self::Organization => "organization",
            Self::Unset => "guest",
        }
    }
}

/// A volunteer-opportunity posting.
///
/// Only `id` is required. Every other field may be missing or `null` in the
/// payload; display code falls back to empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    #[serde(rename = "_id")]
    pub id: String,
    pub job_title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub volunteer_gender: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub created_at: Option<String>,
    pub organization_name: Option<String>,
    pub image_url: Option<String>,
}

impl Listing {
    /// Creates a listing with only an id and a title.
    #[must_use]
    pub fn new(id: impl Into<String>, job_title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            job_title: Some(job_title.into()),
            description: None,
            location: None,
            volunteer_gender: None,
            start_date: None,
            end_date: None,
            created_at: None,
            organization_name: None,
            image_url: None,
        }
    }

    /// Job title, or `""` when absent.
    #[must_use]
    pub fn title(&self) -> &str {
        self.job_title.as_deref().unwrap_or_default()
    }

    /// Start date if present and non-empty, otherwise the creation timestamp.
    #[must_use]
    pub fn recency_date(&self) -> Option<&str> {
        self.start_date
            .as_deref()
            .filter(|s| !s.is_empty())
            .or(self.created_at.as_deref())
    }
}

/// Reference from an application to its listing.
///
/// The API returns either the bare id or the populated listing document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ListingRef {
    /// Bare listing id.
    Id(String),
    /// Populated listing document; only its id is used.
    Populated {
        #[serde(rename = "_id")]
        id: String,
    },
}

impl ListingRef {
    /// The referenced listing id.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Id(id) | Self::Populated { id } => id,
        }
    }
}

/// One of the caller's existing applications.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ApplicationRecord {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    #[serde(rename = "listingId")]
    pub listing: ListingRef,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_deserializes_with_missing_and_null_fields() {
        let listing: Listing = serde_json::from_str(
            r#"{"_id":"a1","jobTitle":"Camp counselor","description":null,"volunteerGender":"male","extra":42}"#,
        )
        .unwrap();

        assert_eq!(listing.id, "a1");
        assert_eq!(listing.title(), "Camp counselor");
        assert_eq!(listing.description, None);
        assert_eq!(listing.volunteer_gender.as_deref(), Some("male"));
        assert_eq!(listing.location, None);
    }

    #[test]
    fn recency_prefers_non_empty_start_date() {
        let mut listing = Listing::new("a", "A");
        listing.created_at = Some("2023-05-01T10:00:00Z".to_string());
        assert_eq!(listing.recency_date(), Some("2023-05-01T10:00:00Z"));

        listing.start_date = Some(String::new());
        assert_eq!(listing.recency_date(), Some("2023-05-01T10:00:00Z"));

        listing.start_date = Some("2024-01-01".to_string());
        assert_eq!(listing.recency_date(), Some("2024-01-01"));
    }

    #[test]
    fn application_accepts_bare_and_populated_references() {
        let bare: ApplicationRecord =
            serde_json::from_str(r#"{"_id":"app1","listingId":"L1"}"#).unwrap();
        assert_eq!(bare.listing.id(), "L1");

        let populated: ApplicationRecord =
            serde_json::from_str(r#"{"listingId":{"_id":"L2","jobTitle":"Cook"}}"#).unwrap();
        assert_eq!(populated.listing.id(), "L2");
        assert_eq!(populated.id, None);
    }

    #[test]
    fn role_scopes_only_volunteers() {
        assert_eq!(Role::Male.volunteer_gender(), Some(VolunteerGender::Male));
        assert_eq!(Role::Female.volunteer_gender(), Some(VolunteerGender::Female));
        assert_eq!(Role::Organization.volunteer_gender(), None);
        assert_eq!(Role::Unset.volunteer_gender(), None);
        assert!(Role::parse(Some("organization")).is_organization());
    }
}
