//! Request builders for the three API calls.

use crate::domain::{Role, Session};
use std::collections::BTreeMap;

/// Context key naming the request kind.
pub const CONTEXT_KIND: &str = "kind";
/// Context key carrying the listings generation.
pub const CONTEXT_GENERATION: &str = "generation";
/// Context key carrying the session generation of an application.
pub const CONTEXT_SESSION: &str = "session";
/// Context key carrying the listing id of an application.
pub const CONTEXT_LISTING_ID: &str = "listing_id";

/// HTTP method of an [`ApiRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// What a request was issued for, recovered from its context on completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestKind {
    /// Listings read tagged with the generation that issued it.
    Listings { generation: u64 },
    /// The caller's own applications, tagged like listings reads.
    Applications { generation: u64 },
    /// Application for one listing, tagged with the session that sent it.
    Apply { listing_id: String, session: u64 },
}

impl RequestKind {
    /// Encodes the kind into a host request context.
    #[must_use]
    pub fn to_context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        match self {
            Self::Listings { generation } => {
                context.insert(CONTEXT_KIND.to_string(), "listings".to_string());
                context.insert(CONTEXT_GENERATION.to_string(), generation.to_string());
            }
            Self::Applications { generation } => {
                context.insert(CONTEXT_KIND.to_string(), "applications".to_string());
                context.insert(CONTEXT_GENERATION.to_string(), generation.to_string());
            }
            Self::Apply {
                listing_id,
                session,
            } => {
                context.insert(CONTEXT_KIND.to_string(), "apply".to_string());
                context.insert(CONTEXT_LISTING_ID.to_string(), listing_id.clone());
                context.insert(CONTEXT_SESSION.to_string(), session.to_string());
            }
        }
        context
    }

    /// Decodes a host request context. Unknown contexts yield `None`.
    #[must_use]
    pub fn from_context(context: &BTreeMap<String, String>) -> Option<Self> {
        match context.get(CONTEXT_KIND)?.as_str() {
            "listings" => Some(Self::Listings {
                generation: context.get(CONTEXT_GENERATION)?.parse().ok()?,
            }),
            "applications" => Some(Self::Applications {
                generation: context.get(CONTEXT_GENERATION)?.parse().ok()?,
            }),
            "apply" => Some(Self::Apply {
                listing_id: context.get(CONTEXT_LISTING_ID)?.clone(),
                session: context.get(CONTEXT_SESSION)?.parse().ok()?,
            }),
            _ => None,
        }
    }
}

/// A fully described HTTP request, ready for the host to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub kind: RequestKind,
}

impl ApiRequest {
    fn get(url: String, kind: RequestKind) -> Self {
        Self {
            method: HttpMethod::Get,
            url,
            headers: BTreeMap::new(),
            body: Vec::new(),
            kind,
        }
    }

    #[must_use]
    fn bearer(mut self, token: &str) -> Self {
        self.headers
            .insert("Authorization".to_string(), format!("Bearer {token}"));
        self
    }

    /// Header map with the bearer token redacted, for logging.
    #[must_use]
    pub fn redacted_headers(&self) -> BTreeMap<String, String> {
        self.headers
            .iter()
            .map(|(k, v)| {
                let value = if k.eq_ignore_ascii_case("authorization") {
                    "Bearer <redacted>".to_string()
                } else {
                    v.clone()
                };
                (k.clone(), value)
            })
            .collect()
    }
}

/// Builds the listings read, scoped to the role's volunteer category.
///
/// ```
/// use shlichus_board::api::requests::listings_request;
/// use shlichus_board::domain::Role;
///
/// let req = listings_request("https://api.test", Role::Female, 3);
/// assert_eq!(req.url, "https://api.test/api/listings?volunteerGender=female");
/// ```
#[must_use]
pub fn listings_request(base_url: &str, role: Role, generation: u64) -> ApiRequest {
    let mut url = format!("{base_url}/api/listings");
    if let Some(gender) = role.volunteer_gender() {
        url.push_str("?volunteerGender=");
        url.push_str(gender.as_str());
    }
    ApiRequest::get(url, RequestKind::Listings { generation })
}

/// Builds the own-applications read, or `None` when it must be skipped.
///
/// Skipped without a token and for organization accounts.
#[must_use]
pub fn applications_request(
    base_url: &str,
    session: &Session,
    generation: u64,
) -> Option<ApiRequest> {
    if !session.tracks_applications() {
        return None;
    }
    let token = session.bearer()?;
    Some(
        ApiRequest::get(
            format!("{base_url}/api/applications/my"),
            RequestKind::Applications { generation },
        )
        .bearer(token),
    )
}

/// Builds the application submission for one listing.
///
/// `session` is the generation of the session applying, so a result that
/// arrives after a sign-out can be told apart.
#[must_use]
pub fn apply_request(base_url: &str, token: &str, listing_id: &str, session: u64) -> ApiRequest {
    let body = serde_json::json!({ "listingId": listing_id }).to_string();
    let mut request = ApiRequest {
        method: HttpMethod::Post,
        url: format!("{base_url}/api/applications"),
        headers: BTreeMap::new(),
        body: body.into_bytes(),
        kind: RequestKind::Apply {
            listing_id: listing_id.to_string(),
            session,
        },
    }
    .bearer(token);
    request
        .headers
        .insert("Content-Type".to_string(), "application/json".to_string());
    request
}
