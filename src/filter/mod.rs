//! Filter/sort engine deriving the visible listings.
//!
//! [`derive_view`] is a pure, total function of the fetched listings and the
//! [`FilterCriteria`]; it holds no state of its own and is recomputed from
//! scratch whenever either input changes.
//!
//! # Matching
//!
//! A listing is kept when all of these hold:
//!
//! 1. the search is empty, or it occurs (case-insensitively) in the job
//!    title, description or location;
//! 2. no gender is selected, or it equals the listing's target exactly;
//! 3. no start bound is set, or the listing starts on/after it;
//! 4. no end bound is set, or the listing ends on/before it.
//!
//! Unparsable or missing listing dates never satisfy a set bound, and an
//! unparsable bound matches nothing.
//!
//! # Ordering
//!
//! Sorting is stable. Date modes key on the start date, falling back to the
//! creation timestamp; a missing or invalid key sorts as the earliest
//! possible date. Title modes use a case-insensitive collation with a
//! lowercase-first tie-break.

pub mod criteria;
pub mod dates;

pub use criteria::{FilterCriteria, SortMode};

use crate::domain::Listing;
use std::cmp::Ordering;

/// Derives the filtered and ordered listings for the given criteria.
///
/// ```
/// use shlichus_board::domain::Listing;
/// use shlichus_board::filter::{derive_view, FilterCriteria, SortMode};
///
/// let mut a = Listing::new("a", "A");
/// a.start_date = Some("2024-01-01".into());
/// let mut b = Listing::new("b", "B");
/// b.start_date = Some("2024-02-01".into());
///
/// let criteria = FilterCriteria { sort: SortMode::Oldest, ..Default::default() };
/// let view = derive_view(&[b, a], &criteria);
/// assert_eq!(view.iter().map(|l| l.id.as_str()).collect::<Vec<_>>(), ["a", "b"]);
/// ```
#[must_use]
pub fn derive_view(listings: &[Listing], criteria: &FilterCriteria) -> Vec<Listing> {
    let _span = tracing::trace_span!(
        "derive_view",
        total = listings.len(),
        search_len = criteria.search.len(),
        sort = ?criteria.sort
    )
    .entered();

    let predicate = Predicate::new(criteria);
    let matched: Vec<&Listing> = listings.iter().filter(|l| predicate.matches(l)).collect();

    sort_listings(matched, criteria.sort)
        .into_iter()
        .cloned()
        .collect()
}

/// Criteria compiled once per derivation.
struct Predicate<'a> {
    needle: Option<String>,
    gender: Option<&'a str>,
    start_after: Bound,
    end_before: Bound,
}

#[derive(Clone, Copy)]
enum Bound {
    Unset,
    At(i64),
    Invalid,
}

impl Bound {
    fn parse(value: &str) -> Self {
        if value.trim().is_empty() {
            Self::Unset
        } else {
            dates::parse_millis(value).map_or(Self::Invalid, Self::At)
        }
    }

    fn admits(self, date: Option<&str>, accept: impl Fn(i64, i64) -> bool) -> bool {
        match self {
            Self::Unset => true,
            Self::Invalid => false,
            Self::At(bound) => date
                .and_then(dates::parse_millis)
                .is_some_and(|value| accept(value, bound)),
        }
    }
}

impl<'a> Predicate<'a> {
    fn new(criteria: &'a FilterCriteria) -> Self {
        Self {
            needle: Some(criteria.search.to_lowercase()).filter(|s| !s.is_empty()),
            gender: criteria.gender.map(crate::domain::VolunteerGender::as_str),
            start_after: Bound::parse(&criteria.start_after),
            end_before: Bound::parse(&criteria.end_before),
        }
    }

    fn matches(&self, listing: &Listing) -> bool {
        self.matches_search(listing)
            && self
                .gender
                .map_or(true, |g| listing.volunteer_gender.as_deref() == Some(g))
            && self
                .start_after
                .admits(listing.start_date.as_deref(), |value, bound| value >= bound)
            && self
                .end_before
                .admits(listing.end_date.as_deref(), |value, bound| value <= bound)
    }

    fn matches_search(&self, listing: &Listing) -> bool {
        let Some(needle) = &self.needle else {
            return true;
        };
        [&listing.job_title, &listing.description, &listing.location]
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(needle.as_str()))
    }
}

fn sort_listings(matched: Vec<&Listing>, mode: SortMode) -> Vec<&Listing> {
    match mode {
        SortMode::Newest | SortMode::Oldest => {
            let mut keyed: Vec<(Option<i64>, &Listing)> = matched
                .into_iter()
                .map(|l| (l.recency_date().and_then(dates::parse_millis), l))
                .collect();
            if mode == SortMode::Newest {
                keyed.sort_by(|a, b| b.0.cmp(&a.0));
            } else {
                keyed.sort_by(|a, b| a.0.cmp(&b.0));
            }
            keyed.into_iter().map(|(_, l)| l).collect()
        }
        SortMode::TitleAsc => {
            let mut sorted = matched;
            sorted.sort_by(|a, b| compare_titles(a.title(), b.title()));
            sorted
        }
        SortMode::TitleDesc => {
            let mut sorted = matched;
            sorted.sort_by(|a, b| compare_titles(b.title(), a.title()));
            sorted
        }
    }
}

/// Collation for job titles.
///
/// Primary order ignores case; strings equal up to case put lowercase first.
#[must_use]
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    let primary = a
        .chars()
        .flat_map(char::to_lowercase)
        .cmp(b.chars().flat_map(char::to_lowercase));
    primary.then_with(|| b.cmp(a))
}

/// Character range of the first case-insensitive occurrence of `needle`.
///
/// Returns `(start, end)` in character indices, exclusive end, for
/// highlighting the search term in a title. `None` when absent or empty.
#[must_use]
pub fn match_span(text: &str, needle: &str) -> Option<(usize, usize)> {
    if needle.is_empty() {
        return None;
    }
    let hay: Vec<char> = text.chars().collect();
    let pat: Vec<char> = needle.chars().flat_map(char::to_lowercase).collect();
    let lowered: Vec<String> = hay.iter().map(|c| c.to_lowercase().collect()).collect();

    (0..hay.len()).find_map(|start| {
        let mut matched = 0;
        let mut end = start;
        while matched < pat.len() && end < hay.len() {
            let folded: Vec<char> = lowered[end].chars().collect();
            if pat.get(matched..matched + folded.len()) != Some(folded.as_slice()) {
                return None;
            }
            matched += folded.len();
            end += 1;
        }
        (matched == pat.len()).then_some((start, end))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::VolunteerGender;

    fn listing(id: &str, title: &str, start: Option<&str>) -> Listing {
        let mut l = Listing::new(id, title);
        l.start_date = start.map(String::from);
        l
    }

    fn ids(view: &[Listing]) -> Vec<&str> {
        view.iter().map(|l| l.id.as_str()).collect()
    }

    #[test]
    fn empty_search_keeps_listings_without_text_fields() {
        let bare = Listing {
            job_title: None,
            ..Listing::new("x", "")
        };
        let view = derive_view(&[bare], &FilterCriteria::default());
        assert_eq!(ids(&view), ["x"]);
    }

    #[test]
    fn search_covers_title_description_and_location() {
        let mut by_desc = listing("d", "Cook", None);
        by_desc.description = Some("Help in the KITCHEN".into());
        let mut by_loc = listing("l", "Driver", None);
        by_loc.location = Some("Kitchener, ON".into());
        let by_title = listing("t", "Kitchen aide", None);
        let miss = listing("m", "Tutor", None);

        let criteria = FilterCriteria {
            search: "kitchen".into(),
            ..Default::default()
        };
        let mut got = ids(&derive_view(&[by_desc, by_loc, by_title, miss], &criteria))
            .into_iter()
            .map(String::from)
            .collect::<Vec<_>>();
        got.sort();
        assert_eq!(got, ["d", "l", "t"]);
    }

    #[test]
    fn absent_fields_never_match_a_term() {
        let bare = Listing {
            job_title: None,
            ..Listing::new("x", "")
        };
        let criteria = FilterCriteria {
            search: "a".into(),
            ..Default::default()
        };
        assert!(derive_view(&[bare], &criteria).is_empty());
    }

    #[test]
    fn gender_filter_is_exact() {
        let genders = ["male", "female", "male"];
        let listings: Vec<Listing> = genders
            .iter()
            .enumerate()
            .map(|(i, g)| {
                let start = format!("2024-0{}-01", i + 1);
                let mut l = listing(&i.to_string(), "Job", Some(start.as_str()));
                l.volunteer_gender = Some((*g).to_string());
                l
            })
            .collect();

        let criteria = FilterCriteria {
            gender: Some(VolunteerGender::Male),
            sort: SortMode::Oldest,
            ..Default::default()
        };
        assert_eq!(ids(&derive_view(&listings, &criteria)), ["0", "2"]);
    }

    #[test]
    fn date_bounds_are_inclusive() {
        let mut a = listing("a", "A", Some("2024-03-01"));
        a.end_date = Some("2024-03-10".into());
        let mut b = listing("b", "B", Some("2024-02-28"));
        b.end_date = Some("2024-03-05".into());
        let mut c = listing("c", "C", Some("2024-03-02"));
        c.end_date = Some("2024-03-20".into());

        let criteria = FilterCriteria {
            start_after: "2024-03-01".into(),
            end_before: "2024-03-10".into(),
            ..Default::default()
        };
        assert_eq!(ids(&derive_view(&[a, b, c], &criteria)), ["a"]);
    }

    #[test]
    fn missing_or_invalid_dates_fail_a_set_bound() {
        let none = listing("none", "N", None);
        let bad = listing("bad", "B", Some("someday"));
        let criteria = FilterCriteria {
            start_after: "2000-01-01".into(),
            ..Default::default()
        };
        assert!(derive_view(&[none, bad], &criteria).is_empty());
    }

    #[test]
    fn invalid_bound_matches_nothing() {
        let a = listing("a", "A", Some("2024-01-01"));
        let criteria = FilterCriteria {
            end_before: "garbage".into(),
            ..Default::default()
        };
        assert!(derive_view(&[a], &criteria).is_empty());
    }

    #[test]
    fn newest_falls_back_to_created_at_and_puts_undated_last() {
        let a = listing("a", "A", Some("2024-01-01"));
        let mut b = listing("b", "B", None);
        b.created_at = Some("2024-06-01T08:00:00.000Z".into());
        let c = listing("c", "C", Some("not a date"));
        let d = listing("d", "D", None);

        let view = derive_view(&[c.clone(), a.clone(), d.clone(), b.clone()], &FilterCriteria::default());
        assert_eq!(ids(&view), ["b", "a", "c", "d"]);

        let oldest = FilterCriteria {
            sort: SortMode::Oldest,
            ..Default::default()
        };
        assert_eq!(ids(&derive_view(&[c, a, d, b], &oldest)), ["c", "d", "a", "b"]);
    }

    #[test]
    fn title_sort_ignores_case() {
        let listings = vec![
            listing("1", "banana", None),
            listing("2", "Apple", None),
            listing("3", "cherry", None),
        ];
        let asc = FilterCriteria {
            sort: SortMode::TitleAsc,
            ..Default::default()
        };
        assert_eq!(ids(&derive_view(&listings, &asc)), ["2", "1", "3"]);
    }

    #[test]
    fn compare_titles_puts_lowercase_first_on_ties() {
        assert_eq!(compare_titles("apple", "Apple"), Ordering::Less);
        assert_eq!(compare_titles("Apple", "apple"), Ordering::Greater);
        assert_eq!(compare_titles("Apple", "Apple"), Ordering::Equal);
        assert_eq!(compare_titles("apple", "Banana"), Ordering::Less);
    }

    #[test]
    fn derivation_is_deterministic() {
        let listings = vec![
            listing("1", "Same", Some("2024-01-01")),
            listing("2", "Same", Some("2024-01-01")),
            listing("3", "Other", None),
        ];
        let criteria = FilterCriteria::default();
        assert_eq!(derive_view(&listings, &criteria), derive_view(&listings, &criteria));
        assert_eq!(ids(&derive_view(&listings, &criteria)), ["1", "2", "3"]);
    }

    #[test]
    fn match_span_finds_case_insensitive_range() {
        assert_eq!(match_span("Camp Counselor", "COUN"), Some((5, 9)));
        assert_eq!(match_span("Camp", "x"), None);
        assert_eq!(match_span("Camp", ""), None);
    }
}
