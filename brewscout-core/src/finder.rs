//! Entry points exposed to the calling layer and their result shape.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{Place, SearchPreferences};

/// Outcome of a search or details request.
///
/// A result is always produced: failures are carried as explanatory `text`
/// with an empty `places` list.
///
/// # Examples
/// ```rust
/// use brewscout_core::{SearchFailure, SearchResult};
///
/// let result = SearchResult::failure(&SearchFailure::NoCandidates {
///     location: "Nowhere".into(),
/// });
/// assert!(result.places.is_empty());
/// assert!(result.text.contains("Nowhere"));
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SearchResult {
    /// Natural-language summary for the caller.
    pub text: String,
    /// Ranked places, best first.
    pub places: Vec<Place>,
    /// Location text that was resolved, when resolution succeeded.
    pub location_found: Option<String>,
    /// Number of candidates considered before filtering.
    pub total_analyzed: usize,
    /// Number of returned places whose reviews were examined.
    pub review_analyzed_count: usize,
}

impl SearchResult {
    /// Build an empty result explaining `failure`.
    pub fn failure(failure: &SearchFailure) -> Self {
        Self {
            text: failure.to_string(),
            ..Self::default()
        }
    }

    /// Whether any place was returned.
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

/// Reasons a request produced no places.
///
/// The `Display` text is the friendly message placed in
/// [`SearchResult::text`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchFailure {
    /// The location text could not be geocoded after all fallbacks.
    #[error(
        "Sorry, I couldn't find the location '{location}'. Please try a more specific address or well-known area."
    )]
    ResolutionFailure {
        /// Location text as supplied.
        location: String,
    },

    /// Geocoding succeeded but no sub-search returned a place.
    #[error(
        "I couldn't find any cafes in {location}. Try expanding your search area or checking the location name."
    )]
    NoCandidates {
        /// Location text as supplied.
        location: String,
    },

    /// Candidates existed but filtering or scoring removed all of them.
    #[error(
        "I found some cafes in {location}, but none matched your preferences. Try relaxing your filters or broadening your search area."
    )]
    NoSurvivors {
        /// Location text as supplied.
        location: String,
    },

    /// None of the explicitly named places could be matched.
    #[error("{}", not_found_message(names, location))]
    NotFoundByName {
        /// Names that were requested, in order.
        names: Vec<String>,
        /// Location text as supplied.
        location: String,
    },
}

fn not_found_message(names: &[String], location: &str) -> String {
    match names {
        [single] => format!(
            "I couldn't find '{single}' in {location}. Try checking the spelling or searching for cafes in that area instead."
        ),
        _ => format!(
            "I couldn't find the cafes you mentioned ({}) in {location}. Try checking the spelling or searching for cafes in that area instead.",
            names.join(", ")
        ),
    }
}

/// Find and describe cafés for a caller.
///
/// Implementations must never panic on provider failures and must always
/// return a [`SearchResult`].
/// Finders must be `Send + Sync` to serve concurrent requests.
pub trait PlaceFinder: Send + Sync {
    /// Open-ended discovery, or a lookup of the explicit names in `preferences`.
    fn search(&self, preferences: &SearchPreferences) -> SearchResult;

    /// Describe one named place near `location`. Returns at most one place.
    fn details(&self, name: &str, location: &str) -> SearchResult;
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    struct EmptyFinder;

    impl PlaceFinder for EmptyFinder {
        fn search(&self, preferences: &SearchPreferences) -> SearchResult {
            SearchResult::failure(&SearchFailure::NoCandidates {
                location: preferences.location_text().to_owned(),
            })
        }

        fn details(&self, name: &str, location: &str) -> SearchResult {
            SearchResult::failure(&SearchFailure::NotFoundByName {
                names: vec![name.to_owned()],
                location: location.to_owned(),
            })
        }
    }

    #[rstest]
    fn failures_become_text_without_places() {
        let result = EmptyFinder.search(&SearchPreferences::new("Fremont"));
        assert!(result.is_empty());
        assert!(result.text.starts_with("I couldn't find any cafes in Fremont."));
    }

    #[rstest]
    fn single_missing_name_is_quoted() {
        let result = EmptyFinder.details("Nowhere Cafe", "Ballard");
        assert_eq!(
            result.text,
            "I couldn't find 'Nowhere Cafe' in Ballard. Try checking the spelling or searching for cafes in that area instead."
        );
    }

    #[rstest]
    fn several_missing_names_are_listed() {
        let failure = SearchFailure::NotFoundByName {
            names: vec!["A".into(), "B".into()],
            location: "Ballard".into(),
        };
        assert!(failure.to_string().contains("(A, B)"));
    }

    #[rstest]
    fn no_survivors_differs_from_no_candidates() {
        let sparse = SearchFailure::NoCandidates {
            location: "X".into(),
        };
        let strict = SearchFailure::NoSurvivors {
            location: "X".into(),
        };
        assert_ne!(sparse.to_string(), strict.to_string());
    }
}
