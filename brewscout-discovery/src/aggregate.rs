//! Multi-pass candidate collection and lookup of explicitly named places.

use std::collections::HashSet;

use brewscout_core::{Place, PlacesProvider, SearchPreferences};
use geo::Coord;

use crate::source::PlaceSource;

const CAFE_TYPES: &[&str] = &["cafe"];
const CAFE_KEYWORDS: &[&str] = &["coffee shop", "cafe", "espresso", "coffee bar", "coffeehouse"];
const PASTRY_TYPES: &[&str] = &["bakery"];
const PASTRY_KEYWORDS: &[&str] = &["bakery", "pastries"];
const FOOD_TYPES: &[&str] = &["restaurant"];
const FOOD_KEYWORDS: &[&str] = &["bistro", "brunch spot"];

/// Place types and keywords to issue nearby searches for.
///
/// Café terms are always present. Bakery and restaurant terms are added only
/// when the include terms ask for pastries or food.
///
/// # Examples
/// ```
/// use brewscout_core::SearchPreferences;
/// use brewscout_discovery::SearchPlan;
///
/// let plain = SearchPlan::for_preferences(&SearchPreferences::new("Ballard"));
/// assert_eq!(plain.types, vec!["cafe"]);
///
/// let hungry = SearchPreferences::new("Ballard").with_include("brunch");
/// let plan = SearchPlan::for_preferences(&hungry);
/// assert!(plan.types.contains(&"restaurant"));
/// assert!(plan.keywords.contains(&"brunch spot"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPlan {
    /// Provider place types, one nearby search each.
    pub types: Vec<&'static str>,
    /// Free-text keywords, one nearby search each.
    pub keywords: Vec<&'static str>,
}

impl SearchPlan {
    /// Build the plan for `preferences`.
    #[must_use]
    pub fn for_preferences(preferences: &SearchPreferences) -> Self {
        let mut plan = Self {
            types: CAFE_TYPES.to_vec(),
            keywords: CAFE_KEYWORDS.to_vec(),
        };
        if preferences.wants_pastries() {
            log::info!("including bakeries: pastries were requested");
            plan.types.extend_from_slice(PASTRY_TYPES);
            plan.keywords.extend_from_slice(PASTRY_KEYWORDS);
        }
        if preferences.wants_food() {
            log::info!("including restaurants: food was requested");
            plan.types.extend_from_slice(FOOD_TYPES);
            plan.keywords.extend_from_slice(FOOD_KEYWORDS);
        }
        plan
    }

    /// Total number of provider calls this plan issues.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.types.len().saturating_add(self.keywords.len())
    }
}

/// Places accumulated across searches, unique by identifier.
///
/// The first record seen for an identifier is kept; later ones are dropped
/// without merging.
#[derive(Debug, Default)]
pub struct CandidateSet {
    seen: HashSet<String>,
    places: Vec<Place>,
}

impl CandidateSet {
    /// Create an empty set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add unseen places, returning how many were new.
    pub fn extend(&mut self, places: impl IntoIterator<Item = Place>) -> usize {
        let before = self.places.len();
        for place in places {
            if self.seen.insert(place.id().to_owned()) {
                self.places.push(place);
            }
        }
        self.places.len().saturating_sub(before)
    }

    /// Number of unique places held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Whether no place has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }

    /// Places in first-seen order.
    #[must_use]
    pub fn into_places(self) -> Vec<Place> {
        self.places
    }
}

/// Run every search in the plan for `preferences` and pool the results.
#[must_use]
pub fn aggregate<P: PlacesProvider + ?Sized>(
    source: &PlaceSource<'_, P>,
    location: Coord<f64>,
    preferences: &SearchPreferences,
    radius_m: u32,
) -> Vec<Place> {
    let plan = SearchPlan::for_preferences(preferences);
    let mut candidates = CandidateSet::new();

    for place_type in &plan.types {
        let added = candidates.extend(source.search_nearby(location, Some(place_type), None, radius_m));
        log::debug!("type '{place_type}' added {added} places");
    }
    for keyword in &plan.keywords {
        let added = candidates.extend(source.search_nearby(location, None, Some(keyword), radius_m));
        log::debug!("keyword '{keyword}' added {added} places");
    }

    log::info!(
        "aggregated {} unique places from {} searches",
        candidates.len(),
        plan.request_count()
    );
    candidates.into_places()
}

/// Find the place best matching `name` near `location`.
///
/// Issues one nearby keyword search for the name and one text search for
/// `"{name} {location_text}"`, then pools both.
#[must_use]
pub fn find_by_name<P: PlacesProvider + ?Sized>(
    source: &PlaceSource<'_, P>,
    location: Coord<f64>,
    location_text: &str,
    name: &str,
    radius_m: u32,
) -> Option<Place> {
    let mut pool = CandidateSet::new();
    pool.extend(source.search_nearby(location, None, Some(name), radius_m));
    pool.extend(source.search_by_text(&format!("{name} {location_text}"), location, radius_m));
    let found = best_match(pool.into_places(), name);
    match &found {
        Some(place) => log::info!("matched '{name}' to {}", place.name()),
        None => log::warn!("no place matching '{name}' near {location_text}"),
    }
    found
}

/// Pick the candidate most resembling `name`.
///
/// Candidates must pass [`name_matches`]. The winner has the most shared
/// whitespace tokens, then the highest rating. Ties keep the earlier one.
#[must_use]
pub fn best_match(candidates: Vec<Place>, name: &str) -> Option<Place> {
    let mut best: Option<(usize, f32, Place)> = None;
    for candidate in candidates {
        if !name_matches(candidate.name(), name) {
            continue;
        }
        let shared = shared_tokens(candidate.name(), name);
        let rating = candidate.rating().unwrap_or(0.0_f32);
        let better = best.as_ref().is_none_or(|(top_shared, top_rating, _)| {
            (shared, rating) > (*top_shared, *top_rating)
        });
        if better {
            best = Some((shared, rating, candidate));
        }
    }
    best.map(|(_, _, place)| place)
}

/// Whether a candidate called `candidate` plausibly answers a request for
/// `query`.
///
/// Comparison is case-insensitive: either name contains the other, or any
/// word of the query appears in the candidate name.
#[must_use]
pub fn name_matches(candidate: &str, query: &str) -> bool {
    let candidate_lower = candidate.to_lowercase();
    let query_lower = query.to_lowercase();
    candidate_lower.contains(&query_lower)
        || query_lower.contains(&candidate_lower)
        || query_lower
            .split_whitespace()
            .any(|word| candidate_lower.contains(word))
}

fn shared_tokens(a: &str, b: &str) -> usize {
    let left: HashSet<String> = a.split_whitespace().map(str::to_lowercase).collect();
    let right: HashSet<String> = b.split_whitespace().map(str::to_lowercase).collect();
    left.intersection(&right).count()
}
