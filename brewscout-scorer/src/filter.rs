//! Hard filters that remove unsuitable candidates before scoring.
//!
//! Rules run per place in a fixed order: business type, dessert-focused name,
//! then review volume when the caller asked for underrated places. A dropped
//! place is gone; soft exclusion for unwanted features is the scorer's job.
#![forbid(unsafe_code)]

use brewscout_core::{Place, SearchPreferences};

/// Business types never returned.
pub const DISALLOWED_TYPES: &[&str] = &[
    "ice_cream_shop",
    "frozen_yogurt_shop",
    "dessert_shop",
    "candy_store",
    "donut_shop",
    "cake_shop",
    "gelato_shop",
    "ice_cream_parlor",
    "gelato_parlor",
    "sorbet_shop",
];

/// Bakery types, returned only when the caller asks for pastries.
pub const BAKERY_TYPES: &[&str] = &["bakery", "cupcake_shop", "pastry_shop"];

/// Name fragments that mark a dessert-focused business.
pub const DESSERT_NAME_TOKENS: &[&str] = &[
    "gelato",
    "ice cream",
    "frozen yogurt",
    "sorbet",
    "popsicle",
    "gelati",
];

/// Places rated by at least this many people are not "underrated".
pub const UNDERRATED_RATING_CEILING: u32 = 1000;

/// Why a candidate was removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropReason {
    /// The place carries a disallowed business type.
    DisallowedType(String),
    /// The place is a bakery and pastries were not requested.
    UnrequestedBakery(String),
    /// The name suggests a dessert shop and desserts were not requested.
    DessertName,
    /// Too many ratings for an underrated search.
    TooPopular(u32),
}

/// Decide whether `place` should be dropped, and why.
///
/// # Examples
/// ```
/// use brewscout_core::{Place, SearchPreferences};
/// use brewscout_scorer::{DropReason, drop_reason};
///
/// let shop = Place::builder("g", "Gelato Corner").category("cafe").build();
/// let prefs = SearchPreferences::new("Ballard");
/// assert_eq!(drop_reason(&shop, &prefs), Some(DropReason::DessertName));
///
/// let with_dessert = prefs.with_include("gelato");
/// assert_eq!(drop_reason(&shop, &with_dessert), None);
/// ```
#[must_use]
pub fn drop_reason(place: &Place, preferences: &SearchPreferences) -> Option<DropReason> {
    let wants_pastries = preferences.wants_pastries();
    for category in place.categories() {
        let is_bakery = BAKERY_TYPES.contains(&category.as_str());
        if is_bakery && wants_pastries {
            continue;
        }
        if DISALLOWED_TYPES.contains(&category.as_str()) {
            return Some(DropReason::DisallowedType(category.clone()));
        }
        if is_bakery {
            return Some(DropReason::UnrequestedBakery(category.clone()));
        }
    }

    let name = place.name().to_lowercase();
    if DESSERT_NAME_TOKENS.iter().any(|token| name.contains(token)) && !preferences.wants_dessert()
    {
        return Some(DropReason::DessertName);
    }

    if preferences.underrated() && place.rating_count() >= UNDERRATED_RATING_CEILING {
        return Some(DropReason::TooPopular(place.rating_count()));
    }
    None
}

/// Remove every candidate [`drop_reason`] rejects, preserving order.
///
/// Filtering is idempotent: running it on its own output changes nothing.
#[must_use]
pub fn filter_candidates(places: Vec<Place>, preferences: &SearchPreferences) -> Vec<Place> {
    places
        .into_iter()
        .filter(|place| match drop_reason(place, preferences) {
            Some(reason) => {
                log::debug!("filtering out {}: {reason:?}", place.name());
                false
            }
            None => true,
        })
        .collect()
}
