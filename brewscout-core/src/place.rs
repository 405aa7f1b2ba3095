//! Normalised café records carried through the pipeline.

use std::collections::{BTreeMap, BTreeSet};

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{KeywordGroup, RawPlace};

/// Name used when a provider record carries none.
pub const UNKNOWN_PLACE_NAME: &str = "Unknown";

/// A café (or café-like business) found for a search.
///
/// The descriptive fields come from the places provider and never change.
/// Engine-computed fields (score, matches, reviews, photos, map link) are
/// set by the filter, scoring and enrichment stages, each of which produces
/// a new value through the `with_*` methods rather than editing in place.
///
/// # Examples
/// ```
/// use brewscout_core::Place;
///
/// let place = Place::builder("p1", "Storyville Coffee")
///     .rating(4.7)
///     .rating_count(1200)
///     .category("cafe")
///     .build()
///     .with_score(120.0);
///
/// assert_eq!(place.id(), "p1");
/// assert!(place.has_category("cafe"));
/// assert_eq!(place.score(), 120.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Place {
    id: String,
    name: String,
    rating: Option<f32>,
    rating_count: u32,
    price_level: Option<u8>,
    categories: BTreeSet<String>,
    vicinity: Option<String>,
    formatted_address: Option<String>,
    coord: Option<Coord<f64>>,
    score: f32,
    matched_preferences: BTreeSet<KeywordGroup>,
    excluded: bool,
    review_sample: Option<Vec<String>>,
    photo_urls: Vec<String>,
    map_link: Option<String>,
    filter_matches: BTreeMap<String, bool>,
}

impl Place {
    /// Start building a place with its stable identifier and display name.
    pub fn builder(id: impl Into<String>, name: impl Into<String>) -> PlaceBuilder {
        PlaceBuilder::new(id, name)
    }

    /// Normalise a raw provider record.
    ///
    /// Returns `None` when the record lacks a usable identifier; such records
    /// cannot be de-duplicated and are dropped.
    ///
    /// # Examples
    /// ```
    /// use brewscout_core::{Place, RawPlace};
    ///
    /// let raw = RawPlace {
    ///     place_id: Some("abc".into()),
    ///     name: None,
    ///     ..RawPlace::default()
    /// };
    /// let place = Place::from_raw(raw).expect("identifier present");
    /// assert_eq!(place.name(), "Unknown");
    ///
    /// assert!(Place::from_raw(RawPlace::default()).is_none());
    /// ```
    pub fn from_raw(raw: RawPlace) -> Option<Self> {
        let id = raw.place_id.filter(|id| !id.trim().is_empty())?;
        let name = raw
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_PLACE_NAME.to_owned());
        let mut builder = PlaceBuilder::new(id, name)
            .rating_count(raw.user_ratings_total.unwrap_or(0))
            .categories(raw.types);
        builder.rating = raw.rating;
        builder.price_level = raw.price_level;
        builder.vicinity = raw.vicinity;
        builder.formatted_address = raw.formatted_address;
        builder.coord = raw.location;
        Some(builder.build())
    }

    /// Provider-stable identifier, unique within one search.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Average rating in `0.0..=5.0`, if the provider reports one.
    pub const fn rating(&self) -> Option<f32> {
        self.rating
    }

    /// Number of ratings behind [`Place::rating`].
    pub const fn rating_count(&self) -> u32 {
        self.rating_count
    }

    /// Price level in `0..=4`, if known.
    pub const fn price_level(&self) -> Option<u8> {
        self.price_level
    }

    /// Provider business categories, e.g. `cafe` or `bakery`.
    pub const fn categories(&self) -> &BTreeSet<String> {
        &self.categories
    }

    /// Whether the place carries `category`.
    pub fn has_category(&self, category: &str) -> bool {
        self.categories.contains(category)
    }

    /// Short address near the search point.
    pub fn vicinity(&self) -> Option<&str> {
        self.vicinity.as_deref()
    }

    /// Full formatted address.
    pub fn formatted_address(&self) -> Option<&str> {
        self.formatted_address.as_deref()
    }

    /// Position with `x = longitude`, `y = latitude`.
    pub const fn coord(&self) -> Option<Coord<f64>> {
        self.coord
    }

    /// Composite ranking score; zero until scored.
    pub const fn score(&self) -> f32 {
        self.score
    }

    /// Include groups the scorer found evidence for.
    pub const fn matched_preferences(&self) -> &BTreeSet<KeywordGroup> {
        &self.matched_preferences
    }

    /// Whether an exclude term matched and lowered the score.
    pub const fn is_excluded(&self) -> bool {
        self.excluded
    }

    /// Lowercased review texts, or `None` when reviews were never fetched.
    pub fn review_sample(&self) -> Option<&[String]> {
        self.review_sample.as_deref()
    }

    /// Whether reviews were fetched and at least one was non-empty.
    pub fn has_reviews(&self) -> bool {
        self.review_sample.as_ref().is_some_and(|r| !r.is_empty())
    }

    /// All review texts joined by spaces; empty when none were fetched.
    pub fn review_text(&self) -> String {
        self.review_sample
            .as_deref()
            .map(|reviews| reviews.join(" "))
            .unwrap_or_default()
    }

    /// Lowercased name and categories, plus review text when `with_reviews`.
    pub fn searchable_text(&self, with_reviews: bool) -> String {
        let mut parts = vec![self.name.to_lowercase()];
        parts.extend(self.categories.iter().map(|c| c.to_lowercase()));
        if with_reviews {
            parts.push(self.review_text());
        }
        parts.join(" ")
    }

    /// Display URLs for fetched photos.
    pub fn photo_urls(&self) -> &[String] {
        &self.photo_urls
    }

    /// Deep link into a maps application.
    pub fn map_link(&self) -> Option<&str> {
        self.map_link.as_deref()
    }

    /// For each requested include term, whether this place satisfies it.
    pub const fn filter_matches(&self) -> &BTreeMap<String, bool> {
        &self.filter_matches
    }

    /// Return a copy carrying `score`.
    #[must_use]
    pub const fn with_score(mut self, score: f32) -> Self {
        self.score = score;
        self
    }

    /// Return a copy carrying the matched include groups.
    #[must_use]
    pub fn with_matched_preferences(mut self, matched: BTreeSet<KeywordGroup>) -> Self {
        self.matched_preferences = matched;
        self
    }

    /// Return a copy marked (or unmarked) as soft-excluded.
    #[must_use]
    pub const fn with_excluded(mut self, excluded: bool) -> Self {
        self.excluded = excluded;
        self
    }

    /// Return a copy carrying fetched review texts, lowercased.
    #[must_use]
    pub fn with_reviews(mut self, reviews: Vec<String>) -> Self {
        self.review_sample = Some(reviews.into_iter().map(|r| r.to_lowercase()).collect());
        self
    }

    /// Return a copy carrying photo display URLs.
    #[must_use]
    pub fn with_photo_urls(mut self, urls: Vec<String>) -> Self {
        self.photo_urls = urls;
        self
    }

    /// Return a copy carrying a maps deep link.
    #[must_use]
    pub fn with_map_link(mut self, link: impl Into<String>) -> Self {
        self.map_link = Some(link.into());
        self
    }

    /// Return a copy carrying per-term filter satisfaction.
    #[must_use]
    pub fn with_filter_matches(mut self, matches: BTreeMap<String, bool>) -> Self {
        self.filter_matches = matches;
        self
    }
}

/// Builder for [`Place`] values, chiefly for adapters and tests.
#[derive(Debug, Clone)]
pub struct PlaceBuilder {
    id: String,
    name: String,
    rating: Option<f32>,
    rating_count: u32,
    price_level: Option<u8>,
    categories: BTreeSet<String>,
    vicinity: Option<String>,
    formatted_address: Option<String>,
    coord: Option<Coord<f64>>,
}

impl PlaceBuilder {
    fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            rating: None,
            rating_count: 0,
            price_level: None,
            categories: BTreeSet::new(),
            vicinity: None,
            formatted_address: None,
            coord: None,
        }
    }

    /// Set the average rating.
    #[must_use]
    pub const fn rating(mut self, rating: f32) -> Self {
        self.rating = Some(rating);
        self
    }

    /// Set the number of ratings.
    #[must_use]
    pub const fn rating_count(mut self, count: u32) -> Self {
        self.rating_count = count;
        self
    }

    /// Set the price level.
    #[must_use]
    pub const fn price_level(mut self, level: u8) -> Self {
        self.price_level = Some(level);
        self
    }

    /// Add one business category.
    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.categories.insert(category.into());
        self
    }

    /// Add several business categories.
    #[must_use]
    pub fn categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories.extend(categories.into_iter().map(Into::into));
        self
    }

    /// Set the short vicinity address.
    #[must_use]
    pub fn vicinity(mut self, vicinity: impl Into<String>) -> Self {
        self.vicinity = Some(vicinity.into());
        self
    }

    /// Set the full formatted address.
    #[must_use]
    pub fn formatted_address(mut self, address: impl Into<String>) -> Self {
        self.formatted_address = Some(address.into());
        self
    }

    /// Set the position.
    #[must_use]
    pub const fn coord(mut self, coord: Coord<f64>) -> Self {
        self.coord = Some(coord);
        self
    }

    /// Finish the place with empty engine-computed fields.
    pub fn build(self) -> Place {
        Place {
            id: self.id,
            name: self.name,
            rating: self.rating,
            rating_count: self.rating_count,
            price_level: self.price_level,
            categories: self.categories,
            vicinity: self.vicinity,
            formatted_address: self.formatted_address,
            coord: self.coord,
            score: 0.0,
            matched_preferences: BTreeSet::new(),
            excluded: false,
            review_sample: None,
            photo_urls: Vec::new(),
            map_link: None,
            filter_matches: BTreeMap::new(),
        }
    }
}
