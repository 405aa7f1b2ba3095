//! Geocoding with fallback query variants and a process-wide cache.

use std::collections::HashMap;
use std::iter;
use std::sync::{Arc, PoisonError, RwLock};

use brewscout_core::{Geocoder, Location, Resolution};

/// Neighbourhood keywords paired with the city they belong to.
const NEIGHBOURHOODS: &[(&str, &str)] = &[
    ("ballard", "Seattle, WA"),
    ("capitol hill", "Seattle, WA"),
    ("fremont", "Seattle, WA"),
    ("mission", "San Francisco, CA"),
    ("williamsburg", "Brooklyn, NY"),
];

const CITY_SUFFIXES: &[&str] = &["Seattle, WA", "San Francisco, CA", "New York, NY"];

const QUALIFIERS: &[&str] = &["neighborhood", "area"];

/// Successful geocodes keyed by the location text the caller typed.
///
/// Entries are never evicted. Concurrent writers for the same key keep the
/// first value stored.
#[derive(Debug, Default)]
pub struct GeocodeCache {
    entries: RwLock<HashMap<String, Location>>,
}

impl GeocodeCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a previous resolution of exactly `text`.
    #[must_use]
    pub fn get(&self, text: &str) -> Option<Location> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(text)
            .cloned()
    }

    /// Store `location` for `text` unless an entry exists, returning the
    /// value that ends up cached.
    pub fn insert_if_absent(&self, text: &str, location: Location) -> Location {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(text.to_owned())
            .or_insert(location)
            .clone()
    }

    /// Number of cached resolutions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether nothing has been cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Resolve free-text locations through a [`Geocoder`].
///
/// The raw text is tried first, then each of [`fallback_variants`] in order.
/// The first query returning at least one location wins. Provider errors are
/// logged and treated like an empty answer.
///
/// # Examples
/// ```
/// use brewscout_core::test_support::StubGeocoder;
/// use brewscout_core::{Location, Resolution};
/// use brewscout_discovery::GeocodeResolver;
///
/// let ballard = Location::new(47.668, -122.384, "Ballard, Seattle, WA, USA");
/// let geocoder = StubGeocoder::default().with_result("Ballard, Seattle, WA", ballard.clone());
/// let resolver = GeocodeResolver::new(geocoder);
///
/// assert_eq!(resolver.resolve("Ballard"), Resolution::Found(ballard));
/// ```
#[derive(Debug)]
pub struct GeocodeResolver<G> {
    geocoder: G,
    cache: Arc<GeocodeCache>,
}

impl<G: Geocoder> GeocodeResolver<G> {
    /// Create a resolver with its own empty cache.
    pub fn new(geocoder: G) -> Self {
        Self::with_cache(geocoder, Arc::new(GeocodeCache::new()))
    }

    /// Create a resolver sharing `cache` with other resolvers.
    pub const fn with_cache(geocoder: G, cache: Arc<GeocodeCache>) -> Self {
        Self { geocoder, cache }
    }

    /// The cache this resolver reads and fills.
    #[must_use]
    pub const fn cache(&self) -> &Arc<GeocodeCache> {
        &self.cache
    }

    /// The wrapped geocoder.
    #[must_use]
    pub const fn geocoder(&self) -> &G {
        &self.geocoder
    }

    /// Resolve `text`, consulting the cache before the provider.
    ///
    /// Only successful resolutions are cached, under the original text.
    #[must_use]
    pub fn resolve(&self, text: &str) -> Resolution {
        if text.trim().is_empty() {
            return Resolution::NotFound;
        }
        if let Some(location) = self.cache.get(text) {
            log::debug!("geocode cache hit for '{text}'");
            return Resolution::Found(location);
        }

        for query in iter::once(text.to_owned()).chain(fallback_variants(text)) {
            if let Some(location) = self.attempt(&query) {
                if query != text {
                    log::info!("resolved '{text}' via fallback '{query}'");
                }
                return Resolution::Found(self.cache.insert_if_absent(text, location));
            }
        }

        log::warn!("all geocoding attempts failed for '{text}'");
        Resolution::NotFound
    }

    fn attempt(&self, query: &str) -> Option<Location> {
        match self.geocoder.geocode(query) {
            Ok(hits) => hits.into_iter().next(),
            Err(err) => {
                log::warn!("geocoding '{query}' failed: {err}");
                None
            }
        }
    }
}

/// Fallback queries tried after the raw text, in order and without repeats.
///
/// Neighbourhood-specific city suffixes come first, then the major-city
/// suffixes, then the `neighborhood` and `area` qualifiers.
///
/// # Examples
/// ```
/// use brewscout_discovery::fallback_variants;
///
/// let variants = fallback_variants("Ballard");
/// assert_eq!(variants.first().map(String::as_str), Some("Ballard, Seattle, WA"));
/// assert_eq!(variants.last().map(String::as_str), Some("Ballard area"));
/// ```
#[must_use]
pub fn fallback_variants(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    let local = NEIGHBOURHOODS
        .iter()
        .filter(|(keyword, _)| lowered.contains(keyword))
        .map(|(_, city)| format!("{text}, {city}"));
    let cities = CITY_SUFFIXES.iter().map(|city| format!("{text}, {city}"));
    let qualified = QUALIFIERS
        .iter()
        .map(|qualifier| format!("{text} {qualifier}"));

    let mut variants: Vec<String> = Vec::new();
    for variant in local.chain(cities).chain(qualified) {
        if !variants.contains(&variant) {
            variants.push(variant);
        }
    }
    variants
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewscout_core::ProviderError;
    use brewscout_core::test_support::StubGeocoder;
    use rstest::{fixture, rstest};

    #[fixture]
    fn ballard() -> Location {
        Location::new(47.668, -122.384, "Ballard, Seattle, WA, USA")
    }

    #[rstest]
    fn neighbourhood_suffix_comes_first_without_duplicates() {
        assert_eq!(
            fallback_variants("Ballard"),
            vec![
                "Ballard, Seattle, WA",
                "Ballard, San Francisco, CA",
                "Ballard, New York, NY",
                "Ballard neighborhood",
                "Ballard area",
            ]
        );
    }

    #[rstest]
    fn unknown_text_gets_generic_variants() {
        let variants = fallback_variants("Nowhere");
        assert_eq!(variants.len(), 5);
        assert_eq!(
            variants.first().map(String::as_str),
            Some("Nowhere, Seattle, WA")
        );
    }

    #[rstest]
    fn raw_text_is_tried_first(ballard: Location) {
        let resolver = GeocodeResolver::new(StubGeocoder::default().with_result("Ballard", ballard));
        assert!(resolver.resolve("Ballard").location().is_some());
        assert_eq!(resolver.geocoder().calls(), vec!["Ballard"]);
    }

    #[rstest]
    fn first_successful_fallback_wins(ballard: Location) {
        let other = Location::new(40.7, -73.9, "Ballard, New York");
        let geocoder = StubGeocoder::default()
            .with_result("Ballard, Seattle, WA", ballard.clone())
            .with_result("Ballard, New York, NY", other);
        let resolver = GeocodeResolver::new(geocoder);
        assert_eq!(resolver.resolve("Ballard"), Resolution::Found(ballard));
        assert_eq!(resolver.geocoder().call_count(), 2);
    }

    #[rstest]
    fn provider_errors_fall_through_to_next_variant(ballard: Location) {
        let geocoder = StubGeocoder::default()
            .with_error(
                "Ballard",
                ProviderError::Timeout {
                    url: "stub".into(),
                    timeout_secs: 30,
                },
            )
            .with_result("Ballard, Seattle, WA", ballard.clone());
        let resolver = GeocodeResolver::new(geocoder);
        assert_eq!(resolver.resolve("Ballard"), Resolution::Found(ballard));
    }

    #[rstest]
    fn cached_resolution_skips_the_provider(ballard: Location) {
        let geocoder = StubGeocoder::default().with_result("Ballard, Seattle, WA", ballard);
        let resolver = GeocodeResolver::new(geocoder);
        let first = resolver.resolve("Ballard");
        let calls_after_first = resolver.geocoder().call_count();
        let second = resolver.resolve("Ballard");
        assert_eq!(first, second);
        assert_eq!(resolver.geocoder().call_count(), calls_after_first);
        assert_eq!(resolver.cache().len(), 1);
    }

    #[rstest]
    fn cache_is_case_sensitive(ballard: Location) {
        let cache = Arc::new(GeocodeCache::new());
        cache.insert_if_absent("Ballard", ballard);
        let resolver = GeocodeResolver::with_cache(StubGeocoder::default(), cache);
        assert_eq!(resolver.resolve("ballard"), Resolution::NotFound);
        assert!(resolver.geocoder().call_count() > 0);
    }

    #[rstest]
    fn failures_are_not_cached() {
        let resolver = GeocodeResolver::new(StubGeocoder::default());
        assert_eq!(resolver.resolve("Atlantis"), Resolution::NotFound);
        assert_eq!(resolver.geocoder().call_count(), 6);
        assert!(resolver.cache().is_empty());
        assert_eq!(resolver.resolve("Atlantis"), Resolution::NotFound);
        assert_eq!(resolver.geocoder().call_count(), 12);
    }

    #[rstest]
    fn insert_if_absent_keeps_first_value(ballard: Location) {
        let cache = GeocodeCache::new();
        let kept = cache.insert_if_absent("Ballard", ballard.clone());
        let again = cache.insert_if_absent("Ballard", Location::new(0.0, 0.0, "elsewhere"));
        assert_eq!(kept, ballard);
        assert_eq!(again, ballard);
    }

    #[rstest]
    fn blank_text_is_not_found_without_calls() {
        let resolver = GeocodeResolver::new(StubGeocoder::default());
        assert_eq!(resolver.resolve("   "), Resolution::NotFound);
        assert_eq!(resolver.geocoder().call_count(), 0);
    }
}
