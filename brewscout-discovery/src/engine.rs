//! The discovery pipeline wired together behind [`PlaceFinder`].

use brewscout_core::{
    DetailField, Geocoder, Location, Place, PlaceFinder, PlacesProvider, SearchFailure,
    SearchPreferences, SearchResult,
};
use brewscout_scorer::{ScoreOutcome, ScoringEngine, filter_candidates};

use crate::aggregate::{aggregate, find_by_name};
use crate::enrich::{Enricher, map_link, mark_filter_matches};
use crate::render::{details_summary, named_summary, search_summary};
use crate::resolver::GeocodeResolver;
use crate::source::PlaceSource;

/// Score given to places found by explicit name.
pub const NAMED_MATCH_SCORE: f32 = 100.0;

/// Tunable limits for [`DiscoveryEngine`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveryConfig {
    /// Location searched when the caller supplies none.
    pub default_location: String,
    /// Radius in metres passed to every place search.
    pub search_radius_m: u32,
    /// Number of places returned.
    pub max_places: usize,
    /// Number of ranked places enriched before the final cut.
    pub shortlist_size: usize,
    /// Photos fetched per place.
    pub max_photos: usize,
    /// Reviews kept per place for text matching.
    pub max_reviews: usize,
    /// Re-score the shortlist once reviews are known.
    pub verify_with_reviews: bool,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            default_location: "Seattle, WA".to_owned(),
            search_radius_m: 1500,
            max_places: 6,
            shortlist_size: 8,
            max_photos: 1,
            max_reviews: 5,
            verify_with_reviews: true,
        }
    }
}

/// Finds cafés by geocoding, searching, filtering, scoring and enriching.
///
/// The engine never fails: every problem ends up as explanatory text in the
/// returned [`SearchResult`].
///
/// # Examples
/// ```
/// use brewscout_core::test_support::{StubGeocoder, StubPlacesProvider, raw_place};
/// use brewscout_core::{Location, PlaceFinder, SearchPreferences};
/// use brewscout_discovery::DiscoveryEngine;
/// use brewscout_scorer::ScoringEngine;
///
/// let geocoder = StubGeocoder::default()
///     .with_result("Fremont", Location::new(47.65, -122.35, "Fremont, Seattle, WA"));
/// let places = StubPlacesProvider::default()
///     .with_type_results("cafe", vec![raw_place("p1", "Milstead & Co", 4.8, 950, &["cafe"])]);
/// let engine = DiscoveryEngine::new(geocoder, places, ScoringEngine::default());
///
/// let result = engine.search(&SearchPreferences::new("Fremont"));
/// assert_eq!(result.places.len(), 1);
/// assert!(result.text.contains("Milstead & Co"));
/// ```
#[derive(Debug)]
pub struct DiscoveryEngine<G, P> {
    resolver: GeocodeResolver<G>,
    places: P,
    scoring: ScoringEngine,
    config: DiscoveryConfig,
}

impl<G, P> DiscoveryEngine<G, P>
where
    G: Geocoder,
    P: PlacesProvider,
{
    /// Create an engine with the default [`DiscoveryConfig`].
    pub fn new(geocoder: G, places: P, scoring: ScoringEngine) -> Self {
        Self::with_config(geocoder, places, scoring, DiscoveryConfig::default())
    }

    /// Create an engine with explicit limits and a private geocode cache.
    pub fn with_config(
        geocoder: G,
        places: P,
        scoring: ScoringEngine,
        config: DiscoveryConfig,
    ) -> Self {
        Self::with_resolver(GeocodeResolver::new(geocoder), places, scoring, config)
    }

    /// Create an engine around an existing resolver, sharing its cache.
    pub const fn with_resolver(
        resolver: GeocodeResolver<G>,
        places: P,
        scoring: ScoringEngine,
        config: DiscoveryConfig,
    ) -> Self {
        Self {
            resolver,
            places,
            scoring,
            config,
        }
    }

    /// The active limits.
    #[must_use]
    pub const fn config(&self) -> &DiscoveryConfig {
        &self.config
    }

    /// The geocoding resolver and its cache.
    #[must_use]
    pub const fn resolver(&self) -> &GeocodeResolver<G> {
        &self.resolver
    }

    /// The places provider.
    #[must_use]
    pub const fn places(&self) -> &P {
        &self.places
    }
}

impl<G, P> PlaceFinder for DiscoveryEngine<G, P>
where
    G: Geocoder,
    P: PlacesProvider,
{
    fn search(&self, preferences: &SearchPreferences) -> SearchResult {
        let location_text = self.location_text(preferences.location_text());
        log::info!("searching for cafes in '{location_text}'");
        let Some(location) = self.resolver.resolve(&location_text).into_location() else {
            return SearchResult::failure(&SearchFailure::ResolutionFailure {
                location: location_text,
            });
        };

        if preferences.explicit_place_names().is_empty() {
            self.open_search(preferences, &location, location_text)
        } else {
            self.named_search(preferences.explicit_place_names(), &location, location_text)
        }
    }

    fn details(&self, name: &str, location: &str) -> SearchResult {
        let location_text = self.location_text(location);
        log::info!("getting details for '{name}' in '{location_text}'");
        let Some(resolved) = self.resolver.resolve(&location_text).into_location() else {
            return SearchResult::failure(&SearchFailure::ResolutionFailure {
                location: location_text,
            });
        };

        let source = PlaceSource::new(&self.places);
        let radius = self.config.search_radius_m;
        let Some(place) = find_by_name(&source, resolved.coord, &location_text, name, radius)
        else {
            return SearchResult::failure(&SearchFailure::NotFoundByName {
                names: vec![name.to_owned()],
                location: location_text,
            });
        };

        let enricher = self.enricher();
        let details = enricher.fetch_details(&place, &DetailField::ALL);
        let text = details_summary(&place, details.as_ref());
        let link = map_link(&place);
        let linked = place.with_map_link(link);
        let described = match details {
            Some(found) => linked
                .with_photo_urls(enricher.photo_urls(&found.photos))
                .with_reviews(enricher.review_sample(&found)),
            None => enricher.backfill_photos(linked),
        };

        SearchResult {
            text,
            review_analyzed_count: usize::from(described.has_reviews()),
            places: vec![described],
            location_found: Some(location_text),
            total_analyzed: 1,
        }
    }
}

impl<G, P> DiscoveryEngine<G, P>
where
    G: Geocoder,
    P: PlacesProvider,
{
    fn location_text(&self, requested: &str) -> String {
        if requested.trim().is_empty() {
            self.config.default_location.clone()
        } else {
            requested.to_owned()
        }
    }

    const fn enricher(&self) -> Enricher<'_, P> {
        Enricher::new(&self.places, self.config.max_reviews, self.config.max_photos)
    }

    fn open_search(
        &self,
        preferences: &SearchPreferences,
        location: &Location,
        location_text: String,
    ) -> SearchResult {
        let source = PlaceSource::new(&self.places);
        let candidates = aggregate(
            &source,
            location.coord,
            preferences,
            self.config.search_radius_m,
        );
        if candidates.is_empty() {
            return SearchResult::failure(&SearchFailure::NoCandidates {
                location: location_text,
            });
        }
        let total_analyzed = candidates.len();

        let survivors = filter_candidates(candidates, preferences);
        let shortlist = self
            .scoring
            .rank(survivors, preferences, self.config.shortlist_size);
        log::debug!("shortlisted {} places", shortlist.len());

        let enricher = self.enricher();
        let enriched = enricher.enrich_shortlist(shortlist, self.config.max_places);
        let finalists = if self.config.verify_with_reviews {
            self.scoring
                .rank(enriched, preferences, self.config.max_places)
        } else {
            enriched
                .into_iter()
                .filter(|place| {
                    !matches!(
                        self.scoring.evaluate(place, preferences),
                        ScoreOutcome::Excluded
                    )
                })
                .take(self.config.max_places)
                .collect()
        };
        if finalists.is_empty() {
            return SearchResult::failure(&SearchFailure::NoSurvivors {
                location: location_text,
            });
        }

        let places: Vec<Place> = finalists
            .into_iter()
            .map(|place| mark_filter_matches(enricher.backfill_photos(place), preferences))
            .collect();
        let review_analyzed_count = places.iter().filter(|p| p.has_reviews()).count();
        log::info!("returning {} cafes for '{location_text}'", places.len());

        SearchResult {
            text: search_summary(
                &places,
                &location_text,
                preferences.underrated(),
                review_analyzed_count,
            ),
            places,
            location_found: Some(location_text),
            total_analyzed,
            review_analyzed_count,
        }
    }

    fn named_search(
        &self,
        names: &[String],
        location: &Location,
        location_text: String,
    ) -> SearchResult {
        let source = PlaceSource::new(&self.places);
        let enricher = self.enricher();
        let radius = self.config.search_radius_m;

        let mut found: Vec<Place> = Vec::new();
        let mut missing: Vec<String> = Vec::new();
        let mut repeats: Vec<(String, String)> = Vec::new();
        for name in names {
            match find_by_name(&source, location.coord, &location_text, name, radius) {
                Some(place) if found.iter().any(|f| f.id() == place.id()) => {
                    log::debug!("'{name}' matched an already listed place");
                    repeats.push((name.clone(), place.name().to_owned()));
                }
                Some(place) => {
                    let link = map_link(&place);
                    let linked = place.with_map_link(link);
                    found.push(
                        enricher
                            .backfill_photos(linked)
                            .with_score(NAMED_MATCH_SCORE),
                    );
                }
                None => missing.push(name.clone()),
            }
        }

        if found.is_empty() {
            return SearchResult::failure(&SearchFailure::NotFoundByName {
                names: names.to_vec(),
                location: location_text,
            });
        }

        SearchResult {
            text: named_summary(&found, &location_text, &missing, &repeats),
            total_analyzed: found.len(),
            places: found,
            location_found: Some(location_text),
            review_analyzed_count: 0,
        }
    }
}
