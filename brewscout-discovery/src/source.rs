//! Thin adapter turning provider calls into normalised places.

use brewscout_core::{NearbyQuery, Place, PlacesProvider, ProviderError, RawPlace, TextQuery};
use geo::Coord;

/// One provider request in, zero or more [`Place`] values out.
///
/// Records without an identifier are dropped. Provider errors are logged and
/// degrade to an empty list so callers can treat every source as optional.
#[derive(Debug, Clone, Copy)]
pub struct PlaceSource<'a, P: ?Sized> {
    provider: &'a P,
}

impl<'a, P: PlacesProvider + ?Sized> PlaceSource<'a, P> {
    /// Wrap `provider`.
    pub const fn new(provider: &'a P) -> Self {
        Self { provider }
    }

    /// The wrapped provider.
    #[must_use]
    pub const fn provider(&self) -> &'a P {
        self.provider
    }

    /// Nearby search around `location`, optionally narrowed by type or keyword.
    #[must_use]
    pub fn search_nearby(
        &self,
        location: Coord<f64>,
        place_type: Option<&str>,
        keyword: Option<&str>,
        radius_m: u32,
    ) -> Vec<Place> {
        let mut query = NearbyQuery::new(location, radius_m);
        if let Some(place_type) = place_type {
            query = query.with_type(place_type);
        }
        if let Some(keyword) = keyword {
            query = query.with_keyword(keyword);
        }
        let label = place_type.or(keyword).unwrap_or("<any>");
        normalise(label, self.provider.nearby(&query))
    }

    /// Free-text search biased towards `location`.
    #[must_use]
    pub fn search_by_text(&self, query: &str, location: Coord<f64>, radius_m: u32) -> Vec<Place> {
        let request = TextQuery::new(query).near(location, radius_m);
        normalise(query, self.provider.text_search(&request))
    }
}

fn normalise(label: &str, response: Result<Vec<RawPlace>, ProviderError>) -> Vec<Place> {
    match response {
        Ok(raw) => {
            let total = raw.len();
            let places: Vec<Place> = raw.into_iter().filter_map(Place::from_raw).collect();
            if places.len() < total {
                log::debug!(
                    "dropped {} unidentified records from '{label}'",
                    total.saturating_sub(places.len())
                );
            }
            places
        }
        Err(err) => {
            log::warn!("place search '{label}' failed: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brewscout_core::test_support::{StubPlacesProvider, raw_place};
    use rstest::rstest;

    const ORIGIN: Coord<f64> = Coord { x: 0.0, y: 0.0 };

    #[rstest]
    fn records_without_identifier_are_dropped() {
        let mut anonymous = raw_place("x", "Ghost Cafe", 4.0, 5, &["cafe"]);
        anonymous.place_id = None;
        let provider = StubPlacesProvider::default().with_type_results(
            "cafe",
            vec![anonymous, raw_place("p1", "Real Cafe", 4.5, 50, &["cafe"])],
        );
        let places = PlaceSource::new(&provider).search_nearby(ORIGIN, Some("cafe"), None, 1500);
        assert_eq!(places.len(), 1);
        assert_eq!(places.first().map(Place::id), Some("p1"));
    }

    #[rstest]
    fn provider_errors_become_empty_lists() {
        let provider = StubPlacesProvider::default().with_keyword_error(
            "espresso",
            ProviderError::NetworkError {
                url: "stub".into(),
                message: "offline".into(),
            },
        );
        let places =
            PlaceSource::new(&provider).search_nearby(ORIGIN, None, Some("espresso"), 1500);
        assert!(places.is_empty());
        assert_eq!(provider.nearby_calls(), 1);
    }

    #[rstest]
    fn text_search_uses_exact_query() {
        let provider = StubPlacesProvider::default().with_text_results(
            "Storyville Coffee Seattle",
            vec![raw_place("s1", "Storyville Coffee", 4.6, 900, &["cafe"])],
        );
        let places =
            PlaceSource::new(&provider).search_by_text("Storyville Coffee Seattle", ORIGIN, 1500);
        assert_eq!(places.len(), 1);
        assert_eq!(provider.text_calls(), 1);
    }
}
