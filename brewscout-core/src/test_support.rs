//! Deterministic provider doubles used by unit and behaviour tests.
//!
//! Neither double performs I/O. Both record the calls they receive so tests
//! can assert on provider traffic as well as results.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use geo::Coord;

use crate::{
    DetailField, Geocoder, Location, NearbyQuery, PhotoRef, PlaceDetails, PlacesProvider,
    ProviderError, RawPlace, TextQuery,
};

/// Build a raw search record with the common fields filled.
pub fn raw_place(id: &str, name: &str, rating: f32, rating_count: u32, types: &[&str]) -> RawPlace {
    RawPlace {
        place_id: Some(id.to_owned()),
        name: Some(name.to_owned()),
        rating: Some(rating),
        user_ratings_total: Some(rating_count),
        price_level: None,
        types: types.iter().map(|t| (*t).to_owned()).collect(),
        vicinity: Some(format!("{name} Street")),
        formatted_address: None,
        location: Some(Coord {
            x: -122.38,
            y: 47.66,
        }),
    }
}

/// `Geocoder` returning canned results per exact query text.
///
/// Queries without a canned entry geocode to an empty list.
#[derive(Debug, Default)]
pub struct StubGeocoder {
    responses: HashMap<String, Result<Vec<Location>, ProviderError>>,
    calls: Mutex<Vec<String>>,
}

impl StubGeocoder {
    /// Answer `query` with a single location.
    #[must_use]
    pub fn with_result(mut self, query: impl Into<String>, location: Location) -> Self {
        self.responses.insert(query.into(), Ok(vec![location]));
        self
    }

    /// Answer `query` with an error.
    #[must_use]
    pub fn with_error(mut self, query: impl Into<String>, error: ProviderError) -> Self {
        self.responses.insert(query.into(), Err(error));
        self
    }

    /// Queries received so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of queries received so far.
    pub fn call_count(&self) -> usize {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Geocoder for StubGeocoder {
    fn geocode(&self, query: &str) -> Result<Vec<Location>, ProviderError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(query.to_owned());
        if query.trim().is_empty() {
            return Err(ProviderError::EmptyQuery);
        }
        self.responses
            .get(query)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }
}

type Canned = Result<Vec<RawPlace>, ProviderError>;

/// `PlacesProvider` returning canned responses keyed by request.
///
/// Nearby searches are keyed by their type or keyword, text searches by the
/// exact query string and details by place identifier. Unknown requests
/// return empty lists; unknown details return a `NOT_FOUND` service error.
#[derive(Debug, Default)]
pub struct StubPlacesProvider {
    by_type: HashMap<String, Canned>,
    by_keyword: HashMap<String, Canned>,
    by_text: HashMap<String, Canned>,
    details: HashMap<String, PlaceDetails>,
    nearby_calls: AtomicUsize,
    text_calls: AtomicUsize,
    detail_requests: Mutex<Vec<String>>,
}

impl StubPlacesProvider {
    /// Answer a nearby search restricted to `place_type`.
    #[must_use]
    pub fn with_type_results(mut self, place_type: impl Into<String>, places: Vec<RawPlace>) -> Self {
        self.by_type.insert(place_type.into(), Ok(places));
        self
    }

    /// Answer a nearby search for `keyword`.
    #[must_use]
    pub fn with_keyword_results(mut self, keyword: impl Into<String>, places: Vec<RawPlace>) -> Self {
        self.by_keyword.insert(keyword.into(), Ok(places));
        self
    }

    /// Fail a nearby search for `keyword`.
    #[must_use]
    pub fn with_keyword_error(mut self, keyword: impl Into<String>, error: ProviderError) -> Self {
        self.by_keyword.insert(keyword.into(), Err(error));
        self
    }

    /// Answer a text search for exactly `query`.
    #[must_use]
    pub fn with_text_results(mut self, query: impl Into<String>, places: Vec<RawPlace>) -> Self {
        self.by_text.insert(query.into(), Ok(places));
        self
    }

    /// Answer a details call for `place_id`.
    #[must_use]
    pub fn with_details(mut self, place_id: impl Into<String>, details: PlaceDetails) -> Self {
        self.details.insert(place_id.into(), details);
        self
    }

    /// Number of nearby searches received.
    pub fn nearby_calls(&self) -> usize {
        self.nearby_calls.load(Ordering::SeqCst)
    }

    /// Number of text searches received.
    pub fn text_calls(&self) -> usize {
        self.text_calls.load(Ordering::SeqCst)
    }

    /// Place identifiers passed to details calls, in order.
    pub fn detail_requests(&self) -> Vec<String> {
        self.detail_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl PlacesProvider for StubPlacesProvider {
    fn nearby(&self, query: &NearbyQuery) -> Result<Vec<RawPlace>, ProviderError> {
        self.nearby_calls.fetch_add(1, Ordering::SeqCst);
        let canned = match (&query.place_type, &query.keyword) {
            (Some(place_type), _) => self.by_type.get(place_type),
            (None, Some(keyword)) => self.by_keyword.get(keyword),
            (None, None) => None,
        };
        canned.cloned().unwrap_or_else(|| Ok(Vec::new()))
    }

    fn text_search(&self, query: &TextQuery) -> Result<Vec<RawPlace>, ProviderError> {
        self.text_calls.fetch_add(1, Ordering::SeqCst);
        if query.query.trim().is_empty() {
            return Err(ProviderError::EmptyQuery);
        }
        self.by_text
            .get(&query.query)
            .cloned()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn details(
        &self,
        place_id: &str,
        _fields: &[DetailField],
    ) -> Result<PlaceDetails, ProviderError> {
        self.detail_requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(place_id.to_owned());
        self.details
            .get(place_id)
            .cloned()
            .ok_or_else(|| ProviderError::ServiceError {
                status: "NOT_FOUND".to_owned(),
                message: format!("no details for {place_id}"),
            })
    }

    fn photo_url(&self, photo: &PhotoRef) -> Result<String, ProviderError> {
        Ok(format!("https://photos.test/{}", photo.reference))
    }
}
