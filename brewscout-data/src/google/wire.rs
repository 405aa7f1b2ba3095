//! Google Maps JSON response types.
//!
//! These mirror the subset of the Geocoding and legacy Places API responses
//! the client reads. Every response carries a `status` string; `OK` and
//! `ZERO_RESULTS` are successes and anything else is a service error.
//!
//! See: <https://developers.google.com/maps/documentation/places/web-service/search>

use brewscout_core::{PhotoRef, PlaceDetails, ProviderError, RawPlace, Review};
use geo::Coord;
use serde::Deserialize;

/// Check a response status, mapping failures to a service error.
pub fn check_status(status: &str, error_message: Option<&str>) -> Result<(), ProviderError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        other => Err(ProviderError::ServiceError {
            status: other.to_owned(),
            message: error_message.unwrap_or_default().to_owned(),
        }),
    }
}

#[derive(Debug, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl From<LatLng> for Coord<f64> {
    fn from(value: LatLng) -> Self {
        Self {
            x: value.lng,
            y: value.lat,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct Geometry {
    pub location: LatLng,
}

/// Geocoding API response.
#[derive(Debug, Deserialize)]
pub struct GeocodeResponse {
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<GeocodeResult>,
}

#[derive(Debug, Deserialize)]
pub struct GeocodeResult {
    pub formatted_address: String,
    pub geometry: Geometry,
}

/// Nearby-search and text-search response.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub status: String,
    pub error_message: Option<String>,
    #[serde(default)]
    pub results: Vec<SearchPlace>,
}

#[derive(Debug, Deserialize)]
pub struct SearchPlace {
    pub place_id: Option<String>,
    pub name: Option<String>,
    pub rating: Option<f32>,
    pub user_ratings_total: Option<u32>,
    pub price_level: Option<u8>,
    #[serde(default)]
    pub types: Vec<String>,
    pub vicinity: Option<String>,
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
}

impl From<SearchPlace> for RawPlace {
    fn from(value: SearchPlace) -> Self {
        Self {
            place_id: value.place_id,
            name: value.name,
            rating: value.rating,
            user_ratings_total: value.user_ratings_total,
            price_level: value.price_level,
            types: value.types,
            vicinity: value.vicinity,
            formatted_address: value.formatted_address,
            location: value.geometry.map(|g| g.location.into()),
        }
    }
}

/// Place details response.
#[derive(Debug, Deserialize)]
pub struct DetailsResponse {
    pub status: String,
    pub error_message: Option<String>,
    pub result: Option<DetailsResult>,
}

#[derive(Debug, Deserialize)]
pub struct DetailsResult {
    pub name: Option<String>,
    pub rating: Option<f32>,
    pub user_ratings_total: Option<u32>,
    pub formatted_address: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<OpeningHours>,
    pub price_level: Option<u8>,
    #[serde(default)]
    pub reviews: Vec<WireReview>,
    #[serde(default)]
    pub photos: Vec<WirePhoto>,
    #[serde(default)]
    pub types: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct OpeningHours {
    #[serde(default)]
    pub weekday_text: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct WireReview {
    pub author_name: Option<String>,
    pub rating: Option<u8>,
    #[serde(default)]
    pub text: String,
    pub relative_time_description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct WirePhoto {
    pub photo_reference: String,
}

impl From<DetailsResult> for PlaceDetails {
    fn from(value: DetailsResult) -> Self {
        Self {
            name: value.name,
            rating: value.rating,
            user_ratings_total: value.user_ratings_total,
            formatted_address: value.formatted_address,
            phone: value.formatted_phone_number,
            website: value.website,
            opening_hours: value
                .opening_hours
                .map(|hours| hours.weekday_text)
                .unwrap_or_default(),
            price_level: value.price_level,
            reviews: value
                .reviews
                .into_iter()
                .map(|review| Review {
                    author_name: review.author_name,
                    rating: review.rating,
                    text: review.text,
                    relative_time_description: review.relative_time_description,
                })
                .collect(),
            photos: value
                .photos
                .into_iter()
                .map(|photo| PhotoRef {
                    reference: photo.photo_reference,
                })
                .collect(),
            types: value.types,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialise_geocode_response() {
        let json = r#"{
            "status": "OK",
            "results": [{
                "formatted_address": "Ballard, Seattle, WA, USA",
                "geometry": {"location": {"lat": 47.6687, "lng": -122.3847}}
            }]
        }"#;

        let response: GeocodeResponse = serde_json::from_str(json).expect("should deserialise");

        assert!(check_status(&response.status, None).is_ok());
        let first = response.results.into_iter().next().expect("one result");
        let coord: Coord<f64> = first.geometry.location.into();
        assert_eq!(coord, Coord { x: -122.3847, y: 47.6687 });
    }

    #[test]
    fn deserialise_search_response_with_gaps() {
        let json = r#"{
            "status": "OK",
            "results": [
                {"place_id": "a", "name": "Cafe A", "rating": 4.5, "user_ratings_total": 12,
                 "types": ["cafe"], "vicinity": "1 Main St",
                 "geometry": {"location": {"lat": 1.0, "lng": 2.0}}},
                {"name": "No Id"}
            ]
        }"#;

        let response: SearchResponse = serde_json::from_str(json).expect("should deserialise");
        let raw: Vec<RawPlace> = response.results.into_iter().map(Into::into).collect();

        assert_eq!(raw.len(), 2);
        assert_eq!(raw[0].location, Some(Coord { x: 2.0, y: 1.0 }));
        assert!(raw[1].place_id.is_none());
        assert!(raw[1].types.is_empty());
    }

    #[test]
    fn zero_results_is_not_an_error() {
        let json = r#"{"status": "ZERO_RESULTS", "results": []}"#;
        let response: SearchResponse = serde_json::from_str(json).expect("should deserialise");
        assert!(check_status(&response.status, None).is_ok());
    }

    #[test]
    fn denied_request_becomes_service_error() {
        let json = r#"{"status": "REQUEST_DENIED", "error_message": "bad key", "results": []}"#;
        let response: SearchResponse = serde_json::from_str(json).expect("should deserialise");
        let err = check_status(&response.status, response.error_message.as_deref())
            .expect_err("denied");
        assert_eq!(
            err,
            ProviderError::ServiceError {
                status: "REQUEST_DENIED".into(),
                message: "bad key".into(),
            }
        );
    }

    #[test]
    fn details_flatten_hours_reviews_and_photos() {
        let json = r#"{
            "status": "OK",
            "result": {
                "name": "Cafe A",
                "formatted_phone_number": "(206) 555-0100",
                "opening_hours": {"weekday_text": ["Monday: 7 AM", "Tuesday: 7 AM"]},
                "reviews": [{"author_name": "Sam", "rating": 5, "text": "So cute!",
                             "relative_time_description": "a week ago"}],
                "photos": [{"photo_reference": "ref-1", "width": 800, "height": 600}]
            }
        }"#;

        let response: DetailsResponse = serde_json::from_str(json).expect("should deserialise");
        let details: PlaceDetails = response.result.expect("result present").into();

        assert_eq!(details.phone.as_deref(), Some("(206) 555-0100"));
        assert_eq!(details.opening_hours.len(), 2);
        assert_eq!(details.reviews[0].text, "So cute!");
        assert_eq!(details.photos[0].reference, "ref-1");
    }
}
