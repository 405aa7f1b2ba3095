//! HTTP client implementing the geocoding and places provider traits.

use std::future::Future;

use brewscout_core::{
    DetailField, Geocoder, Location, NearbyQuery, PhotoRef, PlaceDetails, PlacesProvider,
    ProviderError, RawPlace, TextQuery,
};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tokio::runtime::{Handle, Runtime, RuntimeFlavor};
use url::Url;

use super::config::GoogleMapsConfig;
use super::wire::{DetailsResponse, GeocodeResponse, SearchResponse, check_status};

/// Error type for [`GoogleMapsClient`] construction failures.
#[derive(Debug)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    HttpClient(reqwest::Error),
    /// Failed to build the Tokio runtime.
    Runtime(std::io::Error),
}

impl std::fmt::Display for ProviderBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HttpClient(err) => write!(f, "failed to build HTTP client: {err}"),
            Self::Runtime(err) => write!(f, "failed to build Tokio runtime: {err}"),
        }
    }
}

impl std::error::Error for ProviderBuildError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::HttpClient(err) => Some(err),
            Self::Runtime(err) => Some(err),
        }
    }
}

/// Google Maps client for geocoding and place lookups.
///
/// The client implements the synchronous [`Geocoder`] and [`PlacesProvider`]
/// traits by blocking on asynchronous HTTP requests. It owns a Tokio runtime
/// that is reused across calls.
///
/// # Runtime behaviour
///
/// Outside any Tokio runtime the client drives requests on its own runtime.
/// Inside a multi-threaded runtime (detected via [`Handle::try_current()`]
/// and [`RuntimeFlavor::MultiThread`]) it uses that runtime's handle with
/// [`tokio::task::block_in_place`] to avoid nested runtime panics. Inside a
/// `current_thread` runtime it falls back to its own runtime, which blocks
/// the caller's executor for the duration of the request.
pub struct GoogleMapsClient {
    client: Client,
    config: GoogleMapsConfig,
    runtime: Runtime,
}

impl std::fmt::Debug for GoogleMapsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleMapsClient")
            .field("client", &self.client)
            .field("config", &self.config)
            .field("runtime", &"<tokio::runtime::Runtime>")
            .finish()
    }
}

impl GoogleMapsClient {
    /// Create a client for the public endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn new(api_key: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(GoogleMapsConfig::new(api_key))
    }

    /// Create a client with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client or Tokio runtime fails to build.
    pub fn with_config(config: GoogleMapsConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(ProviderBuildError::Runtime)?;
        Ok(Self {
            client,
            config,
            runtime,
        })
    }

    /// Build an endpoint URL carrying `params` plus the key and language.
    fn build_url(&self, path: &str, params: &[(&str, String)]) -> Result<Url, ProviderError> {
        let mut pairs: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();
        pairs.push(("language", self.config.language.as_str()));
        pairs.push(("key", self.config.api_key.as_str()));
        Url::parse_with_params(&self.config.endpoint(path), &pairs).map_err(|err| {
            ProviderError::InvalidUrl {
                message: err.to_string(),
            }
        })
    }

    fn geocode_url(&self, query: &str) -> Result<Url, ProviderError> {
        self.build_url("geocode/json", &[("address", query.to_owned())])
    }

    fn nearby_url(&self, query: &NearbyQuery) -> Result<Url, ProviderError> {
        let mut params = vec![
            ("location", lat_lng(query.location)),
            ("radius", query.radius_m.to_string()),
        ];
        if let Some(place_type) = &query.place_type {
            params.push(("type", place_type.clone()));
        }
        if let Some(keyword) = &query.keyword {
            params.push(("keyword", keyword.clone()));
        }
        self.build_url("place/nearbysearch/json", &params)
    }

    fn text_search_url(&self, query: &TextQuery) -> Result<Url, ProviderError> {
        let mut params = vec![("query", query.query.clone())];
        if let Some(location) = query.location {
            params.push(("location", lat_lng(location)));
        }
        if let Some(radius) = query.radius_m {
            params.push(("radius", radius.to_string()));
        }
        self.build_url("place/textsearch/json", &params)
    }

    fn details_url(&self, place_id: &str, fields: &[DetailField]) -> Result<Url, ProviderError> {
        let field_list = fields
            .iter()
            .map(|field| field.as_str())
            .collect::<Vec<_>>()
            .join(",");
        self.build_url(
            "place/details/json",
            &[("place_id", place_id.to_owned()), ("fields", field_list)],
        )
    }

    /// Fetch and decode one JSON document.
    async fn fetch_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ProviderError> {
        let shown = redacted(&url);
        log::debug!("GET {shown}");
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err, &shown))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err, &shown))?;

        response
            .json::<T>()
            .await
            .map_err(|err| ProviderError::ParseError {
                message: err.to_string(),
            })
    }

    /// Convert a reqwest error to a `ProviderError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error, url: &str) -> ProviderError {
        let message = error_message(error);
        if error.is_timeout() {
            return ProviderError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return ProviderError::HttpError {
                url: url.to_owned(),
                status: status.as_u16(),
                message,
            };
        }

        ProviderError::NetworkError {
            url: url.to_owned(),
            message,
        }
    }

    /// Run `future` to completion from synchronous code.
    ///
    /// `block_in_place` requires a multi-threaded runtime; for
    /// `current_thread` runtimes, or no runtime at all, the stored runtime
    /// drives the future.
    fn block_on<F: Future>(&self, future: F) -> F::Output {
        match Handle::try_current() {
            Ok(handle) if handle.runtime_flavor() == RuntimeFlavor::MultiThread => {
                tokio::task::block_in_place(|| handle.block_on(future))
            }
            _ => self.runtime.block_on(future),
        }
    }

    async fn geocode_async(&self, query: &str) -> Result<Vec<Location>, ProviderError> {
        let response: GeocodeResponse = self.fetch_json(self.geocode_url(query)?).await?;
        check_status(&response.status, response.error_message.as_deref())?;
        Ok(response
            .results
            .into_iter()
            .map(|result| Location {
                coord: result.geometry.location.into(),
                formatted_address: result.formatted_address,
            })
            .collect())
    }

    async fn search_async(&self, url: Url) -> Result<Vec<RawPlace>, ProviderError> {
        let response: SearchResponse = self.fetch_json(url).await?;
        check_status(&response.status, response.error_message.as_deref())?;
        Ok(response.results.into_iter().map(RawPlace::from).collect())
    }

    async fn details_async(
        &self,
        place_id: &str,
        fields: &[DetailField],
    ) -> Result<PlaceDetails, ProviderError> {
        let url = self.details_url(place_id, fields)?;
        let response: DetailsResponse = self.fetch_json(url).await?;
        check_status(&response.status, response.error_message.as_deref())?;
        response
            .result
            .map(PlaceDetails::from)
            .ok_or_else(|| ProviderError::ParseError {
                message: format!("details response for {place_id} has no result"),
            })
    }
}

/// Format a coordinate as Google's `lat,lng` parameter.
fn lat_lng(coord: geo::Coord<f64>) -> String {
    format!("{},{}", coord.y, coord.x)
}

/// Render a URL without its query so the API key never leaks.
fn redacted(url: &Url) -> String {
    let mut shown = url.clone();
    shown.set_query(None);
    shown.to_string()
}

/// Describe a reqwest error without the URL, which carries the API key.
fn error_message(error: &reqwest::Error) -> String {
    let message = error.to_string();
    match error.url() {
        Some(url) => message.replace(url.as_str(), &redacted(url)),
        None => message,
    }
}

impl Geocoder for GoogleMapsClient {
    fn geocode(&self, query: &str) -> Result<Vec<Location>, ProviderError> {
        if query.trim().is_empty() {
            return Err(ProviderError::EmptyQuery);
        }
        self.block_on(self.geocode_async(query))
    }
}

impl PlacesProvider for GoogleMapsClient {
    fn nearby(&self, query: &NearbyQuery) -> Result<Vec<RawPlace>, ProviderError> {
        let url = self.nearby_url(query)?;
        self.block_on(self.search_async(url))
    }

    fn text_search(&self, query: &TextQuery) -> Result<Vec<RawPlace>, ProviderError> {
        if query.query.trim().is_empty() {
            return Err(ProviderError::EmptyQuery);
        }
        let url = self.text_search_url(query)?;
        self.block_on(self.search_async(url))
    }

    fn details(
        &self,
        place_id: &str,
        fields: &[DetailField],
    ) -> Result<PlaceDetails, ProviderError> {
        self.block_on(self.details_async(place_id, fields))
    }

    fn photo_url(&self, photo: &PhotoRef) -> Result<String, ProviderError> {
        let params = [
            ("maxwidth", self.config.photo_max_width.to_string()),
            ("maxheight", self.config.photo_max_height.to_string()),
            ("photo_reference", photo.reference.clone()),
            ("key", self.config.api_key.clone()),
        ];
        Url::parse_with_params(&self.config.endpoint("place/photo"), &params)
            .map(String::from)
            .map_err(|err| ProviderError::InvalidUrl {
                message: err.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Coord;
    use rstest::{fixture, rstest};

    #[fixture]
    fn client() -> GoogleMapsClient {
        let config = GoogleMapsConfig::new("test-key").with_base_url("http://maps.example.com/api/");
        GoogleMapsClient::with_config(config).expect("client should build")
    }

    fn query_value(url: &Url, key: &str) -> Option<String> {
        url.query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[rstest]
    fn geocode_url_encodes_address(client: GoogleMapsClient) {
        let url = client.geocode_url("Ballard, Seattle").expect("valid url");
        assert_eq!(url.path(), "/api/geocode/json");
        assert_eq!(query_value(&url, "address").as_deref(), Some("Ballard, Seattle"));
        assert_eq!(query_value(&url, "key").as_deref(), Some("test-key"));
        assert_eq!(query_value(&url, "language").as_deref(), Some("en"));
    }

    #[rstest]
    fn nearby_url_uses_lat_lng_order(client: GoogleMapsClient) {
        let query = NearbyQuery::new(Coord { x: -122.38, y: 47.66 }, 1500).with_type("cafe");
        let url = client.nearby_url(&query).expect("valid url");
        assert_eq!(query_value(&url, "location").as_deref(), Some("47.66,-122.38"));
        assert_eq!(query_value(&url, "radius").as_deref(), Some("1500"));
        assert_eq!(query_value(&url, "type").as_deref(), Some("cafe"));
        assert!(query_value(&url, "keyword").is_none());
    }

    #[rstest]
    fn text_search_url_omits_absent_bias(client: GoogleMapsClient) {
        let url = client
            .text_search_url(&TextQuery::new("Storyville Coffee Seattle"))
            .expect("valid url");
        assert!(query_value(&url, "location").is_none());
        assert_eq!(
            query_value(&url, "query").as_deref(),
            Some("Storyville Coffee Seattle")
        );
    }

    #[rstest]
    fn details_url_joins_fields(client: GoogleMapsClient) {
        let url = client
            .details_url("abc", &[DetailField::Reviews, DetailField::Photos])
            .expect("valid url");
        assert_eq!(query_value(&url, "fields").as_deref(), Some("reviews,photo"));
        assert_eq!(query_value(&url, "place_id").as_deref(), Some("abc"));
    }

    #[rstest]
    fn photo_url_carries_size_and_reference(client: GoogleMapsClient) {
        let photo = PhotoRef {
            reference: "ref-1".into(),
        };
        let url = client.photo_url(&photo).expect("valid url");
        assert!(url.starts_with("http://maps.example.com/api/place/photo?"));
        assert!(url.contains("maxwidth=400"));
        assert!(url.contains("maxheight=300"));
        assert!(url.contains("photo_reference=ref-1"));
    }

    #[rstest]
    fn redacted_urls_drop_the_key(client: GoogleMapsClient) {
        let url = client.geocode_url("x").expect("valid url");
        assert_eq!(redacted(&url), "http://maps.example.com/api/geocode/json");
    }

    #[rstest]
    fn blank_queries_are_rejected_without_io(client: GoogleMapsClient) {
        assert_eq!(client.geocode("  "), Err(ProviderError::EmptyQuery));
        assert_eq!(
            client.text_search(&TextQuery::new("")),
            Err(ProviderError::EmptyQuery)
        );
    }
}
