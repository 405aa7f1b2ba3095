//! Places provider trait and the request/response shapes it exchanges.

use std::sync::Arc;

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::error::ProviderError;

/// A place record as returned by a search call, before normalisation.
///
/// Every field is optional because providers omit them freely; see
/// [`crate::Place::from_raw`] for how gaps are filled.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RawPlace {
    /// Provider-stable identifier.
    pub place_id: Option<String>,
    /// Display name.
    pub name: Option<String>,
    /// Average rating.
    pub rating: Option<f32>,
    /// Number of ratings.
    pub user_ratings_total: Option<u32>,
    /// Price level in `0..=4`.
    pub price_level: Option<u8>,
    /// Business categories.
    pub types: Vec<String>,
    /// Short address.
    pub vicinity: Option<String>,
    /// Full address, usually present on text-search results only.
    pub formatted_address: Option<String>,
    /// Position with `x = longitude`, `y = latitude`.
    pub location: Option<Coord<f64>>,
}

/// Parameters for a radius search around a point.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyQuery {
    /// Search centre.
    pub location: Coord<f64>,
    /// Search radius in metres.
    pub radius_m: u32,
    /// Restrict results to one business type, e.g. `cafe`.
    pub place_type: Option<String>,
    /// Free-text keyword matched against names and content.
    pub keyword: Option<String>,
}

impl NearbyQuery {
    /// Search `radius_m` metres around `location` with no type or keyword.
    pub const fn new(location: Coord<f64>, radius_m: u32) -> Self {
        Self {
            location,
            radius_m,
            place_type: None,
            keyword: None,
        }
    }

    /// Restrict to a business type.
    #[must_use]
    pub fn with_type(mut self, place_type: impl Into<String>) -> Self {
        self.place_type = Some(place_type.into());
        self
    }

    /// Add a keyword.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }
}

/// Parameters for a free-text search biased towards a point.
#[derive(Debug, Clone, PartialEq)]
pub struct TextQuery {
    /// The query, e.g. `"Storyville Coffee Seattle"`.
    pub query: String,
    /// Location bias.
    pub location: Option<Coord<f64>>,
    /// Bias radius in metres.
    pub radius_m: Option<u32>,
}

impl TextQuery {
    /// Build an unbiased text query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            location: None,
            radius_m: None,
        }
    }

    /// Bias results towards `location` within `radius_m` metres.
    #[must_use]
    pub const fn near(mut self, location: Coord<f64>, radius_m: u32) -> Self {
        self.location = Some(location);
        self.radius_m = Some(radius_m);
        self
    }
}

/// Fields that may be requested from a details call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DetailField {
    /// Display name.
    Name,
    /// Average rating.
    Rating,
    /// Number of ratings.
    UserRatingsTotal,
    /// Full address.
    FormattedAddress,
    /// Local phone number.
    Phone,
    /// Website URL.
    Website,
    /// Opening hours.
    OpeningHours,
    /// Price level.
    PriceLevel,
    /// Review texts.
    Reviews,
    /// Photo references.
    Photos,
    /// Business categories.
    Types,
}

impl DetailField {
    /// Every field the full details view uses.
    pub const ALL: [Self; 11] = [
        Self::Name,
        Self::Rating,
        Self::UserRatingsTotal,
        Self::FormattedAddress,
        Self::Phone,
        Self::Website,
        Self::OpeningHours,
        Self::PriceLevel,
        Self::Reviews,
        Self::Photos,
        Self::Types,
    ];

    /// Field name understood by the Google Places details endpoint.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Rating => "rating",
            Self::UserRatingsTotal => "user_ratings_total",
            Self::FormattedAddress => "formatted_address",
            Self::Phone => "formatted_phone_number",
            Self::Website => "website",
            Self::OpeningHours => "opening_hours",
            Self::PriceLevel => "price_level",
            Self::Reviews => "reviews",
            Self::Photos => "photo",
            Self::Types => "type",
        }
    }
}

/// A single user review.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Review {
    /// Reviewer display name.
    pub author_name: Option<String>,
    /// Star rating given by the reviewer.
    pub rating: Option<u8>,
    /// Review body.
    pub text: String,
    /// Human-readable age, e.g. "a month ago".
    pub relative_time_description: Option<String>,
}

/// Reference to a provider-hosted photo.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhotoRef {
    /// Opaque reference passed back to [`PlacesProvider::photo_url`].
    pub reference: String,
}

/// Response to a details call. Only requested fields are populated.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlaceDetails {
    /// Display name.
    pub name: Option<String>,
    /// Average rating.
    pub rating: Option<f32>,
    /// Number of ratings.
    pub user_ratings_total: Option<u32>,
    /// Full address.
    pub formatted_address: Option<String>,
    /// Local phone number.
    pub phone: Option<String>,
    /// Website URL.
    pub website: Option<String>,
    /// One line per weekday, e.g. "Monday: 7:00 AM – 5:00 PM".
    pub opening_hours: Vec<String>,
    /// Price level in `0..=4`.
    pub price_level: Option<u8>,
    /// Reviews, most relevant first.
    pub reviews: Vec<Review>,
    /// Photo references.
    pub photos: Vec<PhotoRef>,
    /// Business categories.
    pub types: Vec<String>,
}

/// Search and detail lookups against a places service.
///
/// Implementations are synchronous so the engine stays embeddable in
/// synchronous contexts; HTTP adapters block internally.
pub trait PlacesProvider: Send + Sync {
    /// Radius search around a point.
    fn nearby(&self, query: &NearbyQuery) -> Result<Vec<RawPlace>, ProviderError>;

    /// Free-text search, optionally biased towards a point.
    ///
    /// Implementations must return `Err(ProviderError::EmptyQuery)` when the
    /// query text is blank.
    fn text_search(&self, query: &TextQuery) -> Result<Vec<RawPlace>, ProviderError>;

    /// Fetch `fields` for one place.
    fn details(&self, place_id: &str, fields: &[DetailField])
    -> Result<PlaceDetails, ProviderError>;

    /// Build a display URL for a photo reference without any network call.
    fn photo_url(&self, photo: &PhotoRef) -> Result<String, ProviderError>;
}

impl<T: PlacesProvider + ?Sized> PlacesProvider for Arc<T> {
    fn nearby(&self, query: &NearbyQuery) -> Result<Vec<RawPlace>, ProviderError> {
        (**self).nearby(query)
    }

    fn text_search(&self, query: &TextQuery) -> Result<Vec<RawPlace>, ProviderError> {
        (**self).text_search(query)
    }

    fn details(
        &self,
        place_id: &str,
        fields: &[DetailField],
    ) -> Result<PlaceDetails, ProviderError> {
        (**self).details(place_id, fields)
    }

    fn photo_url(&self, photo: &PhotoRef) -> Result<String, ProviderError> {
        (**self).photo_url(photo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn nearby_query_builder_sets_filters() {
        let query = NearbyQuery::new(Coord { x: 1.0, y: 2.0 }, 1500)
            .with_type("cafe")
            .with_keyword("espresso");
        assert_eq!(query.place_type.as_deref(), Some("cafe"));
        assert_eq!(query.keyword.as_deref(), Some("espresso"));
        assert_eq!(query.radius_m, 1500);
    }

    #[rstest]
    fn text_query_bias_is_optional() {
        let plain = TextQuery::new("Storyville");
        assert!(plain.location.is_none());
        let biased = plain.near(Coord { x: 0.0, y: 0.0 }, 500);
        assert_eq!(biased.radius_m, Some(500));
    }

    #[rstest]
    #[case(DetailField::Phone, "formatted_phone_number")]
    #[case(DetailField::Photos, "photo")]
    #[case(DetailField::Types, "type")]
    fn detail_fields_use_provider_names(#[case] field: DetailField, #[case] expected: &str) {
        assert_eq!(field.as_str(), expected);
    }
}
