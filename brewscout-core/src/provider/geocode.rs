//! Geocoding trait used to resolve free-text locations.

use std::sync::Arc;

use crate::Location;

use super::error::ProviderError;

/// Turn free text into candidate locations.
///
/// Implementations return candidates best-first. An empty vector means the
/// provider understood the query but found nothing; errors are reserved for
/// failed calls.
///
/// # Examples
///
/// ```rust
/// use brewscout_core::{Geocoder, Location, ProviderError};
///
/// struct FixedGeocoder;
///
/// impl Geocoder for FixedGeocoder {
///     fn geocode(&self, query: &str) -> Result<Vec<Location>, ProviderError> {
///         if query.trim().is_empty() {
///             return Err(ProviderError::EmptyQuery);
///         }
///         Ok(vec![Location::new(47.6, -122.3, "Seattle, WA, USA")])
///     }
/// }
///
/// let hits = FixedGeocoder.geocode("Seattle")?;
/// assert_eq!(hits.len(), 1);
/// # Ok::<(), ProviderError>(())
/// ```
pub trait Geocoder: Send + Sync {
    /// Geocode `query`.
    ///
    /// Implementations must return `Err(ProviderError::EmptyQuery)` when
    /// `query` is blank.
    fn geocode(&self, query: &str) -> Result<Vec<Location>, ProviderError>;
}

impl<T: Geocoder + ?Sized> Geocoder for Arc<T> {
    fn geocode(&self, query: &str) -> Result<Vec<Location>, ProviderError> {
        (**self).geocode(query)
    }
}
