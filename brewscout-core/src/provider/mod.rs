//! Interfaces to external geocoding and places services.
//!
//! The [`Geocoder`] and [`PlacesProvider`] traits abstract the services the
//! discovery pipeline consumes. Both are synchronous and return
//! [`ProviderError`] on failure; the pipeline treats every failure as an
//! empty contribution rather than propagating it.

mod error;
mod geocode;
mod places;

pub use error::ProviderError;
pub use geocode::Geocoder;
pub use places::{
    DetailField, NearbyQuery, PhotoRef, PlaceDetails, PlacesProvider, RawPlace, Review, TextQuery,
};
