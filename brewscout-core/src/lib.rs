//! Core domain types for the Brewscout café discovery engine.
//!
//! The crate defines the values that flow through the discovery pipeline,
//! the traits external geocoding and places services implement, and the
//! [`PlaceFinder`] entry point exposed to callers. It performs no I/O.
#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod finder;
mod keyword;
mod location;
mod place;
mod preferences;
mod provider;

pub use finder::{PlaceFinder, SearchFailure, SearchResult};
pub use keyword::KeywordGroup;
pub use location::{Location, Resolution};
pub use place::{Place, PlaceBuilder, UNKNOWN_PLACE_NAME};
pub use preferences::SearchPreferences;
pub use provider::{
    DetailField, Geocoder, NearbyQuery, PhotoRef, PlaceDetails, PlacesProvider, ProviderError,
    RawPlace, Review, TextQuery,
};

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;
