//! Facade crate for the Brewscout café discovery engine.
//!
//! This crate re-exports the core domain types, the scoring engine and the
//! discovery pipeline. The Google Maps adapter is available behind the
//! `http` feature.
//!
//! ```
//! use brewscout_engine::{KeywordGroup, SearchPreferences};
//!
//! let prefs = SearchPreferences::new("Fremont").with_include("outlets");
//! assert_eq!(prefs.include_groups(), vec![KeywordGroup::Outlets]);
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub use brewscout_core::{
    DetailField, Geocoder, KeywordGroup, Location, NearbyQuery, PhotoRef, Place, PlaceBuilder,
    PlaceDetails, PlaceFinder, PlacesProvider, ProviderError, RawPlace, Resolution, Review,
    SearchFailure, SearchPreferences, SearchResult, TextQuery,
};

pub use brewscout_scorer::{
    DropReason, ReviewPolicy, ScoreBreakdown, ScoreOutcome, ScoreWeights, ScoringConfig,
    ScoringConfigError, ScoringEngine,
};

pub use brewscout_discovery::{DiscoveryConfig, DiscoveryEngine, GeocodeCache, GeocodeResolver};

#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub use brewscout_data::google::{GoogleMapsClient, GoogleMapsConfig, ProviderBuildError};

/// Discovery engine backed by one shared Google Maps client.
#[cfg(feature = "http")]
#[cfg_attr(docsrs, doc(cfg(feature = "http")))]
pub type GoogleDiscoveryEngine =
    DiscoveryEngine<std::sync::Arc<GoogleMapsClient>, std::sync::Arc<GoogleMapsClient>>;
