//! Café discovery pipeline for Brewscout.
//!
//! [`DiscoveryEngine`] implements [`brewscout_core::PlaceFinder`] on top of
//! any [`brewscout_core::Geocoder`] and [`brewscout_core::PlacesProvider`].
//! A search runs strictly downwards:
//!
//! 1. [`GeocodeResolver`] turns the location text into coordinates, trying
//!    [`fallback_variants`] in order and caching successes.
//! 2. [`aggregate`] issues one nearby search per planned type and keyword
//!    through a [`PlaceSource`] and de-duplicates by place identifier.
//! 3. `brewscout_scorer` filters and ranks the candidates.
//! 4. [`Enricher`] fetches reviews, photos and map links for the shortlist,
//!    after which the shortlist is re-ranked with review evidence.
//!
//! Provider failures never escape: each one is logged and treated as an
//! empty answer.
//!
//! # Examples
//!
//! ```
//! use brewscout_core::test_support::{StubGeocoder, StubPlacesProvider};
//! use brewscout_core::{PlaceFinder, SearchPreferences};
//! use brewscout_discovery::DiscoveryEngine;
//! use brewscout_scorer::ScoringEngine;
//!
//! let engine = DiscoveryEngine::new(
//!     StubGeocoder::default(),
//!     StubPlacesProvider::default(),
//!     ScoringEngine::default(),
//! );
//! let result = engine.search(&SearchPreferences::new("Atlantis"));
//! assert!(result.places.is_empty());
//! assert!(result.text.contains("couldn't find the location 'Atlantis'"));
//! ```

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod aggregate;
mod engine;
mod enrich;
mod render;
mod resolver;
mod source;


pub use aggregate::{CandidateSet, SearchPlan, aggregate, best_match, find_by_name, name_matches};
pub use engine::{DiscoveryConfig, DiscoveryEngine, NAMED_MATCH_SCORE};
pub use enrich::{Enricher, GENERIC_MAP_LINK, map_link, mark_filter_matches};
pub use render::{details_summary, named_summary, search_summary};
pub use resolver::{GeocodeCache, GeocodeResolver, fallback_variants};
pub use source::PlaceSource;
