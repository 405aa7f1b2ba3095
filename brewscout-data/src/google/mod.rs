//! Google Maps web-service adapter.
//!
//! [`GoogleMapsClient`] implements both [`brewscout_core::Geocoder`] and
//! [`brewscout_core::PlacesProvider`] using the Geocoding API and the legacy
//! Places API (nearby search, text search, details and photo URLs).
//!
//! # Architecture
//!
//! The provider traits are synchronous to keep the core library embeddable in
//! synchronous contexts. The client bridges its async HTTP calls to the sync
//! interface by blocking on a Tokio runtime internally.
//!
//! # Example
//!
//! ```no_run
//! use brewscout_data::google::{GoogleMapsClient, GoogleMapsConfig};
//! use brewscout_core::{Geocoder, NearbyQuery, PlacesProvider};
//! use std::time::Duration;
//!
//! let config = GoogleMapsConfig::new("my-api-key")
//!     .with_timeout(Duration::from_secs(10))
//!     .with_language("en");
//! let client = GoogleMapsClient::with_config(config)?;
//!
//! let hits = client.geocode("Ballard, Seattle, WA")?;
//! if let Some(centre) = hits.first() {
//!     let cafes = client.nearby(&NearbyQuery::new(centre.coord, 1500).with_type("cafe"))?;
//!     println!("found {} cafes", cafes.len());
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod client;
mod config;
mod wire;

pub use client::{GoogleMapsClient, ProviderBuildError};
pub use config::{DEFAULT_BASE_URL, DEFAULT_USER_AGENT, GoogleMapsConfig};
