//! Geocoded locations and the outcome of resolving free text into one.

use geo::Coord;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A geocoded point with its provider-formatted address.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`, matching
/// the convention used by `geo`.
///
/// # Examples
/// ```
/// use brewscout_core::Location;
///
/// let location = Location::new(47.668, -122.384, "Ballard, Seattle, WA, USA");
/// assert_eq!(location.latitude(), 47.668);
/// assert_eq!(location.longitude(), -122.384);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Location {
    /// Geospatial position.
    pub coord: Coord<f64>,
    /// Address string reported by the geocoder.
    pub formatted_address: String,
}

impl Location {
    /// Construct a location from latitude, longitude and address.
    pub fn new(latitude: f64, longitude: f64, formatted_address: impl Into<String>) -> Self {
        Self {
            coord: Coord {
                x: longitude,
                y: latitude,
            },
            formatted_address: formatted_address.into(),
        }
    }

    /// Latitude in degrees.
    pub const fn latitude(&self) -> f64 {
        self.coord.y
    }

    /// Longitude in degrees.
    pub const fn longitude(&self) -> f64 {
        self.coord.x
    }
}

/// Outcome of resolving a location string.
///
/// Resolution never fails with an error: every provider problem collapses
/// into [`Resolution::NotFound`] once all fallback variants are exhausted.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// The text resolved to a location.
    Found(Location),
    /// No query variant produced a result.
    NotFound,
}

impl Resolution {
    /// Return the resolved location, if any.
    pub const fn location(&self) -> Option<&Location> {
        match self {
            Self::Found(location) => Some(location),
            Self::NotFound => None,
        }
    }

    /// Convert into an `Option`, consuming the resolution.
    pub fn into_location(self) -> Option<Location> {
        match self {
            Self::Found(location) => Some(location),
            Self::NotFound => None,
        }
    }
}
