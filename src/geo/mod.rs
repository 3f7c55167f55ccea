//! Geocoding module
//!
//! Forward geocoding (free text to coordinates) and reverse geocoding
//! (coordinates to a human-readable address).

pub mod client;
pub mod nominatim;

#[cfg(test)]
pub(crate) mod fake;

use crate::coord::Coordinates;
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use client::{Geocoder, ReverseLookup};

/// A chosen location with a best-effort address
///
/// Serialized as `{ "lat", "lng", "address" }`, the shape the task store uses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    #[serde(rename = "lat", alias = "latitude")]
    pub latitude: f64,

    #[serde(rename = "lng", alias = "longitude")]
    pub longitude: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl GeoPoint {
    /// Create a point with an optional address
    pub fn new(latitude: f64, longitude: f64, address: Option<String>) -> Self {
        Self {
            latitude,
            longitude,
            address,
        }
    }

    /// The point's coordinates
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    /// Address if present, otherwise the six-decimal coordinate pair
    pub fn label(&self) -> String {
        match &self.address {
            Some(address) if !address.is_empty() => address.clone(),
            _ => format_coordinates(self.latitude, self.longitude),
        }
    }
}

impl From<SearchResult> for GeoPoint {
    fn from(result: SearchResult) -> Self {
        Self::new(result.latitude, result.longitude, Some(result.display_name))
    }
}

/// Top match of a forward search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub result_id: String,
}

impl SearchResult {
    /// The match's coordinates
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// Trait for geocoding backends
///
/// Backends report every failure; masking failures is the job of [`Geocoder`].
pub trait GeoBackend: Send + Sync {
    /// Resolve a query to its best match, or None when nothing matched
    fn search(&self, query: &str) -> impl std::future::Future<Output = Result<Option<SearchResult>>> + Send;

    /// Resolve coordinates to a formatted address, or None when unknown
    fn reverse(&self, lat: f64, lng: f64) -> impl std::future::Future<Output = Result<Option<String>>> + Send;
}

/// Whether a query is long enough to be sent to the geocoder
pub fn is_searchable(query: &str, min_len: usize) -> bool {
    let trimmed = query.trim();
    !trimmed.is_empty() && trimmed.chars().count() >= min_len
}

/// Coordinate pair rendered with six decimals each, joined by `", "`
pub fn format_coordinates(lat: f64, lng: f64) -> String {
    Coordinates::new(lat, lng).to_string()
}
