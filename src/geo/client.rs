//! Geocoding client wrapper
//!
//! Applies the query length gate and masks backend failures so the map
//! components always receive something usable: forward searches degrade to
//! "no match", reverse lookups degrade to a coordinate string.

use crate::config::GeocoderConfig;
use crate::error::Result;
use crate::geo::nominatim::NominatimBackend;
use crate::geo::{format_coordinates, is_searchable, GeoBackend, SearchResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Outcome of a reverse lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseLookup {
    /// Formatted address, or the six-decimal coordinate fallback
    pub address: String,

    /// False when the fallback was used
    pub resolved: bool,
}

impl ReverseLookup {
    /// The coordinate-string fallback for a point
    pub fn fallback(lat: f64, lng: f64) -> Self {
        Self {
            address: format_coordinates(lat, lng),
            resolved: false,
        }
    }
}

/// Geocoding client over any backend
#[derive(Debug, Clone)]
pub struct Geocoder<B> {
    backend: B,
    min_query_len: usize,
}

impl Geocoder<NominatimBackend> {
    /// Build the Nominatim-backed client described by the config
    pub fn from_config(config: &GeocoderConfig) -> Result<Self> {
        Ok(Self::new(NominatimBackend::new(config)?, config.min_query_len))
    }
}

impl<B: GeoBackend> Geocoder<B> {
    /// Wrap a backend
    pub fn new(backend: B, min_query_len: usize) -> Self {
        Self {
            backend,
            min_query_len,
        }
    }

    /// The wrapped backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Minimum trimmed query length
    pub fn min_query_len(&self) -> usize {
        self.min_query_len
    }

    /// Resolve free text to its top match
    ///
    /// Short queries issue no request. Errors are logged and reported as no match.
    pub async fn forward_search(&self, query: &str) -> Option<SearchResult> {
        if !is_searchable(query, self.min_query_len) {
            debug!(query, "Search query too short, skipping");
            return None;
        }

        let query = query.trim();
        match self.backend.search(query).await {
            Ok(Some(result)) => {
                debug!(query, result = %result.display_name, "Search matched");
                Some(result)
            }
            Ok(None) => {
                debug!(query, "Search returned no match");
                None
            }
            Err(e) => {
                warn!(query, error = %e, "Forward search failed");
                None
            }
        }
    }

    /// Resolve coordinates to an address, never returning an empty string
    pub async fn reverse_lookup(&self, lat: f64, lng: f64) -> ReverseLookup {
        match self.backend.reverse(lat, lng).await {
            Ok(Some(address)) if !address.trim().is_empty() => ReverseLookup {
                address,
                resolved: true,
            },
            Ok(_) => {
                debug!(lat, lng, "Reverse lookup found no address, using coordinates");
                ReverseLookup::fallback(lat, lng)
            }
            Err(e) => {
                warn!(lat, lng, error = %e, "Reverse lookup failed, using coordinates");
                ReverseLookup::fallback(lat, lng)
            }
        }
    }
}
