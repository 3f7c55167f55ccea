//! Nominatim geocoding backend (OpenStreetMap)
//!
//! Talks to a Nominatim instance or to the same-origin `/nominatim` proxy.
//! Forward searches are restricted to the configured viewbox and country.
//! Usage policy: identify with a User-Agent, at most one request per second
//! (the picker's debounce keeps interactive use well below that).

use crate::config::GeocoderConfig;
use crate::coord::BoundingBox;
use crate::error::{Error, Result};
use crate::geo::{GeoBackend, SearchResult};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use serde::Deserialize;
use std::time::Duration;

/// Nominatim geocoding backend
#[derive(Debug, Clone)]
pub struct NominatimBackend {
    client: reqwest::Client,
    base_url: String,
    country_codes: String,
    viewbox: BoundingBox,
}

/// Nominatim search response item
#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: String,
    lon: String,
    display_name: String,
    #[serde(default)]
    place_id: Option<serde_json::Value>,
}

/// Nominatim reverse response
///
/// Unknown locations come back as `{"error": "..."}` with a 200 status.
#[derive(Debug, Deserialize)]
struct NominatimReverse {
    #[serde(default)]
    display_name: Option<String>,
}

impl NominatimBackend {
    /// Create a backend from geocoder settings
    pub fn new(config: &GeocoderConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            country_codes: config.country_codes.clone(),
            viewbox: config.viewbox,
        })
    }

    /// Build the forward search URL
    pub fn search_url(&self, query: &str) -> String {
        format!(
            "{}/search?format=json&q={}&limit=1&countrycodes={}&viewbox={}&bounded=1&addressdetails=1",
            self.base_url,
            urlencoding::encode(query),
            urlencoding::encode(&self.country_codes),
            self.viewbox.to_viewbox()
        )
    }

    /// Build the reverse lookup URL
    pub fn reverse_url(&self, lat: f64, lng: f64) -> String {
        format!(
            "{}/reverse?format=json&lat={}&lon={}&addressdetails=1",
            self.base_url, lat, lng
        )
    }

    /// Parse lat/lng strings to f64
    fn parse_coords(lat: &str, lng: &str) -> Result<(f64, f64)> {
        let lat: f64 = lat
            .parse()
            .map_err(|_| Error::Geo(format!("Invalid latitude: {}", lat)))?;
        let lng: f64 = lng
            .parse()
            .map_err(|_| Error::Geo(format!("Invalid longitude: {}", lng)))?;
        Ok((lat, lng))
    }

    /// Render Nominatim's numeric or string place id
    fn place_id(value: Option<serde_json::Value>) -> String {
        match value {
            Some(serde_json::Value::String(s)) => s,
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    async fn get(&self, url: &str) -> Result<reqwest::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Geo(format!("Nominatim request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Geo(format!(
                "Nominatim returned status: {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

impl GeoBackend for NominatimBackend {
    async fn search(&self, query: &str) -> Result<Option<SearchResult>> {
        let response = self.get(&self.search_url(query)).await?;

        let places: Vec<NominatimPlace> = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse Nominatim response: {}", e)))?;

        let Some(place) = places.into_iter().next() else {
            return Ok(None);
        };

        let (latitude, longitude) = Self::parse_coords(&place.lat, &place.lon)?;
        Ok(Some(SearchResult {
            display_name: place.display_name,
            latitude,
            longitude,
            result_id: Self::place_id(place.place_id),
        }))
    }

    async fn reverse(&self, lat: f64, lng: f64) -> Result<Option<String>> {
        let response = self.get(&self.reverse_url(lat, lng)).await?;

        let result: NominatimReverse = response
            .json()
            .await
            .map_err(|e| Error::Geo(format!("Failed to parse Nominatim response: {}", e)))?;

        Ok(result.display_name.filter(|name| !name.is_empty()))
    }
}
