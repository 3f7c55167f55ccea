//! Server shared state
//!
//! Holds configuration and the HTTP client used by the geocoder proxy.

use crate::config::Config;
use crate::error::Result;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    /// Client for upstream geocoder requests
    http: reqwest::Client,
}

impl AppState {
    /// Create new application state
    pub fn new(config: Config) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .user_agent(config.geocoder.user_agent.as_str())
            .default_headers(headers)
            .timeout(Duration::from_secs(config.geocoder.timeout_secs))
            .build()?;

        Ok(Self { config, http })
    }

    /// Client for upstream requests
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Upstream URL for a proxied geocoder endpoint
    pub fn upstream_url(&self, endpoint: &str, query: Option<&str>) -> String {
        let base = self.config.geocoder.base_url.trim_end_matches('/');
        match query {
            Some(q) if !q.is_empty() => format!("{}/{}?{}", base, endpoint, q),
            _ => format!("{}/{}", base, endpoint),
        }
    }
}
