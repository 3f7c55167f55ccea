//! In-memory geocoding backend for tests

use crate::error::{Error, Result};
use crate::geo::{GeoBackend, SearchResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Backend returning canned answers and recording every call
#[derive(Debug, Default)]
pub struct FakeBackend {
    pub search_result: Option<SearchResult>,
    pub address: Option<String>,
    pub fail: bool,
    pub queries: Mutex<Vec<String>>,
    pub reverse_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn with_match(display_name: &str, lat: f64, lng: f64) -> Self {
        Self {
            search_result: Some(SearchResult {
                display_name: display_name.to_string(),
                latitude: lat,
                longitude: lng,
                result_id: "1".to_string(),
            }),
            ..Self::default()
        }
    }

    pub fn with_address(address: &str) -> Self {
        Self {
            address: Some(address.to_string()),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn queries(&self) -> Vec<String> {
        self.queries.lock().unwrap().clone()
    }

    pub fn reverse_count(&self) -> usize {
        self.reverse_calls.load(Ordering::SeqCst)
    }
}

impl GeoBackend for FakeBackend {
    async fn search(&self, query: &str) -> Result<Option<SearchResult>> {
        self.queries.lock().unwrap().push(query.to_string());
        if self.fail {
            return Err(Error::Geo("connection refused".to_string()));
        }
        Ok(self.search_result.clone())
    }

    async fn reverse(&self, _lat: f64, _lng: f64) -> Result<Option<String>> {
        self.reverse_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(Error::Geo("connection refused".to_string()));
        }
        Ok(self.address.clone())
    }
}
