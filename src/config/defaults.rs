//! Default configuration values
//!
//! Named constants for all tunable parameters

use crate::constants::{api, map, search};

/// Default geocoder base URL
pub const DEFAULT_GEOCODER_URL: &str = api::NOMINATIM_URL;

/// Default User-Agent sent to the geocoder
pub const DEFAULT_USER_AGENT: &str = concat!("activity-map/", env!("CARGO_PKG_VERSION"));

/// Default country filter
pub const DEFAULT_COUNTRY_CODES: &str = search::COUNTRY_CODES;

/// Default minimum query length
pub const DEFAULT_MIN_QUERY_LEN: usize = search::MIN_QUERY_LEN;

/// Default debounce delay in milliseconds
pub const DEFAULT_DEBOUNCE_MS: u64 = search::DEBOUNCE_MS;

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = search::TIMEOUT_SECS;

/// Default reference latitude
pub const DEFAULT_LAT: f64 = map::DEFAULT_LAT;

/// Default reference longitude
pub const DEFAULT_LNG: f64 = map::DEFAULT_LNG;

/// Default server host
pub const DEFAULT_HOST: &str = "127.0.0.1";

/// Default server port
pub const DEFAULT_PORT: u16 = 7878;

/// Default static files directory
pub const DEFAULT_STATIC_DIR: &str = "static";

/// Config file name
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Application directory name (for XDG paths)
pub const APP_DIR_NAME: &str = "activity-map";
