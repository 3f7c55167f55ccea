//! Configuration management
//!
//! Loads and saves configuration from XDG-compliant paths.
//! Config location: ~/.config/activity-map/config.toml

pub mod defaults;

use crate::constants::{api, map, search};
use crate::coord::{BoundingBox, Coordinates};
use crate::error::{Error, Result};
use defaults::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Geocoding service settings
    #[serde(default)]
    pub geocoder: GeocoderConfig,

    /// Map camera and tile settings
    #[serde(default)]
    pub map: MapConfig,

    /// Server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// External link templates
    #[serde(default)]
    pub links: LinksConfig,
}

/// Geocoding service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderConfig {
    /// Base URL (upstream service or same-origin proxy prefix)
    #[serde(default = "default_geocoder_url")]
    pub base_url: String,

    /// User-Agent header sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Country filter for forward searches
    #[serde(default = "default_country_codes")]
    pub country_codes: String,

    /// Minimum trimmed query length before a search is issued
    #[serde(default = "default_min_query_len")]
    pub min_query_len: usize,

    /// Quiet period after the last keystroke before searching
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Search area restriction
    #[serde(default = "default_viewbox")]
    pub viewbox: BoundingBox,
}

/// Map camera and tile settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    /// Reference point latitude
    #[serde(default = "default_lat")]
    pub default_lat: f64,

    /// Reference point longitude
    #[serde(default = "default_lng")]
    pub default_lng: f64,

    /// Picker zoom with no prior selection
    #[serde(default = "default_picker_zoom")]
    pub picker_zoom: u8,

    /// Viewer zoom before fitting to markers
    #[serde(default = "default_viewer_zoom")]
    pub viewer_zoom: u8,

    /// Zoom used when centering on a single selected point
    #[serde(default = "default_selection_zoom")]
    pub selection_zoom: u8,

    /// Padding ratio applied when fitting the camera to markers
    #[serde(default = "default_fit_padding")]
    pub fit_padding: f64,

    /// Tile URL template
    #[serde(default = "default_tile_url")]
    pub tile_url: String,

    /// Tile attribution text
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

/// Server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address
    #[serde(default = "default_host")]
    pub host: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory with the frontend bundle
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

/// External link templates
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Full-scale map link, `{lat}` and `{lng}` are substituted
    #[serde(default = "default_external_maps")]
    pub external_maps: String,
}

// Default value functions for serde
fn default_geocoder_url() -> String {
    DEFAULT_GEOCODER_URL.to_string()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}
fn default_country_codes() -> String {
    DEFAULT_COUNTRY_CODES.to_string()
}
fn default_min_query_len() -> usize {
    DEFAULT_MIN_QUERY_LEN
}
fn default_debounce_ms() -> u64 {
    DEFAULT_DEBOUNCE_MS
}
fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}
fn default_viewbox() -> BoundingBox {
    let (west, north, east, south) = search::VIEWBOX;
    BoundingBox::new(west, north, east, south)
}
fn default_lat() -> f64 {
    DEFAULT_LAT
}
fn default_lng() -> f64 {
    DEFAULT_LNG
}
fn default_picker_zoom() -> u8 {
    map::PICKER_ZOOM
}
fn default_viewer_zoom() -> u8 {
    map::VIEWER_ZOOM
}
fn default_selection_zoom() -> u8 {
    map::SELECTION_ZOOM
}
fn default_fit_padding() -> f64 {
    map::FIT_PADDING
}
fn default_tile_url() -> String {
    map::TILE_URL.to_string()
}
fn default_attribution() -> String {
    map::TILE_ATTRIBUTION.to_string()
}
fn default_host() -> String {
    DEFAULT_HOST.to_string()
}
fn default_port() -> u16 {
    DEFAULT_PORT
}
fn default_static_dir() -> String {
    DEFAULT_STATIC_DIR.to_string()
}
fn default_external_maps() -> String {
    api::EXTERNAL_MAPS_URL.to_string()
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            base_url: default_geocoder_url(),
            user_agent: default_user_agent(),
            country_codes: default_country_codes(),
            min_query_len: default_min_query_len(),
            debounce_ms: default_debounce_ms(),
            timeout_secs: default_timeout_secs(),
            viewbox: default_viewbox(),
        }
    }
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            default_lat: default_lat(),
            default_lng: default_lng(),
            picker_zoom: default_picker_zoom(),
            viewer_zoom: default_viewer_zoom(),
            selection_zoom: default_selection_zoom(),
            fit_padding: default_fit_padding(),
            tile_url: default_tile_url(),
            attribution: default_attribution(),
        }
    }
}

impl MapConfig {
    /// The municipality reference point
    pub fn default_center(&self) -> Coordinates {
        Coordinates::new(self.default_lat, self.default_lng)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            external_maps: default_external_maps(),
        }
    }
}

impl LinksConfig {
    /// Fill the external map template at full precision
    pub fn external_map_url(&self, lat: f64, lng: f64) -> String {
        self.external_maps
            .replace("{lat}", &lat.to_string())
            .replace("{lng}", &lng.to_string())
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|p| p.join(APP_DIR_NAME))
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE_NAME))
    }

    /// Load configuration from the default path
    ///
    /// Creates default config if file doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from a specific path, creating it if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = fs::read_to_string(path).map_err(|e| {
                Error::Config(format!("Failed to read config file: {}", e))
            })?;

            toml::from_str(&content).map_err(|e| {
                Error::Config(format!("Failed to parse config file: {}", e))
            })
        } else {
            let config = Config::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to the default path
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                Error::Config(format!("Failed to create config directory: {}", e))
            })?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            Error::Config(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(path, content).map_err(|e| {
            Error::Config(format!("Failed to write config file: {}", e))
        })?;

        Ok(())
    }

    /// Get a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns the value as a string, or None if not found
    pub fn get(&self, key: &str) -> Option<String> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoder", "base_url"] => Some(self.geocoder.base_url.clone()),
            ["geocoder", "user_agent"] => Some(self.geocoder.user_agent.clone()),
            ["geocoder", "country_codes"] => Some(self.geocoder.country_codes.clone()),
            ["geocoder", "min_query_len"] => Some(self.geocoder.min_query_len.to_string()),
            ["geocoder", "debounce_ms"] => Some(self.geocoder.debounce_ms.to_string()),
            ["geocoder", "timeout_secs"] => Some(self.geocoder.timeout_secs.to_string()),
            ["geocoder", "viewbox"] => Some(self.geocoder.viewbox.to_viewbox()),

            ["map", "default_lat"] => Some(self.map.default_lat.to_string()),
            ["map", "default_lng"] => Some(self.map.default_lng.to_string()),
            ["map", "picker_zoom"] => Some(self.map.picker_zoom.to_string()),
            ["map", "viewer_zoom"] => Some(self.map.viewer_zoom.to_string()),
            ["map", "selection_zoom"] => Some(self.map.selection_zoom.to_string()),
            ["map", "fit_padding"] => Some(self.map.fit_padding.to_string()),
            ["map", "tile_url"] => Some(self.map.tile_url.clone()),
            ["map", "attribution"] => Some(self.map.attribution.clone()),

            ["server", "host"] => Some(self.server.host.clone()),
            ["server", "port"] => Some(self.server.port.to_string()),
            ["server", "static_dir"] => Some(self.server.static_dir.clone()),

            ["links", "external_maps"] => Some(self.links.external_maps.clone()),

            _ => None,
        }
    }

    /// Set a configuration value by key path
    ///
    /// Key format: "section.key"
    /// Returns error if key is invalid or value type is wrong
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let parts: Vec<&str> = key.split('.').collect();

        match parts.as_slice() {
            ["geocoder", "base_url"] => {
                self.geocoder.base_url = value.trim_end_matches('/').to_string();
            }
            ["geocoder", "user_agent"] => {
                self.geocoder.user_agent = value.to_string();
            }
            ["geocoder", "country_codes"] => {
                self.geocoder.country_codes = value.to_string();
            }
            ["geocoder", "min_query_len"] => {
                self.geocoder.min_query_len = parse_value(value, "query length")?;
            }
            ["geocoder", "debounce_ms"] => {
                self.geocoder.debounce_ms = parse_value(value, "debounce")?;
            }
            ["geocoder", "timeout_secs"] => {
                self.geocoder.timeout_secs = parse_value(value, "timeout")?;
            }
            ["geocoder", "viewbox"] => {
                self.geocoder.viewbox = parse_viewbox(value)?;
            }

            ["map", "default_lat"] => {
                let lat = parse_value(value, "latitude")?;
                Coordinates::new(lat, self.map.default_lng).validate()?;
                self.map.default_lat = lat;
            }
            ["map", "default_lng"] => {
                let lng = parse_value(value, "longitude")?;
                Coordinates::new(self.map.default_lat, lng).validate()?;
                self.map.default_lng = lng;
            }
            ["map", "picker_zoom"] => {
                self.map.picker_zoom = parse_value(value, "zoom")?;
            }
            ["map", "viewer_zoom"] => {
                self.map.viewer_zoom = parse_value(value, "zoom")?;
            }
            ["map", "selection_zoom"] => {
                self.map.selection_zoom = parse_value(value, "zoom")?;
            }
            ["map", "fit_padding"] => {
                self.map.fit_padding = parse_value(value, "padding")?;
            }
            ["map", "tile_url"] => {
                self.map.tile_url = value.to_string();
            }
            ["map", "attribution"] => {
                self.map.attribution = value.to_string();
            }

            ["server", "host"] => {
                self.server.host = value.to_string();
            }
            ["server", "port"] => {
                self.server.port = parse_value(value, "port")?;
            }
            ["server", "static_dir"] => {
                self.server.static_dir = value.to_string();
            }

            ["links", "external_maps"] => {
                self.links.external_maps = value.to_string();
            }

            _ => {
                return Err(Error::Config(format!("Unknown config key: {}", key)));
            }
        }

        Ok(())
    }

    /// List all available config keys
    pub fn available_keys() -> Vec<&'static str> {
        vec![
            "geocoder.base_url",
            "geocoder.user_agent",
            "geocoder.country_codes",
            "geocoder.min_query_len",
            "geocoder.debounce_ms",
            "geocoder.timeout_secs",
            "geocoder.viewbox",
            "map.default_lat",
            "map.default_lng",
            "map.picker_zoom",
            "map.viewer_zoom",
            "map.selection_zoom",
            "map.fit_padding",
            "map.tile_url",
            "map.attribution",
            "server.host",
            "server.port",
            "server.static_dir",
            "links.external_maps",
        ]
    }

    /// Build the external full-scale map link for a point
    ///
    /// Replaces {lat} and {lng} placeholders at full precision
    pub fn external_map_url(&self, lat: f64, lng: f64) -> String {
        self.links.external_map_url(lat, lng)
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_value<T: std::str::FromStr>(value: &str, what: &str) -> Result<T> {
    value
        .parse()
        .map_err(|_| Error::Config(format!("Invalid {} value: {}", what, value)))
}

/// Parse a `west,north,east,south` viewbox string
fn parse_viewbox(value: &str) -> Result<BoundingBox> {
    let edges: Vec<f64> = value
        .split(',')
        .map(|part| parse_value(part.trim(), "viewbox"))
        .collect::<Result<_>>()?;

    match edges.as_slice() {
        [west, north, east, south] => Ok(BoundingBox::new(*west, *north, *east, *south)),
        _ => Err(Error::Config(format!(
            "Viewbox needs four comma-separated values: {}",
            value
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.geocoder.min_query_len, 3);
        assert_eq!(config.geocoder.debounce_ms, 500);
        assert_eq!(config.geocoder.country_codes, "ar");
        assert_eq!(config.map.picker_zoom, 13);
        assert_eq!(config.map.viewer_zoom, 12);
        assert_eq!(config.map.selection_zoom, 15);
        assert_eq!(config.server.port, 7878);
    }

    #[test]
    fn test_get_set() {
        let mut config = Config::default();

        assert_eq!(config.get("geocoder.debounce_ms"), Some("500".to_string()));

        config.set("geocoder.debounce_ms", "250").unwrap();
        assert_eq!(config.geocoder.debounce_ms, 250);

        config.set("geocoder.base_url", "http://localhost:7878/nominatim/").unwrap();
        assert_eq!(
            config.get("geocoder.base_url"),
            Some("http://localhost:7878/nominatim".to_string())
        );
    }

    #[test]
    fn test_set_viewbox() {
        let mut config = Config::default();
        config.set("geocoder.viewbox", "-57, -26, -55, -29").unwrap();
        assert_eq!(config.geocoder.viewbox, BoundingBox::new(-57.0, -26.0, -55.0, -29.0));
        assert!(config.set("geocoder.viewbox", "1,2,3").is_err());
    }

    #[test]
    fn test_set_invalid() {
        let mut config = Config::default();
        assert!(config.set("invalid.key", "value").is_err());
        assert!(config.set("server.port", "not_a_number").is_err());
        assert!(config.set("map.default_lat", "123").is_err());
        assert_eq!(config.get("invalid.key"), None);
    }

    #[test]
    fn test_every_available_key_is_readable() {
        let config = Config::default();
        for key in Config::available_keys() {
            assert!(config.get(key).is_some(), "missing getter for {}", key);
        }
    }

    #[test]
    fn test_external_map_url_full_precision() {
        let config = Config::default();
        let url = config.external_map_url(-27.367612345, -55.8967);
        assert_eq!(url, "https://www.google.com/maps?q=-27.367612345,-55.8967");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.toml");

        // First load creates the file with defaults
        let created = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(created.server.port, 7878);

        let mut config = created;
        config.geocoder.base_url = "http://localhost:9000".to_string();
        config.map.fit_padding = 0.2;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.geocoder.base_url, "http://localhost:9000");
        assert_eq!(loaded.map.fit_padding, 0.2);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let loaded: Config = toml::from_str("[server]\nport = 9999\n").unwrap();
        assert_eq!(loaded.server.port, 9999);
        assert_eq!(loaded.server.host, "127.0.0.1");
        assert_eq!(loaded.geocoder.min_query_len, 3);
    }

    #[test]
    fn test_serialization_format() {
        let toml = toml::to_string_pretty(&Config::default()).unwrap();

        assert!(toml.contains("[geocoder]"));
        assert!(toml.contains("[geocoder.viewbox]"));
        assert!(toml.contains("[map]"));
        assert!(toml.contains("[server]"));
        assert!(toml.contains("[links]"));
    }

    #[test]
    fn test_server_addr() {
        let config = Config::default();
        assert_eq!(config.server_addr(), "127.0.0.1:7878");
    }
}
