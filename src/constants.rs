//! Centralized constants for the activity-map crate
//!
//! Values shared by the config defaults, the components and the server.

/// Map camera and reference point
pub mod map {
    /// Municipality reference point (Posadas, Misiones) latitude
    pub const DEFAULT_LAT: f64 = -27.3676;

    /// Municipality reference point longitude
    pub const DEFAULT_LNG: f64 = -55.8967;

    /// Wide zoom used by the location picker with no prior selection
    pub const PICKER_ZOOM: u8 = 13;

    /// City-wide zoom used by the task map viewer
    pub const VIEWER_ZOOM: u8 = 12;

    /// Tight zoom used when centering on a selected point
    pub const SELECTION_ZOOM: u8 = 15;

    /// Fraction of the marker bounds added on each side when fitting
    pub const FIT_PADDING: f64 = 0.1;

    /// OpenStreetMap tile template
    pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

    /// Tile attribution
    pub const TILE_ATTRIBUTION: &str = "&copy; OpenStreetMap contributors";
}

/// External API endpoints
pub mod api {
    /// OpenStreetMap Nominatim geocoding API
    pub const NOMINATIM_URL: &str = "https://nominatim.openstreetmap.org";

    /// Same-origin proxy prefix served by `activity-map serve`
    pub const PROXY_PREFIX: &str = "/nominatim";

    /// External full-scale map link
    pub const EXTERNAL_MAPS_URL: &str = "https://www.google.com/maps?q={lat},{lng}";
}

/// Geocoding search limits
pub mod search {
    /// Country filter for forward searches
    pub const COUNTRY_CODES: &str = "ar";

    /// Minimum query length after trimming
    pub const MIN_QUERY_LEN: usize = 3;

    /// Debounce delay between the last keystroke and the search
    pub const DEBOUNCE_MS: u64 = 500;

    /// Viewbox covering the metropolitan area (west, north, east, south)
    pub const VIEWBOX: (f64, f64, f64, f64) = (-56.5, -26.5, -55.5, -28.5);

    /// HTTP request timeout
    pub const TIMEOUT_SECS: u64 = 10;
}

/// Marker styling
pub mod marker {
    /// Completed task colour (green)
    pub const COMPLETED_COLOR: &str = "#10b981";

    /// Overdue task colour (red)
    pub const OVERDUE_COLOR: &str = "#ef4444";

    /// Pending task colour (blue)
    pub const PENDING_COLOR: &str = "#3b82f6";

    /// Dot icon diameter in pixels
    pub const DOT_SIZE_PX: u32 = 25;
}
