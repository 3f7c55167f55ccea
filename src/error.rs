//! Error types for activity-map

use thiserror::Error;

/// Main error type for activity-map operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Geocoding error: {0}")]
    Geo(String),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Map engine error: {0}")]
    MapInit(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for activity-map operations
pub type Result<T> = std::result::Result<T, Error>;
