//! Coordinates and bounding boxes
//!
//! Plain geographic value types shared by the geocoder, the map engine
//! adapter and the components.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// A geographic coordinate (latitude, longitude)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    /// Create new coordinates
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Validate that coordinates are within valid ranges
    ///
    /// Latitude: -90 to 90
    /// Longitude: -180 to 180
    pub fn validate(&self) -> Result<()> {
        if !(-90.0..=90.0).contains(&self.lat) {
            return Err(Error::InvalidCoordinates(format!(
                "Latitude {} is out of range [-90, 90]",
                self.lat
            )));
        }
        if !(-180.0..=180.0).contains(&self.lng) {
            return Err(Error::InvalidCoordinates(format!(
                "Longitude {} is out of range [-180, 180]",
                self.lng
            )));
        }
        Ok(())
    }
}

impl std::fmt::Display for Coordinates {
    /// Fixed six-decimal rendering, e.g. `-27.367600, -55.896700`
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.6}, {:.6}", self.lat, self.lng)
    }
}

impl std::str::FromStr for Coordinates {
    type Err = Error;

    /// Parse `"lat,lng"` (whitespace around either part is ignored)
    fn from_str(s: &str) -> Result<Self> {
        let (lat, lng) = s.split_once(',').ok_or_else(|| {
            Error::InvalidCoordinates(format!("Expected \"lat,lng\", got: {}", s))
        })?;
        let lat: f64 = lat.trim().parse().map_err(|_| {
            Error::InvalidCoordinates(format!("Invalid latitude: {}", lat.trim()))
        })?;
        let lng: f64 = lng.trim().parse().map_err(|_| {
            Error::InvalidCoordinates(format!("Invalid longitude: {}", lng.trim()))
        })?;
        let coords = Coordinates::new(lat, lng);
        coords.validate()?;
        Ok(coords)
    }
}

/// An axis-aligned lat/lng rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub west: f64,
    pub north: f64,
    pub east: f64,
    pub south: f64,
}

impl BoundingBox {
    /// Create a bounding box from its four edges
    pub fn new(west: f64, north: f64, east: f64, south: f64) -> Self {
        Self {
            west,
            north,
            east,
            south,
        }
    }

    /// Smallest box containing every point, or None for an empty input
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coordinates>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(first.lng, first.lat, first.lng, first.lat);

        for p in iter {
            bounds.west = bounds.west.min(p.lng);
            bounds.east = bounds.east.max(p.lng);
            bounds.north = bounds.north.max(p.lat);
            bounds.south = bounds.south.min(p.lat);
        }

        Some(bounds)
    }

    /// Grow each side by `ratio` times the box's span on that axis
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_pad = (self.north - self.south).abs() * ratio;
        let lng_pad = (self.east - self.west).abs() * ratio;
        Self {
            west: self.west - lng_pad,
            north: self.north + lat_pad,
            east: self.east + lng_pad,
            south: self.south - lat_pad,
        }
    }

    /// Center of the box
    pub fn center(&self) -> Coordinates {
        Coordinates::new(
            (self.north + self.south) / 2.0,
            (self.west + self.east) / 2.0,
        )
    }

    /// Whether a point lies inside the box (edges inclusive)
    pub fn contains(&self, point: Coordinates) -> bool {
        let (lo_lat, hi_lat) = (self.south.min(self.north), self.south.max(self.north));
        point.lat >= lo_lat && point.lat <= hi_lat && point.lng >= self.west && point.lng <= self.east
    }

    /// Render as the `west,north,east,south` viewbox parameter
    pub fn to_viewbox(&self) -> String {
        format!("{},{},{},{}", self.west, self.north, self.east, self.south)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_validate() {
        assert!(Coordinates::new(-27.3676, -55.8967).validate().is_ok());
        assert!(Coordinates::new(91.0, 0.0).validate().is_err());
        assert!(Coordinates::new(0.0, -181.0).validate().is_err());
    }

    #[test]
    fn test_display_six_decimals() {
        let c = Coordinates::new(-27.3676, -55.8967);
        assert_eq!(c.to_string(), "-27.367600, -55.896700");
    }

    #[test]
    fn test_parse() {
        let c: Coordinates = "-27.5, -55.9".parse().unwrap();
        assert_eq!(c, Coordinates::new(-27.5, -55.9));
        assert!("nope".parse::<Coordinates>().is_err());
        assert!("95,0".parse::<Coordinates>().is_err());
    }

    #[test]
    fn test_bounds_from_points() {
        let bounds = BoundingBox::from_points([
            Coordinates::new(-27.0, -56.0),
            Coordinates::new(-28.0, -55.0),
        ])
        .unwrap();
        assert_eq!(bounds, BoundingBox::new(-56.0, -27.0, -55.0, -28.0));
        assert!(BoundingBox::from_points(Vec::new()).is_none());
    }

    #[test]
    fn test_pad() {
        let bounds = BoundingBox::new(-56.0, -27.0, -55.0, -28.0).pad(0.1);
        assert_relative_eq!(bounds.west, -56.1, epsilon = 1e-9);
        assert_relative_eq!(bounds.east, -54.9, epsilon = 1e-9);
        assert_relative_eq!(bounds.north, -26.9, epsilon = 1e-9);
        assert_relative_eq!(bounds.south, -28.1, epsilon = 1e-9);
    }

    #[test]
    fn test_center_and_contains() {
        let bounds = BoundingBox::new(-56.5, -26.5, -55.5, -28.5);
        let center = bounds.center();
        assert_relative_eq!(center.lat, -27.5);
        assert_relative_eq!(center.lng, -56.0);
        assert!(bounds.contains(center));
        assert!(!bounds.contains(Coordinates::new(-30.0, -56.0)));
    }

    #[test]
    fn test_viewbox() {
        let bounds = BoundingBox::new(-56.5, -26.5, -55.5, -28.5);
        assert_eq!(bounds.to_viewbox(), "-56.5,-26.5,-55.5,-28.5");
    }
}
