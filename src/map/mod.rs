//! Map engine adapter
//!
//! The components drive a rendering engine through the narrow [`MapEngine`]
//! trait so any concrete mapping library can sit behind it.
//!
//! Engines do not call back into the components. The host forwards pointer
//! input as [`MapEvent`]s to the owning component's `handle_event`.

pub mod headless;
pub mod markers;

use crate::coord::{BoundingBox, Coordinates};
use crate::error::Result;
use serde::{Deserialize, Serialize};

pub use headless::HeadlessEngine;
pub use markers::MarkerLayer;

/// Opaque handle to a marker owned by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MarkerId(pub u64);

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "marker-{}", self.0)
    }
}

/// Marker appearance; styling is data, the engine decides how to draw it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MarkerIcon {
    /// The engine's stock pin
    Pin,
    /// Round dot with a white border and centre
    Dot { color: String, size_px: u32 },
}

impl MarkerIcon {
    /// Dot icon of the standard size
    pub fn dot(color: &str) -> Self {
        Self::Dot {
            color: color.to_string(),
            size_px: crate::constants::marker::DOT_SIZE_PX,
        }
    }
}

/// Current camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Viewport {
    /// Centered on a point at a fixed zoom
    Center { center: Coordinates, zoom: u8 },
    /// Fitted to a (padded) bounding box
    Bounds { bounds: BoundingBox },
}

/// Pointer input forwarded by the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MapEvent {
    /// Click on the map surface
    Click { position: Coordinates },
    /// Click on a marker
    MarkerClick { marker: MarkerId },
}

/// Capability set of an embeddable map widget
///
/// Every call is synchronous and runs to completion. Only creating the map
/// and its tile layer can fail.
pub trait MapEngine {
    /// Create the map surface centered on `center`
    fn create_map(&mut self, center: Coordinates, zoom: u8) -> Result<()>;

    /// Add a raster tile layer
    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) -> Result<()>;

    /// Add a marker, returning its handle
    fn add_marker(&mut self, position: Coordinates, icon: &MarkerIcon) -> MarkerId;

    /// Attach popup text to a marker
    fn bind_popup(&mut self, marker: MarkerId, content: &str);

    /// Remove a marker; unknown handles are ignored
    fn remove_layer(&mut self, marker: MarkerId);

    /// Move the camera
    fn set_view(&mut self, center: Coordinates, zoom: u8);

    /// Fit the camera to the given markers, growing the bounds by `padding`
    fn fit_bounds(&mut self, markers: &[MarkerId], padding: f64);

    /// Tear down the map surface and every layer on it
    fn destroy(&mut self);
}
