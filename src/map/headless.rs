//! Headless map engine
//!
//! Keeps the map in memory instead of drawing it. The CLI and the snapshot
//! endpoint render through it, and tests inspect it. Clones share state, so a
//! handle kept outside a component still sees the map after the component is
//! dropped.

use crate::coord::{BoundingBox, Coordinates};
use crate::error::{Error, Result};
use crate::map::{MapEngine, MarkerIcon, MarkerId, Viewport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// A marker as the headless engine holds it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlessMarker {
    pub position: Coordinates,
    pub icon: MarkerIcon,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<String>,
}

/// A tile layer registration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileLayer {
    pub url_template: String,
    pub attribution: String,
}

/// Everything the headless engine has been told
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HeadlessState {
    /// Map surface exists
    pub live: bool,
    /// Map surface was torn down
    pub destroyed: bool,
    pub viewport: Option<Viewport>,
    pub tile_layers: Vec<TileLayer>,
    pub markers: BTreeMap<MarkerId, HeadlessMarker>,
    next_marker: u64,
}

/// In-memory [`MapEngine`]
#[derive(Debug, Clone, Default)]
pub struct HeadlessEngine {
    state: Arc<Mutex<HeadlessState>>,
    fail_init: bool,
}

impl HeadlessEngine {
    /// Create an engine whose map creation succeeds
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an engine whose map creation always fails
    pub fn failing() -> Self {
        Self {
            fail_init: true,
            ..Self::default()
        }
    }

    fn lock(&self) -> MutexGuard<'_, HeadlessState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Copy of the current state
    pub fn state(&self) -> HeadlessState {
        self.lock().clone()
    }

    /// Current camera
    pub fn viewport(&self) -> Option<Viewport> {
        self.lock().viewport
    }

    /// Number of live markers
    pub fn marker_count(&self) -> usize {
        self.lock().markers.len()
    }

    /// A live marker by handle
    pub fn marker(&self, id: MarkerId) -> Option<HeadlessMarker> {
        self.lock().markers.get(&id).cloned()
    }

    /// Whether the map surface exists
    pub fn is_live(&self) -> bool {
        self.lock().live
    }

    /// Whether the map surface was torn down
    pub fn is_destroyed(&self) -> bool {
        self.lock().destroyed
    }
}

impl MapEngine for HeadlessEngine {
    fn create_map(&mut self, center: Coordinates, zoom: u8) -> Result<()> {
        if self.fail_init {
            return Err(Error::MapInit("map surface unavailable".to_string()));
        }

        let mut state = self.lock();
        if state.live {
            return Err(Error::MapInit("map already created".to_string()));
        }

        state.live = true;
        state.destroyed = false;
        state.viewport = Some(Viewport::Center { center, zoom });
        Ok(())
    }

    fn add_tile_layer(&mut self, url_template: &str, attribution: &str) -> Result<()> {
        let mut state = self.lock();
        if !state.live {
            return Err(Error::MapInit("no map to add tiles to".to_string()));
        }

        state.tile_layers.push(TileLayer {
            url_template: url_template.to_string(),
            attribution: attribution.to_string(),
        });
        Ok(())
    }

    fn add_marker(&mut self, position: Coordinates, icon: &MarkerIcon) -> MarkerId {
        let mut state = self.lock();
        state.next_marker += 1;
        let id = MarkerId(state.next_marker);

        if state.live {
            state.markers.insert(
                id,
                HeadlessMarker {
                    position,
                    icon: icon.clone(),
                    popup: None,
                },
            );
        } else {
            debug!(%id, "Marker added without a live map, ignoring");
        }

        id
    }

    fn bind_popup(&mut self, marker: MarkerId, content: &str) {
        if let Some(m) = self.lock().markers.get_mut(&marker) {
            m.popup = Some(content.to_string());
        }
    }

    fn remove_layer(&mut self, marker: MarkerId) {
        self.lock().markers.remove(&marker);
    }

    fn set_view(&mut self, center: Coordinates, zoom: u8) {
        let mut state = self.lock();
        if state.live {
            state.viewport = Some(Viewport::Center { center, zoom });
        }
    }

    fn fit_bounds(&mut self, markers: &[MarkerId], padding: f64) {
        let mut state = self.lock();
        let positions: Vec<Coordinates> = markers
            .iter()
            .filter_map(|id| state.markers.get(id).map(|m| m.position))
            .collect();

        if let Some(bounds) = BoundingBox::from_points(positions) {
            state.viewport = Some(Viewport::Bounds {
                bounds: bounds.pad(padding),
            });
        }
    }

    fn destroy(&mut self) {
        let mut state = self.lock();
        state.live = false;
        state.destroyed = true;
        state.markers.clear();
        state.tile_layers.clear();
    }
}
