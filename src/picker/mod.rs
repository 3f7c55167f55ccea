//! Location picker
//!
//! Lets an administrator choose the point for a new activity, either by
//! clicking the map or by typing a place name. Observable states are Empty,
//! Selected and a Searching overlay while a forward search is in flight.
//!
//! Network work is split in two halves so the host can run it on any
//! executor: a synchronous call hands out a request ticket, and the matching
//! `complete_*` call applies the response. Every ticket carries a generation
//! number; only responses for the latest generation are applied, so a slow
//! response can never overwrite newer state.
//!
//! The selection callback fires exactly once per transition into Selected
//! (with the new point) or into Empty (with `None`).

pub mod debounce;

use crate::config::Config;
use crate::coord::Coordinates;
use crate::geo::{is_searchable, GeoBackend, GeoPoint, Geocoder, ReverseLookup, SearchResult};
use crate::map::{MapEngine, MapEvent, MarkerIcon, MarkerId};
use debounce::Debouncer;
use std::time::{Duration, Instant};
use tracing::{debug, error};

/// Receives the new selection, or `None` when it was cleared
pub type SelectionCallback = Box<dyn FnMut(Option<GeoPoint>) + Send>;

/// Observable picker state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerStatus {
    Empty,
    Selected,
    /// A forward search is in flight (over Empty or Selected)
    Searching,
}

/// Ticket for a reverse lookup started by a map click
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReverseRequest {
    pub generation: u64,
    pub position: Coordinates,
}

/// Ticket for a forward search started by the debounce timer
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub generation: u64,
    pub query: String,
}

/// Map-based location picker
pub struct LocationPicker<E: MapEngine> {
    engine: E,
    map_ready: bool,
    marker: Option<MarkerId>,
    selection: Option<GeoPoint>,
    search_text: String,
    debouncer: Debouncer,
    generation: u64,
    searching: Option<u64>,
    min_query_len: usize,
    selection_zoom: u8,
    on_change: SelectionCallback,
}

impl<E: MapEngine> LocationPicker<E> {
    /// Create the picker and its map
    ///
    /// With a prior selection the camera is centered tightly on it and its
    /// marker is shown; otherwise the camera shows the reference point at a
    /// wide zoom. A map that fails to initialize is logged and leaves the
    /// picker without a map surface.
    pub fn mount<F>(engine: E, config: &Config, initial: Option<GeoPoint>, on_change: F) -> Self
    where
        F: FnMut(Option<GeoPoint>) + Send + 'static,
    {
        let mut picker = Self {
            engine,
            map_ready: false,
            marker: None,
            selection: initial,
            search_text: String::new(),
            debouncer: Debouncer::new(Duration::from_millis(config.geocoder.debounce_ms)),
            generation: 0,
            searching: None,
            min_query_len: config.geocoder.min_query_len,
            selection_zoom: config.map.selection_zoom,
            on_change: Box::new(on_change),
        };

        let (center, zoom) = match &picker.selection {
            Some(point) => (point.coordinates(), config.map.selection_zoom),
            None => (config.map.default_center(), config.map.picker_zoom),
        };

        let created = picker.engine.create_map(center, zoom).and_then(|()| {
            let tiles = picker
                .engine
                .add_tile_layer(&config.map.tile_url, &config.map.attribution);
            if tiles.is_err() {
                picker.engine.destroy();
            }
            tiles
        });

        match created {
            Ok(()) => {
                picker.map_ready = true;
                if let Some(point) = picker.selection.clone() {
                    picker.place_marker(point.coordinates(), point.address.as_deref());
                }
            }
            Err(e) => error!(error = %e, "Failed to initialize picker map"),
        }

        picker
    }

    /// Current state
    pub fn status(&self) -> PickerStatus {
        if self.searching.is_some() {
            PickerStatus::Searching
        } else if self.selection.is_some() {
            PickerStatus::Selected
        } else {
            PickerStatus::Empty
        }
    }

    pub fn selection(&self) -> Option<&GeoPoint> {
        self.selection.as_ref()
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn is_searching(&self) -> bool {
        self.searching.is_some()
    }

    /// Whether the map surface exists
    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Info line under the map: address, else coordinates; None when empty
    pub fn location_label(&self) -> Option<String> {
        self.selection.as_ref().map(GeoPoint::label)
    }

    /// When the pending search timer fires, if one is scheduled
    pub fn next_search_deadline(&self) -> Option<Instant> {
        self.debouncer.deadline()
    }

    /// Route host input; returns the lookup to run for map clicks
    pub fn handle_event(&mut self, event: MapEvent) -> Option<ReverseRequest> {
        match event {
            MapEvent::Click { position } => self.click(position),
            MapEvent::MarkerClick { .. } => None,
        }
    }

    /// Map click: move the single marker and start a reverse lookup
    pub fn click(&mut self, position: Coordinates) -> Option<ReverseRequest> {
        if !self.map_ready {
            debug!("Ignoring click, picker has no map");
            return None;
        }

        self.place_marker(position, None);
        self.generation += 1;
        Some(ReverseRequest {
            generation: self.generation,
            position,
        })
    }

    /// Apply a reverse lookup; stale tickets are dropped
    pub fn complete_click(&mut self, request: ReverseRequest, lookup: ReverseLookup) -> bool {
        if request.generation != self.generation {
            debug!(generation = request.generation, "Discarding stale reverse lookup");
            return false;
        }

        if let Some(marker) = self.marker {
            self.engine.bind_popup(marker, &lookup.address);
        }

        let point = GeoPoint::new(
            request.position.lat,
            request.position.lng,
            Some(lookup.address),
        );
        self.select(point);
        true
    }

    /// Search field edit: replaces the text and restarts the debounce timer
    pub fn type_text(&mut self, text: &str, now: Instant) {
        self.search_text = text.to_string();
        self.debouncer.schedule(text, now);
    }

    /// Fire a due search timer; returns the search to run, if any
    pub fn poll_search(&mut self, now: Instant) -> Option<SearchRequest> {
        let query = self.debouncer.fire(now)?;

        if !is_searchable(&query, self.min_query_len) {
            debug!(query = %query, "Search text too short, not searching");
            return None;
        }

        self.generation += 1;
        self.searching = Some(self.generation);
        Some(SearchRequest {
            generation: self.generation,
            query,
        })
    }

    /// Apply a forward search result
    ///
    /// A response is stale when a newer ticket was issued or the search text
    /// changed since the request. No match leaves the state as it was.
    pub fn complete_search(&mut self, request: SearchRequest, result: Option<SearchResult>) -> bool {
        if self.searching == Some(request.generation) {
            self.searching = None;
        }

        if request.generation != self.generation || self.search_text != request.query {
            debug!(query = %request.query, "Discarding stale search result");
            return false;
        }

        let Some(result) = result else {
            debug!(query = %request.query, "No match, keeping current selection");
            return false;
        };

        let point = GeoPoint::from(result);
        let position = point.coordinates();
        self.place_marker(position, point.address.as_deref());
        if self.map_ready {
            self.engine.set_view(position, self.selection_zoom);
        }

        self.search_text = point.label();
        self.select(point);
        true
    }

    /// Remove the selection, its marker and the search text
    pub fn clear_selection(&mut self) {
        if let Some(marker) = self.marker.take() {
            self.engine.remove_layer(marker);
        }
        self.search_text.clear();
        self.debouncer.cancel();
        // In-flight lookups must not bring the selection back
        self.generation += 1;

        if self.selection.take().is_some() {
            (self.on_change)(None);
        }
    }

    /// Clear the search field only; the selection and marker stay
    pub fn clear_search_text(&mut self) {
        self.search_text.clear();
        self.debouncer.cancel();
    }

    /// Click and resolve the address in one step
    pub async fn select_point<B: GeoBackend>(
        &mut self,
        geocoder: &Geocoder<B>,
        position: Coordinates,
    ) -> bool {
        let Some(request) = self.click(position) else {
            return false;
        };
        let lookup = geocoder.reverse_lookup(position.lat, position.lng).await;
        self.complete_click(request, lookup)
    }

    /// Run the pending search if its timer is due at `now`
    pub async fn run_pending_search<B: GeoBackend>(
        &mut self,
        geocoder: &Geocoder<B>,
        now: Instant,
    ) -> bool {
        let Some(request) = self.poll_search(now) else {
            return false;
        };
        let result = geocoder.forward_search(&request.query).await;
        self.complete_search(request, result)
    }

    fn place_marker(&mut self, position: Coordinates, popup: Option<&str>) {
        if !self.map_ready {
            return;
        }

        if let Some(old) = self.marker.take() {
            self.engine.remove_layer(old);
        }

        let marker = self.engine.add_marker(position, &MarkerIcon::Pin);
        if let Some(text) = popup {
            self.engine.bind_popup(marker, text);
        }
        self.marker = Some(marker);
    }

    fn select(&mut self, point: GeoPoint) {
        self.selection = Some(point.clone());
        (self.on_change)(Some(point));
    }
}

impl<E: MapEngine> Drop for LocationPicker<E> {
    fn drop(&mut self) {
        self.debouncer.cancel();
        if self.map_ready {
            self.engine.destroy();
        }
    }
}
