//! Task map viewer
//!
//! Shows every activity that carries a location as a status-coloured pin.
//! Pins are torn down and rebuilt from scratch whenever the task collection
//! changes; a [`MarkerLayer`] keyed by task id keeps at most one pin per task.
//! Keyed reconciliation on top of the same layer is the path to larger task
//! counts, it is not needed at council scale.

pub mod detail;
pub mod snapshot;

use crate::config::{Config, LinksConfig};
use crate::map::{MapEngine, MapEvent, MarkerId, MarkerLayer};
use crate::task::{MapStats, Task};
use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

pub use detail::TaskDetail;
pub use snapshot::{render_snapshot, MapSnapshot, MarkerSnapshot};

/// Map of located activities with a selectable detail panel
pub struct TaskMapViewer<E: MapEngine> {
    engine: E,
    map_ready: bool,
    markers: MarkerLayer<String>,
    tasks: Vec<Task>,
    selected: Option<String>,
    fit_padding: f64,
    links: LinksConfig,
}

impl<E: MapEngine> TaskMapViewer<E> {
    /// Create the map at the reference point and pin the given tasks
    ///
    /// A map that fails to initialize is logged; the viewer then keeps the
    /// tasks (counters and details still work) but shows no pins.
    pub fn mount(engine: E, config: &Config, tasks: Vec<Task>, now: DateTime<Utc>) -> Self {
        let mut viewer = Self {
            engine,
            map_ready: false,
            markers: MarkerLayer::new(),
            tasks: Vec::new(),
            selected: None,
            fit_padding: config.map.fit_padding,
            links: config.links.clone(),
        };

        let created = viewer
            .engine
            .create_map(config.map.default_center(), config.map.viewer_zoom)
            .and_then(|()| {
                let tiles = viewer
                    .engine
                    .add_tile_layer(&config.map.tile_url, &config.map.attribution);
                if tiles.is_err() {
                    viewer.engine.destroy();
                }
                tiles
            });

        match created {
            Ok(()) => viewer.map_ready = true,
            Err(e) => error!(error = %e, "Failed to initialize task map"),
        }

        viewer.set_tasks(tasks, now);
        viewer
    }

    /// Replace the task collection and rebuild every pin
    pub fn set_tasks(&mut self, tasks: Vec<Task>, now: DateTime<Utc>) {
        self.tasks = tasks;
        self.rebuild(now);

        // Keep the panel pointing at live data
        if let Some(id) = self.selected.take() {
            if self.markers.get(&id).is_some() {
                self.selected = Some(id);
            } else {
                debug!(task = %id, "Selected task no longer on the map");
            }
        }
    }

    fn rebuild(&mut self, now: DateTime<Utc>) {
        self.markers.clear(&mut self.engine);
        if !self.map_ready {
            return;
        }

        for task in &self.tasks {
            let Some(location) = &task.location else {
                continue;
            };

            if self.markers.get(&task.id).is_some() {
                warn!(task = %task.id, "Duplicate task id, keeping the last one");
            }

            let status = task.status_at(now);
            let marker = self.markers.insert(
                &mut self.engine,
                task.id.clone(),
                location.coordinates(),
                &status.icon(),
            );
            self.engine.bind_popup(marker, &task.popup_text(now));
        }

        if !self.markers.is_empty() {
            self.engine.fit_bounds(&self.markers.handles(), self.fit_padding);
        }

        debug!(markers = self.markers.len(), tasks = self.tasks.len(), "Rebuilt task markers");
    }

    /// Route host input; marker clicks select their task
    pub fn handle_event(&mut self, event: MapEvent) -> Option<&Task> {
        match event {
            MapEvent::MarkerClick { marker } => self.handle_marker_click(marker),
            MapEvent::Click { .. } => None,
        }
    }

    /// Select the task behind a marker
    pub fn handle_marker_click(&mut self, marker: MarkerId) -> Option<&Task> {
        let id = self.markers.key_for(marker)?.clone();
        self.selected = Some(id);
        self.selected_task()
    }

    /// Select a pinned task by id
    pub fn select_task(&mut self, id: &str) -> Option<&Task> {
        self.markers.get(&id.to_string())?;
        self.selected = Some(id.to_string());
        self.selected_task()
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_task(&self) -> Option<&Task> {
        let id = self.selected.as_ref()?;
        self.tasks.iter().rev().find(|t| &t.id == id)
    }

    /// Side panel content for the selected task
    pub fn detail(&self, now: DateTime<Utc>) -> Option<TaskDetail> {
        self.selected_task()
            .map(|task| TaskDetail::from_task(task, now, &self.links))
    }

    /// Counters over the current collection
    pub fn stats(&self, now: DateTime<Utc>) -> MapStats {
        MapStats::compute(&self.tasks, now)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn markers(&self) -> &MarkerLayer<String> {
        &self.markers
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    pub fn is_map_ready(&self) -> bool {
        self.map_ready
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }
}

impl<E: MapEngine> Drop for TaskMapViewer<E> {
    fn drop(&mut self) {
        if self.map_ready {
            self.engine.destroy();
        }
    }
}
