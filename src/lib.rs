//! activity-map: map widgets for municipal activity management
//!
//! Two components sit on top of a small map-engine abstraction:
//!
//! - [`picker::LocationPicker`] lets an administrator choose a point by
//!   clicking the map or searching a place name, and resolves its address.
//! - [`viewer::TaskMapViewer`] shows every located activity as a pin coloured
//!   by status, with counters and a detail panel.
//!
//! Geocoding goes through Nominatim, directly or via the same-origin proxy
//! served by `activity-map serve`.
//!
//! ## Quick Start
//!
//! ```rust
//! use activity_map::map::HeadlessEngine;
//! use activity_map::viewer::TaskMapViewer;
//! use activity_map::Config;
//!
//! let config = Config::default();
//! let engine = HeadlessEngine::new();
//! let viewer = TaskMapViewer::mount(engine.clone(), &config, Vec::new(), chrono::Utc::now());
//!
//! assert_eq!(viewer.marker_count(), 0);
//! assert_eq!(viewer.stats(chrono::Utc::now()).total, 0);
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod coord;
pub mod error;
pub mod format;
pub mod geo;
pub mod map;
pub mod picker;
pub mod server;
pub mod task;
pub mod viewer;

// Re-export commonly used types
pub use config::Config;
pub use coord::{BoundingBox, Coordinates};
pub use error::{Error, Result};
pub use geo::{GeoPoint, Geocoder};
pub use map::{HeadlessEngine, MapEngine, MapEvent};
pub use picker::LocationPicker;
pub use task::{MapStats, Task, TaskStatus};
pub use viewer::TaskMapViewer;
