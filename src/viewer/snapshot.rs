//! Render a task map without a display
//!
//! Mounts a [`TaskMapViewer`] on a [`HeadlessEngine`] and reads back what the
//! map would show. Used by the `map` command and the snapshot endpoint.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::error::{Error, Result};
use crate::map::{HeadlessEngine, MarkerId, MarkerIcon, Viewport};
use crate::task::{MapStats, Task, TaskStatus};
use crate::viewer::{TaskDetail, TaskMapViewer};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One rendered task marker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSnapshot {
    pub task_id: String,
    pub marker: MarkerId,
    pub position: Coordinates,
    pub status: TaskStatus,
    pub color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub popup: Option<String>,
}

/// Rendered state of the task map
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapSnapshot {
    pub generated_at: DateTime<Utc>,
    pub viewport: Option<Viewport>,
    pub markers: Vec<MarkerSnapshot>,
    pub stats: MapStats,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected: Option<TaskDetail>,
}

/// Render `tasks` as of `now`, optionally with a task selected
pub fn render_snapshot(
    config: &Config,
    tasks: Vec<Task>,
    now: DateTime<Utc>,
    selected: Option<&str>,
) -> Result<MapSnapshot> {
    let engine = HeadlessEngine::new();
    let mut viewer = TaskMapViewer::mount(engine.clone(), config, tasks, now);

    if let Some(id) = selected {
        viewer
            .select_task(id)
            .ok_or_else(|| Error::NotFound(format!("no task '{}' on the map", id)))?;
    }

    let mut markers = Vec::with_capacity(viewer.marker_count());
    for (task_id, marker) in viewer.markers().iter() {
        let Some(rendered) = engine.marker(marker) else {
            continue;
        };
        let Some(task) = viewer.tasks().iter().rev().find(|t| &t.id == task_id) else {
            continue;
        };

        let status = task.status_at(now);
        let color = match rendered.icon {
            MarkerIcon::Dot { color, .. } => color,
            MarkerIcon::Pin => status.color().to_string(),
        };

        markers.push(MarkerSnapshot {
            task_id: task_id.clone(),
            marker,
            position: rendered.position,
            status,
            color,
            popup: rendered.popup,
        });
    }
    markers.sort_by(|a, b| a.task_id.cmp(&b.task_id));

    Ok(MapSnapshot {
        generated_at: now,
        viewport: engine.viewport(),
        markers,
        stats: viewer.stats(now),
        selected: viewer.detail(now),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::fixtures::{now, task};

    #[test]
    fn test_snapshot_lists_markers_in_id_order() {
        let tasks = vec![
            task("b", Some((-27.2, -55.2))),
            task("a", Some((-27.1, -55.1))),
            task("c", None),
        ];

        let snapshot = render_snapshot(&Config::default(), tasks, now(), None).unwrap();

        let ids: Vec<&str> = snapshot.markers.iter().map(|m| m.task_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(snapshot.stats.total, 2);
        assert_eq!(snapshot.markers[0].color, TaskStatus::Pending.color());
        assert!(snapshot.markers[0]
            .popup
            .as_deref()
            .unwrap()
            .starts_with("Activity a"));
        assert!(matches!(snapshot.viewport, Some(Viewport::Bounds { .. })));
        assert!(snapshot.selected.is_none());
    }

    #[test]
    fn test_snapshot_with_selection() {
        let tasks = vec![task("a", Some((-27.1, -55.1)))];

        let snapshot = render_snapshot(&Config::default(), tasks, now(), Some("a")).unwrap();

        assert_eq!(snapshot.selected.unwrap().id, "a");
    }

    #[test]
    fn test_snapshot_unknown_selection() {
        let tasks = vec![task("a", Some((-27.1, -55.1))), task("b", None)];

        let missing = render_snapshot(&Config::default(), tasks.clone(), now(), Some("zzz"));
        assert!(matches!(missing, Err(Error::NotFound(_))));

        // Unlocated tasks have no marker to select
        let unlocated = render_snapshot(&Config::default(), tasks, now(), Some("b"));
        assert!(matches!(unlocated, Err(Error::NotFound(_))));
    }

    #[test]
    fn test_empty_snapshot_centers_on_default() {
        let snapshot = render_snapshot(&Config::default(), Vec::new(), now(), None).unwrap();

        assert!(snapshot.markers.is_empty());
        assert_eq!(
            snapshot.viewport,
            Some(Viewport::Center {
                center: Config::default().map.default_center(),
                zoom: 12
            })
        );
    }
}
