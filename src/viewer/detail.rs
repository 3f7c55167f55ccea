//! Side panel content for a selected task

use crate::config::LinksConfig;
use crate::task::{Priority, Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything the detail panel shows for one task
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDetail {
    pub id: String,
    pub title: String,
    pub description: String,
    pub work_area: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    pub priority: Priority,
    pub priority_label: String,
    pub status: TaskStatus,
    pub completed: bool,
    pub overdue: bool,
    /// Link to a full-scale map, present when the task has a location
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_map_url: Option<String>,
}

impl TaskDetail {
    pub fn from_task(task: &Task, now: DateTime<Utc>, links: &LinksConfig) -> Self {
        let location = task.location.as_ref();

        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            description: task.description.clone(),
            work_area: task.work_area.clone(),
            start_date: task.start_date,
            end_date: task.end_date,
            address: location.and_then(|l| l.address.clone()),
            priority: task.priority,
            priority_label: task.priority.label().to_string(),
            status: task.status_at(now),
            completed: task.completed,
            overdue: task.is_overdue(now),
            external_map_url: location.map(|l| links.external_map_url(l.latitude, l.longitude)),
        }
    }

    /// `start - end` as calendar dates
    pub fn date_range(&self) -> String {
        format!(
            "{} - {}",
            self.start_date.format("%Y-%m-%d"),
            self.end_date.format("%Y-%m-%d")
        )
    }
}
