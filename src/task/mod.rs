//! Activities as consumed from the task store
//!
//! Tasks are owned by the external storage service; this crate only reads
//! them and derives a display status.

pub mod stats;

use crate::constants::marker::{COMPLETED_COLOR, OVERDUE_COLOR, PENDING_COLOR};
use crate::geo::GeoPoint;
use crate::map::MarkerIcon;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

pub use stats::MapStats;

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

// The task store is loosely typed; anything unrecognised is shown as medium.
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.and_then(|s| s.parse().ok()).unwrap_or_default())
    }
}

/// Derived display status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Completed,
    Overdue,
    Pending,
}

impl TaskStatus {
    /// Marker colour
    pub fn color(&self) -> &'static str {
        match self {
            Self::Completed => COMPLETED_COLOR,
            Self::Overdue => OVERDUE_COLOR,
            Self::Pending => PENDING_COLOR,
        }
    }

    /// Marker icon
    pub fn icon(&self) -> MarkerIcon {
        MarkerIcon::dot(self.color())
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Overdue => "Overdue",
            Self::Pending => "Pending",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// An activity assigned to council staff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub work_area: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<GeoPoint>,
}

impl Task {
    /// Not completed and past its end date (strictly)
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.end_date < now
    }

    /// Status at `now`: completed wins over overdue, overdue over pending
    pub fn status_at(&self, now: DateTime<Utc>) -> TaskStatus {
        if self.completed {
            TaskStatus::Completed
        } else if self.is_overdue(now) {
            TaskStatus::Overdue
        } else {
            TaskStatus::Pending
        }
    }

    /// Whether the task can be placed on a map
    pub fn has_location(&self) -> bool {
        self.location.is_some()
    }

    /// Plain-text marker popup
    pub fn popup_text(&self, now: DateTime<Utc>) -> String {
        let mut lines = vec![
            self.title.clone(),
            self.description.clone(),
            format!("Status: {}", self.status_at(now)),
            format!("Area: {}", self.work_area),
            format!("Date: {}", self.start_date.format("%Y-%m-%d")),
        ];
        if let Some(address) = self.location.as_ref().and_then(|l| l.address.as_ref()) {
            lines.push(format!("Address: {}", address));
        }
        lines.retain(|line| !line.is_empty());
        lines.join("\n")
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::{now, task};
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_status_precedence() {
        let mut t = task("1", None);
        assert_eq!(t.status_at(now()), TaskStatus::Pending);

        t.end_date = now() - Duration::days(5);
        assert_eq!(t.status_at(now()), TaskStatus::Overdue);

        // Completed wins regardless of date
        t.completed = true;
        assert_eq!(t.status_at(now()), TaskStatus::Completed);
        t.end_date = now() + Duration::days(5);
        assert_eq!(t.status_at(now()), TaskStatus::Completed);
    }

    #[test]
    fn test_overdue_boundary() {
        let mut t = task("1", None);

        t.end_date = now();
        assert!(!t.is_overdue(now()));
        assert_eq!(t.status_at(now()), TaskStatus::Pending);

        t.end_date = now() - Duration::seconds(1);
        assert!(t.is_overdue(now()));
        assert_eq!(t.status_at(now()), TaskStatus::Overdue);
    }

    #[test]
    fn test_status_colors() {
        assert_eq!(TaskStatus::Completed.color(), "#10b981");
        assert_eq!(TaskStatus::Overdue.color(), "#ef4444");
        assert_eq!(TaskStatus::Pending.color(), "#3b82f6");
        assert_eq!(
            TaskStatus::Pending.icon(),
            MarkerIcon::Dot {
                color: "#3b82f6".to_string(),
                size_px: 25
            }
        );
    }

    #[test]
    fn test_deserialize_store_shape() {
        let json = r#"{
            "id": "a1",
            "title": "Poda de árboles",
            "description": "Barrio Centro",
            "workArea": "Espacios verdes",
            "startDate": "2026-03-01T08:00:00Z",
            "endDate": "2026-03-05T18:00:00Z",
            "completed": false,
            "priority": "high",
            "location": { "lat": -27.36, "lng": -55.89, "address": "Centro" }
        }"#;

        let t: Task = serde_json::from_str(json).unwrap();

        assert_eq!(t.work_area, "Espacios verdes");
        assert_eq!(t.priority, Priority::High);
        assert_eq!(t.location.unwrap().address.as_deref(), Some("Centro"));
        assert!(t.completed_at.is_none());
    }

    #[test]
    fn test_unknown_priority_is_medium() {
        let json = r#"{
            "id": "a1", "title": "x",
            "startDate": "2026-03-01T08:00:00Z",
            "endDate": "2026-03-05T18:00:00Z",
            "priority": "urgent"
        }"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.priority, Priority::Medium);
        assert!(!t.has_location());

        let json = r#"{
            "id": "a2", "title": "x",
            "startDate": "2026-03-01T08:00:00Z",
            "endDate": "2026-03-05T18:00:00Z",
            "priority": null
        }"#;
        let t: Task = serde_json::from_str(json).unwrap();
        assert_eq!(t.priority, Priority::Medium);
    }

    #[test]
    fn test_popup_text() {
        let mut t = task("7", Some((-27.3, -55.9)));
        assert!(!t.popup_text(now()).contains("Address"));

        t.location = Some(GeoPoint::new(-27.3, -55.9, Some("Av. Uruguay 500".into())));
        let popup = t.popup_text(now());

        assert!(popup.starts_with("Activity 7\n"));
        assert!(popup.contains("Status: Pending"));
        assert!(popup.contains("Area: Public works"));
        assert!(popup.contains("Date: 2026-03-08"));
        assert!(popup.contains("Address: Av. Uruguay 500"));
    }
}
