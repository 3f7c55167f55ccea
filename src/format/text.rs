//! Human-readable text output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::map::Viewport;
use crate::viewer::MapSnapshot;

/// Text formatter - outputs counters, markers and the selected task
pub struct TextFormatter;

impl OutputFormatter for TextFormatter {
    fn name(&self) -> &str {
        "text"
    }

    fn description(&self) -> &str {
        "Human-readable text"
    }

    fn format(&self, snapshot: &MapSnapshot) -> Result<String> {
        let mut output = String::new();
        let stats = &snapshot.stats;

        output.push_str(&format!("Activity map ({})\n", snapshot.generated_at.to_rfc3339()));
        output.push_str(&format!(
            "Total: {}  Completed: {}  Pending: {}  Overdue: {}\n",
            stats.total, stats.completed, stats.pending, stats.overdue
        ));

        match &snapshot.viewport {
            Some(Viewport::Center { center, zoom }) => {
                output.push_str(&format!("View: centered on {} at zoom {}\n", center, zoom));
            }
            Some(Viewport::Bounds { bounds }) => {
                output.push_str(&format!("View: fitted to {}\n", bounds.to_viewbox()));
            }
            None => {
                output.push_str("View: map unavailable\n");
            }
        }

        if !snapshot.markers.is_empty() {
            output.push_str("\nMarkers:\n");
            for marker in &snapshot.markers {
                output.push_str(&format!(
                    "  [{}] {} at ({})\n",
                    marker.status, marker.task_id, marker.position
                ));
            }
        }

        if let Some(detail) = &snapshot.selected {
            output.push_str("\nSelected:\n");
            output.push_str(&format!("  {}\n", detail.title));
            if !detail.description.is_empty() {
                output.push_str(&format!("  {}\n", detail.description));
            }
            output.push_str(&format!("  Area: {}\n", detail.work_area));
            output.push_str(&format!("  Dates: {}\n", detail.date_range()));
            if let Some(address) = &detail.address {
                output.push_str(&format!("  Address: {}\n", address));
            }
            output.push_str(&format!("  Priority: {}\n", detail.priority_label));
            output.push_str(&format!("  Status: {}\n", detail.status));
            if let Some(url) = &detail.external_map_url {
                output.push_str(&format!("  Map: {}\n", url));
            }
        }

        Ok(output)
    }
}
