//! JSON output formatter

use crate::error::Result;
use crate::format::OutputFormatter;
use crate::viewer::MapSnapshot;

/// JSON formatter - outputs the full snapshot as pretty-printed JSON
pub struct JsonFormatter;

impl OutputFormatter for JsonFormatter {
    fn name(&self) -> &str {
        "json"
    }

    fn description(&self) -> &str {
        "Full JSON snapshot"
    }

    fn format(&self, snapshot: &MapSnapshot) -> Result<String> {
        Ok(serde_json::to_string_pretty(snapshot)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::task::fixtures::{now, task};
    use crate::viewer::render_snapshot;

    #[test]
    fn test_json_format() {
        let tasks = vec![task("a", Some((-27.1, -55.1)))];
        let snapshot = render_snapshot(&Config::default(), tasks, now(), Some("a")).unwrap();

        let output = JsonFormatter.format(&snapshot).unwrap();

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["markers"][0]["task_id"], "a");
        assert_eq!(parsed["markers"][0]["status"], "pending");
        assert_eq!(parsed["stats"]["total"], 1);
        assert_eq!(parsed["viewport"]["mode"], "bounds");
        assert_eq!(parsed["selected"]["id"], "a");
    }

    #[test]
    fn test_json_formatter_info() {
        let formatter = JsonFormatter;
        assert_eq!(formatter.name(), "json");
        assert!(!formatter.description().is_empty());
    }
}
