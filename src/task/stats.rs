//! Aggregate counters shown beside the task map

use crate::task::{Task, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Counts over the tasks that carry a location
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub overdue: usize,
}

impl MapStats {
    /// Compute the counters from scratch
    pub fn compute(tasks: &[Task], now: DateTime<Utc>) -> Self {
        tasks
            .iter()
            .filter(|t| t.has_location())
            .fold(Self::default(), |mut stats, task| {
                stats.total += 1;
                match task.status_at(now) {
                    TaskStatus::Completed => stats.completed += 1,
                    TaskStatus::Overdue => stats.overdue += 1,
                    TaskStatus::Pending => stats.pending += 1,
                }
                stats
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::fixtures::{now, task};
    use chrono::Duration;

    #[test]
    fn test_empty() {
        assert_eq!(MapStats::compute(&[], now()), MapStats::default());
    }

    #[test]
    fn test_counts_only_located_tasks() {
        let mut done = task("done", Some((-27.3, -55.9)));
        done.completed = true;
        done.end_date = now() - Duration::days(10);

        let mut late = task("late", Some((-27.4, -55.8)));
        late.end_date = now() - Duration::seconds(1);

        let due_now = {
            let mut t = task("due-now", Some((-27.5, -55.7)));
            t.end_date = now();
            t
        };

        let mut unlocated_late = task("nowhere", None);
        unlocated_late.end_date = now() - Duration::days(1);

        let stats = MapStats::compute(&[done, late, due_now, unlocated_late], now());

        assert_eq!(
            stats,
            MapStats {
                total: 3,
                completed: 1,
                pending: 1,
                overdue: 1,
            }
        );
    }
}
