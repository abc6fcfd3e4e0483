use std::collections::HashMap;
use std::sync::RwLock;

use log::warn;

use super::worker_model::{TaskReport, TaskStats, WorkerTask};

/// Run statistics for every worker task.
pub struct TaskRegistry {
    stats: RwLock<HashMap<WorkerTask, TaskStats>>,
}

impl TaskRegistry {
    pub fn new() -> Self {
        let stats = WorkerTask::ALL
            .into_iter()
            .map(|task| (task, TaskStats::new(task)))
            .collect();
        Self {
            stats: RwLock::new(stats),
        }
    }

    pub fn record(&self, report: &TaskReport) {
        let mut stats = self.stats.write().unwrap_or_else(|poisoned| {
            warn!("Task registry lock was poisoned, recovering");
            poisoned.into_inner()
        });
        let entry = stats
            .entry(report.task)
            .or_insert_with(|| TaskStats::new(report.task));
        entry.runs += 1;
        if !report.success {
            entry.failures += 1;
        }
        entry.last_run = Some(report.timestamp);
        entry.last_report = Some(report.clone());
    }

    pub fn get(&self, task: WorkerTask) -> TaskStats {
        self.stats
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(&task)
            .cloned()
            .unwrap_or_else(|| TaskStats::new(task))
    }

    /// Stats for all tasks, in schedule order.
    pub fn all(&self) -> Vec<TaskStats> {
        WorkerTask::ALL.into_iter().map(|t| self.get(t)).collect()
    }
}

impl Default for TaskRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::worker::TaskDetails;

    #[test]
    fn test_record_counts_runs_and_failures() {
        let registry = TaskRegistry::new();
        let task = WorkerTask::CheckMevProtection;
        assert_eq!(registry.get(task).runs, 0);
        assert_eq!(registry.get(task).last_succeeded(), None);

        registry.record(&TaskReport::success(
            task,
            TaskDetails::MevCheck {
                mev_threats_detected: 1,
                protected_trades: 2,
                protection_active: true,
            },
        ));
        registry.record(&TaskReport::failure(task, "boom"));

        let stats = registry.get(task);
        assert_eq!(stats.runs, 2);
        assert_eq!(stats.failures, 1);
        assert_eq!(stats.last_succeeded(), Some(false));
        assert!(stats.last_run.is_some());
        assert_eq!(registry.all().len(), 6);
    }
}
