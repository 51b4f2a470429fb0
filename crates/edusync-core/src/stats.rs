//! Aggregate counts over the full task collection.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task};

/// Dashboard counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStats {
    pub total: usize,
    /// Tasks at 100% progress
    pub completed: usize,
    /// Tasks due strictly before today
    pub overdue: usize,
    /// High-priority tasks
    pub urgent: usize,
}

impl TaskStats {
    /// Compute counters in a single pass.
    pub fn compute(tasks: &[Task], today: NaiveDate) -> Self {
        tasks.iter().fold(Self::default(), |mut acc, task| {
            acc.total += 1;
            if task.is_complete() {
                acc.completed += 1;
            }
            if task.is_overdue(today) {
                acc.overdue += 1;
            }
            if task.priority == Priority::High {
                acc.urgent += 1;
            }
            acc
        })
    }
}
