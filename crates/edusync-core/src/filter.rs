//! Course/priority filtering applied before ranking.

use serde::{Deserialize, Serialize};

use crate::task::{Priority, Task};

/// Exact-match filter over course and priority. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskFilter {
    pub course: Option<String>,
    pub priority: Option<Priority>,
}

impl TaskFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict to one course. An empty label clears the course filter.
    pub fn with_course(mut self, course: impl Into<String>) -> Self {
        let course = course.into();
        self.course = (!course.is_empty()).then_some(course);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.course.as_deref().map_or(true, str::is_empty) && self.priority.is_none()
    }

    pub fn matches(&self, task: &Task) -> bool {
        let course_ok = match self.course.as_deref() {
            None | Some("") => true,
            Some(course) => task.course == course,
        };
        let priority_ok = self.priority.map_or(true, |p| task.priority == p);
        course_ok && priority_ok
    }

    /// Matching tasks in their original order.
    pub fn apply(&self, tasks: &[Task]) -> Vec<Task> {
        tasks.iter().filter(|t| self.matches(t)).cloned().collect()
    }
}

/// Distinct course labels in first-seen order.
pub fn courses(tasks: &[Task]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for task in tasks {
        if !seen.iter().any(|c| c == &task.course) {
            seen.push(task.course.clone());
        }
    }
    seen
}
