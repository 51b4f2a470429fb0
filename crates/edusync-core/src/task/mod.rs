//! Task types.
//!
//! [`Task`] is the validated, in-memory form that ranking, filtering and
//! statistics operate on. Backend documents arrive as [`TaskRecord`] and are
//! converted with `Task::try_from`, which is where malformed due dates are
//! rejected.

pub mod record;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;

pub use record::{parse_due_date, parse_records, RejectedRecord, TaskBatch, TaskRecord};

/// User-assigned task priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    /// All priorities, highest first.
    pub const ALL: [Priority; 3] = [Priority::High, Priority::Medium, Priority::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(ValidationError::InvalidPriority(s.to_string())),
        }
    }
}

/// Self-reported energy level of the user.
///
/// Transient: it biases ranking but is never stored on a task.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum EnergyLevel {
    /// Feeling energetic and focused
    High,
    /// Normal energy level
    #[default]
    Medium,
    /// Tired, prefer easier tasks
    Low,
}

impl EnergyLevel {
    pub const ALL: [EnergyLevel; 3] = [EnergyLevel::High, EnergyLevel::Medium, EnergyLevel::Low];

    pub fn as_str(&self) -> &'static str {
        match self {
            EnergyLevel::High => "High",
            EnergyLevel::Medium => "Medium",
            EnergyLevel::Low => "Low",
        }
    }
}

impl fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnergyLevel {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(EnergyLevel::High),
            "medium" => Ok(EnergyLevel::Medium),
            "low" => Ok(EnergyLevel::Low),
            _ => Err(ValidationError::InvalidEnergyLevel(s.to_string())),
        }
    }
}

/// A unit of coursework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier (document id in the store)
    pub id: String,
    /// Task title
    pub title: String,
    /// Course or subject label
    pub course: String,
    /// Calendar date the task is due
    pub due_date: NaiveDate,
    /// User-assigned priority
    pub priority: Priority,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Completion progress, 0-100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<u8>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl Task {
    /// Create a task with the required fields; optional fields start empty.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        course: impl Into<String>,
        due_date: NaiveDate,
        priority: Priority,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            course: course.into(),
            due_date,
            priority,
            description: None,
            progress: None,
            tags: Vec::new(),
            completed: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set progress, clamped to 100.
    pub fn with_progress(mut self, progress: u8) -> Self {
        self.progress = Some(progress.min(100));
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    /// A task counts as complete once its progress reaches 100.
    pub fn is_complete(&self) -> bool {
        self.progress == Some(100)
    }

    /// Due strictly before `today`. A task due today is not overdue.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.due_date < today
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn priority_parses_case_insensitively() {
        assert_eq!("High".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("medium".parse::<Priority>().unwrap(), Priority::Medium);
        assert_eq!(" LOW ".parse::<Priority>().unwrap(), Priority::Low);
        assert!(matches!(
            "urgent".parse::<Priority>(),
            Err(ValidationError::InvalidPriority(_))
        ));
    }

    #[test]
    fn energy_defaults_to_medium() {
        assert_eq!(EnergyLevel::default(), EnergyLevel::Medium);
        assert!("sleepy".parse::<EnergyLevel>().is_err());
    }

    #[test]
    fn enums_serialize_as_capitalized_labels() {
        assert_eq!(serde_json::to_string(&Priority::High).unwrap(), "\"High\"");
        assert_eq!(serde_json::to_string(&EnergyLevel::Low).unwrap(), "\"Low\"");
    }

    #[test]
    fn task_serializes_with_camel_case_keys() {
        let task = Task::new("1", "Read Chapter 5", "Math", date("2025-08-01"), Priority::High)
            .with_progress(60);
        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["dueDate"], "2025-08-01");
        assert_eq!(json["progress"], 60);
        assert!(json.get("description").is_none());
    }

    #[test]
    fn progress_is_clamped() {
        let task = Task::new("1", "t", "c", date("2025-08-01"), Priority::Low).with_progress(250);
        assert_eq!(task.progress, Some(100));
        assert!(task.is_complete());
    }

    #[test]
    fn overdue_is_strictly_before_today() {
        let task = Task::new("1", "t", "c", date("2025-08-01"), Priority::Low);
        assert!(!task.is_overdue(date("2025-08-01")));
        assert!(task.is_overdue(date("2025-08-02")));
        assert!(!task.is_overdue(date("2025-07-31")));
    }
}
