//! Wire shape of task documents and their validation.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{Priority, Task};
use crate::error::ValidationError;

/// A task document exactly as the document store returns it.
///
/// Fields are loosely typed on purpose: a single malformed document must not
/// poison deserialization of the whole listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(rename = "$id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub course: String,
    #[serde(rename = "dueDate", default)]
    pub due_date: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(rename = "userId", default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<String>,
}

impl From<&Task> for TaskRecord {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id.clone(),
            title: task.title.clone(),
            course: task.course.clone(),
            due_date: task.due_date.format("%Y-%m-%d").to_string(),
            priority: task.priority.as_str().to_string(),
            description: task.description.clone(),
            progress: task.progress.map(i64::from),
            tags: (!task.tags.is_empty()).then(|| task.tags.clone()),
            completed: task.completed,
            owner_id: None,
        }
    }
}

impl TryFrom<TaskRecord> for Task {
    type Error = ValidationError;

    fn try_from(record: TaskRecord) -> Result<Self, Self::Error> {
        let due_date = parse_due_date(&record.id, &record.due_date)?;
        let priority: Priority = record.priority.parse()?;

        let progress = match record.progress {
            None => None,
            Some(p) if (0..=100).contains(&p) => Some(p as u8),
            Some(p) => {
                return Err(ValidationError::InvalidValue {
                    field: "progress".into(),
                    message: format!("{p} is outside 0-100 for task '{}'", record.id),
                })
            }
        };

        Ok(Task {
            id: record.id,
            title: record.title,
            course: record.course,
            due_date,
            priority,
            description: record.description,
            progress,
            tags: record.tags.unwrap_or_default(),
            completed: record.completed,
        })
    }
}

/// Parse a due date given as `YYYY-MM-DD` or as an RFC 3339 timestamp.
///
/// Timestamps are reduced to their UTC calendar date.
pub fn parse_due_date(task_id: &str, value: &str) -> Result<NaiveDate, ValidationError> {
    let trimmed = value.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date);
    }
    DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc).date_naive())
        .map_err(|_| ValidationError::InvalidDueDate {
            task_id: task_id.to_string(),
            value: value.to_string(),
        })
}

/// A record that failed validation, kept for reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRecord {
    pub id: String,
    pub error: ValidationError,
}

/// Result of validating a listing: the usable tasks plus whatever was dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskBatch {
    pub tasks: Vec<Task>,
    pub rejected: Vec<RejectedRecord>,
}

/// Validate a batch of records, rejecting malformed ones individually.
pub fn parse_records(records: Vec<TaskRecord>) -> TaskBatch {
    let mut batch = TaskBatch::default();
    for record in records {
        let id = record.id.clone();
        match Task::try_from(record) {
            Ok(task) => batch.tasks.push(task),
            Err(error) => {
                tracing::warn!(task_id = %id, %error, "rejecting task record");
                batch.rejected.push(RejectedRecord { id, error });
            }
        }
    }
    batch
}
