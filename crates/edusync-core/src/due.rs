//! Human-facing classification of due dates.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::ranking::days_until_due;

/// How close a due date is, relative to today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DueStatus {
    Overdue { days: i64 },
    Today,
    Tomorrow,
    /// Two or three days out
    Soon { days: i64 },
    Later { days: i64 },
}

impl DueStatus {
    pub fn classify(due: NaiveDate, today: NaiveDate) -> Self {
        match days_until_due(due, today) {
            d if d < 0 => DueStatus::Overdue { days: -d },
            0 => DueStatus::Today,
            1 => DueStatus::Tomorrow,
            d @ 2..=3 => DueStatus::Soon { days: d },
            d => DueStatus::Later { days: d },
        }
    }

    /// Overdue or due within three days.
    pub fn needs_attention(&self) -> bool {
        !matches!(self, DueStatus::Later { .. })
    }
}

impl fmt::Display for DueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DueStatus::Overdue { .. } => f.write_str("Overdue"),
            DueStatus::Today => f.write_str("Today"),
            DueStatus::Tomorrow => f.write_str("Tomorrow"),
            DueStatus::Soon { days } | DueStatus::Later { days } => write!(f, "{days} days"),
        }
    }
}
