//! In-memory task source for tests and local development.

use chrono::{Duration, NaiveDate};
use serde::Deserialize;
use std::path::Path;

use super::TaskSource;
use crate::error::{BackendError, Result};
use crate::task::{EnergyLevel, Priority, Task, TaskRecord};

/// Serves a fixed set of records regardless of owner.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource {
    records: Vec<TaskRecord>,
    energy: Option<EnergyLevel>,
    outage: Option<String>,
}

/// On-disk fixture: either a bare array of task documents or an object that
/// also carries an energy level.
#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Records(Vec<TaskRecord>),
    Full {
        #[serde(default)]
        energy: Option<EnergyLevel>,
        tasks: Vec<TaskRecord>,
    },
}

impl FixtureSource {
    pub fn new(records: Vec<TaskRecord>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    pub fn from_tasks(tasks: &[Task]) -> Self {
        Self::new(tasks.iter().map(TaskRecord::from).collect())
    }

    pub fn with_energy(mut self, energy: EnergyLevel) -> Self {
        self.energy = Some(energy);
        self
    }

    /// A source whose every call fails with a 503.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            outage: Some(message.into()),
            ..Default::default()
        }
    }

    /// Load records from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a JSON array of
    /// task documents (or `{"energy": ..., "tasks": [...]}`).
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let source = match serde_json::from_str::<FixtureFile>(&content)? {
            FixtureFile::Records(records) => Self::new(records),
            FixtureFile::Full { energy, tasks } => Self {
                records: tasks,
                energy,
                outage: None,
            },
        };
        Ok(source)
    }

    /// Five sample tasks with due dates spread over the coming week.
    pub fn demo(today: NaiveDate) -> Self {
        let due = |days| today + Duration::days(days);
        let tasks = [
            Task::new("1", "Read Chapter 5", "Math", due(3), Priority::High)
                .with_description("Review advanced calculus concepts and practice problems")
                .with_progress(60)
                .with_tags(["homework", "calculus"]),
            Task::new("2", "Essay Draft", "English", due(5), Priority::Medium)
                .with_description("Write first draft of research essay on climate change")
                .with_progress(30)
                .with_tags(["writing", "research"]),
            Task::new("3", "Lab Report", "Science", due(4), Priority::Low)
                .with_description("Complete chemistry lab analysis and conclusions")
                .with_progress(85)
                .with_tags(["lab", "chemistry"]),
            Task::new("4", "Group Project Presentation", "History", due(2), Priority::High)
                .with_description("Prepare slides for World War II presentation")
                .with_progress(0)
                .with_tags(["presentation", "group-work"]),
            Task::new("5", "Study for Midterm", "Physics", due(7), Priority::Medium)
                .with_description("Review mechanics and thermodynamics")
                .with_progress(45)
                .with_tags(["exam", "study"]),
        ];
        Self::from_tasks(&tasks)
    }

    fn check_outage(&self) -> Result<(), BackendError> {
        match &self.outage {
            Some(message) => Err(BackendError::Status {
                status: 503,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl TaskSource for FixtureSource {
    async fn list_tasks(&self, _owner_id: &str) -> Result<Vec<TaskRecord>, BackendError> {
        self.check_outage()?;
        Ok(self.records.clone())
    }

    async fn latest_energy_level(
        &self,
        _owner_id: &str,
    ) -> Result<Option<EnergyLevel>, BackendError> {
        self.check_outage()?;
        Ok(self.energy)
    }
}
