//! Task board state.
//!
//! The board is an immutable snapshot. Every change goes through [`reduce`],
//! which returns a new snapshot; I/O happens elsewhere and feeds its results
//! in as [`BoardAction::Loaded`] or [`BoardAction::LoadFailed`].
//!
//! ```text
//! Idle --Loaded--> Loaded --SetEnergy/SetCourseFilter/...--> Loaded
//!   \--LoadFailed--> Failed --Loaded--> Loaded
//! ```

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::due::DueStatus;
use crate::filter::{courses, TaskFilter};
use crate::ranking::{queue, RankedTask, Ranker};
use crate::stats::TaskStats;
use crate::task::{EnergyLevel, Priority, Task};

/// Default length of the "up next" queue preview.
pub const DEFAULT_QUEUE_SIZE: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "message", rename_all = "lowercase")]
pub enum LoadStatus {
    Idle,
    Loaded,
    Failed(String),
}

/// Immutable snapshot of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskBoard {
    tasks: Vec<Task>,
    energy: EnergyLevel,
    filter: TaskFilter,
    status: LoadStatus,
}

impl Default for TaskBoard {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            energy: EnergyLevel::Medium,
            filter: TaskFilter::default(),
            status: LoadStatus::Idle,
        }
    }
}

/// Everything that can change a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardAction {
    Loaded { tasks: Vec<Task>, energy: EnergyLevel },
    LoadFailed(String),
    SetEnergy(EnergyLevel),
    SetCourseFilter(Option<String>),
    SetPriorityFilter(Option<Priority>),
    ClearFilters,
}

/// Apply `action` to `board`, producing the next snapshot.
pub fn reduce(board: &TaskBoard, action: BoardAction) -> TaskBoard {
    let mut next = board.clone();
    match action {
        BoardAction::Loaded { tasks, energy } => {
            next.tasks = tasks;
            next.energy = energy;
            next.status = LoadStatus::Loaded;
        }
        BoardAction::LoadFailed(message) => {
            // previously loaded tasks stay visible
            next.status = LoadStatus::Failed(message);
        }
        BoardAction::SetEnergy(energy) => next.energy = energy,
        BoardAction::SetCourseFilter(course) => {
            next.filter.course = course.filter(|c| !c.is_empty());
        }
        BoardAction::SetPriorityFilter(priority) => next.filter.priority = priority,
        BoardAction::ClearFilters => next.filter = TaskFilter::default(),
    }
    next
}

impl TaskBoard {
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn energy(&self) -> EnergyLevel {
        self.energy
    }

    pub fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Apply several actions in order.
    pub fn apply_all(&self, actions: impl IntoIterator<Item = BoardAction>) -> TaskBoard {
        actions
            .into_iter()
            .fold(self.clone(), |board, action| reduce(&board, action))
    }

    /// Derive what a user sees: the filtered set ranked for the current
    /// energy level, plus statistics over the unfiltered collection.
    pub fn view(&self, today: NaiveDate, ranker: &Ranker, queue_size: usize) -> BoardView {
        let filtered = self.filter.apply(&self.tasks);
        let ranked: Vec<RankedEntry> = ranker
            .rank(&filtered, self.energy, today)
            .into_iter()
            .map(|ranked| RankedEntry {
                due_status: DueStatus::classify(ranked.task.due_date, today),
                ranked,
            })
            .collect();
        let up_next = queue(&ranked, queue_size).to_vec();

        BoardView {
            energy: self.energy,
            filter: self.filter.clone(),
            next: ranked.first().cloned(),
            queue: up_next,
            filtered_out: self.tasks.len() - filtered.len(),
            stats: TaskStats::compute(&self.tasks, today),
            courses: courses(&self.tasks),
            ranked,
        }
    }
}

/// A ranked task annotated with its due-date status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedEntry {
    #[serde(flatten)]
    pub ranked: RankedTask,
    pub due_status: DueStatus,
}

/// Read-only projection of a board at a point in time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardView {
    pub energy: EnergyLevel,
    pub filter: TaskFilter,
    /// Recommended next task
    pub next: Option<RankedEntry>,
    pub queue: Vec<RankedEntry>,
    pub ranked: Vec<RankedEntry>,
    /// Tasks hidden by the current filter
    pub filtered_out: usize,
    pub stats: TaskStats,
    pub courses: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 28).unwrap()
    }

    fn sample() -> Vec<Task> {
        let due = |d| today() + Duration::days(d);
        vec![
            Task::new("1", "Read Chapter 5", "Math", due(4), Priority::High).with_progress(60),
            Task::new("2", "Essay Draft", "English", due(6), Priority::Medium),
            Task::new("3", "Lab Report", "Science", due(5), Priority::Low).with_progress(100),
            Task::new("4", "Presentation", "History", due(-1), Priority::High),
            Task::new("5", "Midterm", "Physics", due(8), Priority::Medium),
            Task::new("6", "Problem Set", "Math", due(2), Priority::Low),
        ]
    }

    fn loaded() -> TaskBoard {
        reduce(
            &TaskBoard::default(),
            BoardAction::Loaded {
                tasks: sample(),
                energy: EnergyLevel::Medium,
            },
        )
    }

    #[test]
    fn reduce_does_not_touch_previous_snapshot() {
        let idle = TaskBoard::default();
        let board = loaded();
        assert_eq!(idle.status(), &LoadStatus::Idle);
        assert!(idle.tasks().is_empty());
        assert_eq!(board.status(), &LoadStatus::Loaded);
        assert_eq!(board.tasks().len(), 6);

        let low = reduce(&board, BoardAction::SetEnergy(EnergyLevel::Low));
        assert_eq!(board.energy(), EnergyLevel::Medium);
        assert_eq!(low.energy(), EnergyLevel::Low);
    }

    #[test]
    fn load_failure_keeps_tasks() {
        let failed = reduce(&loaded(), BoardAction::LoadFailed("offline".into()));
        assert_eq!(failed.status(), &LoadStatus::Failed("offline".into()));
        assert_eq!(failed.tasks().len(), 6);
    }

    #[test]
    fn view_filters_before_ranking_and_counts_everything() {
        let board = loaded().apply_all([BoardAction::SetCourseFilter(Some("Math".into()))]);
        let view = board.view(today(), &Ranker::new(), DEFAULT_QUEUE_SIZE);

        let ids: Vec<_> = view.ranked.iter().map(|e| e.ranked.task.id.as_str()).collect();
        // 1: 3 + 6 = 9, 6: 1 + 8 = 9 -> input order
        assert_eq!(ids, vec!["1", "6"]);
        assert_eq!(view.filtered_out, 4);
        assert_eq!(view.stats.total, 6);
        assert_eq!(view.stats.completed, 1);
        assert_eq!(view.stats.overdue, 1);
        assert_eq!(view.stats.urgent, 2);
        assert_eq!(view.courses, vec!["Math", "English", "Science", "History", "Physics"]);
    }

    #[test]
    fn next_task_follows_energy() {
        let board = loaded();
        let view = board.view(today(), &Ranker::new(), DEFAULT_QUEUE_SIZE);
        let next = view.next.unwrap();
        // overdue high-priority presentation: 3 + 11
        assert_eq!(next.ranked.task.id, "4");
        assert_eq!(next.due_status, DueStatus::Overdue { days: 1 });
        assert_eq!(view.queue.len(), DEFAULT_QUEUE_SIZE);

        let tired = reduce(&board, BoardAction::SetEnergy(EnergyLevel::Low));
        let view = tired.view(today(), &Ranker::new(), 3);
        // problem set: 3 + 8 = 11, presentation: 1 + 11 = 12
        assert_eq!(view.next.unwrap().ranked.task.id, "4");
        assert_eq!(view.ranked[1].ranked.task.id, "6");
        assert_eq!(view.queue.len(), 3);
    }

    #[test]
    fn queue_is_a_prefix_of_the_annotated_ranking() {
        let view = loaded().view(today(), &Ranker::new(), 2);
        assert_eq!(queue(&view.ranked, 2), view.queue.as_slice());
        assert_eq!(queue(&view.ranked, 100).len(), 6);
        assert!(queue(&view.ranked, 0).is_empty());
        assert_eq!(view.queue[0].due_status, DueStatus::Overdue { days: 1 });
    }

    #[test]
    fn unmatched_course_yields_empty_ranking() {
        let board = reduce(&loaded(), BoardAction::SetCourseFilter(Some("Art".into())));
        let view = board.view(today(), &Ranker::new(), DEFAULT_QUEUE_SIZE);
        assert!(view.ranked.is_empty());
        assert!(view.next.is_none());
        assert_eq!(view.stats.total, 6);
    }

    #[test]
    fn clear_filters() {
        let board = loaded().apply_all([
            BoardAction::SetCourseFilter(Some("Math".into())),
            BoardAction::SetPriorityFilter(Some(Priority::Low)),
        ]);
        assert_eq!(board.view(today(), &Ranker::new(), 5).ranked.len(), 1);

        let cleared = reduce(&board, BoardAction::ClearFilters);
        assert!(cleared.filter().is_empty());
        assert_eq!(cleared.view(today(), &Ranker::new(), 10).ranked.len(), 6);
    }

    #[test]
    fn empty_course_filter_clears() {
        let board = reduce(&loaded(), BoardAction::SetCourseFilter(Some(String::new())));
        assert!(board.filter().course.is_none());
    }
}
