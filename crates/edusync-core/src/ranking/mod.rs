//! Task ranking: "what should I do next?"
//!
//! Each task gets an integer score made of two parts:
//! - a priority weight (High=3, Medium=2, Low=1), inverted when the user
//!   reports low energy so lighter work surfaces first
//! - an urgency bonus of `max(0, horizon - days_until_due)` with a default
//!   horizon of 10 days
//!
//! Tasks are ordered by descending total. Equal totals keep their input order.
//!
//! Day differences are taken between calendar dates, so the result does not
//! depend on the time of day or on DST transitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::{EnergyLevel, Priority, Task};

/// Number of days ahead at which a due date stops contributing urgency.
pub const DEFAULT_URGENCY_HORIZON_DAYS: i64 = 10;

/// Largest accepted urgency horizon (ten years).
pub const MAX_URGENCY_HORIZON_DAYS: i64 = 3650;

/// Ranking configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Urgency horizon in days (default 10)
    pub urgency_horizon_days: i64,
    /// Cap the urgency bonus of overdue tasks at the horizon. When false,
    /// overdue tasks keep gaining one point per day past due.
    pub cap_overdue_bonus: bool,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            urgency_horizon_days: DEFAULT_URGENCY_HORIZON_DAYS,
            cap_overdue_bonus: false,
        }
    }
}

/// Priority contribution to the score for the given energy level.
pub fn priority_weight(priority: Priority, energy: EnergyLevel) -> i64 {
    let base = match priority {
        Priority::High => 3,
        Priority::Medium => 2,
        Priority::Low => 1,
    };
    if energy == EnergyLevel::Low {
        4 - base
    } else {
        base
    }
}

/// Whole calendar days from `today` until `due`. Negative when overdue.
pub fn days_until_due(due: NaiveDate, today: NaiveDate) -> i64 {
    due.signed_duration_since(today).num_days()
}

/// Urgency bonus for a task due in `days` days.
pub fn urgency_bonus(days: i64, horizon: i64) -> i64 {
    horizon.saturating_sub(days).max(0)
}

/// Breakdown of a task's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskScore {
    pub priority: i64,
    pub urgency: i64,
    pub total: i64,
}

/// A task together with its position and score in a ranking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedTask {
    /// 1-based position in the ranking
    pub rank: usize,
    pub task: Task,
    pub score: TaskScore,
    pub days_until_due: i64,
}

/// Scores and orders tasks.
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: RankingConfig,
}

impl Ranker {
    /// Create a ranker with the default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create with custom config
    pub fn with_config(config: RankingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Score a single task.
    pub fn score(&self, task: &Task, energy: EnergyLevel, today: NaiveDate) -> TaskScore {
        let horizon = self.config.urgency_horizon_days;
        let priority = priority_weight(task.priority, energy);
        let mut urgency = urgency_bonus(days_until_due(task.due_date, today), horizon);
        if self.config.cap_overdue_bonus {
            urgency = urgency.min(horizon.max(0));
        }
        TaskScore {
            priority,
            urgency,
            total: priority.saturating_add(urgency),
        }
    }

    /// Rank tasks by descending score.
    ///
    /// The input is left untouched. Ties are broken by input position.
    pub fn rank(&self, tasks: &[Task], energy: EnergyLevel, today: NaiveDate) -> Vec<RankedTask> {
        let mut scored: Vec<(usize, TaskScore)> = tasks
            .iter()
            .enumerate()
            .map(|(index, task)| (index, self.score(task, energy, today)))
            .collect();

        scored.sort_by(|(ia, a), (ib, b)| b.total.cmp(&a.total).then(ia.cmp(ib)));

        tracing::debug!(
            count = tasks.len(),
            %energy,
            %today,
            top_score = scored.first().map(|(_, s)| s.total),
            "ranked tasks"
        );

        scored
            .into_iter()
            .enumerate()
            .map(|(position, (index, score))| {
                let task = tasks[index].clone();
                RankedTask {
                    rank: position + 1,
                    days_until_due: days_until_due(task.due_date, today),
                    task,
                    score,
                }
            })
            .collect()
    }
}

/// Rank tasks with the default configuration.
pub fn rank_tasks(tasks: &[Task], energy: EnergyLevel, today: NaiveDate) -> Vec<RankedTask> {
    Ranker::new().rank(tasks, energy, today)
}

/// Return a new, sorted copy of `tasks`, most urgent first.
pub fn sort_tasks_by_urgency_and_energy(
    tasks: &[Task],
    energy: EnergyLevel,
    today: NaiveDate,
) -> Vec<Task> {
    rank_tasks(tasks, energy, today)
        .into_iter()
        .map(|ranked| ranked.task)
        .collect()
}

/// The recommended next task: the head of the ranking.
pub fn next_task(ranked: &[RankedTask]) -> Option<&RankedTask> {
    ranked.first()
}

/// The first `limit` entries of a ranking.
pub fn queue<T>(ranked: &[T], limit: usize) -> &[T] {
    &ranked[..limit.min(ranked.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 7, 28).unwrap()
    }

    fn task(id: &str, priority: Priority, due_in_days: i64) -> Task {
        Task::new(id, format!("Task {id}"), "Math", today() + Duration::days(due_in_days), priority)
    }

    #[test]
    fn extreme_horizon_saturates_instead_of_overflowing() {
        let ranker = Ranker::with_config(RankingConfig {
            urgency_horizon_days: i64::MAX,
            cap_overdue_bonus: false,
        });
        let score = ranker.score(&task("1", Priority::High, 0), EnergyLevel::Medium, today());
        assert_eq!(score.urgency, i64::MAX);
        assert_eq!(score.total, i64::MAX);

        let overdue = ranker.score(&task("2", Priority::Low, -5), EnergyLevel::Medium, today());
        assert_eq!(overdue.total, i64::MAX);
    }

    #[test]
    fn priority_weight_inverts_on_low_energy() {
        assert_eq!(priority_weight(Priority::High, EnergyLevel::High), 3);
        assert_eq!(priority_weight(Priority::Medium, EnergyLevel::Medium), 2);
        assert_eq!(priority_weight(Priority::Low, EnergyLevel::High), 1);

        assert_eq!(priority_weight(Priority::High, EnergyLevel::Low), 1);
        assert_eq!(priority_weight(Priority::Medium, EnergyLevel::Low), 2);
        assert_eq!(priority_weight(Priority::Low, EnergyLevel::Low), 3);
    }

    #[test]
    fn urgency_bonus_shape() {
        assert_eq!(urgency_bonus(0, 10), 10);
        assert_eq!(urgency_bonus(5, 10), 5);
        assert_eq!(urgency_bonus(10, 10), 0);
        assert_eq!(urgency_bonus(30, 10), 0);
        // overdue keeps accruing
        assert_eq!(urgency_bonus(-3, 10), 13);
    }

    #[test]
    fn days_until_due_uses_calendar_dates() {
        let d = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap();
        assert_eq!(days_until_due(d("2025-07-28"), d("2025-07-28")), 0);
        assert_eq!(days_until_due(d("2025-07-29"), d("2025-07-28")), 1);
        assert_eq!(days_until_due(d("2025-07-26"), d("2025-07-28")), -2);
        // across a month and a DST change in most northern zones
        assert_eq!(days_until_due(d("2025-11-03"), d("2025-10-25")), 9);
    }

    #[test]
    fn example_medium_energy() {
        let tasks = vec![task("1", Priority::High, 5), task("2", Priority::Low, 0)];
        let ranked = rank_tasks(&tasks, EnergyLevel::Medium, today());

        assert_eq!(ranked[0].task.id, "2");
        assert_eq!(ranked[0].score.total, 11);
        assert_eq!(ranked[1].task.id, "1");
        assert_eq!(ranked[1].score.total, 8);
    }

    #[test]
    fn example_low_energy_widens_gap() {
        let tasks = vec![task("1", Priority::High, 5), task("2", Priority::Low, 0)];
        let ranked = rank_tasks(&tasks, EnergyLevel::Low, today());

        assert_eq!(ranked[0].task.id, "2");
        assert_eq!(ranked[0].score.total, 13);
        assert_eq!(ranked[1].score.total, 6);
    }

    #[test]
    fn ties_keep_input_order() {
        let tasks = vec![
            task("a", Priority::Medium, 3),
            task("b", Priority::Medium, 3),
            task("c", Priority::High, 4),
            task("d", Priority::Medium, 3),
        ];
        let ids: Vec<_> = sort_tasks_by_urgency_and_energy(&tasks, EnergyLevel::High, today())
            .into_iter()
            .map(|t| t.id)
            .collect();
        // all four score 9
        assert_eq!(ids, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn ranks_are_one_based_and_input_is_untouched() {
        let tasks = vec![task("1", Priority::Low, 20), task("2", Priority::High, 1)];
        let before = tasks.clone();
        let ranked = rank_tasks(&tasks, EnergyLevel::High, today());
        assert_eq!(tasks, before);
        assert_eq!(ranked.iter().map(|r| r.rank).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(ranked[0].days_until_due, 1);
    }

    #[test]
    fn empty_input_ranks_empty() {
        assert!(rank_tasks(&[], EnergyLevel::Medium, today()).is_empty());
        assert!(next_task(&[]).is_none());
    }

    #[test]
    fn capped_overdue_bonus() {
        let ranker = Ranker::with_config(RankingConfig {
            cap_overdue_bonus: true,
            ..Default::default()
        });
        let overdue = task("1", Priority::Low, -7);
        let score = ranker.score(&overdue, EnergyLevel::Medium, today());
        assert_eq!(score.urgency, 10);

        let uncapped = Ranker::new().score(&overdue, EnergyLevel::Medium, today());
        assert_eq!(uncapped.urgency, 17);
    }

    #[test]
    fn custom_horizon() {
        let ranker = Ranker::with_config(RankingConfig {
            urgency_horizon_days: 3,
            ..Default::default()
        });
        let score = ranker.score(&task("1", Priority::High, 5), EnergyLevel::High, today());
        assert_eq!(score, TaskScore { priority: 3, urgency: 0, total: 3 });
    }

    #[test]
    fn queue_truncates() {
        let tasks: Vec<_> = (0..8).map(|i| task(&i.to_string(), Priority::Medium, i)).collect();
        let ranked = rank_tasks(&tasks, EnergyLevel::Medium, today());
        assert_eq!(queue(&ranked, 5).len(), 5);
        assert_eq!(queue(&ranked, 50).len(), 8);
        assert_eq!(next_task(&ranked).unwrap().task.id, "0");
    }
}
