//! # EduSync Core Library
//!
//! Business logic for EduSync, a coursework planner. The library decides
//! which task a student should work on next, given their tasks and a
//! self-reported energy level. The CLI is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Ranking**: pure scoring of tasks by priority (biased by energy) and
//!   closeness of the due date
//! - **Filtering / Statistics**: course and priority filters applied before
//!   ranking, dashboard counters over the whole collection
//! - **Board**: immutable state snapshots advanced by a reducer
//! - **Sources**: the only I/O seam; a hosted document store or fixtures
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`Ranker`]: scores and orders tasks
//! - [`TaskBoard`]: board snapshot, advanced with [`reduce`]
//! - [`TaskSource`]: trait for task/energy backends
//! - [`Config`]: application configuration management

pub mod board;
pub mod due;
pub mod error;
pub mod filter;
pub mod ranking;
pub mod source;
pub mod stats;
pub mod storage;
pub mod task;

pub use board::{reduce, BoardAction, BoardView, LoadStatus, RankedEntry, TaskBoard};
pub use due::DueStatus;
pub use error::{BackendError, ConfigError, CoreError, Result, ValidationError};
pub use filter::{courses, TaskFilter};
pub use ranking::{
    next_task, rank_tasks, sort_tasks_by_urgency_and_energy, RankedTask, Ranker, RankingConfig,
    TaskScore,
};
pub use source::{
    load_board, refresh_board, DataSource, DocumentStoreClient, FixtureSource, NewTask,
    StoreSettings, TaskSource,
};
pub use stats::TaskStats;
pub use storage::Config;
pub use task::{EnergyLevel, Priority, Task, TaskRecord};
