//! Where tasks and energy levels come from.
//!
//! The ranking core never performs I/O. A [`TaskSource`] is queried once per
//! load, and the results are fed into the board reducer.

pub mod document_store;
pub mod fixture;

pub use document_store::{DocumentStoreClient, NewTask, Query, StoreSettings};
pub use fixture::FixtureSource;

use crate::board::{reduce, BoardAction, TaskBoard};
use crate::error::{BackendError, Result};
use crate::task::{parse_records, EnergyLevel, RejectedRecord, TaskRecord};

/// Minimal contract the core needs from a backend.
#[allow(async_fn_in_trait)]
pub trait TaskSource {
    /// All task documents owned by `owner_id`.
    async fn list_tasks(&self, owner_id: &str) -> Result<Vec<TaskRecord>, BackendError>;

    /// The most recently logged energy level, if any.
    async fn latest_energy_level(&self, owner_id: &str)
        -> Result<Option<EnergyLevel>, BackendError>;
}

/// Either of the built-in sources, chosen at runtime.
pub enum DataSource {
    Fixture(FixtureSource),
    Remote(DocumentStoreClient),
}

impl TaskSource for DataSource {
    async fn list_tasks(&self, owner_id: &str) -> Result<Vec<TaskRecord>, BackendError> {
        match self {
            DataSource::Fixture(source) => source.list_tasks(owner_id).await,
            DataSource::Remote(source) => source.list_tasks(owner_id).await,
        }
    }

    async fn latest_energy_level(
        &self,
        owner_id: &str,
    ) -> Result<Option<EnergyLevel>, BackendError> {
        match self {
            DataSource::Fixture(source) => source.latest_energy_level(owner_id).await,
            DataSource::Remote(source) => source.latest_energy_level(owner_id).await,
        }
    }
}

/// Fetch the energy level, falling back to `Medium` when the lookup fails or
/// nothing has been logged yet.
pub async fn energy_or_default<S: TaskSource>(source: &S, owner_id: &str) -> EnergyLevel {
    match source.latest_energy_level(owner_id).await {
        Ok(Some(energy)) => energy,
        Ok(None) => {
            tracing::debug!(owner_id, "no energy level logged, using Medium");
            EnergyLevel::default()
        }
        Err(error) => {
            tracing::warn!(owner_id, %error, "energy lookup failed, using Medium");
            EnergyLevel::default()
        }
    }
}

/// Load a fresh board.
///
/// A failed task listing is returned to the caller; malformed records are
/// dropped and reported alongside the board.
pub async fn load_board<S: TaskSource>(
    source: &S,
    owner_id: &str,
) -> Result<(TaskBoard, Vec<RejectedRecord>)> {
    let records = source.list_tasks(owner_id).await?;
    let batch = parse_records(records);
    let energy = energy_or_default(source, owner_id).await;

    tracing::debug!(
        owner_id,
        loaded = batch.tasks.len(),
        rejected = batch.rejected.len(),
        %energy,
        "board loaded"
    );

    let board = reduce(
        &TaskBoard::default(),
        BoardAction::Loaded {
            tasks: batch.tasks,
            energy,
        },
    );
    Ok((board, batch.rejected))
}

/// Reload an existing board. On failure the previous tasks are kept and the
/// board is marked failed.
pub async fn refresh_board<S: TaskSource>(
    board: &TaskBoard,
    source: &S,
    owner_id: &str,
) -> (TaskBoard, Vec<RejectedRecord>) {
    match source.list_tasks(owner_id).await {
        Ok(records) => {
            let batch = parse_records(records);
            let energy = energy_or_default(source, owner_id).await;
            let next = reduce(
                board,
                BoardAction::Loaded {
                    tasks: batch.tasks,
                    energy,
                },
            );
            (next, batch.rejected)
        }
        Err(error) => {
            tracing::warn!(owner_id, %error, "task refresh failed");
            (reduce(board, BoardAction::LoadFailed(error.to_string())), Vec::new())
        }
    }
}
