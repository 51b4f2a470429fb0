//! CLI subcommands and the shared data-loading context.

pub mod config;
pub mod rank;
pub mod stats;
pub mod task;

use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

use edusync_core::task::RejectedRecord;
use edusync_core::{
    load_board, Config, DataSource, DocumentStoreClient, FixtureSource, Ranker, TaskBoard,
};

/// Options shared by every data command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Use built-in demo tasks instead of the document store
    #[arg(long, global = true, conflicts_with = "tasks_file")]
    pub demo: bool,
    /// Load tasks from a JSON file instead of the document store
    #[arg(long, global = true, value_name = "PATH")]
    pub tasks_file: Option<PathBuf>,
    /// Owner id (defaults to `owner_id` in config)
    #[arg(long, global = true)]
    pub owner: Option<String>,
    /// Reference date (YYYY-MM-DD), defaults to the local date
    #[arg(long, global = true, value_name = "DATE")]
    pub today: Option<NaiveDate>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    pub json: bool,
}

/// Everything a data command needs, resolved from flags and config.
pub struct Context {
    pub config: Config,
    pub source: DataSource,
    pub owner_id: String,
    pub today: NaiveDate,
}

impl Context {
    pub fn resolve(global: &GlobalArgs) -> Result<Self, Box<dyn std::error::Error>> {
        let config = Config::load()?;
        let today = global.today.unwrap_or_else(|| Local::now().date_naive());
        let owner = global.owner.clone().or_else(|| config.owner_id.clone());

        let (source, owner_id) = if global.demo {
            (DataSource::Fixture(FixtureSource::demo(today)), owner.unwrap_or_else(|| "local".into()))
        } else if let Some(path) = &global.tasks_file {
            (
                DataSource::Fixture(FixtureSource::from_json_file(path)?),
                owner.unwrap_or_else(|| "local".into()),
            )
        } else {
            let owner_id = owner.ok_or(
                "no owner id: pass --owner or run `edusync config set owner_id <id>` (or use --demo)",
            )?;
            let client = DocumentStoreClient::new(config.store_settings())?;
            (DataSource::Remote(client), owner_id)
        };

        tracing::debug!(%owner_id, %today, "context resolved");
        Ok(Self {
            config,
            source,
            owner_id,
            today,
        })
    }

    pub fn ranker(&self) -> Ranker {
        Ranker::with_config(self.config.ranking_config())
    }

    /// Load the board and report dropped records on stderr.
    pub async fn load(&self) -> Result<TaskBoard, Box<dyn std::error::Error>> {
        let (board, rejected) = load_board(&self.source, &self.owner_id).await?;
        report_rejected(&rejected);
        Ok(board)
    }
}

fn report_rejected(rejected: &[RejectedRecord]) {
    if rejected.is_empty() {
        return;
    }
    eprintln!("warning: skipped {} malformed task(s):", rejected.len());
    for r in rejected {
        eprintln!("  {}: {}", r.id, r.error);
    }
}

/// Parse comma-separated tags, dropping empties.
pub fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
