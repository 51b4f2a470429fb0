//! TOML-based application configuration.
//!
//! Stores:
//! - Document store connection details (never the API key itself)
//! - The owner id whose tasks are loaded
//! - Ranking tunables
//!
//! Configuration is stored at `~/.config/edusync/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::board::DEFAULT_QUEUE_SIZE;
use crate::error::ConfigError;
use crate::ranking::{RankingConfig, DEFAULT_URGENCY_HORIZON_DAYS, MAX_URGENCY_HORIZON_DAYS};
use crate::source::StoreSettings;

/// Document store connection configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default = "default_database_id")]
    pub database_id: String,
    #[serde(default = "default_tasks_collection")]
    pub tasks_collection: String,
    #[serde(default = "default_energy_collection")]
    pub energy_collection: String,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

/// Ranking configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSection {
    #[serde(default = "default_urgency_horizon_days")]
    pub urgency_horizon_days: i64,
    #[serde(default)]
    pub cap_overdue_bonus: bool,
    /// Length of the "up next" preview
    #[serde(default = "default_queue_size")]
    pub queue_size: usize,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/edusync/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Whose tasks to load
    #[serde(default)]
    pub owner_id: Option<String>,
    #[serde(default)]
    pub backend: BackendConfig,
    #[serde(default)]
    pub ranking: RankingSection,
}

// Default functions
fn default_endpoint() -> String {
    "https://cloud.appwrite.io/v1".into()
}
fn default_database_id() -> String {
    "main".into()
}
fn default_tasks_collection() -> String {
    "tasks".into()
}
fn default_energy_collection() -> String {
    "energy_logs".into()
}
fn default_api_key_env() -> String {
    "EDUSYNC_API_KEY".into()
}
fn default_urgency_horizon_days() -> i64 {
    DEFAULT_URGENCY_HORIZON_DAYS
}
fn default_queue_size() -> usize {
    DEFAULT_QUEUE_SIZE
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            project_id: String::new(),
            database_id: default_database_id(),
            tasks_collection: default_tasks_collection(),
            energy_collection: default_energy_collection(),
            api_key_env: default_api_key_env(),
        }
    }
}

impl Default for RankingSection {
    fn default() -> Self {
        Self {
            urgency_horizon_days: default_urgency_horizon_days(),
            cap_overdue_bonus: false,
            queue_size: default_queue_size(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            owner_id: None,
            backend: BackendConfig::default(),
            ranking: RankingSection::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if key.is_empty() {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => value
                        .parse::<i64>()
                        .map(|n| serde_json::Value::Number(n.into()))
                        .map_err(|_| invalid(format!("cannot parse '{value}' as integer")))?,
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot overwrite a whole section".into()))
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    /// Path of the config file inside the data directory.
    pub fn path() -> Result<PathBuf, ConfigError> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or create the default file.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    /// Load from an explicit path, writing defaults there if it is missing.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }),
        }
    }

    /// Persist to disk.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let save_failed = |message: String| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message,
        };
        let content = toml::to_string_pretty(self).map_err(|e| save_failed(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| save_failed(e.to_string()))
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key. Does not save.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown or the value does not fit the
    /// key's type or range.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let mut json = serde_json::to_value(&*self).map_err(|e| ConfigError::InvalidValue {
            key: key.to_string(),
            message: e.to_string(),
        })?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config =
            serde_json::from_value(json).map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: e.to_string(),
            })?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Check ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0..=MAX_URGENCY_HORIZON_DAYS).contains(&self.ranking.urgency_horizon_days) {
            return Err(ConfigError::InvalidValue {
                key: "ranking.urgency_horizon_days".into(),
                message: format!("must be between 0 and {MAX_URGENCY_HORIZON_DAYS}"),
            });
        }
        if self.ranking.queue_size == 0 {
            return Err(ConfigError::InvalidValue {
                key: "ranking.queue_size".into(),
                message: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    pub fn ranking_config(&self) -> RankingConfig {
        RankingConfig {
            urgency_horizon_days: self.ranking.urgency_horizon_days,
            cap_overdue_bonus: self.ranking.cap_overdue_bonus,
        }
    }

    /// Connection settings with the API key read from the environment.
    pub fn store_settings(&self) -> StoreSettings {
        let api_key = std::env::var(&self.backend.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty());
        StoreSettings {
            endpoint: self.backend.endpoint.clone(),
            project_id: self.backend.project_id.clone(),
            database_id: self.backend.database_id.clone(),
            tasks_collection: self.backend.tasks_collection.clone(),
            energy_collection: self.backend.energy_collection.clone(),
            api_key,
        }
    }
}
