//! Core error types for edusync-core.
//!
//! Ranking, filtering and statistics are total over validated tasks and never
//! fail. Errors only arise at the edges: validating backend records, talking
//! to the document store, and reading or writing configuration.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for edusync-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Document store errors
    #[error("Backend error: {0}")]
    Backend(#[from] BackendError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Validation errors for task records and user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Due date is neither `YYYY-MM-DD` nor an RFC 3339 timestamp
    #[error("Invalid due date '{value}' for task '{task_id}'")]
    InvalidDueDate { task_id: String, value: String },

    /// Unknown priority label
    #[error("Invalid priority '{0}': expected High, Medium or Low")]
    InvalidPriority(String),

    /// Unknown energy level label
    #[error("Invalid energy level '{0}': expected High, Medium or Low")]
    InvalidEnergyLevel(String),

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Errors from the external document store.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Transport-level failure (DNS, TLS, connection reset, timeout)
    #[error("Request to document store failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("Document store returned {status}: {message}")]
    Status { status: u16, message: String },

    /// Response body did not have the expected shape
    #[error("Unexpected response from document store: {0}")]
    InvalidResponse(String),

    /// Endpoint or identifiers missing from configuration
    #[error("Document store not configured: {0}")]
    NotConfigured(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown dot-path key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Could not determine or create the data directory
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

impl From<url::ParseError> for BackendError {
    fn from(err: url::ParseError) -> Self {
        BackendError::NotConfigured(format!("invalid endpoint URL: {err}"))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
