//! Data sources for the farm survey dashboard

pub mod config;
pub mod sources;

use std::path::PathBuf;

use thiserror::Error;
use tokio::task::JoinError;

// Re-exports
pub use config::{DashboardConfig, SourceConfig};
pub use sources::{CsvSource, JsonSource, MockSource};

/// Errors that can occur in data operations
#[derive(Error, Debug)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error in {file}: {message}")]
    Csv { file: String, message: String },

    #[error("JSON parsing error in {file}: {message}")]
    Json { file: String, message: String },

    #[error("Missing data file: {}", .0.display())]
    MissingFile(PathBuf),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Join error: {0}")]
    Join(#[from] JoinError),
}
