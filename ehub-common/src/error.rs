//! Common error types for EthioML Hub

use std::path::PathBuf;
use thiserror::Error;

/// Common result type for EthioML Hub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the generator, trainer and prediction service
#[derive(Error, Debug)]
pub enum Error {
    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV read/write error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON artifact (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Config file exists but does not parse
    #[error("Configuration error in {path:?}: {source}")]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    /// Training dataset could not be located in any candidate directory
    #[error("Dataset not found, searched: {}", format_paths(.0))]
    DataNotFound(Vec<PathBuf>),

    /// Model fitting failed (empty or mismatched data)
    #[error("Training error: {0}")]
    Training(String),

    /// Invalid user input or parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn format_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
