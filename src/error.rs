use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ProcessingError>;

#[derive(Error, Debug)]
pub enum ProcessingError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Missing required column '{column}' in {stage} input")]
    MissingColumn { stage: String, column: String },

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Report serialization error: {0}")]
    Report(#[from] serde_json::Error),
}

impl ProcessingError {
    pub fn missing_column(stage: &str, column: &str) -> Self {
        Self::MissingColumn {
            stage: stage.to_string(),
            column: column.to_string(),
        }
    }
}
