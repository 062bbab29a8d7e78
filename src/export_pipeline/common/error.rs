use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Required image buffer is not populated yet")]
    OutOfOrder,

    #[error("Failed to open output {path}: {source}")]
    OpenFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Buffer allocation failed")]
    AllocationFailure,

    #[error("Processing pipeline failed: {0}")]
    Pipeline(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Sensor buffer too short for crop window: need {expected} samples, have {actual}")]
    TruncatedFrame { expected: usize, actual: usize },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ExportError>;
