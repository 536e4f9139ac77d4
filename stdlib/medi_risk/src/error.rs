use std::path::PathBuf;

use medi_forest::ForestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RiskError {
    #[error("expected {expected} features, got {found}")]
    Shape { expected: usize, found: usize },
    #[error("classifier failed: {0}")]
    Forest(#[from] ForestError),
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid model artifact {}: {source}", .path.display())]
    Artifact {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("unusable model artifact {}: {reason}", .path.display())]
    InvalidModel { path: PathBuf, reason: String },
    #[error("dataset line {line}: {message}")]
    Dataset { line: usize, message: String },
    #[error("dataset has no rows")]
    EmptyDataset,
}

impl RiskError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        RiskError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn dataset(line: usize, message: impl Into<String>) -> Self {
        RiskError::Dataset {
            line,
            message: message.into(),
        }
    }
}

pub type RiskResult<T> = Result<T, RiskError>;
