use thiserror::Error;

/// Errors raised while fitting or evaluating a forest.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ForestError {
    #[error("cannot fit on an empty dataset")]
    EmptyDataset,
    #[error("got {rows} rows but {labels} labels")]
    LabelMismatch { rows: usize, labels: usize },
    #[error("row {row} has {found} features, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("row {row} feature {feature} is not finite")]
    NonFinite { row: usize, feature: usize },
    #[error("expected {expected} features, got {found}")]
    FeatureMismatch { expected: usize, found: usize },
    #[error("invalid parameters: {0}")]
    InvalidParams(String),
    #[error("malformed model: {0}")]
    Malformed(String),
}

pub type ForestResult<T> = Result<T, ForestError>;
