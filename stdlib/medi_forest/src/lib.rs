//! Random forest classification for tabular clinical features.
//!
//! A [`RandomForest`] is a bag of CART trees ([`DecisionTree`]), each grown on
//! a bootstrap sample with a random feature subset considered at every node.
//! Predictions average the per-tree class distributions. Everything derives
//! `serde`, so a fitted forest can be written to disk and loaded back
//! unchanged.

pub mod error;
pub mod forest;
pub mod params;
pub mod tree;

pub use error::{ForestError, ForestResult};
pub use forest::RandomForest;
pub use params::{ForestParams, MaxFeatures, TreeParams};
pub use tree::DecisionTree;

/// Check the training matrix and return `(n_features, n_classes)`.
pub(crate) fn validate(x: &[Vec<f64>], y: &[u8]) -> ForestResult<(usize, usize)> {
    if x.is_empty() {
        return Err(ForestError::EmptyDataset);
    }
    if x.len() != y.len() {
        return Err(ForestError::LabelMismatch {
            rows: x.len(),
            labels: y.len(),
        });
    }
    let n_features = x[0].len();
    if n_features == 0 {
        return Err(ForestError::InvalidParams(
            "rows must have at least one feature".into(),
        ));
    }
    for (row, values) in x.iter().enumerate() {
        if values.len() != n_features {
            return Err(ForestError::RaggedRow {
                row,
                expected: n_features,
                found: values.len(),
            });
        }
        if let Some(feature) = values.iter().position(|v| !v.is_finite()) {
            return Err(ForestError::NonFinite { row, feature });
        }
    }
    let n_classes = y.iter().copied().max().map_or(1, |m| m as usize + 1);
    Ok((n_features, n_classes))
}
