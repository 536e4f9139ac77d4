use medi_forest::RandomForest;

use crate::error::RiskResult;
use crate::features::PatientFeatures;

/// A fitted binary classifier over [`PatientFeatures`].
///
/// Implementations are read-only after construction and are shared between
/// request handlers without locking.
pub trait Classifier: Send + Sync {
    /// Returns `0` (no risk) or `1` (risk).
    fn predict(&self, features: &PatientFeatures) -> RiskResult<u8>;
}

impl Classifier for RandomForest {
    fn predict(&self, features: &PatientFeatures) -> RiskResult<u8> {
        let label = RandomForest::predict(self, &features.to_array())?;
        Ok(label.min(1))
    }
}
