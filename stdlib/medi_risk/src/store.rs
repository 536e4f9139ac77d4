//! On-disk model artifacts: one JSON file per condition.

use std::fs::{create_dir_all, read, write};
use std::path::{Path, PathBuf};

use medi_forest::RandomForest;

use crate::condition::Condition;
use crate::error::{RiskError, RiskResult};
use crate::features::FEATURE_COUNT;

#[derive(Debug, Clone)]
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Nothing is touched on disk until the first save.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, condition: Condition) -> PathBuf {
        self.dir.join(condition.artifact_name())
    }

    pub fn save(&self, condition: Condition, model: &RandomForest) -> RiskResult<PathBuf> {
        create_dir_all(&self.dir).map_err(|e| RiskError::io(&self.dir, e))?;
        let path = self.path_for(condition);
        let data = serde_json::to_vec_pretty(model).map_err(|source| RiskError::Artifact {
            path: path.clone(),
            source,
        })?;
        write(&path, data).map_err(|e| RiskError::io(&path, e))?;
        Ok(path)
    }

    /// Read and check one artifact. A forest that parses but could not score
    /// a patient is rejected here rather than at prediction time.
    pub fn load(&self, condition: Condition) -> RiskResult<RandomForest> {
        let path = self.path_for(condition);
        let data = read(&path).map_err(|e| RiskError::io(&path, e))?;
        let forest: RandomForest = match serde_json::from_slice(&data) {
            Ok(forest) => forest,
            Err(source) => return Err(RiskError::Artifact { path, source }),
        };
        if forest.n_features() != FEATURE_COUNT {
            return Err(RiskError::InvalidModel {
                path,
                reason: format!(
                    "fitted on {} features, expected {FEATURE_COUNT}",
                    forest.n_features()
                ),
            });
        }
        if let Err(e) = forest.check() {
            return Err(RiskError::InvalidModel {
                path,
                reason: e.to_string(),
            });
        }
        Ok(forest)
    }
}
