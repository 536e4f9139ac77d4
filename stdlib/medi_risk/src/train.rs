//! Offline training: one forest per condition over the shared feature matrix.

use std::path::PathBuf;

use medi_forest::{ForestParams, RandomForest};

use crate::condition::Condition;
use crate::dataset::Dataset;
use crate::error::RiskResult;
use crate::store::ArtifactStore;

#[derive(Debug, Clone, PartialEq)]
pub struct TrainedArtifact {
    pub condition: Condition,
    pub path: PathBuf,
    pub rows: usize,
    pub positives: usize,
}

/// Seed for one condition's forest. Seeded runs give each condition its own
/// stream so the three forests are not built from identical draws.
fn condition_params(params: ForestParams, condition: Condition) -> ForestParams {
    ForestParams {
        seed: params
            .seed
            .map(|seed| seed.wrapping_add(condition.index() as u64)),
        ..params
    }
}

pub fn train_condition(
    dataset: &Dataset,
    condition: Condition,
    params: ForestParams,
) -> RiskResult<RandomForest> {
    let x = dataset.features();
    let y = dataset.labels(condition);
    Ok(RandomForest::fit(condition_params(params, condition), &x, &y)?)
}

/// Fit and save every condition's model. The same hyperparameters apply to
/// all three; there is no hold-out split and no scoring.
pub fn train_all(
    dataset: &Dataset,
    params: ForestParams,
    store: &ArtifactStore,
) -> RiskResult<Vec<TrainedArtifact>> {
    let mut artifacts = Vec::with_capacity(Condition::ALL.len());
    for condition in Condition::ALL {
        let positives = dataset.positives(condition);
        log::info!(
            "training {condition} model on {} rows ({positives} positive)",
            dataset.len()
        );
        let forest = train_condition(dataset, condition, params)?;
        let path = store.save(condition, &forest)?;
        log::info!("wrote {}", path.display());
        artifacts.push(TrainedArtifact {
            condition,
            path,
            rows: dataset.len(),
            positives,
        });
    }
    Ok(artifacts)
}
