use std::fmt;
use std::path::Path;

use crate::classifier::Classifier;
use crate::condition::Condition;
use crate::error::RiskResult;
use crate::features::PatientFeatures;
use crate::store::ArtifactStore;

/// One classifier per [`Condition`], in `Condition::ALL` order.
pub struct ModelSet {
    models: Vec<(Condition, Box<dyn Classifier>)>,
}

impl ModelSet {
    pub fn from_fn(mut make: impl FnMut(Condition) -> Box<dyn Classifier>) -> Self {
        Self {
            models: Condition::ALL.into_iter().map(|c| (c, make(c))).collect(),
        }
    }

    pub fn try_from_fn(
        mut make: impl FnMut(Condition) -> RiskResult<Box<dyn Classifier>>,
    ) -> RiskResult<Self> {
        let mut models = Vec::with_capacity(Condition::ALL.len());
        for condition in Condition::ALL {
            models.push((condition, make(condition)?));
        }
        Ok(Self { models })
    }

    /// Load every condition's artifact from `dir`. Fails on the first
    /// missing or unreadable file.
    pub fn load(dir: impl AsRef<Path>) -> RiskResult<Self> {
        let store = ArtifactStore::new(dir);
        Self::try_from_fn(|condition| {
            let forest = store.load(condition)?;
            log::info!(
                "loaded {condition} model from {} ({} trees)",
                store.path_for(condition).display(),
                forest.trees().len()
            );
            Ok(Box::new(forest) as Box<dyn Classifier>)
        })
    }

    pub fn predict(&self, condition: Condition, features: &PatientFeatures) -> RiskResult<u8> {
        self.models[condition.index()].1.predict(features)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Condition, &dyn Classifier)> {
        self.models.iter().map(|(c, m)| (*c, &**m))
    }
}

impl fmt::Debug for ModelSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.models.iter().map(|(c, _)| c))
            .finish()
    }
}
