use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::{ForestError, ForestResult};
use crate::params::ForestParams;
use crate::tree::{argmax, DecisionTree};

/// Bagged ensemble of [`DecisionTree`]s with soft voting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    params: ForestParams,
    n_features: usize,
    n_classes: usize,
    trees: Vec<DecisionTree>,
}

impl RandomForest {
    pub fn fit(params: ForestParams, x: &[Vec<f64>], y: &[u8]) -> ForestResult<Self> {
        if params.n_estimators == 0 {
            return Err(ForestError::InvalidParams(
                "n_estimators must be at least 1".into(),
            ));
        }
        let (n_features, n_classes) = crate::validate(x, y)?;
        let tree_params = params.tree_params();
        let n = x.len();

        let mut master = match params.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut trees = Vec::with_capacity(params.n_estimators);
        for _ in 0..params.n_estimators {
            let mut rng = StdRng::seed_from_u64(master.gen());
            let samples: Vec<usize> = if params.bootstrap {
                (0..n).map(|_| rng.gen_range(0..n)).collect()
            } else {
                (0..n).collect()
            };
            trees.push(DecisionTree::grow(
                &tree_params,
                x,
                y,
                samples,
                n_features,
                n_classes,
                &mut rng,
            ));
        }

        log::debug!(
            "fitted forest: {} trees, {} rows, {} features, {} classes",
            trees.len(),
            n,
            n_features,
            n_classes
        );

        Ok(Self {
            params,
            n_features,
            n_classes,
            trees,
        })
    }

    pub fn params(&self) -> &ForestParams {
        &self.params
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn trees(&self) -> &[DecisionTree] {
        &self.trees
    }

    /// Verify a deserialized forest is consistent before it is used for
    /// prediction. Fitted forests always pass.
    pub fn check(&self) -> ForestResult<()> {
        if self.trees.is_empty() {
            return Err(ForestError::Malformed("forest has no trees".into()));
        }
        if self.n_features == 0 || self.n_classes == 0 {
            return Err(ForestError::Malformed(format!(
                "forest declares {} features and {} classes",
                self.n_features, self.n_classes
            )));
        }
        for (i, tree) in self.trees.iter().enumerate() {
            if tree.n_features() != self.n_features || tree.n_classes() != self.n_classes {
                return Err(ForestError::Malformed(format!(
                    "tree {i} is {}x{}, forest is {}x{}",
                    tree.n_features(),
                    tree.n_classes(),
                    self.n_features,
                    self.n_classes
                )));
            }
            if let Err(ForestError::Malformed(msg)) = tree.check() {
                return Err(ForestError::Malformed(format!("tree {i}: {msg}")));
            }
        }
        Ok(())
    }

    /// Mean of the per-tree class distributions.
    pub fn predict_proba(&self, features: &[f64]) -> ForestResult<Vec<f64>> {
        if features.len() != self.n_features {
            return Err(ForestError::FeatureMismatch {
                expected: self.n_features,
                found: features.len(),
            });
        }
        let mut sum = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (acc, p) in sum.iter_mut().zip(tree.predict_proba(features)?) {
                *acc += p;
            }
        }
        let count = self.trees.len().max(1) as f64;
        Ok(sum.into_iter().map(|s| s / count).collect())
    }

    pub fn predict(&self, features: &[f64]) -> ForestResult<u8> {
        self.predict_proba(features).map(|p| argmax(&p))
    }

    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> ForestResult<Vec<u8>> {
        rows.iter().map(|row| self.predict(row)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn blobs() -> (Vec<Vec<f64>>, Vec<u8>) {
        let mut x = Vec::new();
        let mut y = Vec::new();
        for i in 0..40 {
            let jitter = (i % 5) as f64 * 0.1;
            x.push(vec![1.0 + jitter, 2.0 - jitter, 0.5]);
            y.push(0);
            x.push(vec![8.0 + jitter, 9.0 - jitter, 0.5]);
            y.push(1);
        }
        (x, y)
    }

    fn small(seed: u64) -> ForestParams {
        ForestParams {
            n_estimators: 15,
            ..ForestParams::default()
        }
        .with_seed(seed)
    }

    #[test]
    fn separable_blobs_are_classified_perfectly() {
        let (x, y) = blobs();
        let forest = RandomForest::fit(small(1), &x, &y).unwrap();
        assert_eq!(forest.trees().len(), 15);
        assert_eq!(forest.predict_batch(&x).unwrap(), y);
        assert_eq!(forest.predict(&[0.0, 0.0, 0.5]).unwrap(), 0);
        assert_eq!(forest.predict(&[20.0, 20.0, 0.5]).unwrap(), 1);
    }

    #[test]
    fn probabilities_sum_to_one() {
        let (x, y) = blobs();
        let forest = RandomForest::fit(small(2), &x, &y).unwrap();
        let p = forest.predict_proba(&[4.5, 5.5, 0.5]).unwrap();
        assert_eq!(p.len(), 2);
        assert_abs_diff_eq!(p.iter().sum::<f64>(), 1.0, epsilon = 1e-9);
    }

    #[test]
    fn same_seed_gives_same_forest() {
        let (x, y) = blobs();
        let a = RandomForest::fit(small(42), &x, &y).unwrap();
        let b = RandomForest::fit(small(42), &x, &y).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn without_bootstrap_every_tree_sees_all_rows() {
        let (x, y) = blobs();
        let params = ForestParams {
            bootstrap: false,
            ..small(3)
        };
        let forest = RandomForest::fit(params, &x, &y).unwrap();
        for tree in forest.trees() {
            assert_eq!(tree.predict(&[1.0, 2.0, 0.5]).unwrap(), 0);
        }
    }

    #[test]
    fn zero_trees_is_rejected() {
        let (x, y) = blobs();
        let params = ForestParams {
            n_estimators: 0,
            ..ForestParams::default()
        };
        assert!(matches!(
            RandomForest::fit(params, &x, &y),
            Err(ForestError::InvalidParams(_))
        ));
    }

    #[test]
    fn fitted_forest_passes_check_and_tampered_one_fails() {
        let (x, y) = blobs();
        let forest = RandomForest::fit(small(5), &x, &y).unwrap();
        assert_eq!(forest.check(), Ok(()));

        let mut empty = forest.clone();
        empty.trees.clear();
        assert!(matches!(empty.check(), Err(ForestError::Malformed(_))));

        let mut wider = forest;
        wider.n_features = 4;
        let err = wider.check().unwrap_err();
        assert!(err.to_string().contains("tree 0"), "{err}");
    }

    #[test]
    fn feature_width_is_checked_at_predict_time() {
        let (x, y) = blobs();
        let forest = RandomForest::fit(small(4), &x, &y).unwrap();
        assert_eq!(
            forest.predict(&[1.0, 2.0]),
            Err(ForestError::FeatureMismatch {
                expected: 3,
                found: 2
            })
        );
    }
}
