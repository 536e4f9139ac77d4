//! CART classification tree grown with Gini impurity.
//!
//! Nodes live in a flat arena; the root is always index 0. A sample goes to
//! the left child when `x[feature] <= threshold`.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{ForestError, ForestResult};
use crate::params::TreeParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        /// Class probabilities, indexed by class label.
        distribution: Vec<f64>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecisionTree {
    n_features: usize,
    n_classes: usize,
    nodes: Vec<Node>,
}

#[derive(Debug, Clone, Copy)]
struct Split {
    feature: usize,
    threshold: f64,
    impurity: f64,
}

impl DecisionTree {
    /// Fit a tree on every row of `x`.
    pub fn fit<R: Rng + ?Sized>(
        params: &TreeParams,
        x: &[Vec<f64>],
        y: &[u8],
        rng: &mut R,
    ) -> ForestResult<Self> {
        let (n_features, n_classes) = crate::validate(x, y)?;
        let samples = (0..x.len()).collect();
        Ok(Self::grow(params, x, y, samples, n_features, n_classes, rng))
    }

    /// Grow a tree over `samples` (row indices, duplicates allowed). Inputs
    /// must already be validated.
    pub(crate) fn grow<R: Rng + ?Sized>(
        params: &TreeParams,
        x: &[Vec<f64>],
        y: &[u8],
        samples: Vec<usize>,
        n_features: usize,
        n_classes: usize,
        rng: &mut R,
    ) -> Self {
        let placeholder = || Node::Leaf {
            distribution: Vec::new(),
        };
        let mut nodes = vec![placeholder()];
        let mut stack = vec![(0usize, samples, 0usize)];

        while let Some((id, samples, depth)) = stack.pop() {
            let counts = class_counts(y, &samples, n_classes);
            let depth_ok = params.max_depth.map_or(true, |max| depth < max);
            let pure = counts.iter().filter(|&&c| c > 0).count() <= 1;

            let split = if depth_ok && !pure && samples.len() >= params.min_samples_split {
                best_split(params, x, y, &samples, n_features, n_classes, rng)
            } else {
                None
            };

            match split {
                Some(split) => {
                    let (left, right): (Vec<usize>, Vec<usize>) = samples
                        .into_iter()
                        .partition(|&i| x[i][split.feature] <= split.threshold);
                    let left_id = nodes.len();
                    nodes.push(placeholder());
                    let right_id = nodes.len();
                    nodes.push(placeholder());
                    nodes[id] = Node::Split {
                        feature: split.feature,
                        threshold: split.threshold,
                        left: left_id,
                        right: right_id,
                    };
                    stack.push((right_id, right, depth + 1));
                    stack.push((left_id, left, depth + 1));
                }
                None => {
                    let total = samples.len().max(1) as f64;
                    nodes[id] = Node::Leaf {
                        distribution: counts.iter().map(|&c| c as f64 / total).collect(),
                    };
                }
            }
        }

        Self {
            n_features,
            n_classes,
            nodes,
        }
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.nodes
            .iter()
            .filter(|n| matches!(n, Node::Leaf { .. }))
            .count()
    }

    /// Length of the longest root-to-leaf path, in edges.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut stack = vec![(0usize, 0usize)];
        while let Some((id, depth)) = stack.pop() {
            match &self.nodes[id] {
                Node::Split { left, right, .. } => {
                    stack.push((*left, depth + 1));
                    stack.push((*right, depth + 1));
                }
                Node::Leaf { .. } => deepest = deepest.max(depth),
            }
        }
        deepest
    }

    /// Structural check for trees that did not come from [`DecisionTree::fit`],
    /// e.g. deserialized ones. Children must sit after their parent in the
    /// arena, so a checked tree always reaches a leaf.
    pub fn check(&self) -> ForestResult<()> {
        let malformed = |msg: String| -> ForestResult<()> { Err(ForestError::Malformed(msg)) };
        if self.nodes.is_empty() {
            return malformed("tree has no nodes".into());
        }
        for (id, node) in self.nodes.iter().enumerate() {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if *feature >= self.n_features {
                        return malformed(format!(
                            "node {id} splits on feature {feature} of {}",
                            self.n_features
                        ));
                    }
                    if !threshold.is_finite() {
                        return malformed(format!("node {id} has a non-finite threshold"));
                    }
                    for child in [*left, *right] {
                        if child <= id || child >= self.nodes.len() {
                            return malformed(format!(
                                "node {id} points to child {child} ({} nodes)",
                                self.nodes.len()
                            ));
                        }
                    }
                }
                Node::Leaf { distribution } => {
                    if distribution.len() != self.n_classes {
                        return malformed(format!(
                            "leaf {id} has {} classes, expected {}",
                            distribution.len(),
                            self.n_classes
                        ));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn predict_proba(&self, features: &[f64]) -> ForestResult<&[f64]> {
        if features.len() != self.n_features {
            return Err(ForestError::FeatureMismatch {
                expected: self.n_features,
                found: features.len(),
            });
        }
        let mut id = 0;
        loop {
            match &self.nodes[id] {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    id = if features[*feature] <= *threshold {
                        *left
                    } else {
                        *right
                    };
                }
                Node::Leaf { distribution } => return Ok(distribution),
            }
        }
    }

    pub fn predict(&self, features: &[f64]) -> ForestResult<u8> {
        self.predict_proba(features).map(argmax)
    }
}

/// Index of the largest probability; ties resolve to the lowest class.
pub(crate) fn argmax(distribution: &[f64]) -> u8 {
    let mut best = 0;
    for (class, p) in distribution.iter().enumerate() {
        if *p > distribution[best] {
            best = class;
        }
    }
    best as u8
}

fn class_counts(y: &[u8], samples: &[usize], n_classes: usize) -> Vec<usize> {
    let mut counts = vec![0; n_classes];
    for &i in samples {
        counts[y[i] as usize] += 1;
    }
    counts
}

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let total = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total;
            p * p
        })
        .sum::<f64>()
}

/// Visit features in random order, stopping once `max_features` have been
/// examined and at least one valid split exists.
fn best_split<R: Rng + ?Sized>(
    params: &TreeParams,
    x: &[Vec<f64>],
    y: &[u8],
    samples: &[usize],
    n_features: usize,
    n_classes: usize,
    rng: &mut R,
) -> Option<Split> {
    let budget = params.max_features.resolve(n_features);
    let mut order: Vec<usize> = (0..n_features).collect();
    order.shuffle(rng);

    let mut best: Option<Split> = None;
    for (visited, &feature) in order.iter().enumerate() {
        if visited >= budget && best.is_some() {
            break;
        }
        if let Some(candidate) = best_threshold(params, x, y, samples, feature, n_classes) {
            if best.map_or(true, |b| candidate.impurity < b.impurity) {
                best = Some(candidate);
            }
        }
    }
    best
}

fn best_threshold(
    params: &TreeParams,
    x: &[Vec<f64>],
    y: &[u8],
    samples: &[usize],
    feature: usize,
    n_classes: usize,
) -> Option<Split> {
    let mut column: Vec<(f64, u8)> = samples.iter().map(|&i| (x[i][feature], y[i])).collect();
    column.sort_by(|a, b| a.0.total_cmp(&b.0));

    let n = column.len();
    let min_leaf = params.min_samples_leaf.max(1);
    let mut left = vec![0usize; n_classes];
    let mut right = vec![0usize; n_classes];
    for &(_, label) in &column {
        right[label as usize] += 1;
    }

    let mut best: Option<Split> = None;
    for i in 0..n.saturating_sub(1) {
        let (value, label) = column[i];
        left[label as usize] += 1;
        right[label as usize] -= 1;

        let next = column[i + 1].0;
        if value >= next {
            continue;
        }
        let n_left = i + 1;
        let n_right = n - n_left;
        if n_left < min_leaf || n_right < min_leaf {
            continue;
        }

        let weighted = n_left as f64 * gini(&left, n_left) + n_right as f64 * gini(&right, n_right);
        let impurity = weighted / n as f64;
        if best.map_or(true, |b| impurity < b.impurity) {
            let mid = value + (next - value) / 2.0;
            let threshold = if mid < next { mid } else { value };
            best = Some(Split {
                feature,
                threshold,
                impurity,
            });
        }
    }
    best
}
