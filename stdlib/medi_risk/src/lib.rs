//! Patient risk screening.
//!
//! Three classifiers (diabetes, heart, kidney) score the same eight
//! measurements; [`score`] combines their 0/1 outputs with a rule-based
//! [`explain`]ation of which measurements are out of range. The [`train`]
//! module produces the classifier artifacts that [`ModelSet::load`] reads.

pub mod classifier;
pub mod condition;
pub mod dataset;
pub mod error;
pub mod explain;
pub mod features;
pub mod models;
pub mod scoring;
pub mod store;
pub mod train;

pub use classifier::Classifier;
pub use condition::Condition;
pub use dataset::{Dataset, DatasetRow, DEFAULT_DATASET_URL};
pub use error::{RiskError, RiskResult};
pub use explain::{explain, risk_factors, RiskFactor, NORMAL_RANGE_MESSAGE};
pub use features::{PatientFeatures, FEATURE_COUNT, FEATURE_NAMES};
pub use models::ModelSet;
pub use scoring::{score, RiskReport};
pub use store::ArtifactStore;
pub use train::{train_all, train_condition, TrainedArtifact};

pub use medi_forest::{ForestParams, RandomForest};
