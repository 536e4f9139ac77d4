use std::fmt;

use serde::{Deserialize, Serialize};

use crate::dataset::DatasetRow;
use crate::explain::{AGE_LIMIT, BMI_LIMIT, GLUCOSE_LIMIT};

/// A condition with a trained classifier behind it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Condition {
    Diabetes,
    Heart,
    Kidney,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::Diabetes, Condition::Heart, Condition::Kidney];

    pub fn as_str(self) -> &'static str {
        match self {
            Condition::Diabetes => "diabetes",
            Condition::Heart => "heart",
            Condition::Kidney => "kidney",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Condition::Diabetes => 0,
            Condition::Heart => 1,
            Condition::Kidney => 2,
        }
    }

    /// File name of the serialized classifier for this condition.
    pub fn artifact_name(self) -> String {
        format!("{}_model.json", self.as_str())
    }

    /// Training label for a dataset row.
    ///
    /// Only diabetes has a recorded outcome. Heart and kidney labels are
    /// threshold rules over the same columns, so those models learn the rule,
    /// not a clinical outcome.
    pub fn label(self, row: &DatasetRow) -> u8 {
        let f = &row.features;
        match self {
            Condition::Diabetes => row.outcome,
            Condition::Heart => u8::from(f.glucose > GLUCOSE_LIMIT),
            Condition::Kidney => u8::from(f.bmi > BMI_LIMIT && f.age > AGE_LIMIT),
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
