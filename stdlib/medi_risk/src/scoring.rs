use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::error::RiskResult;
use crate::explain::explain;
use crate::features::PatientFeatures;
use crate::models::ModelSet;

/// Combined screening result. Serializes to exactly
/// `{diabetes, heart, kidney, liver, thyroid, explanation}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskReport {
    pub diabetes: u8,
    pub heart: u8,
    pub kidney: u8,
    /// No liver model exists yet; always 0.
    pub liver: u8,
    /// No thyroid model exists yet; always 0.
    pub thyroid: u8,
    pub explanation: Vec<String>,
}

impl RiskReport {
    pub fn flag(&self, condition: Condition) -> u8 {
        match condition {
            Condition::Diabetes => self.diabetes,
            Condition::Heart => self.heart,
            Condition::Kidney => self.kidney,
        }
    }

    fn flag_mut(&mut self, condition: Condition) -> &mut u8 {
        match condition {
            Condition::Diabetes => &mut self.diabetes,
            Condition::Heart => &mut self.heart,
            Condition::Kidney => &mut self.kidney,
        }
    }

    pub fn any_risk(&self) -> bool {
        [
            self.diabetes,
            self.heart,
            self.kidney,
            self.liver,
            self.thyroid,
        ]
        .iter()
        .any(|&flag| flag != 0)
    }
}

/// Run every classifier and attach the rule-based explanation.
///
/// Any classifier failure fails the whole report.
pub fn score(models: &ModelSet, features: &PatientFeatures) -> RiskResult<RiskReport> {
    let mut report = RiskReport {
        diabetes: 0,
        heart: 0,
        kidney: 0,
        liver: 0,
        thyroid: 0,
        explanation: Vec::new(),
    };
    for (condition, classifier) in models.iter() {
        *report.flag_mut(condition) = classifier.predict(features)?.min(1);
    }
    report.explanation = explain(features);
    Ok(report)
}
