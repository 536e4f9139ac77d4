//! Rule-based risk explanation.
//!
//! The explanation looks only at the raw measurements, never at model output,
//! so it reads the same whatever the classifiers predict.

use crate::features::PatientFeatures;

pub const GLUCOSE_LIMIT: f64 = 140.0;
pub const BMI_LIMIT: f64 = 30.0;
pub const AGE_LIMIT: f64 = 45.0;
pub const BLOOD_PRESSURE_LIMIT: f64 = 90.0;
pub const INSULIN_LIMIT: f64 = 150.0;

pub const NORMAL_RANGE_MESSAGE: &str = "All vital parameters are within normal range";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskFactor {
    HighGlucose,
    HighBmi,
    Age,
    ElevatedBloodPressure,
    AbnormalInsulin,
}

impl RiskFactor {
    /// Evaluation order; explanations always list factors in this order.
    pub const ALL: [RiskFactor; 5] = [
        RiskFactor::HighGlucose,
        RiskFactor::HighBmi,
        RiskFactor::Age,
        RiskFactor::ElevatedBloodPressure,
        RiskFactor::AbnormalInsulin,
    ];

    /// Strictly greater than the limit; a value equal to it does not count.
    pub fn applies(self, f: &PatientFeatures) -> bool {
        match self {
            RiskFactor::HighGlucose => f.glucose > GLUCOSE_LIMIT,
            RiskFactor::HighBmi => f.bmi > BMI_LIMIT,
            RiskFactor::Age => f.age > AGE_LIMIT,
            RiskFactor::ElevatedBloodPressure => f.blood_pressure > BLOOD_PRESSURE_LIMIT,
            RiskFactor::AbnormalInsulin => f.insulin > INSULIN_LIMIT,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RiskFactor::HighGlucose => "High glucose level detected",
            RiskFactor::HighBmi => "High BMI (obesity risk)",
            RiskFactor::Age => "Age is a significant risk factor",
            RiskFactor::ElevatedBloodPressure => "Elevated blood pressure",
            RiskFactor::AbnormalInsulin => "Abnormal insulin level",
        }
    }
}

pub fn risk_factors(features: &PatientFeatures) -> Vec<RiskFactor> {
    RiskFactor::ALL
        .into_iter()
        .filter(|factor| factor.applies(features))
        .collect()
}

/// Messages for every factor that applies, or the single normal-range
/// message when none do. Never empty.
pub fn explain(features: &PatientFeatures) -> Vec<String> {
    let factors = risk_factors(features);
    if factors.is_empty() {
        return vec![NORMAL_RANGE_MESSAGE.to_string()];
    }
    factors.iter().map(|f| f.message().to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn baseline() -> PatientFeatures {
        PatientFeatures::from_slice(&[0.0, 100.0, 70.0, 20.0, 79.0, 22.0, 0.5, 25.0]).unwrap()
    }

    #[test]
    fn values_at_the_limit_do_not_trigger() {
        let f = PatientFeatures {
            glucose: GLUCOSE_LIMIT,
            bmi: BMI_LIMIT,
            age: AGE_LIMIT,
            blood_pressure: BLOOD_PRESSURE_LIMIT,
            insulin: INSULIN_LIMIT,
            ..baseline()
        };
        assert!(risk_factors(&f).is_empty());
        assert_eq!(explain(&f), vec![NORMAL_RANGE_MESSAGE]);
    }

    #[test]
    fn each_factor_triggers_alone() {
        let cases = [
            (PatientFeatures { glucose: 141.0, ..baseline() }, RiskFactor::HighGlucose),
            (PatientFeatures { bmi: 30.5, ..baseline() }, RiskFactor::HighBmi),
            (PatientFeatures { age: 46.0, ..baseline() }, RiskFactor::Age),
            (
                PatientFeatures {
                    blood_pressure: 91.0,
                    ..baseline()
                },
                RiskFactor::ElevatedBloodPressure,
            ),
            (PatientFeatures { insulin: 151.0, ..baseline() }, RiskFactor::AbnormalInsulin),
        ];
        for (features, expected) in cases {
            assert_eq!(risk_factors(&features), vec![expected]);
            assert_eq!(explain(&features), vec![expected.message()]);
        }
    }

    #[test]
    fn nonsensical_values_are_still_explained() {
        let f = PatientFeatures {
            glucose: -5.0,
            age: 1.0e9,
            ..baseline()
        };
        assert_eq!(explain(&f), vec![RiskFactor::Age.message()]);
    }
}
