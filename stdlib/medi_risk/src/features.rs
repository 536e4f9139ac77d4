use serde::{Deserialize, Serialize};

use crate::error::{RiskError, RiskResult};

pub const FEATURE_COUNT: usize = 8;

/// Column names in model input order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "Pregnancies",
    "Glucose",
    "BloodPressure",
    "SkinThickness",
    "Insulin",
    "BMI",
    "DPF",
    "Age",
];

/// The eight numeric measurements every model consumes.
///
/// On the wire the fields use camelCase (`bloodPressure`, `skinThickness`).
/// All eight are required and unknown fields are rejected. No range checks
/// are applied: negative or implausible values are scored as given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PatientFeatures {
    pub pregnancies: f64,
    pub glucose: f64,
    pub blood_pressure: f64,
    pub skin_thickness: f64,
    pub insulin: f64,
    pub bmi: f64,
    /// Diabetes pedigree function.
    pub dpf: f64,
    pub age: f64,
}

impl PatientFeatures {
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.pregnancies,
            self.glucose,
            self.blood_pressure,
            self.skin_thickness,
            self.insulin,
            self.bmi,
            self.dpf,
            self.age,
        ]
    }

    pub fn from_slice(values: &[f64]) -> RiskResult<Self> {
        match *values {
            [pregnancies, glucose, blood_pressure, skin_thickness, insulin, bmi, dpf, age] => {
                Ok(Self {
                    pregnancies,
                    glucose,
                    blood_pressure,
                    skin_thickness,
                    insulin,
                    bmi,
                    dpf,
                    age,
                })
            }
            _ => Err(RiskError::Shape {
                expected: FEATURE_COUNT,
                found: values.len(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn array_order_matches_feature_names() {
        let f = PatientFeatures::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]).unwrap();
        assert_eq!(f.glucose, 2.0);
        assert_eq!(f.blood_pressure, 3.0);
        assert_eq!(f.age, 8.0);
        assert_eq!(f.to_array(), [1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        assert_eq!(FEATURE_NAMES[1], "Glucose");
    }

    #[test]
    fn wrong_length_slice_is_a_shape_error() {
        let err = PatientFeatures::from_slice(&[1.0; 7]).unwrap_err();
        assert!(matches!(
            err,
            RiskError::Shape {
                expected: 8,
                found: 7
            }
        ));
    }

    #[test]
    fn json_uses_camel_case_names() {
        let f: PatientFeatures = serde_json::from_str(
            r#"{"pregnancies":2,"glucose":120,"bloodPressure":70,"skinThickness":20,
                "insulin":79,"bmi":25.5,"dpf":0.5,"age":33}"#,
        )
        .unwrap();
        assert_eq!(f.blood_pressure, 70.0);
        assert_eq!(f.skin_thickness, 20.0);
        assert_eq!(f.bmi, 25.5);
    }

    #[test]
    fn json_rejects_missing_extra_and_mistyped_fields() {
        let missing = r#"{"pregnancies":2,"glucose":120,"bloodPressure":70,"skinThickness":20,
                          "insulin":79,"bmi":25.5,"dpf":0.5}"#;
        let extra = r#"{"pregnancies":2,"glucose":120,"bloodPressure":70,"skinThickness":20,
                        "insulin":79,"bmi":25.5,"dpf":0.5,"age":33,"name":"x"}"#;
        let mistyped = r#"{"pregnancies":2,"glucose":"high","bloodPressure":70,"skinThickness":20,
                           "insulin":79,"bmi":25.5,"dpf":0.5,"age":33}"#;
        for body in [missing, extra, mistyped] {
            assert!(serde_json::from_str::<PatientFeatures>(body).is_err(), "{body}");
        }
    }
}
