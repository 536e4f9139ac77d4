//! Training data: the Pima Indians diabetes table.
//!
//! Nine numeric columns per line, the eight features in model order followed
//! by the 0/1 outcome. The public copy has no header; a leading line whose
//! first field is not a number is treated as one and skipped.

use std::path::Path;

use crate::condition::Condition;
use crate::error::{RiskError, RiskResult};
use crate::features::{PatientFeatures, FEATURE_COUNT};

pub const DEFAULT_DATASET_URL: &str =
    "https://raw.githubusercontent.com/jbrownlee/Datasets/master/pima-indians-diabetes.data.csv";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DatasetRow {
    pub features: PatientFeatures,
    pub outcome: u8,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    rows: Vec<DatasetRow>,
}

impl Dataset {
    pub fn parse(text: &str) -> RiskResult<Self> {
        let mut rows = Vec::new();
        let mut seen_content = false;

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }
            let first_line = !seen_content;
            seen_content = true;

            let fields: Vec<&str> = line.split(',').map(str::trim).collect();
            if first_line && fields[0].parse::<f64>().is_err() {
                log::debug!("skipping header line: {line}");
                continue;
            }
            rows.push(parse_row(line_no, &fields)?);
        }

        if rows.is_empty() {
            return Err(RiskError::EmptyDataset);
        }
        Ok(Self { rows })
    }

    pub fn from_path(path: impl AsRef<Path>) -> RiskResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| RiskError::io(path, e))?;
        Self::parse(&text)
    }

    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Feature matrix shared by every condition.
    pub fn features(&self) -> Vec<Vec<f64>> {
        self.rows
            .iter()
            .map(|r| r.features.to_array().to_vec())
            .collect()
    }

    pub fn labels(&self, condition: Condition) -> Vec<u8> {
        self.rows.iter().map(|r| condition.label(r)).collect()
    }

    pub fn positives(&self, condition: Condition) -> usize {
        self.rows.iter().filter(|r| condition.label(r) == 1).count()
    }
}

fn parse_row(line: usize, fields: &[&str]) -> RiskResult<DatasetRow> {
    if fields.len() != FEATURE_COUNT + 1 {
        return Err(RiskError::dataset(
            line,
            format!("expected {} columns, found {}", FEATURE_COUNT + 1, fields.len()),
        ));
    }
    let mut values = [0.0; FEATURE_COUNT + 1];
    for (col, (slot, field)) in values.iter_mut().zip(fields).enumerate() {
        let column = col + 1;
        let v: f64 = field.parse().map_err(|_| {
            RiskError::dataset(line, format!("column {column}: {field:?} is not a number"))
        })?;
        if !v.is_finite() {
            return Err(RiskError::dataset(
                line,
                format!("column {column} is not finite"),
            ));
        }
        *slot = v;
    }
    let outcome = match values[FEATURE_COUNT] {
        o if o == 0.0 => 0,
        o if o == 1.0 => 1,
        other => {
            return Err(RiskError::dataset(
                line,
                format!("outcome must be 0 or 1, found {other}"),
            ))
        }
    };
    Ok(DatasetRow {
        features: PatientFeatures::from_slice(&values[..FEATURE_COUNT])?,
        outcome,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SAMPLE: &str = "\
6,148,72,35,0,33.6,0.627,50,1
1,85,66,29,0,26.6,0.351,31,0

8,183,64,0,0,23.3,0.672,32,1
";

    #[test]
    fn parses_rows_in_order() {
        let ds = Dataset::parse(SAMPLE).unwrap();
        assert_eq!(ds.len(), 3);
        let first = ds.rows()[0];
        assert_eq!(first.features.glucose, 148.0);
        assert_eq!(first.features.dpf, 0.627);
        assert_eq!(first.outcome, 1);
        assert_eq!(ds.features()[1], vec![1.0, 85.0, 66.0, 29.0, 0.0, 26.6, 0.351, 31.0]);
    }

    #[test]
    fn derives_labels_per_condition() {
        let ds = Dataset::parse(SAMPLE).unwrap();
        assert_eq!(ds.labels(Condition::Diabetes), vec![1, 0, 1]);
        assert_eq!(ds.labels(Condition::Heart), vec![1, 0, 1]);
        assert_eq!(ds.labels(Condition::Kidney), vec![1, 0, 0]);
        assert_eq!(ds.positives(Condition::Kidney), 1);
    }

    #[test]
    fn header_line_is_skipped() {
        let text = format!(
            "Pregnancies,Glucose,BloodPressure,SkinThickness,Insulin,BMI,DPF,Age,Outcome\n{SAMPLE}"
        );
        assert_eq!(Dataset::parse(&text).unwrap().len(), 3);
    }

    #[test]
    fn bad_rows_name_their_line() {
        let err = Dataset::parse("1,2,3\n").unwrap_err();
        assert!(matches!(err, RiskError::Dataset { line: 1, .. }), "{err}");

        let err = Dataset::parse("6,148,72,35,0,33.6,0.627,50,1\n6,abc,72,35,0,33.6,0.627,50,1\n")
            .unwrap_err();
        assert!(matches!(err, RiskError::Dataset { line: 2, .. }), "{err}");

        let err = Dataset::parse("6,148,72,35,0,33.6,0.627,50,3\n").unwrap_err();
        assert!(err.to_string().contains("outcome must be 0 or 1"));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(Dataset::parse("\n\n"), Err(RiskError::EmptyDataset)));
    }
}
