use crate::classifier::EffectorClass;
use crate::errors::{EffectorError, EffectorResult};
use crate::featurize::FeatureVector;
use crate::sequence::ProteinSequence;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionRecord {
    #[serde(rename = "proteinID")]
    pub protein_id: String,
    /// Position of the source sequence in the caller's input list.
    #[serde(skip)]
    pub input_index: usize,
    pub features: FeatureVector,
    #[serde(rename = "prediction")]
    pub predicted_class: EffectorClass,
    pub probability: f64,
}

impl PredictionRecord {
    pub fn label(&self) -> &'static str {
        self.predicted_class.label()
    }
}

/// Prediction records in input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClassificationTable {
    records: Vec<PredictionRecord>,
}

impl ClassificationTable {
    pub fn records(&self) -> &[PredictionRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PredictionRecord> {
        self.records.iter()
    }

    pub fn effectors(&self) -> impl Iterator<Item = &PredictionRecord> {
        self.records
            .iter()
            .filter(|record| record.predicted_class.is_effector())
    }

    /// `(non-effectors, effectors)`
    pub fn class_counts(&self) -> (usize, usize) {
        let effectors = self.effectors().count();
        (self.records.len() - effectors, effectors)
    }
}

impl<'a> IntoIterator for &'a ClassificationTable {
    type Item = &'a PredictionRecord;
    type IntoIter = std::slice::Iter<'a, PredictionRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Largest number of decimal places accepted for probabilities.
pub const MAX_PRECISION: u32 = 15;

/// Rounds half to even, matching numpy's `round`. Precisions beyond what an
/// `f64` can scale leave `value` as is.
pub fn round_to(value: f64, precision: u32) -> f64 {
    let Ok(exponent) = i32::try_from(precision) else {
        return value;
    };
    let factor = 10_f64.powi(exponent);
    let scaled = value * factor;
    if !factor.is_finite() || !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / factor
}

/// Joins per-sequence results into a [`ClassificationTable`].
///
/// All slices are parallel: element `i` of each belongs to `sequences[i]`,
/// and record `i` of the table is built from them. Each sequence is paired
/// with its position in the input.
pub fn assemble(
    sequences: &[(usize, &ProteinSequence)],
    features: &[FeatureVector],
    labels: &[EffectorClass],
    probabilities: &[f64],
    precision: u32,
) -> EffectorResult<ClassificationTable> {
    let n = sequences.len();
    if features.len() != n || labels.len() != n || probabilities.len() != n {
        return Err(EffectorError::ModelIncompatible(format!(
            "cannot join {} sequences with {} feature vectors, {} labels and {} probabilities",
            n,
            features.len(),
            labels.len(),
            probabilities.len()
        )));
    }

    let records = sequences
        .iter()
        .zip(features)
        .zip(labels)
        .zip(probabilities)
        .map(
            |((((input_index, protein), features), label), probability)| PredictionRecord {
                protein_id: protein.id.clone(),
                input_index: *input_index,
                features: *features,
                predicted_class: *label,
                probability: round_to(*probability, precision),
            },
        )
        .collect();

    Ok(ClassificationTable { records })
}
