//! Averaged biochemical features.
//!
//! A sequence is reduced to the mean of each [`Scale`] over its first
//! [`MAX_RESIDUES`] residues. Residues missing from the scales add nothing to
//! the sums but still count towards the divisor, so unknown residues dilute
//! the averages. Trained models depend on this convention.
//!
mod batch;

pub use self::batch::{featurize_sequences, to_matrix, FeatureMatrix};

use crate::errors::{EffectorError, EffectorResult};
use crate::info::constants::{residue_properties, Scale};
use serde::Serialize;

/// Residues past this position never influence the features.
pub const MAX_RESIDUES: usize = 900;

pub const NUM_FEATURES: usize = 6;

pub const FEATURE_NAMES: [&str; NUM_FEATURES] = [
    "gravy",
    "hydrophobicity",
    "exposure",
    "disorder",
    "bulkiness",
    "interface",
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector([f64; NUM_FEATURES]);

impl FeatureVector {
    pub fn new(values: [f64; NUM_FEATURES]) -> Self {
        Self(values)
    }

    pub fn get(&self, scale: Scale) -> f64 {
        self.0[scale.to_index()]
    }

    pub fn as_array(&self) -> &[f64; NUM_FEATURES] {
        &self.0
    }
}

impl From<FeatureVector> for [f64; NUM_FEATURES] {
    fn from(vector: FeatureVector) -> Self {
        vector.0
    }
}

/// Sequence -> averaged [`FeatureVector`]
pub fn extract(sequence: &str) -> EffectorResult<FeatureVector> {
    let mut sums = [0.0_f64; NUM_FEATURES];
    let mut effective_length = 0_usize;

    for residue in sequence.chars().take(MAX_RESIDUES) {
        effective_length += 1;
        if let Some(values) = residue_properties(residue) {
            for (sum, value) in sums.iter_mut().zip(values) {
                *sum += value;
            }
        }
    }

    if effective_length == 0 {
        return Err(EffectorError::EmptySequence);
    }

    let length = effective_length as f64;
    Ok(FeatureVector(sums.map(|sum| sum / length)))
}
