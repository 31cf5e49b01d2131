//! Classifier adapter.
//!
//! Pre-trained models are opaque [`ClassifierArtifact`]s that speak in raw
//! integer labels and class-probability matrices. [`Classifier`] wraps one,
//! checks that it accepts our feature width, and converts its output into
//! [`EffectorClass`] labels and effector probabilities. The label reported
//! by the artifact is authoritative and is never re-derived from the
//! probability.
//!
use crate::errors::{EffectorError, EffectorResult};
use crate::featurize::{FeatureMatrix, NUM_FEATURES};
use ndarray::{Array2, ArrayView2};
use serde::Serialize;
use strum::{Display, IntoStaticStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, Serialize)]
pub enum EffectorClass {
    #[strum(serialize = "predicted non-effector")]
    NonEffector,
    #[strum(serialize = "predicted effector")]
    Effector,
}

impl EffectorClass {
    /// Raw label value as used by the trained models.
    pub fn as_raw(&self) -> u8 {
        match self {
            EffectorClass::NonEffector => 0,
            EffectorClass::Effector => 1,
        }
    }

    pub fn label(&self) -> &'static str {
        self.into()
    }

    pub fn is_effector(&self) -> bool {
        matches!(self, EffectorClass::Effector)
    }
}

impl TryFrom<i64> for EffectorClass {
    type Error = EffectorError;

    fn try_from(raw: i64) -> Result<Self, Self::Error> {
        match raw {
            0 => Ok(EffectorClass::NonEffector),
            1 => Ok(EffectorClass::Effector),
            other => Err(EffectorError::ModelIncompatible(format!(
                "unexpected class label {}",
                other
            ))),
        }
    }
}

/// A loaded, read-only binary classifier.
///
/// Implementations must not mutate internal state during prediction so one
/// artifact can serve concurrent batches.
pub trait ClassifierArtifact: Send + Sync {
    /// Number of feature columns the model was trained on.
    fn n_features(&self) -> usize;

    /// One raw class label per row.
    fn predict(&self, features: ArrayView2<'_, f64>) -> EffectorResult<Vec<i64>>;

    /// Class probabilities, shape `(rows, n_classes)`, class `1` in column 1.
    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> EffectorResult<Array2<f64>>;

    fn describe(&self) -> String {
        String::from("classifier")
    }
}

/// Column of the effector class in [`ClassifierArtifact::predict_proba`].
const EFFECTOR_COLUMN: usize = 1;

pub struct Classifier {
    artifact: Box<dyn ClassifierArtifact>,
}

impl Classifier {
    pub fn new(artifact: impl ClassifierArtifact + 'static) -> Self {
        Self {
            artifact: Box::new(artifact),
        }
    }

    pub fn describe(&self) -> String {
        self.artifact.describe()
    }

    fn check_width(&self, matrix: &FeatureMatrix) -> EffectorResult<()> {
        let expected = self.artifact.n_features();
        if matrix.ncols() != NUM_FEATURES || expected != matrix.ncols() {
            return Err(EffectorError::ModelIncompatible(format!(
                "model expects {} features per sequence, got {}",
                expected,
                matrix.ncols()
            )));
        }
        Ok(())
    }

    fn check_rows(matrix: &FeatureMatrix, returned: usize) -> EffectorResult<()> {
        if returned != matrix.nrows() {
            return Err(EffectorError::ModelIncompatible(format!(
                "model returned {} rows for {} sequences",
                returned,
                matrix.nrows()
            )));
        }
        Ok(())
    }

    /// Class labels for the whole batch, in row order.
    pub fn classify(&self, matrix: &FeatureMatrix) -> EffectorResult<Vec<EffectorClass>> {
        self.check_width(matrix)?;
        if matrix.nrows() == 0 {
            return Ok(Vec::new());
        }
        let raw = self.artifact.predict(matrix.view())?;
        Self::check_rows(matrix, raw.len())?;
        raw.into_iter().map(EffectorClass::try_from).collect()
    }

    /// Probability of the effector class for each row.
    pub fn score_probability(&self, matrix: &FeatureMatrix) -> EffectorResult<Vec<f64>> {
        self.check_width(matrix)?;
        if matrix.nrows() == 0 {
            return Ok(Vec::new());
        }
        let proba = self.artifact.predict_proba(matrix.view())?;
        Self::check_rows(matrix, proba.nrows())?;
        if proba.ncols() <= EFFECTOR_COLUMN {
            return Err(EffectorError::ModelIncompatible(format!(
                "model reports {} class probabilities, expected 2",
                proba.ncols()
            )));
        }
        proba
            .column(EFFECTOR_COLUMN)
            .iter()
            .map(|&p| {
                if p.is_finite() && (0.0..=1.0).contains(&p) {
                    Ok(p)
                } else {
                    Err(EffectorError::ModelIncompatible(format!(
                        "probability {} is outside [0, 1]",
                        p
                    )))
                }
            })
            .collect()
    }
}

impl std::fmt::Debug for Classifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Classifier")
            .field("artifact", &self.artifact.describe())
            .finish()
    }
}
