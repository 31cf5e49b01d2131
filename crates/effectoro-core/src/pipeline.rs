//! Extract -> classify -> assemble.
//!
use crate::classifier::Classifier;
use crate::errors::EffectorResult;
use crate::featurize::{featurize_sequences, to_matrix, FeatureVector};
use crate::results::{assemble, ClassificationTable};
use crate::sequence::ProteinSequence;
use log::{debug, warn};

/// Rounding used for batch output files.
pub const BATCH_PRECISION: u32 = 2;
/// Rounding used for tables handed to the presentation layer.
pub const INTERACTIVE_PRECISION: u32 = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub succeeded: usize,
    pub skipped: usize,
    pub skipped_ids: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct ClassificationRun {
    pub table: ClassificationTable,
    pub summary: RunSummary,
}

/// A classifier handle plus output rounding. Built once and shared; running
/// it does not mutate anything.
#[derive(Debug)]
pub struct Pipeline {
    classifier: Classifier,
    precision: u32,
}

impl Pipeline {
    pub fn new(classifier: Classifier, precision: u32) -> Self {
        Self {
            classifier,
            precision,
        }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn precision(&self) -> u32 {
        self.precision
    }

    /// Classifies `sequences`, skipping (and counting) records that cannot
    /// be featurized. Model failures abort the whole run.
    pub fn run(&self, sequences: &[ProteinSequence]) -> EffectorResult<ClassificationRun> {
        let mut summary = RunSummary::default();
        let mut kept: Vec<(usize, &ProteinSequence)> = Vec::with_capacity(sequences.len());
        let mut vectors: Vec<FeatureVector> = Vec::with_capacity(sequences.len());

        for (index, (protein, result)) in sequences
            .iter()
            .zip(featurize_sequences(sequences))
            .enumerate()
        {
            match result {
                Ok(vector) => {
                    kept.push((index, protein));
                    vectors.push(vector);
                }
                Err(e) if e.is_recoverable() => {
                    warn!("Skipping {}: {}", protein.id, e);
                    summary.skipped += 1;
                    summary.skipped_ids.push(protein.id.clone());
                }
                Err(e) => return Err(e),
            }
        }

        if kept.is_empty() {
            return Ok(ClassificationRun {
                table: ClassificationTable::default(),
                summary,
            });
        }

        let matrix = to_matrix(&vectors);
        debug!(
            "Classifying {} x {} feature matrix with {}",
            matrix.nrows(),
            matrix.ncols(),
            self.classifier.describe()
        );
        let labels = self.classifier.classify(&matrix)?;
        let probabilities = self.classifier.score_probability(&matrix)?;

        let table = assemble(&kept, &vectors, &labels, &probabilities, self.precision)?;
        summary.succeeded = table.len();
        Ok(ClassificationRun { table, summary })
    }
}
