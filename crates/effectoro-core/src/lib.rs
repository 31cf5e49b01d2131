//! # effectoro-core
//!
//! Sequence-to-prediction core of the EffectorO effector classifier.
//!
//! __effectoro-core__ provides:
//! * Six per-residue biochemical scales ([`Scale`], [`lookup`])
//! * Averaged six-dimensional sequence features ([`extract`], [`FeatureVector`])
//! * A label-typed adapter over pre-trained binary classifiers ([`Classifier`])
//! * Ordered, rounded classification tables ([`assemble`], [`ClassificationTable`])
//!
//! The [`Pipeline`] ties these together: sequences in, a [`ClassificationRun`] out.
//!
mod classifier;
mod errors;
mod featurize;
mod info;
mod pipeline;
mod results;
mod sequence;

pub use self::classifier::{Classifier, ClassifierArtifact, EffectorClass};
pub use self::errors::{EffectorError, EffectorResult};
pub use self::featurize::{
    extract, featurize_sequences, to_matrix, FeatureMatrix, FeatureVector, FEATURE_NAMES,
    MAX_RESIDUES, NUM_FEATURES,
};
pub use self::info::constants::{lookup, residue_properties, Scale, STANDARD_AA};
pub use self::pipeline::{
    ClassificationRun, Pipeline, RunSummary, BATCH_PRECISION, INTERACTIVE_PRECISION,
};
pub use self::results::{
    assemble, round_to, ClassificationTable, PredictionRecord, MAX_PRECISION,
};
pub use self::sequence::ProteinSequence;
