pub mod predict;
pub mod table;

use anyhow::Result;
use effectoro_core::{ClassificationRun, Pipeline, ProteinSequence};
use effectoro_io::read_fasta;
use log::info;
use std::path::Path;

/// Loads the model and input, then classifies. Model and input failures are
/// fatal; empty records are skipped and reported.
pub(crate) fn classify_file(
    input: &Path,
    model: &Path,
    precision: u32,
) -> Result<(Vec<ProteinSequence>, ClassificationRun)> {
    let classifier = effectoro_models::load_classifier(model)?;
    let pipeline = Pipeline::new(classifier, precision);

    let sequences = read_fasta(input)?;
    info!(
        "Sequences to run the effector classifier on: {}",
        sequences.len()
    );

    let run = pipeline.run(&sequences)?;
    let (non_effectors, effectors) = run.table.class_counts();
    info!(
        "Classified {} sequences ({} skipped): {} predicted effector, {} predicted non-effector",
        run.summary.succeeded, run.summary.skipped, effectors, non_effectors
    );
    Ok((sequences, run))
}

#[cfg(test)]
mod tests {
    use super::*;
    use effectoro_test_data::TestFile;

    #[test]
    fn test_classify_file_with_forest() {
        let (fasta_file, _fasta) = TestFile::fasta_02().create_temp().unwrap();
        let (model_file, _model) = TestFile::forest_01().create_temp().unwrap();
        let (sequences, run) =
            classify_file(Path::new(&fasta_file), Path::new(&model_file), 2).unwrap();
        assert_eq!(sequences.len(), 5);
        assert_eq!(run.summary.succeeded, 4);
        assert_eq!(run.summary.skipped_ids, vec!["Bl_empty_03".to_string()]);
        assert_eq!(run.table.class_counts(), (2, 2));
    }

    #[test]
    fn test_missing_model_fails_before_reading_input() {
        let err = classify_file(
            Path::new("no/such/input.fasta"),
            Path::new("no/such/model.onnx"),
            2,
        )
        .unwrap_err();
        assert!(err.to_string().contains("model.onnx"));
    }
}
