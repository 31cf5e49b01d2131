use anyhow::Result;
use effectoro_core::{
    Classifier, ClassifierArtifact, EffectorClass, EffectorError, EffectorResult, Pipeline,
    ProteinSequence,
};
use effectoro_io::{
    classify_upload, parse_fasta, read_fasta, write_classification_table, write_effectors_fasta,
    write_outputs, EFFECTORS_FILENAME, TABLE_FILENAME,
};
use effectoro_test_data::TestFile;
use ndarray::{Array2, ArrayView2};
use std::collections::HashSet;

/// Effector when mean hydropathy is negative; fixed probabilities.
struct HydropathySign;

impl ClassifierArtifact for HydropathySign {
    fn n_features(&self) -> usize {
        6
    }
    fn predict(&self, features: ArrayView2<'_, f64>) -> EffectorResult<Vec<i64>> {
        Ok(features
            .rows()
            .into_iter()
            .map(|row| if row[0] < 0.0 { 1 } else { 0 })
            .collect())
    }
    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> EffectorResult<Array2<f64>> {
        Ok(Array2::from_shape_fn((features.nrows(), 2), |(r, c)| {
            let p = if features[[r, 0]] < 0.0 { 0.875 } else { 0.25 };
            if c == 1 {
                p
            } else {
                1.0 - p
            }
        }))
    }
}

struct AlwaysEffector;

impl ClassifierArtifact for AlwaysEffector {
    fn n_features(&self) -> usize {
        6
    }
    fn predict(&self, features: ArrayView2<'_, f64>) -> EffectorResult<Vec<i64>> {
        Ok(vec![1; features.nrows()])
    }
    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> EffectorResult<Array2<f64>> {
        Ok(Array2::from_shape_fn((features.nrows(), 2), |(_, c)| {
            if c == 1 {
                0.9
            } else {
                0.1
            }
        }))
    }
}

/// Certain effector: probability rounds up to a whole number.
struct NearCertain;

impl ClassifierArtifact for NearCertain {
    fn n_features(&self) -> usize {
        6
    }
    fn predict(&self, features: ArrayView2<'_, f64>) -> EffectorResult<Vec<i64>> {
        Ok(vec![1; features.nrows()])
    }
    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> EffectorResult<Array2<f64>> {
        Ok(Array2::from_shape_fn((features.nrows(), 2), |(_, c)| {
            if c == 1 {
                0.999
            } else {
                0.001
            }
        }))
    }
}

#[test]
fn test_two_sequence_scenario() -> Result<()> {
    let (fasta_file, _tmp) = TestFile::fasta_01().create_temp()?;
    let sequences = read_fasta(&fasta_file)?;
    let pipeline = Pipeline::new(Classifier::new(AlwaysEffector), 2);
    let run = pipeline.run(&sequences)?;

    let out_dir = tempfile::tempdir()?;
    let paths = write_outputs(&run.table, &sequences, out_dir.path())?;
    assert_eq!(paths.table, out_dir.path().join(TABLE_FILENAME));

    let csv = std::fs::read_to_string(&paths.table)?;
    assert_eq!(
        csv,
        "proteinID,sequence,prediction,probability,meaning\n\
         seq1,AAAA,1,0.9,predicted effector\n\
         seq2,KKKK,1,0.9,predicted effector\n"
    );

    let fasta = std::fs::read_to_string(out_dir.path().join(EFFECTORS_FILENAME))?;
    assert_eq!(
        fasta,
        ">seq1 predicted effector probability=0.9\nAAAA\n\
         >seq2 predicted effector probability=0.9\nKKKK\n"
    );
    Ok(())
}

#[test]
fn test_effectors_fasta_round_trips() -> Result<()> {
    let sequences = parse_fasta(TestFile::fasta_02().bytes())?;
    let pipeline = Pipeline::new(Classifier::new(HydropathySign), 2);
    let run = pipeline.run(&sequences)?;
    assert_eq!(run.summary.skipped_ids, vec!["Bl_empty_03".to_string()]);

    let mut buffer = Vec::new();
    write_effectors_fasta(&run.table, &sequences, &mut buffer)?;
    let reparsed: HashSet<(String, String)> = parse_fasta(&buffer[..])?
        .into_iter()
        .map(|p| (p.id, p.sequence))
        .collect();

    let expected: HashSet<(String, String)> = run
        .table
        .effectors()
        .map(|r| {
            (
                r.protein_id.clone(),
                sequences[r.input_index].sequence.clone(),
            )
        })
        .collect();
    assert!(!expected.is_empty());
    assert_eq!(reparsed, expected);

    let text = String::from_utf8(buffer)?;
    assert!(!text.contains("\n\n"));
    assert!(text.ends_with('\n'));
    assert!(!text.contains("Bl_hydrophobic_02"));
    Ok(())
}

#[test]
fn test_untruncated_sequence_is_written() -> Result<()> {
    let long = "K".repeat(1500);
    let sequences = vec![ProteinSequence::new("long", long.clone())];
    let pipeline = Pipeline::new(Classifier::new(HydropathySign), 2);
    let run = pipeline.run(&sequences)?;

    let mut buffer = Vec::new();
    write_effectors_fasta(&run.table, &sequences, &mut buffer)?;
    let reparsed = parse_fasta(&buffer[..])?;
    assert_eq!(reparsed[0].sequence, long);
    Ok(())
}

#[test]
fn test_table_keeps_non_effectors_in_input_order() -> Result<()> {
    let sequences = vec![
        ProteinSequence::new("id1", "KKKK"),
        ProteinSequence::new("id2", "IIII"),
        ProteinSequence::new("id3", "DDDD"),
    ];
    let pipeline = Pipeline::new(Classifier::new(HydropathySign), 2);
    let run = pipeline.run(&sequences)?;

    let mut buffer = Vec::new();
    write_classification_table(&run.table, &sequences, &mut buffer)?;
    let csv = String::from_utf8(buffer)?;
    let ids: Vec<&str> = csv
        .lines()
        .skip(1)
        .map(|line| line.split(',').next().unwrap_or_default())
        .collect();
    assert_eq!(ids, ["id1", "id2", "id3"]);
    assert!(csv.contains("id2,IIII,0,0.25,predicted non-effector"));
    Ok(())
}

#[test]
fn test_output_dir_is_created() -> Result<()> {
    let root = tempfile::tempdir()?;
    let nested = root.path().join("results").join("run1");
    let pipeline = Pipeline::new(Classifier::new(AlwaysEffector), 2);
    let sequences = vec![ProteinSequence::new("a", "MK")];
    let run = pipeline.run(&sequences)?;
    let paths = write_outputs(&run.table, &sequences, &nested)?;
    assert!(paths.table.is_file());
    assert!(paths.effectors.is_file());
    Ok(())
}

#[test]
fn test_unwritable_output_reports_path() -> Result<()> {
    let root = tempfile::tempdir()?;
    let blocker = root.path().join("not_a_dir");
    std::fs::write(&blocker, b"")?;
    let pipeline = Pipeline::new(Classifier::new(AlwaysEffector), 2);
    let sequences = vec![ProteinSequence::new("a", "MK")];
    let run = pipeline.run(&sequences)?;
    match write_outputs(&run.table, &sequences, &blocker) {
        Err(EffectorError::OutputWrite { path, .. }) => assert!(path.starts_with(&blocker)),
        other => panic!("expected OutputWrite, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_upload_runs_the_pipeline() -> Result<()> {
    let pipeline = Pipeline::new(Classifier::new(HydropathySign), 3);
    let run = classify_upload(TestFile::fasta_01().bytes(), &pipeline)?;
    let records = run.table.records();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].predicted_class, EffectorClass::NonEffector);
    assert_eq!(records[0].probability, 0.25);
    assert_eq!(records[1].predicted_class, EffectorClass::Effector);
    assert_eq!(records[1].probability, 0.875);
    Ok(())
}

#[test]
fn test_malformed_upload_is_an_error_not_an_empty_table() {
    let pipeline = Pipeline::new(Classifier::new(AlwaysEffector), 3);
    assert!(matches!(
        classify_upload(b"this is not fasta", &pipeline),
        Err(EffectorError::InputParse(_))
    ));
    assert!(matches!(
        classify_upload(&[0xff, 0xfe, 0x00], &pipeline),
        Err(EffectorError::InputParse(_))
    ));
}

#[test]
fn test_whole_probability_matches_between_outputs() -> Result<()> {
    let sequences = vec![ProteinSequence::new("p1", "KKKK")];
    let pipeline = Pipeline::new(Classifier::new(NearCertain), 2);
    let run = pipeline.run(&sequences)?;
    assert_eq!(run.table.records()[0].probability, 1.0);

    let mut csv = Vec::new();
    write_classification_table(&run.table, &sequences, &mut csv)?;
    assert_eq!(
        String::from_utf8(csv)?,
        "proteinID,sequence,prediction,probability,meaning\n\
         p1,KKKK,1,1.0,predicted effector\n"
    );

    let mut fasta = Vec::new();
    write_effectors_fasta(&run.table, &sequences, &mut fasta)?;
    assert_eq!(
        String::from_utf8(fasta)?,
        ">p1 predicted effector probability=1.0\nKKKK\n"
    );
    Ok(())
}
