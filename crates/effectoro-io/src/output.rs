//! Batch outputs: the full classification table as CSV and the predicted
//! effectors as FASTA.
//!
use bio::io::fasta;
use effectoro_core::{
    ClassificationTable, EffectorError, EffectorResult, PredictionRecord, ProteinSequence,
};
use log::info;
use polars::prelude::*;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

pub const TABLE_FILENAME: &str = "effector_classification_table.csv";
pub const EFFECTORS_FILENAME: &str = "predicted_effectors.fasta";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub table: PathBuf,
    pub effectors: PathBuf,
}

fn source_sequence<'a>(
    record: &PredictionRecord,
    sequences: &'a [ProteinSequence],
) -> io::Result<&'a ProteinSequence> {
    sequences.get(record.input_index).ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "{} refers to input {} but only {} sequences were given",
                record.protein_id,
                record.input_index,
                sequences.len()
            ),
        )
    })
}

/// Writes `proteinID,sequence,prediction,probability,meaning` rows in table
/// order, with a header row.
pub fn write_classification_table<W: Write>(
    table: &ClassificationTable,
    sequences: &[ProteinSequence],
    writer: W,
) -> io::Result<()> {
    let mut ids = Vec::with_capacity(table.len());
    let mut residues = Vec::with_capacity(table.len());
    let mut predictions = Vec::with_capacity(table.len());
    let mut probabilities = Vec::with_capacity(table.len());
    let mut meanings = Vec::with_capacity(table.len());
    for record in table {
        ids.push(record.protein_id.as_str());
        residues.push(source_sequence(record, sequences)?.sequence.as_str());
        predictions.push(record.predicted_class.as_raw() as u32);
        probabilities.push(record.probability);
        meanings.push(record.label());
    }

    let mut df = df!(
        "proteinID" => ids,
        "sequence" => residues,
        "prediction" => predictions,
        "probability" => probabilities,
        "meaning" => meanings
    )
    .map_err(io::Error::other)?;

    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut df)
        .map_err(io::Error::other)
}

/// Writes one FASTA record per predicted effector, in table order, with the
/// full input sequence.
pub fn write_effectors_fasta<W: Write>(
    table: &ClassificationTable,
    sequences: &[ProteinSequence],
    writer: W,
) -> io::Result<()> {
    let mut writer = fasta::Writer::new(writer);
    for record in table.effectors() {
        let source = source_sequence(record, sequences)?;
        let description = format!("{} probability={:?}", record.label(), record.probability);
        writer.write(&record.protein_id, Some(description.as_str()), source.sequence.as_bytes())?;
    }
    writer.flush()
}

fn write_file<F>(path: &Path, write: F) -> EffectorResult<()>
where
    F: FnOnce(&mut BufWriter<File>) -> io::Result<()>,
{
    let output_err = |e: io::Error| EffectorError::OutputWrite {
        path: path.to_path_buf(),
        message: e.to_string(),
    };
    let mut writer = BufWriter::new(File::create(path).map_err(output_err)?);
    write(&mut writer).map_err(output_err)?;
    writer.flush().map_err(output_err)
}

/// Writes [`TABLE_FILENAME`] and [`EFFECTORS_FILENAME`] into `out_dir`.
pub fn write_outputs<P: AsRef<Path>>(
    table: &ClassificationTable,
    sequences: &[ProteinSequence],
    out_dir: P,
) -> EffectorResult<OutputPaths> {
    let out_dir = out_dir.as_ref();
    fs::create_dir_all(out_dir).map_err(|e| EffectorError::OutputWrite {
        path: out_dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let paths = OutputPaths {
        table: out_dir.join(TABLE_FILENAME),
        effectors: out_dir.join(EFFECTORS_FILENAME),
    };
    write_file(&paths.table, |w| write_classification_table(table, sequences, w))?;
    write_file(&paths.effectors, |w| write_effectors_fasta(table, sequences, w))?;

    info!("Classification table written to {}", paths.table.display());
    info!("Predicted effectors written to {}", paths.effectors.display());
    Ok(paths)
}
