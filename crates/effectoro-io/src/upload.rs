use crate::fasta::parse_fasta;
use effectoro_core::{ClassificationRun, EffectorError, EffectorResult, Pipeline};
use log::info;

/// Classifies uploaded FASTA content for the presentation layer.
///
/// Malformed uploads are reported as [`EffectorError::InputParse`] rather
/// than an empty table, so callers can tell "no effectors" from "bad file".
pub fn classify_upload(content: &[u8], pipeline: &Pipeline) -> EffectorResult<ClassificationRun> {
    let text = std::str::from_utf8(content)
        .map_err(|e| EffectorError::InputParse(format!("upload is not UTF-8 text: {}", e)))?;
    let sequences = parse_fasta(text.as_bytes())?;
    info!("Received {} sequences for classification", sequences.len());
    pipeline.run(&sequences)
}
