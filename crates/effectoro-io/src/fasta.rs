use bio::io::fasta;
use effectoro_core::{EffectorError, EffectorResult, ProteinSequence};
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Parses protein FASTA records in file order.
///
/// The identifier is the first whitespace-delimited token of the header;
/// multi-line sequences are joined. Records with no sequence lines are kept
/// (with an empty sequence) so the caller can count them.
pub fn parse_fasta<R: Read>(reader: R) -> EffectorResult<Vec<ProteinSequence>> {
    let reader = fasta::Reader::new(reader);
    let mut sequences = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.map_err(|e| {
            EffectorError::InputParse(format!("record {}: {}", i + 1, e))
        })?;
        if record.id().is_empty() {
            return Err(EffectorError::InputParse(format!(
                "record {} has an empty identifier",
                i + 1
            )));
        }
        let sequence = String::from_utf8(record.seq().to_vec()).map_err(|_| {
            EffectorError::InputParse(format!("record {} is not valid UTF-8", record.id()))
        })?;
        sequences.push(ProteinSequence::new(record.id(), sequence));
    }
    Ok(sequences)
}

pub fn read_fasta<P: AsRef<Path>>(path: P) -> EffectorResult<Vec<ProteinSequence>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| EffectorError::InputRead {
        path: path.to_path_buf(),
        source,
    })?;
    parse_fasta(file)
}
