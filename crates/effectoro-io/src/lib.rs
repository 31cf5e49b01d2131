//! effectoro-io
//!
//! Reading protein FASTA input and writing classification results.
//!
mod fasta;
mod output;
mod upload;

pub use fasta::{parse_fasta, read_fasta};
pub use output::{
    write_classification_table, write_effectors_fasta, write_outputs, OutputPaths,
    EFFECTORS_FILENAME, TABLE_FILENAME,
};
pub use upload::classify_upload;
