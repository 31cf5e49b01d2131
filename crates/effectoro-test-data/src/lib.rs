//! effectoro-test-data
//!
//! Test files embedded in the crate for use in tests across the workspace.
//!
//! The test files are represented as `TestFile` objects which package the raw data
//! and create temporary files for programs to operate on.
use std::fs;
use tempfile::{Builder, NamedTempFile};

#[derive(Debug)]
/// Test File
///
/// Example usage:
///
/// ```ignore
/// // returns (filepath, _tempfile_handle).
/// // _handle ensures the tempfile remains in scope
/// use effectoro_test_data::TestFile;
/// let (fasta_file, _temp) = TestFile::fasta_01().create_temp().unwrap();
/// let (model_file, _temp) = TestFile::forest_01().create_temp().unwrap();
/// ```
pub struct TestFile {
    filebinary: &'static [u8],
    suffix: &'static str,
}

impl TestFile {
    /// `seq1` = AAAA, `seq2` = KKKK
    pub fn fasta_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/fasta/two_sequences.fasta"),
            suffix: "fasta",
        }
    }
    /// Five secreted proteins: a multi-line record, an empty record,
    /// lowercase residues and ambiguity codes.
    pub fn fasta_02() -> Self {
        Self {
            filebinary: include_bytes!("../data/fasta/secreted_mixed.fasta"),
            suffix: "fasta",
        }
    }
    /// Two-tree forest splitting on mean hydropathy.
    /// Negative gravy -> effector; `KKKK` scores 0.9, `AAAA` scores 0.05.
    pub fn forest_01() -> Self {
        Self {
            filebinary: include_bytes!("../data/models/gravy_forest.json"),
            suffix: "json",
        }
    }
    /// Forest trained on eight features; incompatible with our six.
    pub fn forest_wide() -> Self {
        Self {
            filebinary: include_bytes!("../data/models/wide_forest.json"),
            suffix: "json",
        }
    }

    pub fn bytes(&self) -> &'static [u8] {
        self.filebinary
    }

    pub fn create_temp(&self) -> std::io::Result<(String, NamedTempFile)> {
        let temp = Builder::new()
            .suffix(&format!(".{}", self.suffix))
            .tempfile()?;

        fs::write(&temp, self.filebinary)?;
        let path = temp.path().to_string_lossy().into_owned();

        Ok((path, temp))
    }
}
