/// A parsed FASTA record: the first header token and the raw residue text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinSequence {
    pub id: String,
    pub sequence: String,
}

impl ProteinSequence {
    pub fn new(id: impl Into<String>, sequence: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            sequence: sequence.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.sequence.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.sequence.is_empty()
    }
}
