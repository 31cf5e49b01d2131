use super::{extract, FeatureVector, NUM_FEATURES};
use crate::errors::EffectorResult;
use crate::sequence::ProteinSequence;
use ndarray::Array2;
use rayon::prelude::*;

/// Rows are sequences, columns follow [`FEATURE_NAMES`](super::FEATURE_NAMES).
pub type FeatureMatrix = Array2<f64>;

/// Extracts every sequence in parallel. The output is indexed like the input
/// regardless of which worker finishes first.
pub fn featurize_sequences(sequences: &[ProteinSequence]) -> Vec<EffectorResult<FeatureVector>> {
    sequences
        .par_iter()
        .map(|protein| extract(&protein.sequence))
        .collect()
}

pub fn to_matrix(vectors: &[FeatureVector]) -> FeatureMatrix {
    Array2::from_shape_fn((vectors.len(), NUM_FEATURES), |(row, col)| {
        vectors[row].as_array()[col]
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::EffectorError;

    #[test]
    fn test_featurize_preserves_input_order() {
        let sequences: Vec<ProteinSequence> = (0..500)
            .map(|i| {
                let residue = if i % 2 == 0 { "A" } else { "K" };
                ProteinSequence::new(format!("seq{}", i), residue.repeat(1 + i % 37))
            })
            .collect();

        let features = featurize_sequences(&sequences);
        assert_eq!(features.len(), sequences.len());
        for (protein, result) in sequences.iter().zip(&features) {
            assert_eq!(result.as_ref().unwrap(), &extract(&protein.sequence).unwrap());
        }
    }

    #[test]
    fn test_featurize_keeps_failures_in_place() {
        let sequences = vec![
            ProteinSequence::new("a", "AAAA"),
            ProteinSequence::new("empty", ""),
            ProteinSequence::new("b", "KKKK"),
        ];
        let features = featurize_sequences(&sequences);
        assert!(features[0].is_ok());
        assert!(matches!(features[1], Err(EffectorError::EmptySequence)));
        assert!(features[2].is_ok());
    }

    #[test]
    fn test_to_matrix_shape_and_rows() {
        let vectors = vec![extract("AAAA").unwrap(), extract("KKKK").unwrap()];
        let matrix = to_matrix(&vectors);
        assert_eq!(matrix.dim(), (2, NUM_FEATURES));
        assert_eq!(matrix.row(0).to_vec(), vectors[0].as_array().to_vec());
        assert_eq!(matrix.row(1).to_vec(), vectors[1].as_array().to_vec());
    }

    #[test]
    fn test_to_matrix_empty() {
        assert_eq!(to_matrix(&[]).dim(), (0, NUM_FEATURES));
    }
}
