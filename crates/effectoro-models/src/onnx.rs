//! ONNX Runtime backend.
//!
//! Expects a binary random forest exported with `skl2onnx` and
//! `options={"zipmap": False}`, so the graph has one float input of shape
//! `[batch, n_features]` and two outputs: labels (`int64` or string) and a
//! `[batch, n_classes]` float probability tensor.
//!
use effectoro_core::{ClassifierArtifact, EffectorError, EffectorResult};
use ndarray::{Array2, ArrayView2, Ix2};
use ort::{
    session::{builder::GraphOptimizationLevel, Session},
    value::ValueType,
};
use std::fmt::Display;
use std::path::{Path, PathBuf};

pub struct OnnxForest {
    session: Session,
    model_path: PathBuf,
    input_name: String,
    label_output: String,
    proba_output: String,
    n_features: usize,
}

fn incompatible(e: impl Display) -> EffectorError {
    EffectorError::ModelIncompatible(e.to_string())
}

impl OnnxForest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> EffectorResult<Self> {
        let path = path.as_ref();
        let load_err = |e: ort::Error| EffectorError::ModelLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        };

        ort::init().with_name("EffectorO").commit().map_err(load_err)?;
        let session = Session::builder()
            .map_err(load_err)?
            .with_optimization_level(GraphOptimizationLevel::Level1)
            .map_err(load_err)?
            .with_intra_threads(1)
            .map_err(load_err)?
            .commit_from_file(path)
            .map_err(load_err)?;

        // Input name: float_input
        // Input type: Tensor { ty: Float32, dimensions: [-1, 6], dimension_symbols: [None, None] }
        let input = session
            .inputs
            .first()
            .ok_or_else(|| incompatible("model has no inputs"))?;
        let n_features = match &input.input_type {
            ValueType::Tensor { dimensions, .. } => match dimensions.last() {
                Some(&width) if width > 0 => width as usize,
                _ => return Err(incompatible("model input width is not fixed")),
            },
            other => {
                return Err(incompatible(format!(
                    "model input is not a tensor: {:?}",
                    other
                )))
            }
        };
        let input_name = input.name.clone();

        if session.outputs.len() < 2 {
            return Err(incompatible(
                "model must output labels and probabilities (export with zipmap disabled)",
            ));
        }
        let label_output = session.outputs[0].name.clone();
        let proba_output = session.outputs[1].name.clone();

        Ok(Self {
            session,
            model_path: path.to_path_buf(),
            input_name,
            label_output,
            proba_output,
            n_features,
        })
    }

    /// Runs the graph once, returning raw labels and class probabilities.
    fn infer(&self, features: ArrayView2<'_, f64>) -> EffectorResult<(Vec<i64>, Array2<f64>)> {
        if features.ncols() != self.n_features {
            return Err(incompatible(format!(
                "model expects {} features, got {}",
                self.n_features,
                features.ncols()
            )));
        }
        let input: Array2<f32> = features.mapv(|x| x as f32);
        let outputs = self
            .session
            .run(ort::inputs![self.input_name.as_str() => input].map_err(incompatible)?)
            .map_err(incompatible)?;

        let label_value = &outputs[self.label_output.as_str()];
        let labels: Vec<i64> = match label_value.try_extract_tensor::<i64>() {
            Ok(tensor) => tensor.iter().copied().collect(),
            // models trained on string classes ("0"/"1") export string labels
            Err(_) => label_value
                .try_extract_string_tensor()
                .map_err(incompatible)?
                .iter()
                .map(|label| {
                    label
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| incompatible(format!("unexpected class label {:?}", label)))
                })
                .collect::<EffectorResult<Vec<i64>>>()?,
        };

        let proba = outputs[self.proba_output.as_str()]
            .try_extract_tensor::<f32>()
            .map_err(|e| {
                incompatible(format!(
                    "probabilities are not a float tensor (export with zipmap disabled): {}",
                    e
                ))
            })?
            .into_dimensionality::<Ix2>()
            .map_err(incompatible)?
            .mapv(f64::from);

        Ok((labels, proba))
    }
}

impl ClassifierArtifact for OnnxForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> EffectorResult<Vec<i64>> {
        self.infer(features).map(|(labels, _)| labels)
    }

    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> EffectorResult<Array2<f64>> {
        self.infer(features).map(|(_, proba)| proba)
    }

    fn describe(&self) -> String {
        format!(
            "onnx model {}, {} features",
            self.model_path.display(),
            self.n_features
        )
    }
}
