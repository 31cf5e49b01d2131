//! EffectorO Models
//!
//! Loaders for pre-trained effector classifiers. Two artifact formats are supported:
//!
//! * `.onnx` - a scikit-learn random forest exported with `skl2onnx`, run with ONNX Runtime.
//! * `.json` - the same forest dumped as plain decision-tree arrays, evaluated in Rust.
//!
//! Both load into an [`effectoro_core::Classifier`] which is then passed to the pipeline.
//!
pub mod forest;
pub mod onnx;

pub use forest::{DecisionForest, DecisionTree};
pub use onnx::OnnxForest;

use effectoro_core::{Classifier, EffectorError, EffectorResult};
use log::info;
use std::path::Path;

/// Default model location, relative to the working directory.
pub const DEFAULT_MODEL_PATH: &str = "trained_models/effectoro_rf.onnx";

const MODEL_README: &str = "trained_models/README.md";

pub fn load_classifier<P: AsRef<Path>>(path: P) -> EffectorResult<Classifier> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(EffectorError::ModelLoad {
            path: path.to_path_buf(),
            message: format!(
                "no such file; export the trained forest with skl2onnx (zipmap disabled) \
                 or as a JSON forest, see {}",
                MODEL_README
            ),
        });
    }

    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    let classifier = match extension.as_deref() {
        Some("onnx") => Classifier::new(OnnxForest::from_file(path)?),
        Some("json") => Classifier::new(DecisionForest::from_file(path)?),
        _ => {
            return Err(EffectorError::ModelLoad {
                path: path.to_path_buf(),
                message: "unsupported model format, expected .onnx or .json".to_string(),
            })
        }
    };
    info!("Loaded model {} ({})", path.display(), classifier.describe());
    Ok(classifier)
}
