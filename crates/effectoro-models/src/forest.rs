//! Decision forests in scikit-learn's array layout.
//!
//! Each tree stores parallel node arrays as dumped from `estimator.tree_`:
//! `children_left`, `children_right`, `feature`, `threshold` and `value`.
//! Leaves have `children_left == -1`. A sample goes left when
//! `x[feature] <= threshold`.
//!
//! Class probabilities are the mean over trees of each leaf's normalised
//! class distribution and the predicted label is the class with the highest
//! mean probability, first class winning ties.
//!
use effectoro_core::{ClassifierArtifact, EffectorError, EffectorResult};
use ndarray::{Array2, ArrayView1, ArrayView2};
use serde::Deserialize;
use std::path::Path;

const LEAF: i64 = -1;

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionTree {
    pub children_left: Vec<i64>,
    pub children_right: Vec<i64>,
    pub feature: Vec<i64>,
    pub threshold: Vec<f64>,
    pub value: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DecisionForest {
    pub n_features: usize,
    pub classes: Vec<i64>,
    pub trees: Vec<DecisionTree>,
}

impl DecisionTree {
    fn validate(&self, n_features: usize, n_classes: usize) -> Result<(), String> {
        let n = self.children_left.len();
        if n == 0 {
            return Err("tree has no nodes".to_string());
        }
        if self.children_right.len() != n
            || self.feature.len() != n
            || self.threshold.len() != n
            || self.value.len() != n
        {
            return Err("tree node arrays differ in length".to_string());
        }
        for node in 0..n {
            let (left, right) = (self.children_left[node], self.children_right[node]);
            if left == LEAF {
                let value = &self.value[node];
                if value.len() != n_classes {
                    return Err(format!(
                        "leaf {} has {} class values, expected {}",
                        node,
                        value.len(),
                        n_classes
                    ));
                }
                if value.iter().any(|v| !v.is_finite() || *v < 0.0)
                    || value.iter().sum::<f64>() <= 0.0
                {
                    return Err(format!("leaf {} has an invalid class distribution", node));
                }
                continue;
            }
            // children always follow their parent, which rules out cycles
            let in_range = |child: i64| child > node as i64 && (child as usize) < n;
            if !in_range(left) || !in_range(right) {
                return Err(format!("node {} has invalid children", node));
            }
            let feature = self.feature[node];
            if feature < 0 || feature as usize >= n_features {
                return Err(format!("node {} splits on unknown feature {}", node, feature));
            }
        }
        Ok(())
    }

    fn leaf(&self, sample: ArrayView1<'_, f64>) -> &[f64] {
        let mut node = 0_usize;
        while self.children_left[node] != LEAF {
            let feature = self.feature[node] as usize;
            node = if sample[feature] <= self.threshold[node] {
                self.children_left[node] as usize
            } else {
                self.children_right[node] as usize
            };
        }
        &self.value[node]
    }
}

impl DecisionForest {
    pub fn from_file<P: AsRef<Path>>(path: P) -> EffectorResult<Self> {
        let path = path.as_ref();
        let load_err = |message: String| EffectorError::ModelLoad {
            path: path.to_path_buf(),
            message,
        };
        let text = std::fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
        Self::from_json(&text).map_err(|e| match e {
            EffectorError::ModelLoad { message, .. } => load_err(message),
            other => other,
        })
    }

    pub fn from_json(text: &str) -> EffectorResult<Self> {
        let forest: DecisionForest =
            serde_json::from_str(text).map_err(|e| EffectorError::ModelLoad {
                path: Default::default(),
                message: format!("invalid forest JSON: {}", e),
            })?;
        forest.validate().map_err(|message| EffectorError::ModelLoad {
            path: Default::default(),
            message,
        })?;
        Ok(forest)
    }

    fn validate(&self) -> Result<(), String> {
        if self.classes.is_empty() {
            return Err("forest has no classes".to_string());
        }
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features, self.classes.len())
                .map_err(|e| format!("tree {}: {}", i, e))?;
        }
        Ok(())
    }

    fn check_width(&self, features: &ArrayView2<'_, f64>) -> EffectorResult<()> {
        if features.ncols() != self.n_features {
            return Err(EffectorError::ModelIncompatible(format!(
                "forest expects {} features, got {}",
                self.n_features,
                features.ncols()
            )));
        }
        Ok(())
    }

    fn sample_proba(&self, sample: ArrayView1<'_, f64>) -> Vec<f64> {
        let mut proba = vec![0.0; self.classes.len()];
        for tree in &self.trees {
            let leaf = tree.leaf(sample);
            let total: f64 = leaf.iter().sum();
            for (p, v) in proba.iter_mut().zip(leaf) {
                *p += v / total;
            }
        }
        let n_trees = self.trees.len() as f64;
        proba.iter_mut().for_each(|p| *p /= n_trees);
        proba
    }
}

impl ClassifierArtifact for DecisionForest {
    fn n_features(&self) -> usize {
        self.n_features
    }

    fn predict(&self, features: ArrayView2<'_, f64>) -> EffectorResult<Vec<i64>> {
        self.check_width(&features)?;
        Ok(features
            .rows()
            .into_iter()
            .map(|sample| {
                let proba = self.sample_proba(sample);
                let mut best = 0;
                for (class, p) in proba.iter().enumerate() {
                    if *p > proba[best] {
                        best = class;
                    }
                }
                self.classes[best]
            })
            .collect())
    }

    fn predict_proba(&self, features: ArrayView2<'_, f64>) -> EffectorResult<Array2<f64>> {
        self.check_width(&features)?;
        let n_classes = self.classes.len();
        let mut proba = Array2::zeros((features.nrows(), n_classes));
        for (sample, mut row) in features.rows().into_iter().zip(proba.rows_mut()) {
            for (out, p) in row.iter_mut().zip(self.sample_proba(sample)) {
                *out = p;
            }
        }
        Ok(proba)
    }

    fn describe(&self) -> String {
        format!(
            "decision forest, {} trees, {} features",
            self.trees.len(),
            self.n_features
        )
    }
}
