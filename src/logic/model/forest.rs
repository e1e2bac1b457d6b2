//! Random forest classifier artifact
//!
//! Trees are stored explicitly (not as an opaque runtime graph) because
//! the explainer needs to walk decision paths; probability estimation
//! and path attribution both read the same node structure.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::logic::features::layout::names_match;

/// One node of a binary decision tree. `value` is the class-probability
/// distribution observed at the node during training.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
        value: [f64; 2],
    },
    Leaf {
        value: [f64; 2],
    },
}

impl TreeNode {
    pub fn value(&self) -> [f64; 2] {
        match self {
            TreeNode::Split { value, .. } | TreeNode::Leaf { value } => *value,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Class-probability distribution at the leaf reached by `x`.
    /// Assumes the tree passed `validate`, so traversal terminates.
    pub fn proba(&self, x: &[f64]) -> [f64; 2] {
        let mut idx = 0usize;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    idx = if x[*feature] <= *threshold { *left } else { *right };
                }
            }
        }
    }

    fn validate(&self, n_features: usize) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (i, node) in self.nodes.iter().enumerate() {
            if let TreeNode::Split {
                feature,
                threshold,
                left,
                right,
                ..
            } = node
            {
                if *feature >= n_features {
                    return Err(format!("node {i} splits on feature {feature} out of range"));
                }
                if !threshold.is_finite() {
                    return Err(format!("node {i} has a non-finite threshold"));
                }
                // Children strictly after the parent: guarantees the walk
                // in `proba` terminates.
                if *left <= i || *right <= i || *left >= self.nodes.len() || *right >= self.nodes.len() {
                    return Err(format!("node {i} has invalid child indices {left}/{right}"));
                }
            }
            let value = node.value();
            if value.iter().any(|p| !p.is_finite() || *p < 0.0)
                || (value[0] + value[1] - 1.0).abs() > 1e-6
            {
                return Err(format!("node {i} has an invalid class distribution"));
            }
        }
        Ok(())
    }
}

/// Serialized random forest: format header plus the trees themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RandomForest {
    pub format_version: u32,
    pub model_type: String,
    pub n_features: usize,
    pub n_classes: usize,
    pub feature_names: Vec<String>,
    pub trees: Vec<DecisionTree>,
}

impl RandomForest {
    /// Internal consistency checks, run once at load time.
    pub fn validate(&self) -> Result<(), String> {
        if self.n_classes != 2 {
            return Err(format!("expected a binary classifier, got {} classes", self.n_classes));
        }
        if !names_match(&self.feature_names) || self.n_features != self.feature_names.len() {
            return Err("forest feature names do not match the feature layout".to_string());
        }
        if self.trees.is_empty() {
            return Err("forest has no trees".to_string());
        }
        for (t, tree) in self.trees.iter().enumerate() {
            tree.validate(self.n_features)
                .map_err(|e| format!("tree {t}: {e}"))?;
        }
        Ok(())
    }

    /// Probability of the positive class, averaged over all trees.
    pub fn predict_proba(&self, x: &[f64]) -> AppResult<f64> {
        if x.len() != self.n_features {
            return Err(AppError::Inference(format!(
                "feature vector has {} values, model expects {}",
                x.len(),
                self.n_features
            )));
        }
        let sum: f64 = self.trees.iter().map(|t| t.proba(x)[1]).sum();
        Ok(sum / self.trees.len() as f64)
    }
}

/// Classifier output for one record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionResult {
    /// 1 = heart disease predicted
    pub label: u8,
    /// Probability of the positive class, in [0, 1]
    pub probability: f64,
    /// Decision threshold the label was derived with
    pub threshold: f64,
    pub inference_time_us: u64,
}

/// Label from probability: 1 iff probability >= threshold.
pub fn classify(probability: f64, threshold: f64) -> u8 {
    u8::from(probability >= threshold)
}
