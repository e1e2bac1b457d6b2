//! Demo artifacts
//!
//! A small hand-built forest and scaler with the exact production schema.
//! Used by `gen_demo_model` for local runs and by the test suite as
//! fixtures; not a clinically trained model.

use crate::logic::features::{FEATURE_COUNT, FEATURE_LAYOUT};

use super::forest::{DecisionTree, RandomForest, TreeNode};
use super::scaler::StandardScaler;

// Feature positions in FEATURE_LAYOUT, checked by test below.
const AGE: usize = 0;
const CP: usize = 2;
const THALACH: usize = 7;
const EXANG: usize = 8;
const OLDPEAK: usize = 9;
const CA: usize = 11;
const THAL: usize = 12;

fn split(feature: usize, threshold: f64, left: usize, right: usize, value: [f64; 2]) -> TreeNode {
    TreeNode::Split {
        feature,
        threshold,
        left,
        right,
        value,
    }
}

fn leaf(value: [f64; 2]) -> TreeNode {
    TreeNode::Leaf { value }
}

/// Scaler with the training-set statistics of the reference dataset.
pub fn demo_scaler() -> StandardScaler {
    StandardScaler {
        format_version: 1,
        feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        mean: vec![
            54.37, 0.68, 0.97, 131.62, 246.26, 0.15, 0.53, 149.65, 0.33, 1.04, 1.40, 0.73, 2.31,
        ],
        scale: vec![
            9.08, 0.47, 1.03, 17.54, 51.83, 0.36, 0.53, 22.91, 0.47, 1.16, 0.62, 1.02, 0.61,
        ],
    }
}

/// Five shallow trees over standardized inputs, splitting on the classic
/// high-signal features (ST depression, vessel count, chest pain type,
/// thalassemia, max heart rate).
pub fn demo_forest() -> RandomForest {
    let trees = vec![
        DecisionTree {
            nodes: vec![
                split(OLDPEAK, 0.0, 1, 2, [0.50, 0.50]),
                leaf([0.72, 0.28]),
                split(THAL, -1.0, 3, 4, [0.30, 0.70]),
                leaf([0.45, 0.55]),
                leaf([0.18, 0.82]),
            ],
        },
        DecisionTree {
            nodes: vec![
                split(CA, -0.2, 1, 2, [0.50, 0.50]),
                leaf([0.62, 0.38]),
                split(AGE, 0.5, 3, 4, [0.30, 0.70]),
                leaf([0.40, 0.60]),
                leaf([0.25, 0.75]),
            ],
        },
        DecisionTree {
            nodes: vec![
                split(CP, 0.5, 1, 4, [0.50, 0.50]),
                split(THALACH, 0.0, 2, 3, [0.62, 0.38]),
                leaf([0.50, 0.50]),
                leaf([0.75, 0.25]),
                leaf([0.28, 0.72]),
            ],
        },
        DecisionTree {
            nodes: vec![
                split(THAL, 0.0, 1, 2, [0.50, 0.50]),
                leaf([0.64, 0.36]),
                split(OLDPEAK, 0.3, 3, 4, [0.32, 0.68]),
                leaf([0.44, 0.56]),
                leaf([0.15, 0.85]),
            ],
        },
        DecisionTree {
            nodes: vec![
                split(THALACH, -0.4, 1, 4, [0.50, 0.50]),
                split(EXANG, 0.5, 2, 3, [0.35, 0.65]),
                leaf([0.45, 0.55]),
                leaf([0.20, 0.80]),
                leaf([0.60, 0.40]),
            ],
        },
    ];

    RandomForest {
        format_version: 1,
        model_type: "random_forest".to_string(),
        n_features: FEATURE_COUNT,
        n_classes: 2,
        feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        trees,
    }
}
