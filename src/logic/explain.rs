//! Prediction explanation via tree-path attribution
//!
//! Walks each tree's decision path and credits every split feature with
//! the change in the node's positive-class value. The baseline is the
//! mean root value across trees, so for any record:
//!
//!   baseline + sum(contributions) == predicted probability
//!
//! The reference distribution is the training distribution baked into the
//! node values; no external background dataset is required.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::logic::features::{FeatureVector, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::logic::model::forest::{RandomForest, TreeNode};

/// Contributions above this magnitude are called out as significant
/// drivers in the plain-English summary.
const SIGNIFICANT_CONTRIBUTION: f64 = 0.05;

/// Signed contribution of one feature to the positive-class probability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureContribution {
    pub name: String,
    /// Patient value in original units
    pub value: f64,
    /// Signed contribution to the probability
    pub contribution: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Explanation {
    /// Expected positive-class probability before seeing the record
    pub baseline: f64,
    /// One entry per feature, in layout order
    pub contributions: Vec<FeatureContribution>,
    /// Plain-English summary of the top drivers
    pub summary: String,
}

impl Explanation {
    /// Contributions sorted by descending magnitude.
    pub fn ranked(&self) -> Vec<&FeatureContribution> {
        let mut ranked: Vec<&FeatureContribution> = self.contributions.iter().collect();
        ranked.sort_by(|a, b| {
            b.contribution
                .abs()
                .partial_cmp(&a.contribution.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked
    }
}

/// Explain the positive-class probability for one record.
pub fn explain(forest: &RandomForest, vector: &FeatureVector) -> AppResult<Explanation> {
    let x = vector.scaled_slice();
    if x.len() != forest.n_features {
        return Err(AppError::Inference(format!(
            "feature vector has {} values, model expects {}",
            x.len(),
            forest.n_features
        )));
    }

    let mut contributions = [0.0f64; FEATURE_COUNT];
    let mut baseline = 0.0f64;

    for tree in &forest.trees {
        let mut idx = 0usize;
        let mut current = tree.nodes[idx].value()[1];
        baseline += current;

        loop {
            match &tree.nodes[idx] {
                TreeNode::Leaf { .. } => break,
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                    ..
                } => {
                    let next = if x[*feature] <= *threshold { *left } else { *right };
                    let next_value = tree.nodes[next].value()[1];
                    contributions[*feature] += next_value - current;
                    current = next_value;
                    idx = next;
                }
            }
        }
    }

    let n = forest.trees.len() as f64;
    baseline /= n;
    for c in contributions.iter_mut() {
        *c /= n;
    }

    let entries: Vec<FeatureContribution> = FEATURE_LAYOUT
        .iter()
        .enumerate()
        .map(|(i, name)| FeatureContribution {
            name: name.to_string(),
            value: vector.raw[i],
            contribution: contributions[i],
        })
        .collect();

    let summary = summarize(&entries);

    Ok(Explanation {
        baseline,
        contributions: entries,
        summary,
    })
}

/// Plain-English summary of the top three prediction drivers.
fn summarize(contributions: &[FeatureContribution]) -> String {
    let mut ranked: Vec<&FeatureContribution> = contributions.iter().collect();
    ranked.sort_by(|a, b| {
        b.contribution
            .abs()
            .partial_cmp(&a.contribution.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut summary = String::from("The model's prediction was primarily influenced by these factors:\n");
    for entry in ranked.iter().take(3) {
        let direction = if entry.contribution > 0.0 { "increased" } else { "decreased" };
        let impact = if entry.contribution.abs() > SIGNIFICANT_CONTRIBUTION {
            "significantly"
        } else {
            "slightly"
        };
        summary.push_str(&format!(
            "- The {} value of {} {} {} the predicted risk.\n",
            entry.name, entry.value, impact, direction
        ));
    }
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::demo;
    use crate::logic::record::ClinicalRecord;

    fn sample_record() -> ClinicalRecord {
        ClinicalRecord {
            age: 63,
            sex: 1,
            cp: 3,
            trestbps: 145,
            chol: 233,
            fbs: 1,
            restecg: 0,
            thalach: 150,
            exang: 0,
            oldpeak: 2.3,
            slope: 0,
            ca: 0,
            thal: 1,
        }
    }

    #[test]
    fn test_contributions_sum_to_probability() {
        let forest = demo::demo_forest();
        let scaler = demo::demo_scaler();
        let vector = FeatureVector::build(&sample_record(), &scaler).unwrap();

        let explanation = explain(&forest, &vector).unwrap();
        let probability = forest.predict_proba(vector.scaled_slice()).unwrap();

        let total: f64 = explanation.contributions.iter().map(|c| c.contribution).sum();
        assert!(
            (explanation.baseline + total - probability).abs() < 1e-9,
            "baseline {} + contributions {} != probability {}",
            explanation.baseline,
            total,
            probability
        );
    }

    #[test]
    fn test_one_entry_per_feature() {
        let forest = demo::demo_forest();
        let scaler = demo::demo_scaler();
        let vector = FeatureVector::build(&sample_record(), &scaler).unwrap();
        let explanation = explain(&forest, &vector).unwrap();
        assert_eq!(explanation.contributions.len(), FEATURE_COUNT);
        for (entry, name) in explanation.contributions.iter().zip(FEATURE_LAYOUT.iter()) {
            assert_eq!(entry.name, *name);
        }
    }

    #[test]
    fn test_summary_names_top_drivers() {
        let forest = demo::demo_forest();
        let scaler = demo::demo_scaler();
        let vector = FeatureVector::build(&sample_record(), &scaler).unwrap();
        let explanation = explain(&forest, &vector).unwrap();

        assert!(explanation.summary.starts_with("The model's prediction"));
        let top = explanation.ranked()[0].name.clone();
        assert!(explanation.summary.contains(&top));
    }

    #[test]
    fn test_ranked_is_sorted_by_magnitude() {
        let forest = demo::demo_forest();
        let scaler = demo::demo_scaler();
        let vector = FeatureVector::build(&sample_record(), &scaler).unwrap();
        let explanation = explain(&forest, &vector).unwrap();
        let ranked = explanation.ranked();
        for pair in ranked.windows(2) {
            assert!(pair[0].contribution.abs() >= pair[1].contribution.abs());
        }
    }
}
