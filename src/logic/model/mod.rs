//! Inference engine: artifacts, prediction and engine status

pub mod demo;
pub mod forest;
pub mod loader;
pub mod scaler;

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::logic::features::FeatureVector;

use forest::{classify, PredictionResult, RandomForest};
use scaler::StandardScaler;

/// Loaded once at startup, immutable afterwards.
#[derive(Debug)]
pub struct Engine {
    pub forest: RandomForest,
    pub scaler: StandardScaler,
    pub metadata: ModelMetadata,
    pub metrics: EngineMetrics,
}

impl Engine {
    /// Probability estimation on the scaled vector, with latency tracking.
    pub fn predict(&self, vector: &FeatureVector) -> AppResult<PredictionResult> {
        let start = Instant::now();
        let probability = self.forest.predict_proba(vector.scaled_slice())?;
        let inference_time_us = start.elapsed().as_micros() as u64;
        self.metrics.record(inference_time_us);

        Ok(PredictionResult {
            label: classify(probability, self.metadata.decision_threshold),
            probability,
            threshold: self.metadata.decision_threshold,
            inference_time_us,
        })
    }

    pub fn status(&self) -> EngineStatus {
        let (avg_latency_ms, inference_count) = self.metrics.snapshot();
        EngineStatus {
            model_loaded: true,
            model_name: self.metadata.model_path.clone(),
            model_type: self.metadata.model_type.clone(),
            trees: self.metadata.trees,
            features: self.metadata.features,
            decision_threshold: self.metadata.decision_threshold,
            avg_latency_ms,
            inference_count,
            loaded_at: self.metadata.loaded_at,
        }
    }
}

/// Model metadata captured at load time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelMetadata {
    pub model_path: String,
    pub model_type: String,
    pub trees: usize,
    pub features: usize,
    pub decision_threshold: f64,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

/// Latency stats, shared across requests.
#[derive(Debug, Default)]
pub struct EngineMetrics {
    latency_sum_us: AtomicU64,
    inference_count: AtomicU64,
}

impl EngineMetrics {
    pub fn record(&self, latency_us: u64) {
        self.latency_sum_us.fetch_add(latency_us, Ordering::Relaxed);
        self.inference_count.fetch_add(1, Ordering::Relaxed);
    }

    /// (average latency in ms, total inference count)
    pub fn snapshot(&self) -> (f64, u64) {
        let sum = self.latency_sum_us.load(Ordering::Relaxed);
        let count = self.inference_count.load(Ordering::Relaxed);
        let avg = if count > 0 {
            (sum as f64 / count as f64) / 1000.0
        } else {
            0.0
        };
        (avg, count)
    }
}

/// Engine status surfaced over the API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineStatus {
    pub model_loaded: bool,
    pub model_name: String,
    pub model_type: String,
    pub trees: usize,
    pub features: usize,
    pub decision_threshold: f64,
    pub avg_latency_ms: f64,
    pub inference_count: u64,
    pub loaded_at: chrono::DateTime<chrono::Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::record::ClinicalRecord;

    fn demo_engine() -> Engine {
        Engine {
            forest: demo::demo_forest(),
            scaler: demo::demo_scaler(),
            metadata: ModelMetadata {
                model_path: "demo".to_string(),
                model_type: "random_forest".to_string(),
                trees: 5,
                features: 13,
                decision_threshold: 0.5,
                loaded_at: chrono::Utc::now(),
            },
            metrics: EngineMetrics::default(),
        }
    }

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
    fn test_predict_bounds_and_label() {
        let engine = demo_engine();
        let vector = FeatureVector::build(&sample_record(), &engine.scaler).unwrap();
        let result = engine.predict(&vector).unwrap();
        assert!((0.0..=1.0).contains(&result.probability));
        assert_eq!(result.label, u8::from(result.probability >= result.threshold));
    }

    #[test]
    fn test_metrics_accumulate() {
        let engine = demo_engine();
        let vector = FeatureVector::build(&sample_record(), &engine.scaler).unwrap();
        engine.predict(&vector).unwrap();
        engine.predict(&vector).unwrap();
        let (_, count) = engine.metrics.snapshot();
        assert_eq!(count, 2);
        assert_eq!(engine.status().inference_count, 2);
    }
}
