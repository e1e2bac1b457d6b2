//! Artifact loader
//!
//! Reads the forest and scaler artifacts once at process startup. Any
//! failure here is fatal: the service cannot serve predictions without
//! its artifacts, so there is no lazy or concurrent refresh path.

use std::fs;
use std::io;
use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::Config;
use crate::error::{AppError, AppResult};

use super::{Engine, EngineMetrics, ModelMetadata};
use super::forest::RandomForest;
use super::scaler::StandardScaler;

fn read_artifact(path: &str) -> AppResult<Vec<u8>> {
    fs::read(path).map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            AppError::ArtifactNotFound(path.to_string())
        } else {
            AppError::ArtifactCorrupt(format!("{path}: {e}"))
        }
    })
}

fn digest(bytes: &[u8]) -> String {
    hex::encode(Sha256::digest(bytes))
}

/// Load both artifacts and assemble the inference engine.
pub fn load(config: &Config) -> AppResult<Engine> {
    tracing::info!(path = %config.model_path, "Loading model artifact");
    let model_bytes = read_artifact(&config.model_path)?;
    tracing::info!(sha256 = %digest(&model_bytes), bytes = model_bytes.len(), "Model artifact read");

    let forest: RandomForest = serde_json::from_slice(&model_bytes)
        .map_err(|e| AppError::ArtifactCorrupt(format!("{}: {e}", config.model_path)))?;
    forest
        .validate()
        .map_err(|e| AppError::ArtifactCorrupt(format!("{}: {e}", config.model_path)))?;

    tracing::info!(path = %config.scaler_path, "Loading scaler artifact");
    let scaler_bytes = read_artifact(&config.scaler_path)?;
    tracing::info!(sha256 = %digest(&scaler_bytes), bytes = scaler_bytes.len(), "Scaler artifact read");

    let scaler: StandardScaler = serde_json::from_slice(&scaler_bytes)
        .map_err(|e| AppError::ArtifactCorrupt(format!("{}: {e}", config.scaler_path)))?;
    scaler
        .validate()
        .map_err(|e| AppError::ArtifactCorrupt(format!("{}: {e}", config.scaler_path)))?;

    let metadata = ModelMetadata {
        model_path: Path::new(&config.model_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| config.model_path.clone()),
        model_type: forest.model_type.clone(),
        trees: forest.trees.len(),
        features: forest.n_features,
        decision_threshold: config.decision_threshold,
        loaded_at: chrono::Utc::now(),
    };

    tracing::info!(
        trees = metadata.trees,
        features = metadata.features,
        threshold = metadata.decision_threshold,
        "Inference engine ready"
    );

    Ok(Engine {
        forest,
        scaler,
        metadata,
        metrics: EngineMetrics::default(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::demo;
    use std::fs;

    fn write_demo_artifacts(dir: &std::path::Path) -> Config {
        let model_path = dir.join("forest.json");
        let scaler_path = dir.join("scaler.json");
        fs::write(&model_path, serde_json::to_vec(&demo::demo_forest()).unwrap()).unwrap();
        fs::write(&scaler_path, serde_json::to_vec(&demo::demo_scaler()).unwrap()).unwrap();
        Config {
            model_path: model_path.to_string_lossy().into_owned(),
            scaler_path: scaler_path.to_string_lossy().into_owned(),
            ..Config::default()
        }
    }

    #[test]
    fn test_load_demo_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_artifacts(dir.path());
        let engine = load(&config).unwrap();
        assert_eq!(engine.metadata.trees, 5);
        assert_eq!(engine.metadata.features, 13);
    }

    #[test]
    fn test_missing_model_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = write_demo_artifacts(dir.path());
        config.model_path = dir.path().join("missing.json").to_string_lossy().into_owned();
        let err = load(&config).unwrap_err();
        assert!(matches!(err, AppError::ArtifactNotFound(_)));
    }

    #[test]
    fn test_garbage_model_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_artifacts(dir.path());
        fs::write(&config.model_path, b"not json at all").unwrap();
        let err = load(&config).unwrap_err();
        assert!(matches!(err, AppError::ArtifactCorrupt(_)));
    }

    #[test]
    fn test_wrong_feature_names_is_corrupt() {
        let dir = tempfile::tempdir().unwrap();
        let config = write_demo_artifacts(dir.path());
        let mut forest = demo::demo_forest();
        forest.feature_names[0] = "years".to_string();
        fs::write(&config.model_path, serde_json::to_vec(&forest).unwrap()).unwrap();
        let err = load(&config).unwrap_err();
        assert!(matches!(err, AppError::ArtifactCorrupt(_)));
    }
}
