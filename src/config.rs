//! Configuration module

use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// Path to the serialized random forest artifact
    pub model_path: String,

    /// Path to the serialized feature scaler artifact
    pub scaler_path: String,

    /// Probability cut-off for the positive class
    pub decision_threshold: f64,

    /// Environment (development, production)
    pub environment: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8501),

            model_path: env::var("CARDIO_MODEL_PATH")
                .unwrap_or_else(|_| "models/forest.json".to_string()),

            scaler_path: env::var("CARDIO_SCALER_PATH")
                .unwrap_or_else(|_| "models/scaler.json".to_string()),

            decision_threshold: env::var("CARDIO_DECISION_THRESHOLD")
                .ok()
                .and_then(|t| t.parse().ok())
                .filter(|t| (0.0..=1.0).contains(t))
                .unwrap_or(0.5),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
        }
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8501,
            model_path: "models/forest.json".to_string(),
            scaler_path: "models/scaler.json".to_string(),
            decision_threshold: 0.5,
            environment: "development".to_string(),
        }
    }
}
