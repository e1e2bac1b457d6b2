//! Standardization scaler artifact
//!
//! Mirrors the `StandardScaler` fitted at training time: stateless after
//! load, reapplied identically at inference.

use serde::{Deserialize, Serialize};

use crate::logic::features::layout::{names_match, FEATURE_COUNT};

/// Per-feature standardization parameters, `(x - mean) / scale`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StandardScaler {
    pub format_version: u32,
    pub feature_names: Vec<String>,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    /// Internal consistency checks, run once at load time.
    pub fn validate(&self) -> Result<(), String> {
        if !names_match(&self.feature_names) {
            return Err("scaler feature names do not match the feature layout".to_string());
        }
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(format!(
                "scaler parameter width {}/{} does not match {} features",
                self.mean.len(),
                self.scale.len(),
                FEATURE_COUNT
            ));
        }
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err("scaler mean contains a non-finite value".to_string());
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err("scaler scale contains a zero or non-finite value".to_string());
        }
        Ok(())
    }

    /// Apply the standardization transform.
    pub fn transform(&self, raw: &[f64; FEATURE_COUNT]) -> [f64; FEATURE_COUNT] {
        let mut scaled = [0.0f64; FEATURE_COUNT];
        for i in 0..FEATURE_COUNT {
            scaled[i] = (raw[i] - self.mean[i]) / self.scale[i];
        }
        scaled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::model::demo;

    #[test]
    fn test_demo_scaler_is_valid() {
        assert!(demo::demo_scaler().validate().is_ok());
    }

    #[test]
    fn test_transform_centers_the_mean() {
        let scaler = demo::demo_scaler();
        let mut raw = [0.0f64; FEATURE_COUNT];
        raw.copy_from_slice(&scaler.mean);
        let scaled = scaler.transform(&raw);
        for v in scaled {
            assert!(v.abs() < 1e-12);
        }
    }

    #[test]
    fn test_zero_scale_rejected() {
        let mut scaler = demo::demo_scaler();
        scaler.scale[3] = 0.0;
        assert!(scaler.validate().is_err());
    }

    #[test]
    fn test_wrong_names_rejected() {
        let mut scaler = demo::demo_scaler();
        scaler.feature_names[0] = "years".to_string();
        assert!(scaler.validate().is_err());
    }
}
