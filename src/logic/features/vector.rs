//! Feature Vector - the single input shape fed to the model
//!
//! Keeps both the raw clinical values (original units, used by the radar
//! chart and the report) and the scaled values (what the forest was
//! trained on). Built deterministically from a validated `ClinicalRecord`.

use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::logic::model::scaler::StandardScaler;
use crate::logic::record::ClinicalRecord;

use super::layout::{feature_index, layout_hash, FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};

/// Versioned feature vector with layout metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout
    pub layout_hash: u32,
    /// Clinical values in original units, in `FEATURE_LAYOUT` order
    pub raw: [f64; FEATURE_COUNT],
    /// Standardized values fed to the model
    pub scaled: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Validate the record, order its fields into the model layout and
    /// apply the scaler transform.
    pub fn build(record: &ClinicalRecord, scaler: &StandardScaler) -> AppResult<Self> {
        record.validate_domains()?;
        let raw = record.to_ordered_values();
        let scaled = scaler.transform(&raw);
        Ok(Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            raw,
            scaled,
        })
    }

    /// Raw (original units) value by feature name.
    pub fn raw_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).map(|i| self.raw[i])
    }

    pub fn scaled_slice(&self) -> &[f64] {
        &self.scaled
    }

    pub fn feature_names(&self) -> &'static [&'static str] {
        FEATURE_LAYOUT
    }
}
