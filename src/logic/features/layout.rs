//! Feature Layout - Centralized Feature Definition
//!
//! The model and scaler artifacts were fitted against this exact column
//! order. Changing the order or the set of features requires retraining
//! and a `FEATURE_VERSION` bump; the CRC32 layout hash catches artifacts
//! produced against a different layout at load time.

use once_cell::sync::Lazy;

/// Current feature layout version.
/// MUST be incremented when the layout changes.
pub const FEATURE_VERSION: u8 = 1;

/// Number of clinical input features.
pub const FEATURE_COUNT: usize = 13;

/// Feature names in the exact order they appear in the vector.
/// This is the single source of truth for the feature layout.
pub const FEATURE_LAYOUT: &[&str] = &[
    "age",      // 0: age in years
    "sex",      // 1: 0 = female, 1 = male
    "cp",       // 2: chest pain type (0-3)
    "trestbps", // 3: resting blood pressure, mmHg
    "chol",     // 4: serum cholesterol, mg/dL
    "fbs",      // 5: fasting blood sugar > 120 mg/dL (0/1)
    "restecg",  // 6: resting ECG result (0-2)
    "thalach",  // 7: maximum heart rate achieved, bpm
    "exang",    // 8: exercise induced angina (0/1)
    "oldpeak",  // 9: exercise-induced ST depression, mm
    "slope",    // 10: slope of the peak exercise ST segment (0-2)
    "ca",       // 11: major vessels colored by fluoroscopy (0-4)
    "thal",     // 12: thalassemia code (0-3)
];

static LAYOUT_HASH: Lazy<u32> = Lazy::new(|| {
    let mut hasher = crc32fast::Hasher::new();
    hasher.update(&[FEATURE_VERSION]);
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(b"|");
    }
    hasher.finalize()
});

/// CRC32 hash of the current feature layout.
pub fn layout_hash() -> u32 {
    *LAYOUT_HASH
}

/// Index of a feature by name.
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&f| f == name)
}

/// Name of a feature by index.
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

#[derive(Debug, thiserror::Error)]
#[error("feature layout mismatch: artifact has version {artifact_version} hash {artifact_hash:#x}, expected version {expected_version} hash {expected_hash:#x}")]
pub struct LayoutMismatchError {
    pub artifact_version: u8,
    pub artifact_hash: u32,
    pub expected_version: u8,
    pub expected_hash: u32,
}

/// Validate that a (version, hash) pair matches the current layout.
pub fn validate_layout(version: u8, hash: u32) -> Result<(), LayoutMismatchError> {
    if version != FEATURE_VERSION || hash != layout_hash() {
        return Err(LayoutMismatchError {
            artifact_version: version,
            artifact_hash: hash,
            expected_version: FEATURE_VERSION,
            expected_hash: layout_hash(),
        });
    }
    Ok(())
}

/// Check that a list of names matches the layout exactly, in order.
pub fn names_match(names: &[String]) -> bool {
    names.len() == FEATURE_COUNT
        && names.iter().zip(FEATURE_LAYOUT.iter()).all(|(a, b)| a == b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_count_matches_constant() {
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_is_stable() {
        assert_eq!(layout_hash(), layout_hash());
    }

    #[test]
    fn test_feature_index_roundtrip() {
        for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
            assert_eq!(feature_index(name), Some(i));
            assert_eq!(feature_name(i), Some(*name));
        }
        assert_eq!(feature_index("nonexistent"), None);
    }

    #[test]
    fn test_validate_layout_rejects_stale_artifacts() {
        assert!(validate_layout(FEATURE_VERSION, layout_hash()).is_ok());
        assert!(validate_layout(FEATURE_VERSION + 1, layout_hash()).is_err());
        assert!(validate_layout(FEATURE_VERSION, layout_hash() ^ 1).is_err());
    }
}
