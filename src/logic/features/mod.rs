//! Clinical feature schema and vector building

pub mod layout;
pub mod vector;

pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT, FEATURE_VERSION};
pub use vector::FeatureVector;
