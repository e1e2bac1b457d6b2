//! Population reference values
//!
//! Fixed averages for the continuous features, used as the comparison
//! baseline on the radar chart. Values come from the reference cohort the
//! model was trained against.

/// One radar-chart axis: feature name, population average and the axis
/// maximum used for percent normalization.
#[derive(Debug, Clone, Copy)]
pub struct RadarAxis {
    pub name: &'static str,
    pub average: f64,
    pub max: f64,
}

/// The five continuous features shown on the radar chart.
pub const RADAR_AXES: &[RadarAxis] = &[
    RadarAxis { name: "age", average: 54.0, max: 100.0 },
    RadarAxis { name: "trestbps", average: 131.0, max: 200.0 },
    RadarAxis { name: "chol", average: 246.0, max: 570.0 },
    RadarAxis { name: "thalach", average: 149.0, max: 220.0 },
    RadarAxis { name: "oldpeak", average: 1.0, max: 6.2 },
];

/// Normalize a raw value to percent of its axis maximum, clamped to [0, 100].
pub fn to_percent(axis: &RadarAxis, value: f64) -> f64 {
    (value / axis.max * 100.0).clamp(0.0, 100.0)
}
