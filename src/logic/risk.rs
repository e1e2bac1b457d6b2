//! Risk interpretation: bands, factor analysis, recommendations

use serde::{Deserialize, Serialize};

use crate::logic::model::forest::PredictionResult;
use crate::logic::record::ClinicalRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    LowModerate,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    /// Band boundaries of the clinical template.
    pub fn from_prediction(prediction: &PredictionResult) -> Self {
        if prediction.label == 1 || prediction.probability >= 0.75 {
            RiskLevel::Critical
        } else if prediction.probability >= 0.6 {
            RiskLevel::High
        } else if prediction.probability >= 0.4 {
            RiskLevel::Moderate
        } else if prediction.probability >= 0.2 {
            RiskLevel::LowModerate
        } else {
            RiskLevel::Low
        }
    }

    pub fn display(&self) -> &'static str {
        match self {
            RiskLevel::Low => "LOW RISK",
            RiskLevel::LowModerate => "LOW-MODERATE RISK",
            RiskLevel::Moderate => "MODERATE RISK",
            RiskLevel::High => "HIGH RISK",
            RiskLevel::Critical => "CRITICAL RISK",
        }
    }

    /// Report accent color (RGB).
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            RiskLevel::Low => (16, 185, 129),
            RiskLevel::LowModerate | RiskLevel::Moderate => (245, 158, 11),
            RiskLevel::High => (239, 68, 68),
            RiskLevel::Critical => (185, 28, 28),
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Urgent,
    High,
    Moderate,
    Routine,
}

impl Priority {
    pub fn display(&self) -> &'static str {
        match self {
            Priority::Urgent => "URGENT",
            Priority::High => "HIGH",
            Priority::Moderate => "MODERATE",
            Priority::Routine => "ROUTINE",
        }
    }

    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Priority::Urgent => (239, 68, 68),
            Priority::High => (245, 158, 11),
            Priority::Moderate => (59, 130, 246),
            Priority::Routine => (16, 185, 129),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    pub priority: Priority,
    pub text: String,
}

fn rec(priority: Priority, text: &str) -> Recommendation {
    Recommendation {
        priority,
        text: text.to_string(),
    }
}

/// Priority-tagged clinical recommendations for the risk band, adjusted
/// by individual record findings. Capped at 8 entries.
pub fn recommendations(level: RiskLevel, record: &ClinicalRecord) -> Vec<Recommendation> {
    let mut recs = match level {
        RiskLevel::Critical | RiskLevel::High => vec![
            rec(Priority::Urgent, "Immediate cardiology consultation within 24-48 hours"),
            rec(Priority::Urgent, "Consider emergency department evaluation if symptomatic"),
            rec(Priority::High, "Comprehensive cardiac catheterization evaluation"),
            rec(Priority::High, "Initiate dual antiplatelet therapy if not contraindicated"),
            rec(Priority::High, "Aggressive statin therapy (high-intensity)"),
            rec(Priority::Moderate, "Lifestyle modification counseling with cardiac rehabilitation"),
        ],
        RiskLevel::Moderate => vec![
            rec(Priority::High, "Cardiology consultation within 2-4 weeks"),
            rec(Priority::High, "Exercise stress testing or cardiac imaging"),
            rec(Priority::Moderate, "Initiate or optimize statin therapy"),
            rec(Priority::Moderate, "Blood pressure optimization (target <130/80 mmHg)"),
        ],
        RiskLevel::LowModerate | RiskLevel::Low => vec![
            rec(Priority::Moderate, "Routine cardiology follow-up within 6-12 months"),
            rec(Priority::Moderate, "Maintain healthy lifestyle practices"),
            rec(Priority::Routine, "Annual lipid screening and blood pressure monitoring"),
        ],
    };

    if record.chol > 240 {
        recs.insert(
            1.min(recs.len()),
            rec(Priority::High, "Aggressive lipid management - consider PCSK9 inhibitors"),
        );
    }
    if record.trestbps > 140 {
        recs.insert(
            1.min(recs.len()),
            rec(Priority::High, "Hypertension management - consider ACE inhibitor/ARB"),
        );
    }
    if record.exang == 1 {
        recs.insert(
            0,
            rec(Priority::Urgent, "Evaluate for unstable angina - consider immediate intervention"),
        );
    }

    recs.truncate(8);
    recs
}

/// One bar of the risk-factor analysis, score in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskFactor {
    pub name: String,
    pub score: f64,
}

/// Heuristic per-factor scores shown alongside the model output.
pub fn risk_factors(record: &ClinicalRecord) -> Vec<RiskFactor> {
    let factor = |name: &str, score: f64| RiskFactor {
        name: name.to_string(),
        score: score.clamp(0.0, 1.0),
    };
    vec![
        factor("Age Factor", record.age as f64 / 80.0),
        factor("Blood Pressure", record.trestbps as f64 / 180.0),
        factor("Cholesterol Level", record.chol as f64 / 300.0),
        factor("Heart Rate Reserve", 1.0 - (record.thalach as f64 / 200.0).min(1.0)),
        factor("ST Depression", record.oldpeak / 4.0),
    ]
}
