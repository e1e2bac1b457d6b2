//! Assessment pipeline
//!
//! One linear run per request: validate and vectorize the record, score
//! it, attribute the score to features, interpret the risk band. Chart
//! and report rendering consume the resulting `Assessment`.

pub mod explain;
pub mod features;
pub mod model;
pub mod population;
pub mod record;
pub mod render;
pub mod risk;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::AppResult;

use explain::Explanation;
use features::FeatureVector;
use model::forest::PredictionResult;
use model::Engine;
use record::ClinicalRecord;
use risk::{Recommendation, RiskFactor, RiskLevel};

/// Everything derived from one clinical record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Assessment {
    pub assessment_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub record: ClinicalRecord,
    #[serde(skip)]
    pub vector: Option<FeatureVector>,
    pub prediction: PredictionResult,
    pub risk_level: RiskLevel,
    pub risk_factors: Vec<RiskFactor>,
    pub recommendations: Vec<Recommendation>,
    pub explanation: Explanation,
}

impl Assessment {
    /// Short report identifier, e.g. `CI-20260829-1a2b3c`.
    pub fn report_id(&self) -> String {
        let short = &self.assessment_id.simple().to_string()[..6];
        format!("CI-{}-{}", self.generated_at.format("%Y%m%d"), short)
    }
}

/// Run the full pipeline for one record.
pub fn run_assessment(engine: &Engine, record: &ClinicalRecord) -> AppResult<Assessment> {
    let vector = FeatureVector::build(record, &engine.scaler)?;
    let prediction = engine.predict(&vector)?;
    let explanation = explain::explain(&engine.forest, &vector)?;
    let risk_level = RiskLevel::from_prediction(&prediction);

    Ok(Assessment {
        assessment_id: Uuid::new_v4(),
        generated_at: Utc::now(),
        record: record.clone(),
        vector: Some(vector),
        prediction,
        risk_level,
        risk_factors: risk::risk_factors(record),
        recommendations: risk::recommendations(risk_level, record),
        explanation,
    })
}
