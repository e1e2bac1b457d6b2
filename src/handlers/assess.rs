//! Risk assessment handler

use axum::{extract::State, Json};

use crate::error::AppResult;
use crate::logic::record::ClinicalRecord;
use crate::logic::{run_assessment, Assessment};
use crate::AppState;

/// Run the full pipeline for one clinical record and return the
/// assessment as JSON: prediction, risk band, explanation, risk
/// factors and recommendations.
pub async fn create(
    State(state): State<AppState>,
    Json(record): Json<ClinicalRecord>,
) -> AppResult<Json<Assessment>> {
    let assessment = run_assessment(&state.engine, &record)?;
    tracing::debug!(
        id = %assessment.assessment_id,
        probability = assessment.prediction.probability,
        level = %assessment.risk_level,
        "Assessment complete"
    );
    Ok(Json(assessment))
}
