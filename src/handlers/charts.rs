//! Radar chart handler

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::AppResult;
use crate::logic::features::FeatureVector;
use crate::logic::record::ClinicalRecord;
use crate::logic::render::{encode_png, radar};
use crate::AppState;

/// Render the patient-vs-population radar chart as a PNG.
pub async fn render(
    State(state): State<AppState>,
    Json(record): Json<ClinicalRecord>,
) -> AppResult<Response> {
    let vector = FeatureVector::build(&record, &state.engine.scaler)?;
    let chart = radar::render(&vector)?;
    let png = encode_png(&chart)?;

    Ok(([(header::CONTENT_TYPE, "image/png".to_string())], png).into_response())
}
