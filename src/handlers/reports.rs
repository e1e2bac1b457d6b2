//! Report handler

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::error::AppResult;
use crate::logic::record::ClinicalRecord;
use crate::logic::render::{radar, report};
use crate::logic::run_assessment;
use crate::AppState;

/// Generate the full assessment report as a downloadable PNG.
///
/// A radar-chart failure does not fail the report: the composer is given
/// no chart and renders its placeholder instead.
pub async fn create(
    State(state): State<AppState>,
    Json(record): Json<ClinicalRecord>,
) -> AppResult<Response> {
    let assessment = run_assessment(&state.engine, &record)?;

    let chart = match assessment.vector.as_ref() {
        Some(vector) => match radar::render(vector) {
            Ok(chart) => Some(chart),
            Err(e) => {
                tracing::warn!("Radar chart failed, degrading report: {}", e);
                None
            }
        },
        None => None,
    };

    let png = report::compose(&assessment, chart.as_ref())?;
    let filename = format!(
        "CardioInsight_Report_{}.png",
        assessment.generated_at.format("%Y%m%d_%H%M%S")
    );

    Ok((
        [
            (header::CONTENT_TYPE, "image/png".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        png,
    )
        .into_response())
}
