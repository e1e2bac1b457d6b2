//! Engine status handler

use axum::{extract::State, Json};

use crate::logic::model::EngineStatus;
use crate::AppState;

/// Model metadata and latency stats for the loaded artifacts.
pub async fn status(State(state): State<AppState>) -> Json<EngineStatus> {
    Json(state.engine.status())
}
