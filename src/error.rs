//! Error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Startup-fatal artifact errors
    #[error("artifact not found: {0}")]
    ArtifactNotFound(String),
    #[error("artifact corrupt: {0}")]
    ArtifactCorrupt(String),

    // Per-field input errors, recoverable by the caller
    #[error("validation failed: {0}")]
    Validation(String),

    // Builder/model mismatch, caller defect
    #[error("inference failed: {0}")]
    Inference(String),

    // Drawing-surface failures
    #[error("render failed: {0}")]
    Render(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ArtifactNotFound(msg) | AppError::ArtifactCorrupt(msg) => {
                tracing::error!("Artifact error: {}", msg);
                (StatusCode::SERVICE_UNAVAILABLE, "Model artifacts unavailable".to_string())
            }
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Inference(msg) => {
                tracing::error!("Inference error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Risk assessment failed".to_string())
            }
            AppError::Render(msg) => {
                tracing::error!("Render error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Report unavailable".to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<&str> = errors.field_errors().keys().copied().collect();
        fields.sort_unstable();
        AppError::Validation(format!("invalid value for field(s): {}", fields.join(", ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_names_fields() {
        let err = AppError::Validation("invalid value for field(s): sex".to_string());
        assert!(err.to_string().contains("sex"));
    }
}
