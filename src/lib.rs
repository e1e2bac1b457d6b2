//! CardioInsight Server
//!
//! Cardiovascular risk assessment service. Loads a random-forest
//! classifier and a feature scaler once at startup, then serves a
//! synchronous assessment pipeline per request:
//!
//! ```text
//! ClinicalRecord -> validate -> FeatureVector -> predict_proba
//!                -> path attribution -> radar chart -> report PNG
//! ```
//!
//! Shared state is immutable after load; requests never mutate it.

pub mod config;
pub mod error;
pub mod handlers;
pub mod logic;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub use error::{AppError, AppResult};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<logic::model::Engine>,
    pub config: config::Config,
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/api/v1/engine", get(handlers::engine::status))
        .route("/api/v1/assessments", post(handlers::assess::create))
        .route("/api/v1/charts/radar", post(handlers::charts::render))
        .route("/api/v1/reports", post(handlers::reports::create))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
