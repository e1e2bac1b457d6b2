//! End-to-end pipeline and API tests against the bundled demo model.

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use http_body_util::BodyExt;
use tower::ServiceExt;

use cardioinsight_server::config::Config;
use cardioinsight_server::logic::model::{demo, loader};
use cardioinsight_server::logic::record::ClinicalRecord;
use cardioinsight_server::logic::{self, render};
use cardioinsight_server::{create_router, AppState};

const PNG_MAGIC: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn sample_record() -> ClinicalRecord {
    ClinicalRecord {
        age: 63,
        sex: 1,
        cp: 3,
        trestbps: 145,
        chol: 233,
        fbs: 1,
        restecg: 0,
        thalach: 150,
        exang: 0,
        oldpeak: 2.3,
        slope: 0,
        ca: 0,
        thal: 1,
    }
}

/// Write the demo artifacts into a tempdir and load them back through
/// the real loader, the way the server does at startup.
fn demo_config() -> (tempfile::TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let model_path = dir.path().join("forest.json");
    let scaler_path = dir.path().join("scaler.json");
    std::fs::write(
        &model_path,
        serde_json::to_vec(&demo::demo_forest()).unwrap(),
    )
    .unwrap();
    std::fs::write(
        &scaler_path,
        serde_json::to_vec(&demo::demo_scaler()).unwrap(),
    )
    .unwrap();
    let config = Config {
        model_path: model_path.to_string_lossy().into_owned(),
        scaler_path: scaler_path.to_string_lossy().into_owned(),
        ..Config::default()
    };
    (dir, config)
}

fn test_state() -> (tempfile::TempDir, AppState) {
    let (dir, config) = demo_config();
    let engine = loader::load(&config).unwrap();
    (
        dir,
        AppState {
            engine: Arc::new(engine),
            config,
        },
    )
}

#[test]
fn full_pipeline_on_demo_model() {
    let (_dir, config) = demo_config();
    let engine = loader::load(&config).unwrap();
    let assessment = logic::run_assessment(&engine, &sample_record()).unwrap();

    assert!((0.0..=1.0).contains(&assessment.prediction.probability));
    assert_eq!(
        assessment.prediction.label,
        u8::from(assessment.prediction.probability >= assessment.prediction.threshold)
    );
    assert_eq!(assessment.explanation.contributions.len(), 13);

    // Attribution is exact: baseline plus contributions recovers the score.
    let total: f64 = assessment
        .explanation
        .contributions
        .iter()
        .map(|c| c.contribution)
        .sum();
    let reconstructed = assessment.explanation.baseline + total;
    assert!((reconstructed - assessment.prediction.probability).abs() < 1e-9);

    assert!(!assessment.recommendations.is_empty());
    assert_eq!(assessment.risk_factors.len(), 5);
    assert!(assessment.report_id().starts_with("CI-"));
}

#[test]
fn pipeline_is_deterministic() {
    let (_dir, config) = demo_config();
    let engine = loader::load(&config).unwrap();
    let a = logic::run_assessment(&engine, &sample_record()).unwrap();
    let b = logic::run_assessment(&engine, &sample_record()).unwrap();
    assert_eq!(a.prediction.probability, b.prediction.probability);
    assert_eq!(a.prediction.label, b.prediction.label);
    assert_eq!(a.vector, b.vector);
}

#[test]
fn out_of_range_field_is_named() {
    let (_dir, config) = demo_config();
    let engine = loader::load(&config).unwrap();
    let mut record = sample_record();
    record.sex = 2;
    let err = logic::run_assessment(&engine, &record).unwrap_err();
    assert!(err.to_string().contains("sex"), "got: {err}");
}

#[test]
fn report_is_png_with_chart() {
    let (_dir, config) = demo_config();
    let engine = loader::load(&config).unwrap();
    let assessment = logic::run_assessment(&engine, &sample_record()).unwrap();
    let chart = render::radar::render(assessment.vector.as_ref().unwrap()).unwrap();
    let bytes = render::report::compose(&assessment, Some(&chart)).unwrap();
    assert_eq!(&bytes[..8], &PNG_MAGIC);
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let (_dir, state) = test_state();
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["status"], "healthy");
}

#[tokio::test]
async fn assessment_endpoint_returns_full_payload() {
    let (_dir, state) = test_state();
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/assessments")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&sample_record()).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["prediction"]["probability"].is_number());
    assert!(json["risk_level"].is_string());
    assert_eq!(json["explanation"]["contributions"].as_array().unwrap().len(), 13);
    assert!(json["recommendations"].as_array().unwrap().len() <= 8);
}

#[tokio::test]
async fn assessment_endpoint_rejects_bad_field() {
    let (_dir, state) = test_state();
    let app = create_router(state);

    let mut payload = serde_json::to_value(sample_record()).unwrap();
    payload["trestbps"] = serde_json::json!(999);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/assessments")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert!(json["error"].as_str().unwrap().contains("trestbps"));
}

#[tokio::test]
async fn radar_endpoint_returns_png() {
    let (_dir, state) = test_state();
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/charts/radar")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&sample_record()).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "image/png"
    );
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..8], &PNG_MAGIC);
}

#[tokio::test]
async fn report_endpoint_returns_attachment() {
    let (_dir, state) = test_state();
    let app = create_router(state);

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/reports")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&sample_record()).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
    let disposition = response.headers()[header::CONTENT_DISPOSITION]
        .to_str()
        .unwrap();
    assert!(disposition.contains("CardioInsight_Report_"));
    let body = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&body[..8], &PNG_MAGIC);
}
