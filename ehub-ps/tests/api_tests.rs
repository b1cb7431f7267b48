//! Integration tests for ehub-ps API endpoints
//!
//! Tests cover:
//! - Liveness and health reporting
//! - Metadata from artifacts, partial artifacts and built-in defaults
//! - Prediction through lite and full artifacts
//! - Degraded, clamped and failing predictions
//! - Route aliases under /api and permissive CORS

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use ehub_common::artifact::{FullArtifact, LinearModel, ModelArtifact, LITE_FILE};
use ehub_common::housing::{default_locations, default_types, FEATURE_NAMES};
use ehub_common::LabelEncoder;
use ehub_ps::{build_router, AppState, ModelLoader, ModelState, ScorerPreference};
use serde_json::{json, Value};
use std::path::Path;
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

const INTERCEPT: f64 = 500_000.0;
const WEIGHTS: [f64; 7] = [10_000.0, 200_000.0, 25_000.0, 50_000.0, 30_000.0, -8_000.0, -12_000.0];

/// Bole (2) / Villa (2) request priced with [`WEIGHTS`]
const BOLE_VILLA_PRICE: f64 = 8_702_000.0;

fn model(intercept: f64, weights: &[f64]) -> LinearModel {
    LinearModel {
        intercept,
        coefficients: weights.to_vec(),
        feature_names: FEATURE_NAMES.iter().map(|s| s.to_string()).collect(),
    }
}

fn default_encoders() -> (LabelEncoder, LabelEncoder) {
    (
        LabelEncoder::new(default_locations()),
        LabelEncoder::new(default_types()),
    )
}

fn write_lite(dir: &Path, model: &LinearModel) {
    let (locations, types) = default_encoders();
    ModelArtifact::from_parts(model, &locations, &types)
        .save(dir)
        .unwrap();
}

fn write_full(dir: &Path, model: LinearModel) {
    let (locations, types) = default_encoders();
    FullArtifact::new(model, locations, types).save(dir).unwrap();
}

/// Test helper: Load whatever `dir` holds and build the app
fn setup_app(dir: &Path, preference: ScorerPreference) -> axum::Router {
    let model = ModelLoader::new(dir, preference).load();
    build_router(AppState::new(model))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn house(location: &str, house_type: &str, area: f64) -> Value {
    json!({
        "Location": location,
        "Type": house_type,
        "Area": area,
        "Bedrooms": 5,
        "Bathrooms": 4,
        "Age": 5,
        "Distance_to_Center": 4.0
    })
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

// =============================================================================
// Liveness
// =============================================================================

#[tokio::test]
async fn test_root_reports_online() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["message"], "EthioML Hub Unified API is online");
    assert_eq!(body["status"], "online");
}

#[tokio::test]
async fn test_health_reports_model_state() {
    let dir = TempDir::new().unwrap();
    write_lite(dir.path(), &model(INTERCEPT, &WEIGHTS));
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let response = app.oneshot(get("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "ehub-ps");
    assert!(body["version"].is_string());
    assert!(!body["git_hash"].as_str().unwrap().is_empty());
    assert!(body["uptime_seconds"].as_i64().unwrap() >= 0);
    assert_eq!(body["model_state"], "loaded_full");
    assert_eq!(body["scorer"], "linear");
}

#[tokio::test]
async fn test_health_without_artifacts() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let body = extract_json(app.oneshot(get("/health")).await.unwrap().into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["model_state"], "load_failed_using_defaults");
    assert!(body["scorer"].is_null());
}

// =============================================================================
// Metadata
// =============================================================================

#[tokio::test]
async fn test_metadata_defaults_without_artifacts() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let response = app.oneshot(get("/metadata/housing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["locations"], json!(default_locations()));
    assert_eq!(body["types"], json!(default_types()));
    assert_eq!(body["locations"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_metadata_from_artifact_under_api_prefix() {
    let dir = TempDir::new().unwrap();
    let locations = LabelEncoder::fit(["Summit", "Bole"]);
    let types = LabelEncoder::fit(["Villa"]);
    FullArtifact::new(model(INTERCEPT, &WEIGHTS), locations, types)
        .save(dir.path())
        .unwrap();
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let response = app.oneshot(get("/api/metadata/housing")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["locations"], json!(["Bole", "Summit"]));
    assert_eq!(body["types"], json!(["Villa"]));
}

#[tokio::test]
async fn test_partial_artifact_merges_default_types() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join(LITE_FILE), r#"{"locations": ["Bole", "CMC"]}"#).unwrap();

    let model = ModelLoader::new(dir.path(), ScorerPreference::Auto).load();
    assert_eq!(model.state(), ModelState::LoadedPartial);
    let app = build_router(AppState::new(model));

    let body = extract_json(app.oneshot(get("/metadata/housing")).await.unwrap().into_body()).await;
    assert_eq!(body["locations"], json!(["Bole", "CMC"]));
    assert_eq!(body["types"], json!(default_types()));
}

// =============================================================================
// Prediction
// =============================================================================

#[tokio::test]
async fn test_predict_with_lite_artifact() {
    let dir = TempDir::new().unwrap();
    write_lite(dir.path(), &model(INTERCEPT, &WEIGHTS));
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let response = app
        .oneshot(post_json("/predict/addis-house", &house("Bole", "Villa", 300.0)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["raw_price"].as_f64().unwrap(), BOLE_VILLA_PRICE);
    assert_eq!(body["estimated_price_etb"], "8,702,000.00");
    assert!(body.get("note").is_none());
}

#[tokio::test]
async fn test_predict_with_full_artifact_under_api_prefix() {
    let dir = TempDir::new().unwrap();
    write_full(dir.path(), model(INTERCEPT, &WEIGHTS));
    let app = setup_app(dir.path(), ScorerPreference::Native);

    let response = app
        .oneshot(post_json("/api/predict/addis-house", &house("Bole", "Villa", 300.0)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["raw_price"].as_f64().unwrap(), BOLE_VILLA_PRICE);
    assert_eq!(body["estimated_price_etb"], "8,702,000.00");
}

#[tokio::test]
async fn test_unknown_location_scores_as_first_class() {
    let dir = TempDir::new().unwrap();
    write_lite(dir.path(), &model(INTERCEPT, &WEIGHTS));
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let unknown = app
        .clone()
        .oneshot(post_json("/predict/addis-house", &house("", "Villa", 300.0)))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::OK);
    let unknown = extract_json(unknown.into_body()).await;

    let akaki = app
        .oneshot(post_json("/predict/addis-house", &house("Akaki", "Villa", 300.0)))
        .await
        .unwrap();
    let akaki = extract_json(akaki.into_body()).await;

    assert_eq!(unknown["raw_price"], akaki["raw_price"]);
    assert_eq!(unknown["raw_price"].as_f64().unwrap(), BOLE_VILLA_PRICE - 2.0 * WEIGHTS[0]);
}

#[tokio::test]
async fn test_predict_without_model_is_degraded() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let response = app
        .oneshot(post_json("/predict/addis-house", &house("Bole", "Villa", 300.0)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["raw_price"].as_f64().unwrap(), 0.0);
    assert_eq!(body["estimated_price_etb"], "0.00");
    assert!(body["note"].as_str().unwrap().contains("loading"));
}

#[tokio::test]
async fn test_negative_prediction_is_clamped() {
    let dir = TempDir::new().unwrap();
    write_lite(dir.path(), &model(-1.0e9, &WEIGHTS));
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let response = app
        .oneshot(post_json("/predict/addis-house", &house("Bole", "Villa", 300.0)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["raw_price"].as_f64().unwrap(), 0.0);
    assert_eq!(body["estimated_price_etb"], "0.00");
    assert!(body.get("note").is_none());
}

#[tokio::test]
async fn test_short_coefficient_list_scores_leading_features() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join(LITE_FILE),
        json!({ "intercept": INTERCEPT, "coefficients": &WEIGHTS[..3] }).to_string(),
    )
    .unwrap();
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let body = extract_json(
        app.oneshot(post_json("/predict/addis-house", &house("Bole", "Villa", 300.0)))
            .await
            .unwrap()
            .into_body(),
    )
    .await;

    // location, type and area only
    assert_eq!(body["raw_price"].as_f64().unwrap(), 8_420_000.0);
}

#[tokio::test]
async fn test_non_finite_prediction_is_server_error() {
    let dir = TempDir::new().unwrap();
    write_lite(dir.path(), &model(INTERCEPT, &WEIGHTS));
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let response = app
        .oneshot(post_json("/predict/addis-house", &house("Bole", "Villa", 1e308)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = extract_json(response.into_body()).await;
    assert!(body["detail"].as_str().unwrap().contains("not a finite number"));
}

#[tokio::test]
async fn test_malformed_body_is_rejected_with_detail() {
    let dir = TempDir::new().unwrap();
    write_lite(dir.path(), &model(INTERCEPT, &WEIGHTS));
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let mut bad = house("Bole", "Villa", 300.0);
    bad["Area"] = json!("large");
    let response = app
        .oneshot(post_json("/predict/addis-house", &bad))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body = extract_json(response.into_body()).await;
    assert!(body["detail"].is_string());
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let dir = TempDir::new().unwrap();
    let app = setup_app(dir.path(), ScorerPreference::Auto);

    let request = Request::builder()
        .method("GET")
        .uri("/metadata/housing")
        .header(header::ORIGIN, "http://localhost:3000")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "*"
    );
}
