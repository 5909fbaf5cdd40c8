//! HTTP-level tests for the prediction service

use anomaly::{train, IsolationForestConfig, RiskClassifier, TrainingCorpus};
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use server::{app, AppState};
use tower::ServiceExt;

fn trained_state() -> AppState {
    let artifact = train(&TrainingCorpus::synthetic(), IsolationForestConfig::default()).unwrap();
    AppState::new(RiskClassifier::new(artifact).unwrap())
}

fn predict_request(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.into())
        .unwrap()
}

async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

async fn predict(router: Router, risk_score: Value) -> (StatusCode, Value) {
    send(router, predict_request(json!({ "risk_score": risk_score }).to_string())).await
}

#[tokio::test]
async fn test_low_score_is_normal() {
    let (status, body) = predict(app(trained_state()), json!(15)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "normal" }));
}

#[tokio::test]
async fn test_high_score_is_anomaly() {
    let (status, body) = predict(app(trained_state()), json!(300.0)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": "anomaly" }));
}

#[tokio::test]
async fn test_normal_range_and_far_scores() {
    let router = app(trained_state());
    for score in [10.0, 13.0, 20.0, 25.0, 35.0, 40.0] {
        let (_, body) = predict(router.clone(), json!(score)).await;
        assert_eq!(body["result"], "normal", "risk_score {}", score);
    }
    for score in [200.0, 400.0, 1000.0] {
        let (_, body) = predict(router.clone(), json!(score)).await;
        assert_eq!(body["result"], "anomaly", "risk_score {}", score);
    }
}

#[tokio::test]
async fn test_repeated_requests_agree() {
    let router = app(trained_state());
    let (_, first) = predict(router.clone(), json!(55.5)).await;
    let (_, second) = predict(router, json!(55.5)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_missing_risk_score_is_unprocessable() {
    let (status, body) = send(app(trained_state()), predict_request("{}")).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"].as_str().unwrap().contains("risk_score"));
}

#[tokio::test]
async fn test_non_numeric_risk_score_is_unprocessable() {
    for value in [json!("high"), json!(null), json!([15]), json!({ "value": 15 })] {
        let (status, body) = predict(app(trained_state()), value).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_out_of_range_risk_score_is_unprocessable() {
    for body in [r#"{"risk_score": 1e400}"#, r#"{"risk_score": -1e400}"#] {
        let (status, body) = send(app(trained_state()), predict_request(body)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["error"].as_str().unwrap().contains("risk_score"));
    }
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (status, body) = send(app(trained_state()), predict_request("{\"risk_score\": ")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_missing_content_type_is_rejected() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/predict")
        .body(Body::from(r#"{"risk_score": 15}"#))
        .unwrap();
    let (status, _) = send(app(trained_state()), request).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_get_predict_not_allowed() {
    let request = Request::builder()
        .method(Method::GET)
        .uri("/predict")
        .body(Body::empty())
        .unwrap();
    let response = app(trained_state()).oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn test_liveness() {
    let request = Request::builder().uri("/health/live").body(Body::empty()).unwrap();
    let (status, body) = send(app(trained_state()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "alive");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_readiness_reports_model() {
    let request = Request::builder().uri("/health/ready").body(Body::empty()).unwrap();
    let (status, body) = send(app(trained_state()), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["model"]["format"], "riskguard-isolation-forest");
    assert_eq!(body["model"]["version"], 1);
    assert_eq!(body["model"]["training_samples"], 162);
    assert_eq!(body["model"]["trees"], 100);
}
