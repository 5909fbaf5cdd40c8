//! API route handlers

use anomaly::RiskLabel;
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictRequest {
    pub risk_score: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub result: RiskLabel,
}

/// `POST /predict`: label one risk score as `anomaly` or `normal`.
pub async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<PredictRequest>, JsonRejection>,
) -> Result<Json<PredictResponse>, ApiError> {
    let Json(req) = payload?;
    let result = state.classifier().classify(req.risk_score)?;
    tracing::debug!(risk_score = req.risk_score, %result, "classified");
    Ok(Json(PredictResponse { result }))
}

/// Liveness probe - is the server running?
pub async fn liveness() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "alive",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

/// Readiness probe - the model is loaded before the listener binds, so a
/// responding server is always ready; report what it is serving.
pub async fn readiness(State(state): State<AppState>) -> Json<serde_json::Value> {
    let classifier = state.classifier();
    let artifact = classifier.artifact();
    Json(serde_json::json!({
        "status": "ready",
        "version": env!("CARGO_PKG_VERSION"),
        "model": {
            "format": artifact.format(),
            "version": artifact.version(),
            "created_at": artifact.created_at(),
            "training_samples": artifact.training_samples(),
            "trees": artifact.model().n_trees(),
            "threshold": classifier.threshold()
        }
    }))
}
