//! Error types for the prediction service.

use anomaly::{AnomalyError, ArtifactError};
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Per-request failures, rendered as `{"error": ...}`.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Body missing, not JSON, or `risk_score` absent / not a number.
    #[error("{}", .0.body_text())]
    Rejected(JsonRejection),

    #[error("Invalid risk_score: {0}")]
    InvalidInput(String),

    #[error("Prediction failed: {0}")]
    Prediction(AnomalyError),
}

impl From<AnomalyError> for ApiError {
    fn from(err: AnomalyError) -> Self {
        match err {
            AnomalyError::NonFiniteInput(v) => Self::InvalidInput(format!("{} is not finite", v)),
            other => Self::Prediction(other),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match &rejection {
            // serde_json files literals like 1e400 under syntax errors, but
            // the body is well-formed; only the score is unusable
            JsonRejection::JsonSyntaxError(err) if err.body_text().contains("number out of range") => {
                Self::InvalidInput("number out of range".to_string())
            }
            _ => Self::Rejected(rejection),
        }
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Rejected(rejection) => rejection.status(),
            Self::InvalidInput(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Prediction(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "prediction request failed");
        } else {
            tracing::debug!(error = %self, %status, "rejected prediction request");
        }
        (status, Json(ErrorResponse { error: self.to_string() })).into_response()
    }
}

/// Fatal errors that stop the service before it accepts connections.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to load model artifact: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("server I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_finite_maps_to_client_error() {
        let err = ApiError::from(AnomalyError::NonFiniteInput(f64::NAN));
        assert_eq!(err.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_model_failure_maps_to_server_error() {
        let err = ApiError::from(AnomalyError::NotFitted);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("Prediction failed"));
    }
}
