//! Single-score risk classification over a loaded artifact.

use std::path::Path;

use anomaly_spi::{AnomalyError, OutlierDetector, Result, RiskLabel};

use crate::artifact::ModelArtifact;
use crate::error::ArtifactError;

/// Read-only classifier for scalar risk scores.
///
/// Built once from an artifact and never mutated, so it can be shared
/// across request handlers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct RiskClassifier {
    artifact: ModelArtifact,
}

impl RiskClassifier {
    /// The artifact's model must have been fitted on exactly one feature.
    pub fn new(artifact: ModelArtifact) -> std::result::Result<Self, ArtifactError> {
        match artifact.model().n_features() {
            Some(1) => Ok(Self { artifact }),
            Some(n) => Err(AnomalyError::DimensionMismatch { expected: 1, got: n }.into()),
            None => Err(AnomalyError::NotFitted.into()),
        }
    }

    pub fn from_path(path: impl AsRef<Path>) -> std::result::Result<Self, ArtifactError> {
        Self::new(ModelArtifact::load(path)?)
    }

    pub fn artifact(&self) -> &ModelArtifact {
        &self.artifact
    }

    fn sample(risk_score: f64) -> Result<[Vec<f64>; 1]> {
        if !risk_score.is_finite() {
            return Err(AnomalyError::NonFiniteInput(risk_score));
        }
        Ok([vec![risk_score]])
    }

    /// Label a single risk score.
    pub fn classify(&self, risk_score: f64) -> Result<RiskLabel> {
        let verdict = self
            .artifact
            .model()
            .predict(&Self::sample(risk_score)?)?
            .into_iter()
            .next()
            .ok_or_else(|| AnomalyError::DetectionError("model returned no verdict".into()))?;
        Ok(RiskLabel::from(verdict))
    }

    /// Anomaly score in `(0, 1]`; higher is more anomalous.
    pub fn anomaly_score(&self, risk_score: f64) -> Result<f64> {
        self.artifact
            .model()
            .score_samples(&Self::sample(risk_score)?)?
            .into_iter()
            .next()
            .ok_or_else(|| AnomalyError::DetectionError("model returned no score".into()))
    }

    pub fn threshold(&self) -> f64 {
        self.artifact.model().threshold()
    }
}
