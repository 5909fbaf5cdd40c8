//! Anomaly Detection API
//!
//! Configuration types and the training corpus for anomaly detection.

use serde::{Deserialize, Serialize};

mod corpus;

pub use corpus::TrainingCorpus;

// Re-export SPI types
pub use anomaly_spi::{AnomalyError, OutlierResult, Result, RiskLabel, Verdict};

/// Upper bound on the per-tree subsample when `MaxSamples::Auto` is used.
pub const AUTO_MAX_SAMPLES: usize = 256;

// ============================================================================
// Isolation Forest Configuration
// ============================================================================

/// Number of training rows drawn (without replacement) for each tree.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaxSamples {
    /// `min(256, n)`.
    Auto,
    /// Fixed count, clamped to the number of training rows.
    Count(usize),
}

impl MaxSamples {
    /// Resolve against the number of available training rows.
    pub fn resolve(self, n: usize) -> usize {
        match self {
            Self::Auto => n.min(AUTO_MAX_SAMPLES),
            Self::Count(k) => k.min(n),
        }
    }
}

/// Expected share of outliers in the training data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Contamination {
    /// Fixed score threshold of 0.5.
    Auto,
    /// Threshold calibrated so this fraction of training rows scores above it.
    Fraction(f64),
}

/// Isolation forest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationForestConfig {
    /// Number of isolation trees (default: 100).
    pub n_estimators: usize,
    /// Per-tree subsample size (default: auto).
    pub max_samples: MaxSamples,
    /// Expected contamination (default: 7%).
    pub contamination: Contamination,
    /// RNG seed; `None` draws from entropy (default: 42).
    pub seed: Option<u64>,
}

impl Default for IsolationForestConfig {
    fn default() -> Self {
        Self {
            n_estimators: 100,
            max_samples: MaxSamples::Auto,
            contamination: Contamination::Fraction(0.07),
            seed: Some(42),
        }
    }
}

impl IsolationForestConfig {
    pub fn new(contamination: Contamination) -> Self {
        Self {
            contamination,
            ..Self::default()
        }
    }

    pub fn with_estimators(mut self, n_estimators: usize) -> Self {
        self.n_estimators = n_estimators;
        self
    }

    pub fn with_max_samples(mut self, max_samples: MaxSamples) -> Self {
        self.max_samples = max_samples;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Reject configurations the estimator cannot be fitted with.
    pub fn validate(&self) -> Result<()> {
        if self.n_estimators == 0 {
            return Err(AnomalyError::invalid_parameter(
                "n_estimators",
                "must be at least 1",
            ));
        }
        if let MaxSamples::Count(0) = self.max_samples {
            return Err(AnomalyError::invalid_parameter(
                "max_samples",
                "must be at least 1",
            ));
        }
        if let Contamination::Fraction(f) = self.contamination {
            if !(f > 0.0 && f <= 0.5) {
                return Err(AnomalyError::invalid_parameter(
                    "contamination",
                    "must be in (0, 0.5]",
                ));
            }
        }
        Ok(())
    }
}
