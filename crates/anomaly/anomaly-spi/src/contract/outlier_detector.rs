//! Outlier detector trait definition.

use crate::error::Result;
use crate::model::{OutlierResult, Verdict};

/// Unsupervised outlier detector over fixed-width feature vectors.
///
/// Implementations are fitted once on mostly-normal data and are read-only
/// afterwards, so a fitted detector can be shared across threads.
pub trait OutlierDetector: Send + Sync {
    /// Fit the detector to training samples. Every sample must have the same width.
    fn fit(&mut self, samples: &[Vec<f64>]) -> Result<()>;

    /// Anomaly score per sample. Higher means more anomalous.
    fn score_samples(&self, samples: &[Vec<f64>]) -> Result<Vec<f64>>;

    /// Decision threshold the scores are compared against.
    fn threshold(&self) -> f64;

    /// Signed distance to the threshold. Negative values are outliers.
    fn decision_function(&self, samples: &[Vec<f64>]) -> Result<Vec<f64>> {
        let threshold = self.threshold();
        Ok(self
            .score_samples(samples)?
            .into_iter()
            .map(|s| threshold - s)
            .collect())
    }

    /// Classify each sample.
    fn predict(&self, samples: &[Vec<f64>]) -> Result<Vec<Verdict>> {
        Ok(self
            .decision_function(samples)?
            .into_iter()
            .map(|d| if d < 0.0 { Verdict::Outlier } else { Verdict::Inlier })
            .collect())
    }

    /// Scores and verdicts in one pass.
    fn detect(&self, samples: &[Vec<f64>]) -> Result<OutlierResult> {
        let threshold = self.threshold();
        let scores = self.score_samples(samples)?;
        let verdicts = scores
            .iter()
            .map(|&s| if s > threshold { Verdict::Outlier } else { Verdict::Inlier })
            .collect();
        Ok(OutlierResult::new(verdicts, scores, threshold))
    }

    /// Number of features the detector was fitted on.
    fn n_features(&self) -> Option<usize>;

    /// Check if detector has been fitted.
    fn is_fitted(&self) -> bool;
}
