//! Outlier detection result types.

use serde::{Deserialize, Serialize};

use super::Verdict;

/// Outlier detection result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutlierResult {
    /// Verdict for each sample.
    pub verdicts: Vec<Verdict>,
    /// Anomaly scores for each sample.
    pub scores: Vec<f64>,
    /// Threshold used for detection.
    pub threshold: f64,
}

impl OutlierResult {
    /// Create a new outlier result.
    pub fn new(verdicts: Vec<Verdict>, scores: Vec<f64>, threshold: f64) -> Self {
        Self {
            verdicts,
            scores,
            threshold,
        }
    }

    /// Get indices of detected outliers.
    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.verdicts
            .iter()
            .enumerate()
            .filter_map(|(i, v)| if v.is_outlier() { Some(i) } else { None })
            .collect()
    }

    /// Count of detected outliers.
    pub fn anomaly_count(&self) -> usize {
        self.verdicts.iter().filter(|v| v.is_outlier()).count()
    }
}
