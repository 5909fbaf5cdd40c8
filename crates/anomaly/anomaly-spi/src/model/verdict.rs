//! Per-sample classification outcomes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Raw label conventionally used for outliers by isolation-based estimators.
const OUTLIER_SENTINEL: i8 = -1;
const INLIER_SENTINEL: i8 = 1;

/// Whether a sample belongs to the fitted distribution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Inlier,
    Outlier,
}

impl Verdict {
    /// Interpret a raw `-1` / `1` estimator label.
    pub fn from_sentinel(label: i8) -> Self {
        if label == OUTLIER_SENTINEL {
            Self::Outlier
        } else {
            Self::Inlier
        }
    }

    /// Raw estimator label: `-1` for outliers, `1` otherwise.
    pub fn as_sentinel(self) -> i8 {
        match self {
            Self::Outlier => OUTLIER_SENTINEL,
            Self::Inlier => INLIER_SENTINEL,
        }
    }

    pub fn is_outlier(self) -> bool {
        matches!(self, Self::Outlier)
    }
}

/// Label returned to callers of the prediction service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLabel {
    Anomaly,
    Normal,
}

impl RiskLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Anomaly => "anomaly",
            Self::Normal => "normal",
        }
    }
}

impl From<Verdict> for RiskLabel {
    fn from(verdict: Verdict) -> Self {
        if verdict.is_outlier() {
            Self::Anomaly
        } else {
            Self::Normal
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
