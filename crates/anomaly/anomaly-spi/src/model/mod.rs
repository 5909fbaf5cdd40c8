//! Data models for anomaly detection.
//!
//! This module contains data structures used throughout the anomaly detection system.

mod outlier_result;
mod verdict;

pub use outlier_result::OutlierResult;
pub use verdict::{RiskLabel, Verdict};
