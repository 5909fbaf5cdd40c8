//! Contract definitions for anomaly detection.
//!
//! This module contains trait definitions that providers must implement.

mod outlier_detector;

pub use outlier_detector::OutlierDetector;
