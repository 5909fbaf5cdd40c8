//! # anomaly
//!
//! Unified entry point to the anomaly detection module:
//! - `OutlierDetector` trait, `Verdict`, `RiskLabel` and errors from SPI
//! - Forest configuration and the training corpus from API
//! - `IsolationForest`, `ModelArtifact` and `RiskClassifier` from Core

// Re-export everything from SPI
pub use anomaly_spi::*;

// Re-export everything from API
pub use anomaly_api::*;

// Re-export everything from Core
pub use anomaly_core::*;
