//! Anomaly Detection Service Provider Interface
//!
//! Defines the outlier detector contract and the types it produces.

pub mod contract;
pub mod error;
pub mod model;

// Re-export all public items at crate root for convenience
pub use contract::OutlierDetector;
pub use error::{AnomalyError, Result};
pub use model::{OutlierResult, RiskLabel, Verdict};
