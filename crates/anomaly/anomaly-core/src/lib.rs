//! Anomaly Detection Core
//!
//! Isolation forest estimator, model artifact persistence, corpus loading
//! and the single-score risk classifier used by the prediction service.

mod artifact;
mod classifier;
mod corpus;
mod error;
mod isolation_forest;
mod training;

pub use artifact::*;
pub use classifier::*;
pub use corpus::*;
pub use error::*;
pub use isolation_forest::*;
pub use training::*;
