//! # scoring
//!
//! Rule-based risk scores for organisations, computed from incident history.
//! The scores produced here are the inputs the anomaly classifier labels.

mod rules;
mod severity;
mod transform;

pub use rules::{calculate_risk_score, IncidentRecord};
pub use severity::Severity;
pub use transform::{score_csv, ScoringError, RISK_SCORE_COLUMN};
