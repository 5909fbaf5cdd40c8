//! Baseline risk scores for reported threat severities.

use std::fmt;
use std::str::FromStr;

/// Severity attached to a reported threat.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Info,
}

impl Severity {
    /// Risk score submitted for classification when only severity is known.
    pub fn baseline_risk_score(self) -> f64 {
        match self {
            Self::Critical => 500.0,
            Self::High => 300.0,
            Self::Medium => 50.0,
            Self::Low => 20.0,
            Self::Info => 10.0,
        }
    }

    /// Unrecognised severities fall back to `Info`.
    pub fn parse_lenient(s: &str) -> Self {
        s.parse().unwrap_or(Self::Info)
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "critical" => Ok(Self::Critical),
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            "info" => Ok(Self::Info),
            other => Err(format!("Unknown severity: {}", other)),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
            Self::Info => "info",
        };
        f.write_str(name)
    }
}
