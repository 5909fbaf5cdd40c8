//! Scoring rules for a single incident record.

const INCIDENT_COUNT_LIMIT: u32 = 5;
const FREQUENT_INCIDENTS_PENALTY: u32 = 30;
const HIGH_SEVERITY_PENALTY: u32 = 50;
const PER_VULNERABILITY_PENALTY: u32 = 2;

/// Incident history of one organisation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncidentRecord {
    pub num_incidents: u32,
    pub incident_severity: String,
    pub unpatched_vulnerabilities: u32,
}

/// Additive risk score: frequent incidents, high severity and every
/// unpatched vulnerability each contribute.
pub fn calculate_risk_score(record: &IncidentRecord) -> u32 {
    let mut score: u32 = 0;
    if record.num_incidents > INCIDENT_COUNT_LIMIT {
        score += FREQUENT_INCIDENTS_PENALTY;
    }
    // Spreadsheet exports vary in case and padding
    if record.incident_severity.trim().eq_ignore_ascii_case("high") {
        score += HIGH_SEVERITY_PENALTY;
    }
    score.saturating_add(record.unpatched_vulnerabilities.saturating_mul(PER_VULNERABILITY_PENALTY))
}
