//! CSV transform that appends a `risk_score` column.

use std::io::{Read, Write};

use csv::StringRecord;
use thiserror::Error;

use crate::rules::{calculate_risk_score, IncidentRecord};

pub const RISK_SCORE_COLUMN: &str = "risk_score";

const REQUIRED_COLUMNS: [&str; 3] = ["num_incidents", "incident_severity", "unpatched_vulnerabilities"];

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("Invalid value '{value}' for {column} on row {row}")]
    InvalidField {
        row: usize,
        column: &'static str,
        value: String,
    },
}

fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h.trim() == name)
}

fn parse_count(record: &StringRecord, idx: usize, column: &'static str, row: usize) -> Result<u32, ScoringError> {
    let raw = record.get(idx).unwrap_or("").trim();
    // Spreadsheet exports often write counts as floats
    raw.parse::<u32>()
        .ok()
        .or_else(|| {
            raw.parse::<f64>()
                .ok()
                .filter(|v| v.is_finite() && *v >= 0.0 && v.fract() == 0.0 && *v <= u32::MAX as f64)
                .map(|v| v as u32)
        })
        .ok_or_else(|| ScoringError::InvalidField {
            row,
            column,
            value: raw.to_string(),
        })
}

/// Copy every row from `input` to `output`, adding (or replacing) the
/// `risk_score` column. Returns the number of rows scored.
pub fn score_csv<R: Read, W: Write>(input: R, output: W) -> Result<usize, ScoringError> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers()?.clone();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .into_iter()
        .filter(|&c| column_index(&headers, c).is_none())
        .map(String::from)
        .collect();
    if !missing.is_empty() {
        return Err(ScoringError::MissingColumns(missing));
    }
    let [incidents_idx, severity_idx, unpatched_idx] =
        REQUIRED_COLUMNS.map(|c| column_index(&headers, c).unwrap_or(0));
    let existing_score_idx = column_index(&headers, RISK_SCORE_COLUMN);

    let mut writer = csv::Writer::from_writer(output);
    let mut out_headers = headers.clone();
    if existing_score_idx.is_none() {
        out_headers.push_field(RISK_SCORE_COLUMN);
    }
    writer.write_record(&out_headers)?;

    let mut rows = 0;
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        let row = i + 1;
        let incident = IncidentRecord {
            num_incidents: parse_count(&record, incidents_idx, REQUIRED_COLUMNS[0], row)?,
            incident_severity: record.get(severity_idx).unwrap_or("").to_string(),
            unpatched_vulnerabilities: parse_count(&record, unpatched_idx, REQUIRED_COLUMNS[2], row)?,
        };
        let score = calculate_risk_score(&incident).to_string();

        let out: StringRecord = match existing_score_idx {
            Some(idx) => record
                .iter()
                .enumerate()
                .map(|(j, field)| if j == idx { score.as_str() } else { field })
                .collect(),
            None => {
                let mut out = record.clone();
                out.push_field(&score);
                out
            }
        };
        writer.write_record(&out)?;
        rows += 1;
    }
    writer.flush()?;

    tracing::info!(rows, "risk scores computed");
    Ok(rows)
}
