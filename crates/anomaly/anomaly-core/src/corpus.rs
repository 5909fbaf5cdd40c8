//! Loading a training corpus from CSV or JSON files.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use anomaly_api::TrainingCorpus;

use crate::error::CorpusError;

/// Column read when none is specified.
pub const DEFAULT_SCORE_COLUMN: &str = "risk_score";

/// Load risk scores from `path`, picking the format from its extension.
///
/// `column` is a header name or a zero-based index for CSV, or an object key
/// for JSON arrays of objects. Non-numeric cells are skipped.
pub fn load_corpus(path: &Path, column: Option<&str>) -> Result<TrainingCorpus, CorpusError> {
    let file = File::open(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let scores = match ext.as_str() {
        "json" => read_json_scores(reader, column)?,
        _ => read_csv_scores(reader, column)?,
    };

    if scores.is_empty() {
        return Err(CorpusError::Empty(path.to_path_buf()));
    }
    tracing::info!(path = %path.display(), samples = scores.len(), "loaded training corpus");
    Ok(TrainingCorpus::from_scores(scores))
}

/// Read one numeric column from CSV with headers.
pub fn read_csv_scores<R: Read>(reader: R, column: Option<&str>) -> Result<Vec<f64>, CorpusError> {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    let column = column.unwrap_or(DEFAULT_SCORE_COLUMN);

    let col_idx = match headers.iter().position(|h| h.trim() == column) {
        Some(idx) => idx,
        None => column
            .parse::<usize>()
            .ok()
            .filter(|&idx| idx < headers.len())
            .ok_or_else(|| CorpusError::ColumnNotFound(column.to_string()))?,
    };

    let mut scores = Vec::new();
    for record in reader.records() {
        let record = record?;
        if let Some(num) = record
            .get(col_idx)
            .and_then(|v| v.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
        {
            scores.push(num);
        }
    }
    Ok(scores)
}

/// Read scores from a JSON array of numbers, an array of objects, or an
/// object holding such an array.
pub fn read_json_scores<R: Read>(reader: R, column: Option<&str>) -> Result<Vec<f64>, CorpusError> {
    let json: serde_json::Value = serde_json::from_reader(reader)?;
    let key = column.unwrap_or(DEFAULT_SCORE_COLUMN);

    let array = match &json {
        serde_json::Value::Array(arr) => Some(arr),
        serde_json::Value::Object(obj) => ["scores", "data", "values", key]
            .iter()
            .find_map(|k| obj.get(*k).and_then(|v| v.as_array())),
        _ => None,
    };

    let Some(array) = array else {
        return Ok(Vec::new());
    };

    if array.iter().all(|v| v.is_number()) {
        return Ok(array.iter().filter_map(|v| v.as_f64()).collect());
    }
    Ok(array
        .iter()
        .filter_map(|obj| obj.get(key).and_then(|v| v.as_f64()))
        .collect())
}
