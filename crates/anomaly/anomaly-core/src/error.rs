//! Error types for artifact persistence and corpus loading.

use std::path::PathBuf;

use anomaly_spi::AnomalyError;
use thiserror::Error;

/// Errors raised while writing or reading a model artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("Artifact I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Artifact serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported artifact format: expected {expected}, found {found}")]
    UnsupportedFormat { expected: String, found: String },

    #[error("Unsupported artifact version: expected {expected}, found {found}")]
    UnsupportedVersion { expected: u32, found: u32 },

    #[error("Invalid model: {0}")]
    Model(#[from] AnomalyError),
}

impl ArtifactError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Errors raised while loading a training corpus from disk.
#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("Failed to open corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Column '{0}' not found")]
    ColumnNotFound(String),

    #[error("No numeric data found in {0}")]
    Empty(PathBuf),
}
