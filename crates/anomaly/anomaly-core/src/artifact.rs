//! Versioned on-disk model artifact.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use anomaly_spi::{AnomalyError, OutlierDetector};
use serde::{Deserialize, Serialize};

use crate::error::ArtifactError;
use crate::isolation_forest::IsolationForest;

pub const ARTIFACT_FORMAT: &str = "riskguard-isolation-forest";
pub const ARTIFACT_VERSION: u32 = 1;
pub const DEFAULT_ARTIFACT_PATH: &str = "anomaly_model.json";

#[derive(Deserialize)]
struct ArtifactHeader {
    format: String,
    version: u32,
}

/// A fitted isolation forest together with its provenance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    format: String,
    version: u32,
    /// Unix seconds at which the model was fitted.
    created_at: u64,
    training_samples: usize,
    model: IsolationForest,
}

impl ModelArtifact {
    /// Wrap a fitted forest. Fails if the forest was never fitted.
    pub fn from_forest(model: IsolationForest, training_samples: usize) -> Result<Self, ArtifactError> {
        if !model.is_fitted() {
            return Err(AnomalyError::NotFitted.into());
        }
        let created_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        Ok(Self {
            format: ARTIFACT_FORMAT.to_string(),
            version: ARTIFACT_VERSION,
            created_at,
            training_samples,
            model,
        })
    }

    pub fn model(&self) -> &IsolationForest {
        &self.model
    }

    pub fn format(&self) -> &str {
        &self.format
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    pub fn created_at(&self) -> u64 {
        self.created_at
    }

    pub fn training_samples(&self) -> usize {
        self.training_samples
    }

    /// Write the artifact to `path`, replacing any previous file.
    ///
    /// The JSON is written to a sibling temp file first and renamed over the
    /// target, so readers never observe a half-written artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ArtifactError> {
        let path = path.as_ref();
        let tmp = path.with_extension("json.tmp");

        let file = File::create(&tmp).map_err(|e| ArtifactError::io(&tmp, e))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer(&mut writer, self)?;
        writer.flush().map_err(|e| ArtifactError::io(&tmp, e))?;
        drop(writer);

        fs::rename(&tmp, path).map_err(|e| ArtifactError::io(path, e))?;
        tracing::info!(path = %path.display(), trees = self.model.n_trees(), "model artifact written");
        Ok(())
    }

    /// Read and validate an artifact written by [`ModelArtifact::save`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|e| ArtifactError::io(path, e))?;

        let header: ArtifactHeader = serde_json::from_str(&raw)?;
        if header.format != ARTIFACT_FORMAT {
            return Err(ArtifactError::UnsupportedFormat {
                expected: ARTIFACT_FORMAT.to_string(),
                found: header.format,
            });
        }
        if header.version != ARTIFACT_VERSION {
            return Err(ArtifactError::UnsupportedVersion {
                expected: ARTIFACT_VERSION,
                found: header.version,
            });
        }

        let artifact: Self = serde_json::from_str(&raw)?;
        artifact.model.validate()?;
        tracing::info!(
            path = %path.display(),
            version = artifact.version,
            training_samples = artifact.training_samples,
            "model artifact loaded"
        );
        Ok(artifact)
    }
}
