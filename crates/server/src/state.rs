//! Immutable application context shared by all handlers.

use std::path::Path;
use std::sync::Arc;

use anomaly::{ArtifactError, RiskClassifier};

/// Loaded once at startup and never reassigned; clones share the model.
#[derive(Clone)]
pub struct AppState {
    classifier: Arc<RiskClassifier>,
}

impl AppState {
    pub fn new(classifier: RiskClassifier) -> Self {
        Self {
            classifier: Arc::new(classifier),
        }
    }

    /// Load the artifact at `path`. Missing or corrupt artifacts are an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ArtifactError> {
        RiskClassifier::from_path(path).map(Self::new)
    }

    pub fn classifier(&self) -> &RiskClassifier {
        &self.classifier
    }
}
