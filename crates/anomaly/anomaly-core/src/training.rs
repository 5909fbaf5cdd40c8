//! Offline model production.

use anomaly_api::{IsolationForestConfig, TrainingCorpus};
use anomaly_spi::OutlierDetector;

use crate::artifact::ModelArtifact;
use crate::error::ArtifactError;
use crate::isolation_forest::IsolationForest;

/// Fit an isolation forest on `corpus` and wrap it as an artifact.
pub fn train(corpus: &TrainingCorpus, config: IsolationForestConfig) -> Result<ModelArtifact, ArtifactError> {
    let mut forest = IsolationForest::new(config);
    forest.fit(&corpus.as_samples())?;
    tracing::info!(
        samples = corpus.len(),
        trees = forest.n_trees(),
        threshold = forest.threshold(),
        "trained isolation forest"
    );
    ModelArtifact::from_forest(forest, corpus.len())
}
