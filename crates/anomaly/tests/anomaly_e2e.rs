//! End-to-end tests for the anomaly crate
//!
//! Trains on the built-in corpus, persists the artifact, reloads it and
//! classifies through the public API only.

use std::sync::Arc;
use std::thread;

use anomaly::{
    train, ArtifactError, Contamination, IsolationForestConfig, ModelArtifact, RiskClassifier, RiskLabel,
    TrainingCorpus, DEFAULT_ARTIFACT_PATH,
};
use tempfile::tempdir;

#[test]
fn e2e_train_persist_load_classify() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(DEFAULT_ARTIFACT_PATH);

    // Produce the artifact
    let artifact = train(&TrainingCorpus::synthetic(), IsolationForestConfig::default()).unwrap();
    artifact.save(&path).unwrap();

    // Serve from a fresh load
    let classifier = RiskClassifier::from_path(&path).unwrap();

    assert_eq!(classifier.classify(15.0).unwrap(), RiskLabel::Normal);
    assert_eq!(classifier.classify(300.0).unwrap(), RiskLabel::Anomaly);
}

#[test]
fn e2e_retraining_overwrites_artifact() {
    let dir = tempdir().unwrap();
    let path = dir.path().join(DEFAULT_ARTIFACT_PATH);

    let config = IsolationForestConfig::default().with_estimators(10);
    train(&TrainingCorpus::synthetic(), config).unwrap().save(&path).unwrap();
    let small = ModelArtifact::load(&path).unwrap();
    assert_eq!(small.model().n_trees(), 10);

    train(&TrainingCorpus::synthetic(), IsolationForestConfig::default())
        .unwrap()
        .save(&path)
        .unwrap();
    let full = ModelArtifact::load(&path).unwrap();
    assert_eq!(full.model().n_trees(), 100);
}

#[test]
fn e2e_missing_artifact_fails_to_load() {
    let dir = tempdir().unwrap();
    let result = RiskClassifier::from_path(dir.path().join("absent.json"));
    assert!(matches!(result, Err(ArtifactError::Io { .. })));
}

#[test]
fn e2e_concurrent_reads_share_one_model() {
    let artifact = train(&TrainingCorpus::synthetic(), IsolationForestConfig::default()).unwrap();
    let classifier = Arc::new(RiskClassifier::new(artifact).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let classifier = Arc::clone(&classifier);
            thread::spawn(move || {
                let score = if i % 2 == 0 { 15.0 } else { 300.0 };
                (score, classifier.classify(score).unwrap())
            })
        })
        .collect();

    for handle in handles {
        let (score, label) = handle.join().unwrap();
        let expected = if score < 100.0 { RiskLabel::Normal } else { RiskLabel::Anomaly };
        assert_eq!(label, expected);
    }
}

#[test]
fn e2e_external_corpus() {
    let corpus = TrainingCorpus::from_scores(
        (0..200).map(|i| 100.0 + (i % 20) as f64).chain([900.0, 1200.0]).collect(),
    );
    let config = IsolationForestConfig::new(Contamination::Fraction(0.01));
    let artifact = train(&corpus, config).unwrap();
    let classifier = RiskClassifier::new(artifact).unwrap();

    assert_eq!(classifier.classify(110.0).unwrap(), RiskLabel::Normal);
    assert_eq!(classifier.classify(1200.0).unwrap(), RiskLabel::Anomaly);
}
