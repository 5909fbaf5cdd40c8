//! Basic example: train on the built-in corpus and classify a few scores
//!
//! Run with: cargo run --example basic -p anomaly

use anomaly::{train, IsolationForestConfig, RiskClassifier, TrainingCorpus};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let corpus = TrainingCorpus::synthetic();
    println!("Training on {} risk scores", corpus.len());

    let artifact = train(&corpus, IsolationForestConfig::default())?;
    let classifier = RiskClassifier::new(artifact)?;
    println!("Decision threshold: {:.4}\n", classifier.threshold());

    for score in [12.0, 25.0, 40.0, 75.0, 150.0, 300.0, 800.0] {
        let label = classifier.classify(score)?;
        let s = classifier.anomaly_score(score)?;
        println!("  risk_score={:>6.1}  score={:.4}  -> {}", score, s, label);
    }
    Ok(())
}
