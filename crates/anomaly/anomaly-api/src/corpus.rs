//! Training corpus of risk scores.

use serde::{Deserialize, Serialize};

/// Low scores repeated to form the normal population.
const NORMAL_SCORES: [f64; 15] = [
    10.0, 12.0, 13.0, 14.0, 15.0, 16.0, 17.0, 18.0, 19.0, 20.0, 22.0, 25.0, 30.0, 35.0, 40.0,
];
const NORMAL_REPEATS: usize = 10;

/// High scores forming the anomalous population.
const ANOMALY_SCORES: [f64; 12] = [
    60.0, 70.0, 80.0, 90.0, 100.0, 120.0, 150.0, 200.0, 250.0, 300.0, 400.0, 500.0,
];

/// Ordered sequence of single-feature risk scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingCorpus {
    scores: Vec<f64>,
}

impl TrainingCorpus {
    pub fn from_scores(scores: Vec<f64>) -> Self {
        Self { scores }
    }

    /// Built-in corpus: 150 normal observations followed by 12 anomalous ones.
    pub fn synthetic() -> Self {
        let mut scores = Vec::with_capacity(NORMAL_SCORES.len() * NORMAL_REPEATS + ANOMALY_SCORES.len());
        for _ in 0..NORMAL_REPEATS {
            scores.extend_from_slice(&NORMAL_SCORES);
        }
        scores.extend_from_slice(&ANOMALY_SCORES);
        Self { scores }
    }

    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn len(&self) -> usize {
        self.scores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// One single-feature row per score.
    pub fn as_samples(&self) -> Vec<Vec<f64>> {
        self.scores.iter().map(|&s| vec![s]).collect()
    }
}

impl Default for TrainingCorpus {
    fn default() -> Self {
        Self::synthetic()
    }
}
