//! Isolation forest outlier detector.
//!
//! Points that are easy to separate from the rest of the data end up close to
//! the root of randomly grown trees. The average depth at which a sample is
//! isolated, normalised by the expected depth of an unsuccessful search in a
//! binary search tree, gives an anomaly score in `(0, 1]`.

use anomaly_api::{Contamination, IsolationForestConfig};
use anomaly_spi::{AnomalyError, OutlierDetector, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

const EULER_GAMMA: f64 = 0.577_215_664_901_532_9;

/// Score threshold used when contamination is `Auto`.
const AUTO_THRESHOLD: f64 = 0.5;

/// Average path length of an unsuccessful BST search over `n` points.
pub fn average_path_length(n: usize) -> f64 {
    match n {
        0 | 1 => 0.0,
        2 => 1.0,
        _ => {
            let n = n as f64;
            2.0 * ((n - 1.0).ln() + EULER_GAMMA) - 2.0 * (n - 1.0) / n
        }
    }
}

/// Linear-interpolated percentile, `q` in `[0, 100]`.
fn percentile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let rank = (q / 100.0) * (sorted.len() - 1) as f64;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
}

#[derive(Debug, Clone, Serialize, Deserialize)]
enum Node {
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
    Leaf {
        size: usize,
    },
}

impl Node {
    fn validate(&self, n_features: usize) -> Result<()> {
        match self {
            Node::Split {
                feature,
                threshold,
                left,
                right,
            } => {
                if *feature >= n_features {
                    return Err(AnomalyError::invalid_parameter(
                        "trees",
                        format!("split on feature {} of a {}-feature model", feature, n_features),
                    ));
                }
                if !threshold.is_finite() {
                    return Err(AnomalyError::invalid_parameter(
                        "trees",
                        format!("non-finite split threshold {}", threshold),
                    ));
                }
                left.validate(n_features)?;
                right.validate(n_features)
            }
            Node::Leaf { .. } => Ok(()),
        }
    }
}

/// A single randomly grown isolation tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationTree {
    root: Node,
}

impl IsolationTree {
    /// Grow a tree over the given rows of `data`.
    fn grow<R: Rng>(data: &[Vec<f64>], rows: Vec<usize>, height_limit: usize, rng: &mut R) -> Self {
        Self {
            root: Self::grow_node(data, rows, 0, height_limit, rng),
        }
    }

    fn grow_node<R: Rng>(
        data: &[Vec<f64>],
        rows: Vec<usize>,
        depth: usize,
        height_limit: usize,
        rng: &mut R,
    ) -> Node {
        if rows.len() <= 1 || depth >= height_limit {
            return Node::Leaf { size: rows.len() };
        }

        // Only features that still vary within this node can split it.
        let n_features = data[rows[0]].len();
        let candidates: Vec<(usize, f64, f64)> = (0..n_features)
            .filter_map(|f| {
                let (min, max) = rows.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &r| {
                    (lo.min(data[r][f]), hi.max(data[r][f]))
                });
                (min < max).then_some((f, min, max))
            })
            .collect();

        let Some(&(feature, min, max)) = candidates.choose(rng) else {
            return Node::Leaf { size: rows.len() };
        };

        // threshold in [min, max) keeps both sides non-empty with `<=`
        let threshold = rng.gen_range(min..max);
        let (left, right): (Vec<usize>, Vec<usize>) =
            rows.into_iter().partition(|&r| data[r][feature] <= threshold);

        Node::Split {
            feature,
            threshold,
            left: Box::new(Self::grow_node(data, left, depth + 1, height_limit, rng)),
            right: Box::new(Self::grow_node(data, right, depth + 1, height_limit, rng)),
        }
    }

    /// Depth at which `x` is isolated, corrected for unsplit leaves.
    pub fn path_length(&self, x: &[f64]) -> f64 {
        let mut node = &self.root;
        let mut depth = 0usize;
        loop {
            match node {
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if x[*feature] <= *threshold { left } else { right };
                    depth += 1;
                }
                Node::Leaf { size } => return depth as f64 + average_path_length(*size),
            }
        }
    }
}

/// Isolation forest detector.
///
/// Fitting is deterministic for a fixed `seed`. Once fitted the forest is
/// immutable and can be shared across threads without synchronisation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IsolationForest {
    config: IsolationForestConfig,
    trees: Vec<IsolationTree>,
    sample_size: usize,
    n_features: Option<usize>,
    threshold: f64,
}

impl IsolationForest {
    pub fn new(config: IsolationForestConfig) -> Self {
        Self {
            config,
            trees: Vec::new(),
            sample_size: 0,
            n_features: None,
            threshold: AUTO_THRESHOLD,
        }
    }

    pub fn config(&self) -> &IsolationForestConfig {
        &self.config
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    /// Rows drawn per tree during the last fit.
    pub fn sample_size(&self) -> usize {
        self.sample_size
    }

    /// Check the structure of a forest read from outside, such as a
    /// deserialised artifact, so that scoring cannot index out of bounds.
    pub fn validate(&self) -> Result<()> {
        let width = match self.n_features {
            Some(w) if w > 0 => w,
            Some(_) => return Err(AnomalyError::invalid_parameter("n_features", "must be at least 1")),
            None => return Err(AnomalyError::NotFitted),
        };
        if self.trees.is_empty() {
            return Err(AnomalyError::NotFitted);
        }
        if self.sample_size < 2 {
            return Err(AnomalyError::invalid_parameter(
                "sample_size",
                format!("must be at least 2, got {}", self.sample_size),
            ));
        }
        if !self.threshold.is_finite() {
            return Err(AnomalyError::invalid_parameter(
                "threshold",
                format!("must be finite, got {}", self.threshold),
            ));
        }
        self.trees.iter().try_for_each(|t| t.root.validate(width))
    }

    fn check_samples(samples: &[Vec<f64>], width: usize) -> Result<()> {
        for row in samples {
            if row.len() != width {
                return Err(AnomalyError::DimensionMismatch {
                    expected: width,
                    got: row.len(),
                });
            }
            if let Some(&v) = row.iter().find(|v| !v.is_finite()) {
                return Err(AnomalyError::NonFiniteInput(v));
            }
        }
        Ok(())
    }

    fn raw_scores(&self, samples: &[Vec<f64>]) -> Vec<f64> {
        let normaliser = average_path_length(self.sample_size);
        let n_trees = self.trees.len() as f64;
        samples
            .iter()
            .map(|x| {
                let mean_depth = self.trees.iter().map(|t| t.path_length(x)).sum::<f64>() / n_trees;
                2f64.powf(-mean_depth / normaliser)
            })
            .collect()
    }
}

impl Default for IsolationForest {
    fn default() -> Self {
        Self::new(IsolationForestConfig::default())
    }
}

impl OutlierDetector for IsolationForest {
    fn fit(&mut self, samples: &[Vec<f64>]) -> Result<()> {
        self.config.validate()?;
        if samples.len() < 2 {
            return Err(AnomalyError::InsufficientData {
                required: 2,
                got: samples.len(),
            });
        }
        let width = samples[0].len();
        if width == 0 {
            return Err(AnomalyError::invalid_parameter(
                "samples",
                "rows must have at least one feature",
            ));
        }
        Self::check_samples(samples, width)?;

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let sample_size = self.config.max_samples.resolve(samples.len()).max(2);
        let height_limit = (sample_size as f64).log2().ceil() as usize;

        self.trees = (0..self.config.n_estimators)
            .map(|_| {
                let rows = rand::seq::index::sample(&mut rng, samples.len(), sample_size).into_vec();
                IsolationTree::grow(samples, rows, height_limit, &mut rng)
            })
            .collect();
        self.sample_size = sample_size;
        self.n_features = Some(width);

        self.threshold = match self.config.contamination {
            Contamination::Auto => AUTO_THRESHOLD,
            Contamination::Fraction(f) => percentile(&self.raw_scores(samples), 100.0 * (1.0 - f)),
        };

        tracing::debug!(
            trees = self.trees.len(),
            sample_size,
            height_limit,
            threshold = self.threshold,
            "isolation forest fitted"
        );
        Ok(())
    }

    fn score_samples(&self, samples: &[Vec<f64>]) -> Result<Vec<f64>> {
        let width = self.n_features.ok_or(AnomalyError::NotFitted)?;
        if self.trees.is_empty() {
            return Err(AnomalyError::NotFitted);
        }
        Self::check_samples(samples, width)?;
        Ok(self.raw_scores(samples))
    }

    fn threshold(&self) -> f64 {
        self.threshold
    }

    fn n_features(&self) -> Option<usize> {
        self.n_features
    }

    fn is_fitted(&self) -> bool {
        self.n_features.is_some() && !self.trees.is_empty()
    }
}
