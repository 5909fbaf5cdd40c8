//! # riskguard
//!
//! Command-line interface: produces the model artifact served by
//! `riskguard-server`, classifies scores offline and computes risk scores.

use anomaly::{
    load_corpus, train, Contamination, IsolationForestConfig, RiskClassifier, TrainingCorpus,
    DEFAULT_ARTIFACT_PATH,
};
use clap::{Parser, Subcommand};
use scoring::{score_csv, Severity};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "riskguard")]
#[command(about = "Cyber-risk anomaly model CLI", long_about = None)]
struct Cli {
    /// Defaults to `train` with all defaults
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fit the anomaly model and write the artifact
    Train {
        /// Training corpus (CSV or JSON); the built-in synthetic corpus if omitted
        #[arg(long)]
        corpus: Option<PathBuf>,

        /// Column name or index holding risk scores
        #[arg(short, long)]
        column: Option<String>,

        /// Artifact path, overwritten if present
        #[arg(short, long, default_value = DEFAULT_ARTIFACT_PATH)]
        output: PathBuf,

        /// Expected share of anomalies in the corpus
        #[arg(long, default_value = "0.07")]
        contamination: f64,

        /// Number of isolation trees
        #[arg(long, default_value = "100")]
        trees: usize,

        /// RNG seed for reproducible fitting
        #[arg(long, default_value = "42")]
        seed: u64,
    },

    /// Classify a risk score with a trained artifact
    Predict {
        /// Artifact path
        #[arg(short, long, default_value = DEFAULT_ARTIFACT_PATH)]
        model: PathBuf,

        /// Risk score to classify
        #[arg(
            short,
            long,
            required_unless_present = "severity",
            conflicts_with = "severity",
            allow_negative_numbers = true
        )]
        score: Option<f64>,

        /// Threat severity (critical, high, medium, low, info) mapped to a baseline score
        #[arg(long)]
        severity: Option<String>,
    },

    /// Append rule-based risk scores to an incident CSV
    Score {
        /// Input CSV with num_incidents, incident_severity, unpatched_vulnerabilities
        #[arg(short, long)]
        input: PathBuf,

        /// Output CSV
        #[arg(short, long, default_value = "risk_scored_output.csv")]
        output: PathBuf,
    },
}

impl Default for Commands {
    fn default() -> Self {
        Self::Train {
            corpus: None,
            column: None,
            output: PathBuf::from(DEFAULT_ARTIFACT_PATH),
            contamination: 0.07,
            trees: 100,
            seed: 42,
        }
    }
}

/// Run train command
fn run_train(
    corpus: Option<PathBuf>,
    column: Option<String>,
    output: PathBuf,
    contamination: f64,
    trees: usize,
    seed: u64,
) -> CliResult<()> {
    let corpus = match corpus {
        Some(path) => load_corpus(&path, column.as_deref()).map_err(|e| e.to_string())?,
        None => TrainingCorpus::synthetic(),
    };

    let config = IsolationForestConfig::new(Contamination::Fraction(contamination))
        .with_estimators(trees)
        .with_seed(Some(seed));
    let artifact = train(&corpus, config).map_err(|e| e.to_string())?;
    artifact
        .save(&output)
        .map_err(|e| format!("Failed to write artifact: {}", e))?;

    println!("Trained on {} risk scores", corpus.len());
    println!("Trees: {}", artifact.model().n_trees());
    println!("Contamination: {}", contamination);
    println!("Model written to {:?}", output);
    Ok(())
}

/// Run predict command
fn run_predict(model: PathBuf, score: Option<f64>, severity: Option<String>) -> CliResult<()> {
    let risk_score = match (score, severity.as_deref()) {
        (Some(score), _) => score,
        (None, Some(severity)) => Severity::parse_lenient(severity).baseline_risk_score(),
        (None, None) => return Err("Provide --score or --severity".to_string()),
    };

    let classifier = RiskClassifier::from_path(&model).map_err(|e| e.to_string())?;
    let label = classifier.classify(risk_score).map_err(|e| e.to_string())?;
    let anomaly_score = classifier.anomaly_score(risk_score).map_err(|e| e.to_string())?;

    let json = serde_json::json!({
        "risk_score": risk_score,
        "result": label,
        "anomaly_score": anomaly_score,
        "threshold": classifier.threshold()
    });
    let rendered = serde_json::to_string_pretty(&json).map_err(|e| e.to_string())?;
    println!("{}", rendered);
    Ok(())
}

/// Run score command
///
/// Rows are written to a sibling temp file that only replaces `output`
/// once every row has been scored.
fn run_score(input: PathBuf, output: PathBuf) -> CliResult<()> {
    let reader = File::open(&input).map_err(|e| format!("Failed to open file: {}", e))?;
    let tmp = output.with_extension("csv.tmp");
    let writer = File::create(&tmp).map_err(|e| format!("Failed to create output: {}", e))?;

    let rows = match score_csv(BufReader::new(reader), BufWriter::new(writer)) {
        Ok(rows) => rows,
        Err(e) => {
            let _ = fs::remove_file(&tmp);
            return Err(e.to_string());
        }
    };
    fs::rename(&tmp, &output).map_err(|e| format!("Failed to write output: {}", e))?;

    println!("Scored {} rows", rows);
    println!("Results written to {:?}", output);
    Ok(())
}

fn run(command: Commands) -> CliResult<()> {
    match command {
        Commands::Train {
            corpus,
            column,
            output,
            contamination,
            trees,
            seed,
        } => run_train(corpus, column, output, contamination, trees, seed),

        Commands::Predict {
            model,
            score,
            severity,
        } => run_predict(model, score, severity),

        Commands::Score { input, output } => run_score(input, output),
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli.command.unwrap_or_default()) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_arguments_means_default_train() {
        let cli = Cli::try_parse_from(["riskguard"]).unwrap();
        assert!(cli.command.is_none());
        match cli.command.unwrap_or_default() {
            Commands::Train {
                corpus,
                output,
                contamination,
                trees,
                seed,
                ..
            } => {
                assert!(corpus.is_none());
                assert_eq!(output, PathBuf::from("anomaly_model.json"));
                assert_eq!(contamination, 0.07);
                assert_eq!(trees, 100);
                assert_eq!(seed, 42);
            }
            _ => panic!("expected train"),
        }
    }

    #[test]
    fn test_predict_requires_score_or_severity() {
        assert!(Cli::try_parse_from(["riskguard", "predict"]).is_err());
        assert!(Cli::try_parse_from(["riskguard", "predict", "--score", "15"]).is_ok());
        assert!(Cli::try_parse_from(["riskguard", "predict", "--severity", "high"]).is_ok());
        assert!(
            Cli::try_parse_from(["riskguard", "predict", "--score", "1", "--severity", "high"]).is_err()
        );
    }

    #[test]
    fn test_train_then_predict() {
        let dir = tempdir().unwrap();
        let model = dir.path().join("anomaly_model.json");

        run_train(None, None, model.clone(), 0.07, 100, 42).unwrap();
        assert!(model.exists());

        run_predict(model.clone(), Some(15.0), None).unwrap();
        run_predict(model, None, Some("critical".to_string())).unwrap();
    }

    #[test]
    fn test_train_from_corpus_file() {
        let dir = tempdir().unwrap();
        let corpus = dir.path().join("scores.csv");
        let mut rows = String::from("risk_score\n");
        for s in TrainingCorpus::synthetic().scores() {
            rows.push_str(&format!("{}\n", s));
        }
        fs::write(&corpus, rows).unwrap();

        let model = dir.path().join("model.json");
        run_train(Some(corpus), None, model.clone(), 0.07, 20, 7).unwrap();
        assert!(model.exists());
    }

    #[test]
    fn test_train_rejects_bad_contamination() {
        let dir = tempdir().unwrap();
        let model = dir.path().join("model.json");
        let err = run_train(None, None, model.clone(), 0.9, 100, 42).unwrap_err();
        assert!(err.contains("contamination"));
        assert!(!model.exists());
    }

    #[test]
    fn test_predict_missing_model_fails() {
        let dir = tempdir().unwrap();
        assert!(run_predict(dir.path().join("absent.json"), Some(15.0), None).is_err());
    }

    #[test]
    fn test_score_command() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("orgs.csv");
        let output = dir.path().join("scored.csv");
        fs::write(
            &input,
            "org,num_incidents,incident_severity,unpatched_vulnerabilities\nacme,7,high,3\n",
        )
        .unwrap();

        run_score(input, output.clone()).unwrap();

        let scored = fs::read_to_string(output).unwrap();
        assert!(scored.lines().next().unwrap().ends_with(",risk_score"));
        assert!(scored.contains("acme,7,high,3,86"));
    }

    #[test]
    fn test_score_failure_leaves_no_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("orgs.csv");
        let output = dir.path().join("scored.csv");
        fs::write(&input, "org,num_incidents\nacme,7\n").unwrap();

        let err = run_score(input.clone(), output.clone()).unwrap_err();
        assert!(err.contains("Missing required columns"));
        assert!(!output.exists());
        assert!(!output.with_extension("csv.tmp").exists());

        fs::write(
            &input,
            "num_incidents,incident_severity,unpatched_vulnerabilities\n1,low,2\nmany,low,0\n",
        )
        .unwrap();
        assert!(run_score(input, output.clone()).is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_score_failure_keeps_previous_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("orgs.csv");
        let output = dir.path().join("scored.csv");
        fs::write(&output, "previous\n").unwrap();
        fs::write(&input, "org\nacme\n").unwrap();

        assert!(run_score(input, output.clone()).is_err());
        assert_eq!(fs::read_to_string(output).unwrap(), "previous\n");
    }
}
