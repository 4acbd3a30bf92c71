//! Compare two trained NER taggers on a held-out collection.
//!
//! Evaluates a baseline and a candidate model on the same evaluation
//! collection and prints per-label precision/recall/F1 for both, plus the
//! overall delta.

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::info;

use rehearse_store::Store;
use rehearse_trainer::{evaluate, load_model, EvalStats};

#[derive(Parser)]
#[command(name = "rehearse-eval")]
#[command(about = "Compare baseline and candidate NER models on a held-out collection")]
#[command(version)]
struct Cli {
    /// Baseline model directory
    baseline: PathBuf,

    /// Candidate model directory
    candidate: PathBuf,

    /// Evaluation collection name
    #[arg(short = 'e', long, default_value = "collected_for_eval")]
    dataset: String,

    /// Annotation store path
    #[arg(long, default_value = "annotations.db")]
    store: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let store = Store::open(&cli.store)?;
    let Some(examples) = store.get_dataset(&cli.dataset)? else {
        bail!("no collection named {:?} in the store", cli.dataset);
    };
    info!(
        dataset = cli.dataset.as_str(),
        examples = examples.len(),
        "loaded evaluation examples"
    );

    let baseline_model = load_model(&cli.baseline)?;
    let candidate_model = load_model(&cli.candidate)?;

    let baseline = evaluate(&baseline_model, &examples);
    let candidate = evaluate(&candidate_model, &examples);

    println!("Baseline model accuracy:");
    print_stats(&baseline);
    println!();
    println!("Candidate model accuracy:");
    print_stats(&candidate);
    println!();
    println!(
        "F1 delta (candidate - baseline): {:+.3}",
        candidate.overall.f1() - baseline.overall.f1()
    );

    Ok(())
}

fn print_stats(stats: &EvalStats) {
    println!(
        "  {:<8} {:>9} {:>9} {:>9} {:>6} {:>6} {:>6}",
        "label", "precision", "recall", "f1", "tp", "fp", "fn"
    );
    for (label, metrics) in &stats.per_label {
        println!(
            "  {:<8} {:>9.3} {:>9.3} {:>9.3} {:>6} {:>6} {:>6}",
            label.as_str(),
            metrics.precision(),
            metrics.recall(),
            metrics.f1(),
            metrics.tp,
            metrics.fp,
            metrics.missed
        );
    }
    println!(
        "  {:<8} {:>9.3} {:>9.3} {:>9.3}",
        "overall",
        stats.overall.precision(),
        stats.overall.recall(),
        stats.overall.f1()
    );
    println!(
        "  token accuracy {:.2}% over {} examples ({} skipped)",
        stats.token_accuracy * 100.0,
        stats.examples,
        stats.skipped
    );
}
