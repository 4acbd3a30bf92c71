//! Train the NER tagger on a JSON export artifact or a store collection,
//! saving the model as a directory artifact.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{info, warn};

use rehearse_store::Store;
use rehearse_trainer::{
    evaluate, load_export, load_model, sequences_from_examples, TrainConfig, Trainer,
};

#[derive(Parser)]
#[command(name = "train")]
#[command(about = "Train the NER tagger")]
#[command(version)]
struct Cli {
    /// JSON export artifact with training data
    #[arg(short = 'd', long)]
    data: Option<PathBuf>,

    /// Or: store collection with training data
    #[arg(long)]
    dataset: Option<String>,

    /// Annotation store path (with --dataset)
    #[arg(long, default_value = "annotations.db")]
    store: PathBuf,

    /// Existing model directory to continue training from
    #[arg(short = 'm', long)]
    model: Option<PathBuf>,

    /// Output directory for the trained model
    #[arg(short = 'o', long)]
    output: PathBuf,

    /// Number of training iterations
    #[arg(short = 'n', long, default_value_t = 30)]
    epochs: usize,

    /// Perceptron learning rate
    #[arg(long, default_value_t = 0.1)]
    learning_rate: f32,

    /// RNG seed; defaults to a time-derived value
    #[arg(long)]
    seed: Option<u64>,

    /// Version string recorded in the model metadata
    #[arg(long, default_value = "0.1.0")]
    version: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let examples = match (&cli.data, &cli.dataset) {
        (Some(path), None) => load_export(path, "export")
            .with_context(|| format!("loading training data from {}", path.display()))?,
        (None, Some(dataset)) => {
            let store = Store::open(&cli.store)?;
            match store.get_dataset(dataset)? {
                Some(examples) => examples,
                None => bail!("no collection named {dataset:?} in the store"),
            }
        }
        _ => bail!("pass exactly one of --data or --dataset"),
    };
    info!(examples = examples.len(), "training data loaded");

    let (sequences, skipped) = sequences_from_examples(&examples);
    if skipped > 0 {
        warn!(skipped, "examples dropped during tokenization");
    }
    if sequences.is_empty() {
        bail!("no usable training sequences");
    }

    let config = TrainConfig {
        epochs: cli.epochs,
        learning_rate: cli.learning_rate,
        seed: cli.seed.unwrap_or_else(time_seed),
    };

    let mut trainer = match &cli.model {
        Some(dir) => {
            let model = load_model(dir)
                .with_context(|| format!("loading existing model from {}", dir.display()))?;
            info!(model = %dir.display(), "continuing from existing model");
            Trainer::with_model(model, config)
        }
        None => {
            info!("starting from a blank model");
            Trainer::new(config)
        }
    };

    info!(sequences = sequences.len(), epochs = cli.epochs, "starting training");
    trainer.train(&sequences);
    trainer.save(&cli.output, &cli.version)?;

    // Read the artifact back and sanity-check it on the training data.
    let reloaded = load_model(&cli.output)?;
    let stats = evaluate(&reloaded, &examples);
    info!(
        token_accuracy = format!("{:.2}%", stats.token_accuracy * 100.0).as_str(),
        f1 = format!("{:.3}", stats.overall.f1()).as_str(),
        "reloaded model verified on training data"
    );

    Ok(())
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
