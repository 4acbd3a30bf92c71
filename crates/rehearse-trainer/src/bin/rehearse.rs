//! Mix legacy-corpus annotations into a newly collected annotation set to
//! counter catastrophic forgetting, and publish the augmented collection.
//!
//! The augmented collection is always written to `augmented_for_training`;
//! with `--split`, evaluation holdouts go to `corpus_for_eval` and
//! `collected_for_eval`. Publishing replaces any previous contents.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use tracing::{info, warn};

use rehearse_core::corpus::{CorpusReader, CorpusWalker};
use rehearse_core::TrainingExample;
use rehearse_store::Store;
use rehearse_trainer::{mix, MixOptions};

const TRAINING_DATASET: &str = "augmented_for_training";
const CORPUS_EVAL_DATASET: &str = "corpus_for_eval";
const COLLECTED_EVAL_DATASET: &str = "collected_for_eval";

#[derive(Parser)]
#[command(name = "rehearse")]
#[command(about = "Mix legacy corpus annotations into a collected dataset")]
#[command(version)]
struct Cli {
    /// Collection holding the newly collected annotations
    dataset: String,

    /// Legacy examples to mix in per newly collected example
    multiplier: usize,

    /// Corpus root directory
    #[arg(short = 'c', long)]
    corpus_dir: PathBuf,

    /// Reserve 20% of collected data (and 5x that from the corpus) for eval
    #[arg(short = 's', long)]
    split: bool,

    /// Annotation store path
    #[arg(long, default_value = "annotations.db")]
    store: PathBuf,

    /// RNG seed; defaults to a time-derived value
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    info!(corpus = %cli.corpus_dir.display(), "reading corpus");
    let bases: Vec<PathBuf> = CorpusWalker::new(&cli.corpus_dir)
        .with_context(|| format!("reading corpus directory {}", cli.corpus_dir.display()))?
        .collect::<std::io::Result<_>>()?;

    let reader = CorpusReader::new()?;
    let mut legacy = Vec::new();
    let progress = ProgressBar::new(bases.len() as u64);
    for base in &bases {
        match reader.read_document(base) {
            Ok(doc) => legacy.extend(
                doc.sentences
                    .iter()
                    .map(|s| TrainingExample::from_sentence(s, "corpus_rehearsal")),
            ),
            Err(e) => warn!(document = %base.display(), error = %e, "skipping document"),
        }
        progress.inc(1);
    }
    progress.finish_and_clear();
    info!(examples = legacy.len(), "corpus converted");

    let mut store = Store::open(&cli.store)?;
    let Some(collected) = store.get_dataset(&cli.dataset)? else {
        bail!("no collection named {:?} in the store", cli.dataset);
    };
    info!(
        dataset = cli.dataset.as_str(),
        examples = collected.len(),
        "loaded collected annotations"
    );

    let requested = cli.multiplier * collected.len();
    info!(requested, "augmenting with legacy corpus examples");

    let output = mix(
        collected,
        legacy,
        &MixOptions {
            multiplier: cli.multiplier,
            split: cli.split,
            seed: cli.seed.unwrap_or_else(time_seed),
        },
    );

    store.replace_dataset(TRAINING_DATASET, &output.training)?;
    info!(
        dataset = TRAINING_DATASET,
        examples = output.training.len(),
        "augmented collection published; train on it next"
    );

    if cli.split {
        store.replace_dataset(CORPUS_EVAL_DATASET, &output.legacy_eval)?;
        store.replace_dataset(COLLECTED_EVAL_DATASET, &output.collected_eval)?;
        info!(
            corpus_eval = output.legacy_eval.len(),
            collected_eval = output.collected_eval.len(),
            "evaluation holdouts published"
        );
    }

    Ok(())
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
