//! Build a pruned word-vector vocabulary from one or more frequency-ordered
//! vector files and save it as a directory artifact.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rehearse_trainer::VectorVocab;

#[derive(Parser)]
#[command(name = "build-vectors")]
#[command(about = "Build a pruned word-vector vocabulary")]
#[command(version)]
struct Cli {
    /// Vector files to read, one per source, frequency-ordered
    #[arg(short = 'i', long = "input", required = true, num_args = 1..)]
    inputs: Vec<PathBuf>,

    /// Vector dimensionality
    #[arg(long, default_value_t = 300)]
    dim: usize,

    /// Maximum words to add per source file
    #[arg(long, default_value_t = 50_000)]
    max_per_source: usize,

    /// Maximum total vector rows after pruning
    #[arg(long, default_value_t = 200_000)]
    max_total: usize,

    /// Output directory for the vocabulary artifact
    #[arg(short = 'o', long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let mut vocab = VectorVocab::new(cli.dim);

    for input in &cli.inputs {
        let before = vocab.n_rows();
        let added = vocab
            .read_text_vectors(input, cli.max_per_source)
            .with_context(|| format!("reading {}", input.display()))?;

        // Intermediate prune after each source: keep the previous table
        // plus 80% of the newly added words, within the total budget.
        let intermediate = (before + (added as f64 * 0.8).round() as usize).min(cli.max_total);
        let remapped = vocab.prune(intermediate);
        info!(
            source = %input.display(),
            added,
            remapped,
            rows = vocab.n_rows(),
            "source merged"
        );
    }

    let remapped = vocab.prune(cli.max_total);
    let aliases = vocab.add_title_case_aliases();
    info!(
        rows = vocab.n_rows(),
        words = vocab.n_words(),
        remapped,
        aliases,
        "final pruning done"
    );

    vocab.save(&cli.output)?;
    info!(dir = %cli.output.display(), "vocabulary saved");
    Ok(())
}
