//! Convert a legacy corpus directory into span annotations, exporting to
//! a JSON artifact and/or publishing into an annotation store collection.

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use indicatif::ProgressBar;
use tracing::{info, warn};

use rehearse_core::corpus::{CorpusReader, CorpusWalker};
use rehearse_core::{ExportRecord, TrainingExample};
use rehearse_store::Store;

#[derive(Parser)]
#[command(name = "convert")]
#[command(about = "Convert a legacy NER corpus into span annotations")]
#[command(version)]
struct Cli {
    /// Corpus root directory to traverse
    #[arg(short = 'i', long)]
    corpus_dir: PathBuf,

    /// JSON file to write the export artifact to
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,

    /// Collection name to publish the examples into
    #[arg(short = 'd', long)]
    dataset: Option<String>,

    /// Annotation store path
    #[arg(long, default_value = "annotations.db")]
    store: PathBuf,

    /// Provenance tag recorded on published examples
    #[arg(long, default_value = "corpus_rehearsal")]
    source: String,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    if cli.output.is_none() && cli.dataset.is_none() {
        bail!("nothing to do: pass --output and/or --dataset");
    }

    let bases: Vec<PathBuf> = CorpusWalker::new(&cli.corpus_dir)
        .with_context(|| format!("reading corpus directory {}", cli.corpus_dir.display()))?
        .collect::<std::io::Result<_>>()?;
    info!(documents = bases.len(), "corpus walk complete");

    let reader = CorpusReader::new()?;
    let mut sentences = Vec::new();
    let mut failed_docs = 0usize;

    let progress = ProgressBar::new(bases.len() as u64);
    for base in &bases {
        match reader.read_document(base) {
            Ok(doc) => sentences.extend(doc.sentences),
            Err(e) => {
                warn!(document = %base.display(), error = %e, "skipping document");
                failed_docs += 1;
            }
        }
        progress.inc(1);
    }
    progress.finish_and_clear();

    info!(
        sentences = sentences.len(),
        failed_documents = failed_docs,
        "conversion complete"
    );

    if let Some(output) = &cli.output {
        let records: Vec<ExportRecord> = sentences.iter().map(ExportRecord::from).collect();
        fs::write(output, serde_json::to_string(&records)?)
            .with_context(|| format!("writing {}", output.display()))?;
        info!(file = %output.display(), records = records.len(), "export written");
    }

    if let Some(dataset) = &cli.dataset {
        let examples: Vec<TrainingExample> = sentences
            .iter()
            .map(|s| TrainingExample::from_sentence(s, &cli.source))
            .collect();
        let mut store = Store::open(&cli.store)?;
        store.replace_dataset(dataset, &examples)?;
        info!(
            dataset = dataset.as_str(),
            examples = examples.len(),
            "collection published"
        );
    }

    Ok(())
}
