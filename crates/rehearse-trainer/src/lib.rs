//! # Rehearse Trainer
//!
//! Training-side workflows: converting annotated examples into tagged
//! sequences, the perceptron NER tagger and its training loop,
//! pseudo-rehearsal annotation mixing, and the pruned word-vector
//! vocabulary builder.

pub mod data;
pub mod eval;
pub mod mixer;
pub mod model;
pub mod trainer;
pub mod vectors;

pub use data::{load_export, sequences_from_examples, SequenceExample};
pub use eval::{evaluate, EvalStats, PrfMetrics};
pub use mixer::{mix, MixOptions, MixOutput};
pub use model::{viterbi_decode, TaggerModel, NUM_TAGS};
pub use trainer::{load_model, EpochReport, ModelMeta, TrainConfig, Trainer};
pub use vectors::VectorVocab;

/// Unbiased in-place Fisher-Yates shuffle.
pub fn shuffle<T>(items: &mut [T], rng: &mut oorandom::Rand64) {
    for i in (1..items.len()).rev() {
        let j = rng.rand_range(0..(i as u64 + 1)) as usize;
        items.swap(i, j);
    }
}
