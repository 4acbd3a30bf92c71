//! # Rehearse
//!
//! Umbrella crate for the rehearse toolkit: legacy NER corpus parsing,
//! annotation storage, pseudo-rehearsal mixing, and tagger training.
//!
//! Most users want one of the member crates directly; this crate
//! re-exports their primary APIs for convenience.

pub use rehearse_core::{
    corpus, labels, tags, tokenizer, types, AnnotatedSentence, BilouTag, CorpusDocument,
    CorpusError, CorpusReader, CorpusWalker, ExportRecord, Label, Span, TrainingExample,
};
pub use rehearse_store::{Store, StoreError};
pub use rehearse_trainer::{
    evaluate, load_export, load_model, mix, sequences_from_examples, EvalStats, MixOptions,
    MixOutput, SequenceExample, TaggerModel, TrainConfig, Trainer, VectorVocab,
};
