//! # Rehearse Core
//!
//! Parsing of legacy NER corpus files into span annotations, plus the
//! shared data model: labels, spans, annotated sentences, training
//! examples, and BILOU tag derivation.
//!
//! ## Quick Start
//!
//! ```rust
//! use rehearse_core::corpus::CorpusReader;
//!
//! let reader = CorpusReader::new().unwrap();
//! let sentence = reader
//!     .sentence("<ENAMEX TYPE=\"PERSON\">Shaka Khan</ENAMEX> called.")
//!     .unwrap();
//!
//! assert_eq!(sentence.text, "Shaka Khan called.");
//! assert_eq!(sentence.entities[0].start, 0);
//! assert_eq!(sentence.entities[0].end, 10);
//! ```
pub mod corpus;
pub mod error;
pub mod labels;
pub mod tags;
pub mod tokenizer;
pub mod types;

// Re-export primary API
pub use corpus::{CorpusReader, CorpusWalker, MarkupParser, ParagraphReader};
pub use error::{CorpusError, Result};
pub use labels::Label;
pub use tags::{spans_from_tags, tags_from_spans, BilouTag};
pub use tokenizer::{tokenize, Token};
pub use types::{AnnotatedSentence, Answer, CorpusDocument, ExportRecord, Span, TrainingExample};
