pub mod document;
pub mod example;
pub mod export;
pub mod sentence;
pub mod span;

pub use document::CorpusDocument;
pub use example::{Answer, TrainingExample};
pub use export::ExportRecord;
pub use sentence::AnnotatedSentence;
pub use span::Span;
