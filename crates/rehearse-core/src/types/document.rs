use serde::{Deserialize, Serialize};

use super::sentence::AnnotatedSentence;

/// One corpus document: the reconstructed paragraph from the free-text file
/// and the annotated sentences from its name-annotation counterpart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorpusDocument {
    /// Document identifier, derived from the base file name.
    pub id: String,
    /// Paragraph reconstructed from the plain-sentence blocks.
    pub paragraph: String,
    /// Annotated sentences in document order.
    pub sentences: Vec<AnnotatedSentence>,
}

impl CorpusDocument {
    /// Creates a new corpus document.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        paragraph: impl Into<String>,
        sentences: Vec<AnnotatedSentence>,
    ) -> Self {
        Self {
            id: id.into(),
            paragraph: paragraph.into(),
            sentences,
        }
    }

    /// Total number of entity spans across all sentences.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.sentences.iter().map(|s| s.entities.len()).sum()
    }
}
