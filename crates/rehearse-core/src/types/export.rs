use serde::{Deserialize, Serialize};

use crate::labels;

use super::sentence::AnnotatedSentence;
use super::span::Span;

/// One record of the JSON export artifact: a `(text, {"entities": [[start,
/// end, label], ...]})` pair. A full export file is an ordered array of
/// these records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportRecord(pub String, pub ExportEntities);

/// The entity block of an export record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportEntities {
    /// `[start, end, label]` triples in document order.
    pub entities: Vec<(usize, usize, String)>,
}

impl ExportRecord {
    /// Text of the record.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0
    }

    /// Converts back into an annotated sentence, normalizing labels.
    #[must_use]
    pub fn into_sentence(self) -> AnnotatedSentence {
        let entities = self
            .1
            .entities
            .into_iter()
            .map(|(start, end, label)| Span::new(start, end, labels::normalize(&label)))
            .collect();
        AnnotatedSentence::new(self.0, entities)
    }
}

impl From<&AnnotatedSentence> for ExportRecord {
    fn from(sentence: &AnnotatedSentence) -> Self {
        let entities = sentence
            .entities
            .iter()
            .map(|s| (s.start, s.end, s.label.as_str().to_string()))
            .collect();
        ExportRecord(sentence.text.clone(), ExportEntities { entities })
    }
}
