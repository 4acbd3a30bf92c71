use serde::{Deserialize, Serialize};

use super::sentence::AnnotatedSentence;
use super::span::Span;

/// Annotation decision attached to an example. Corpus-derived examples are
/// always accepted wholesale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Answer {
    #[serde(rename = "accept")]
    Accept,
}

/// One immutable training example as stored in an example collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    /// Sentence text.
    pub text: String,
    /// Entity spans over `text`.
    pub spans: Vec<Span>,
    /// Annotation decision.
    pub answer: Answer,
    /// Provenance tag (e.g. `"corpus_rehearsal"` or a collection name).
    pub source: String,
    /// Content-derived identifier over text and spans.
    pub hash: String,
}

impl TrainingExample {
    /// Creates an accepted example, deriving the content hash.
    #[must_use]
    pub fn new(text: impl Into<String>, spans: Vec<Span>, source: impl Into<String>) -> Self {
        let text = text.into();
        let hash = content_hash(&text, &spans);
        Self {
            text,
            spans,
            answer: Answer::Accept,
            source: source.into(),
            hash,
        }
    }

    /// Builds an example from an annotated corpus sentence.
    #[must_use]
    pub fn from_sentence(sentence: &AnnotatedSentence, source: &str) -> Self {
        Self::new(sentence.text.clone(), sentence.entities.clone(), source)
    }
}

/// Stable content hash over text and span triples, 16 hex chars.
fn content_hash(text: &str, spans: &[Span]) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(text.as_bytes());
    for span in spans {
        hasher.update(&span.start.to_le_bytes());
        hasher.update(&span.end.to_le_bytes());
        hasher.update(span.label.as_str().as_bytes());
    }
    hasher.finalize().to_hex()[..16].to_string()
}
