use serde::{Deserialize, Serialize};

use super::span::Span;

/// One sentence of de-tagged text with its entity spans in document order.
///
/// Overlapping spans are neither prevented nor resolved here; downstream
/// consumers that need token alignment reject them explicitly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    /// Raw sentence text with all markup removed.
    pub text: String,
    /// Entity spans, ordered as they appear in the text.
    pub entities: Vec<Span>,
}

impl AnnotatedSentence {
    /// Creates a new annotated sentence.
    #[must_use]
    pub fn new(text: impl Into<String>, entities: Vec<Span>) -> Self {
        Self {
            text: text.into(),
            entities,
        }
    }

    /// Returns `true` if the sentence has no entity spans.
    #[must_use]
    pub fn is_unannotated(&self) -> bool {
        self.entities.is_empty()
    }

    /// Checks the span invariant against the sentence text: every span is
    /// in bounds, non-empty, and on char boundaries.
    #[must_use]
    pub fn spans_are_valid(&self) -> bool {
        self.entities
            .iter()
            .all(|s| !s.is_empty() && s.slice(&self.text).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::Label;

    #[test]
    fn valid_spans_pass_invariant_check() {
        let sent = AnnotatedSentence::new(
            "Shaka Khan called.",
            vec![Span::new(0, 10, Label::Person)],
        );
        assert!(sent.spans_are_valid());
        assert!(!sent.is_unannotated());
    }

    #[test]
    fn out_of_bounds_span_fails_invariant_check() {
        let sent = AnnotatedSentence::new("short", vec![Span::new(0, 99, Label::Org)]);
        assert!(!sent.spans_are_valid());
    }
}
