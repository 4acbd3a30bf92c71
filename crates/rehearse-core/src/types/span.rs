use serde::{Deserialize, Serialize};

use crate::labels::Label;

/// A labeled substring identified by byte offsets into its sentence.
///
/// Invariant: `start < end`, both on char boundaries of the owning text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
    /// Canonical entity label.
    pub label: Label,
}

impl Span {
    /// Creates a new span.
    #[must_use]
    pub fn new(start: usize, end: usize, label: Label) -> Self {
        Self { start, end, label }
    }

    /// Byte length of the span.
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` if the span is empty (never the case for valid spans).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    /// The substring this span covers in `text`.
    ///
    /// Returns `None` if the offsets fall outside `text` or off char
    /// boundaries.
    #[must_use]
    pub fn slice<'t>(&self, text: &'t str) -> Option<&'t str> {
        text.get(self.start..self.end)
    }

    /// Returns `true` if this span shares any byte with `other`.
    #[must_use]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_returns_covered_text() {
        let span = Span::new(0, 10, Label::Person);
        assert_eq!(span.slice("Shaka Khan called."), Some("Shaka Khan"));
    }

    #[test]
    fn slice_rejects_out_of_bounds() {
        let span = Span::new(5, 50, Label::Org);
        assert_eq!(span.slice("short"), None);
    }

    #[test]
    fn overlap_detection() {
        let a = Span::new(0, 10, Label::Person);
        let b = Span::new(5, 12, Label::Org);
        let c = Span::new(10, 14, Label::Gpe);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn span_serialization_roundtrip() {
        let span = Span::new(3, 9, Label::Gpe);
        let json = serde_json::to_string(&span).unwrap();
        assert!(json.contains("\"GPE\""));
        let back: Span = serde_json::from_str(&json).unwrap();
        assert_eq!(span, back);
    }
}
