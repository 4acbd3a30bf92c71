//! # Canonical entity labels
//!
//! The fixed label vocabulary used across collections, plus normalization
//! of raw corpus label strings onto it. Corpus labels may carry attribute
//! suffixes from the original tagging scheme (e.g. `GPE" S_OFF="1`) which
//! are stripped before matching.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical entity labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Label {
    #[serde(rename = "PERSON")]
    Person,
    #[serde(rename = "GPE")]
    Gpe,
    #[serde(rename = "ORG")]
    Org,
    #[serde(rename = "MISC")]
    Misc,
}

impl Label {
    /// Total number of canonical labels.
    pub const NUM_LABELS: usize = 4;

    /// Get all labels in index order.
    pub fn all() -> &'static [Label] {
        &[Label::Person, Label::Gpe, Label::Org, Label::Misc]
    }

    /// Canonical string name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Person => "PERSON",
            Label::Gpe => "GPE",
            Label::Org => "ORG",
            Label::Misc => "MISC",
        }
    }

    /// Label index for weight-matrix addressing.
    pub fn index(&self) -> usize {
        match self {
            Label::Person => 0,
            Label::Gpe => 1,
            Label::Org => 2,
            Label::Misc => 3,
        }
    }

    /// Get label from index.
    pub fn from_index(idx: usize) -> Option<Self> {
        match idx {
            0 => Some(Label::Person),
            1 => Some(Label::Gpe),
            2 => Some(Label::Org),
            3 => Some(Label::Misc),
            _ => None,
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalize a raw corpus label string onto the canonical set.
///
/// The raw string may carry attribute suffixes (`PERSON" S_OFF="1`); the
/// part before the first `"` is what gets matched. `FAC` and `LOC` collapse
/// to [`Label::Gpe`]; any unrecognized value maps to [`Label::Misc`].
/// Normalization is idempotent over canonical names.
pub fn normalize(raw: &str) -> Label {
    let base = raw.split('"').next().unwrap_or("").trim();
    match base {
        "PERSON" => Label::Person,
        "GPE" | "FAC" | "LOC" => Label::Gpe,
        "ORG" => Label::Org,
        _ => Label::Misc,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_index_roundtrip() {
        for label in Label::all() {
            assert_eq!(Label::from_index(label.index()), Some(*label));
        }
        assert_eq!(Label::from_index(Label::NUM_LABELS), None);
    }

    #[test]
    fn canonical_names_pass_through() {
        assert_eq!(normalize("PERSON"), Label::Person);
        assert_eq!(normalize("GPE"), Label::Gpe);
        assert_eq!(normalize("ORG"), Label::Org);
        assert_eq!(normalize("MISC"), Label::Misc);
    }

    #[test]
    fn suffixed_variants_strip_to_canonical() {
        assert_eq!(normalize("GPE\" S_OFF=\"1"), Label::Gpe);
        assert_eq!(normalize("PERSON\" S_OFF=\"1"), Label::Person);
        assert_eq!(normalize("ORG\" E_OFF=\"1"), Label::Org);
    }

    #[test]
    fn facility_and_location_collapse_to_gpe() {
        assert_eq!(normalize("FAC"), Label::Gpe);
        assert_eq!(normalize("LOC"), Label::Gpe);
    }

    #[test]
    fn unknown_labels_map_to_misc() {
        assert_eq!(normalize("XYZ"), Label::Misc);
        assert_eq!(normalize("NORP"), Label::Misc);
        assert_eq!(normalize(""), Label::Misc);
    }

    #[test]
    fn normalize_is_idempotent() {
        for raw in ["PERSON", "GPE\" S_OFF=\"1", "FAC", "XYZ"] {
            let once = normalize(raw);
            assert_eq!(normalize(once.as_str()), once);
        }
    }

    #[test]
    fn label_serializes_as_canonical_name() {
        let json = serde_json::to_string(&Label::Person).unwrap();
        assert_eq!(json, "\"PERSON\"");
        let back: Label = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Label::Person);
    }
}
