//! Conversion of training examples into token/tag sequences, and loading
//! of the JSON export artifact.

use std::fs;
use std::path::Path;

use tracing::warn;

use rehearse_core::error::Result;
use rehearse_core::{tags, tokenize, ExportRecord, TrainingExample};

/// One sequence-labeling example: parallel token texts and BILOU tag
/// indices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceExample {
    pub tokens: Vec<String>,
    pub tags: Vec<usize>,
}

impl SequenceExample {
    pub fn new(tokens: Vec<String>, tags: Vec<usize>) -> Self {
        Self { tokens, tags }
    }
}

/// Convert examples into tagged sequences. Examples whose spans do not
/// align with token boundaries are skipped; the skip count is returned
/// alongside the usable sequences.
pub fn sequences_from_examples(examples: &[TrainingExample]) -> (Vec<SequenceExample>, usize) {
    let mut sequences = Vec::with_capacity(examples.len());
    let mut skipped = 0usize;

    for example in examples {
        let tokens = tokenize(&example.text);
        if tokens.is_empty() {
            skipped += 1;
            continue;
        }
        match tags::tags_from_spans(&tokens, &example.spans) {
            Ok(tags) => {
                let tag_indices = tags.iter().map(|t| t.index()).collect();
                let token_texts = tokens.into_iter().map(|t| t.text).collect();
                sequences.push(SequenceExample::new(token_texts, tag_indices));
            }
            Err(e) => {
                warn!(hash = %example.hash, error = %e, "skipping misaligned example");
                skipped += 1;
            }
        }
    }

    (sequences, skipped)
}

/// Load training examples from a JSON export artifact (an ordered array of
/// `(text, {"entities": ...})` records).
pub fn load_export(path: &Path, source: &str) -> Result<Vec<TrainingExample>> {
    let contents = fs::read_to_string(path)?;
    let records: Vec<ExportRecord> = serde_json::from_str(&contents)?;
    Ok(records
        .into_iter()
        .map(|record| {
            let sentence = record.into_sentence();
            TrainingExample::from_sentence(&sentence, source)
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rehearse_core::{BilouTag, Label, Span};

    #[test]
    fn aligned_example_becomes_sequence() {
        let examples = vec![TrainingExample::new(
            "Shaka Khan called.",
            vec![Span::new(0, 10, Label::Person)],
            "test",
        )];
        let (sequences, skipped) = sequences_from_examples(&examples);

        assert_eq!(skipped, 0);
        assert_eq!(sequences.len(), 1);
        assert_eq!(sequences[0].tokens, vec!["Shaka", "Khan", "called", "."]);
        assert_eq!(
            sequences[0].tags,
            vec![
                BilouTag::Begin(Label::Person).index(),
                BilouTag::Last(Label::Person).index(),
                BilouTag::Outside.index(),
                BilouTag::Outside.index(),
            ]
        );
    }

    #[test]
    fn misaligned_example_is_skipped() {
        let examples = vec![
            TrainingExample::new(
                "Shaka Khan called.",
                // Ends mid-token.
                vec![Span::new(0, 8, Label::Person)],
                "test",
            ),
            TrainingExample::new("Nothing here.", vec![], "test"),
        ];
        let (sequences, skipped) = sequences_from_examples(&examples);
        assert_eq!(skipped, 1);
        assert_eq!(sequences.len(), 1);
    }

    #[test]
    fn export_file_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        fs::write(
            &path,
            r#"[["Shaka Khan called.",{"entities":[[0,10,"PERSON"]]}]]"#,
        )
        .unwrap();

        let examples = load_export(&path, "export").unwrap();
        assert_eq!(examples.len(), 1);
        assert_eq!(examples[0].text, "Shaka Khan called.");
        assert_eq!(examples[0].spans, vec![Span::new(0, 10, Label::Person)]);
        assert_eq!(examples[0].source, "export");
    }
}
