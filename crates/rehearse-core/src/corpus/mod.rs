//! # Legacy corpus conversion
//!
//! Turns paired corpus files (`<base>.name` with inline entity markup,
//! `<base>.onf` with free text) into [`CorpusDocument`]s. Sentences that
//! fail markup parsing or offset resolution are skipped and logged with
//! the offending file identity; the rest of the document survives.

pub mod markup;
pub mod offsets;
pub mod paragraph;
pub mod walker;

use std::fs;
use std::path::Path;

use tracing::warn;

use crate::error::Result;
use crate::labels;
use crate::types::{AnnotatedSentence, CorpusDocument};

pub use markup::{MarkedEntity, MarkupParser};
pub use paragraph::ParagraphReader;
pub use walker::CorpusWalker;

/// Reads corpus document pairs into annotated documents.
pub struct CorpusReader {
    markup: MarkupParser,
    paragraph: ParagraphReader,
}

impl CorpusReader {
    /// Constructs a reader with pre-compiled patterns.
    pub fn new() -> Result<Self> {
        Ok(Self {
            markup: MarkupParser::new()?,
            paragraph: ParagraphReader::new()?,
        })
    }

    /// Converts one sentence of markup into an annotated sentence:
    /// markup extraction, label normalization, then offset resolution.
    pub fn sentence(&self, markup_text: &str) -> Result<AnnotatedSentence> {
        let (text, entities) = self.markup.parse_sentence(markup_text)?;
        let labeled: Vec<(String, labels::Label)> = entities
            .into_iter()
            .map(|e| {
                let label = labels::normalize(&e.raw_label);
                (e.text, label)
            })
            .collect();
        let spans = offsets::resolve(&text, &labeled)?;
        Ok(AnnotatedSentence::new(text, spans))
    }

    /// Reads the document pair at `base` (`<base>.name` + `<base>.onf`).
    ///
    /// Unusable sentences are dropped with a warning naming the file;
    /// missing files and a structureless `.onf` are errors that fail the
    /// whole document.
    pub fn read_document(&self, base: &Path) -> Result<CorpusDocument> {
        let name_path = base.with_extension("name");
        let onf_path = base.with_extension("onf");

        let onf_contents = fs::read_to_string(&onf_path)?;
        let paragraph = self.paragraph.reconstruct(&onf_contents, &onf_path)?;

        let name_contents = fs::read_to_string(&name_path)?;
        let mut sentences = Vec::new();
        for line in sentence_lines(&name_contents) {
            match self.sentence(line) {
                Ok(sentence) => sentences.push(sentence),
                Err(e) => {
                    warn!(file = %name_path.display(), error = %e, "skipping sentence");
                }
            }
        }

        let id = base
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(CorpusDocument::new(id, paragraph, sentences))
    }
}

/// Sentence lines of a name-annotation file: one sentence per line, with
/// the document wrapper (first and last line) dropped.
fn sentence_lines(contents: &str) -> Vec<&str> {
    let lines: Vec<&str> = contents.trim().lines().collect();
    if lines.len() < 2 {
        return Vec::new();
    }
    lines[1..lines.len() - 1]
        .iter()
        .copied()
        .filter(|l| !l.trim().is_empty())
        .collect()
}
