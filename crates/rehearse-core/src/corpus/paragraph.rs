use std::path::Path;

use regex::Regex;

use crate::error::{CorpusError, Result};

use super::markup::clean_treebank;

/// Extracts plain-sentence blocks from a free-text annotation file and
/// joins them into one paragraph.
pub struct ParagraphReader {
    re_block: Regex,
}

impl ParagraphReader {
    /// Constructs a reader with the pre-compiled block pattern.
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_block: Regex::new(r"(?s)Plain sentence:\n-+\n(.+?)Treebanked sentence")?,
        })
    }

    /// Reconstructs the document paragraph from the file contents.
    ///
    /// Each plain-sentence block has its internal whitespace runs collapsed
    /// to single spaces; blocks are joined with a single space.
    ///
    /// # Errors
    ///
    /// `CorpusError::MalformedDocument` when no block marker is present;
    /// absence of the expected structure is an error, not an empty
    /// paragraph. `path` only names the document in the error.
    pub fn reconstruct(&self, contents: &str, path: &Path) -> Result<String> {
        let blocks: Vec<String> = self
            .re_block
            .captures_iter(contents)
            .map(|caps| caps[1].split_whitespace().collect::<Vec<_>>().join(" "))
            .collect();

        if blocks.is_empty() {
            return Err(CorpusError::MalformedDocument {
                path: path.to_path_buf(),
            });
        }

        Ok(clean_treebank(&blocks.join(" ")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader() -> ParagraphReader {
        ParagraphReader::new().unwrap()
    }

    const ONF_SAMPLE: &str = "\
Plain sentence:\n\
---------------\n\
    Shaka Khan called\n\
    yesterday .\n\
Treebanked sentence:\n\
--------------------\n\
    (S (NP Shaka Khan) (VP called))\n\
Plain sentence:\n\
---------------\n\
    He left -LRB- quietly -RRB- .\n\
Treebanked sentence:\n\
--------------------\n\
    (S (NP He) (VP left))\n";

    #[test]
    fn blocks_join_into_one_paragraph() {
        let paragraph = reader()
            .reconstruct(ONF_SAMPLE, Path::new("doc.onf"))
            .unwrap();
        assert_eq!(
            paragraph,
            "Shaka Khan called yesterday . He left ( quietly ) ."
        );
    }

    #[test]
    fn whitespace_runs_collapse() {
        let contents = "\
Plain sentence:\n\
---------------\n\
    One   two\n\n     three\n\
Treebanked sentence:\n";
        let paragraph = reader().reconstruct(contents, Path::new("doc.onf")).unwrap();
        assert_eq!(paragraph, "One two three");
    }

    #[test]
    fn absent_markers_are_a_typed_error() {
        let err = reader()
            .reconstruct("no structure here at all", Path::new("data/doc.onf"))
            .unwrap_err();
        match err {
            CorpusError::MalformedDocument { path } => {
                assert_eq!(path, Path::new("data/doc.onf"));
            }
            other => panic!("expected MalformedDocument, got {other}"),
        }
    }
}
