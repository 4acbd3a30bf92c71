use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while parsing corpus files into span annotations.
#[derive(Debug, Error)]
pub enum CorpusError {
    /// The input sentence is empty or contains only whitespace.
    #[error("input is empty or whitespace-only")]
    EmptyInput,

    /// Entity markup could not be parsed (unterminated or stray tags).
    #[error("malformed entity markup: {context:?}")]
    MalformedMarkup {
        /// The fragment of markup that failed to parse.
        context: String,
    },

    /// An entity tag carries no TYPE attribute.
    #[error("entity tag without TYPE attribute: {tag:?}")]
    MissingTypeAttr {
        /// The raw attribute section of the offending tag.
        tag: String,
    },

    /// An entity's text does not occur in the de-tagged sentence at or
    /// after the search cursor.
    #[error("entity text {entity:?} not found in sentence after offset {cursor}")]
    OffsetNotFound {
        /// The entity text that could not be located.
        entity: String,
        /// The byte offset the search started from.
        cursor: usize,
    },

    /// The free-text file has none of the expected plain-sentence blocks.
    #[error("document {path:?} has no plain-sentence blocks")]
    MalformedDocument {
        /// The free-text file that lacked the expected structure.
        path: PathBuf,
    },

    /// A span does not align with token boundaries.
    #[error("span {start}..{end} does not align with token boundaries")]
    Misaligned {
        /// Span start byte offset.
        start: usize,
        /// Span end byte offset.
        end: usize,
    },

    /// A regex pattern failed to compile (should not happen with static patterns).
    #[error("regex compilation error: {0}")]
    RegexError(#[from] regex::Error),

    /// An underlying file operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for corpus operations.
pub type Result<T> = std::result::Result<T, CorpusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = CorpusError::EmptyInput;
        assert_eq!(err.to_string(), "input is empty or whitespace-only");

        let err = CorpusError::OffsetNotFound {
            entity: "Shaka Khan".into(),
            cursor: 12,
        };
        assert!(err.to_string().contains("Shaka Khan"));
        assert!(err.to_string().contains("12"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<CorpusError>();
    }
}
