//! # BILOU tags for span annotations
//!
//! Per-token tag scheme encoding span boundaries: Begin/Inside/Last for
//! multi-token entities, Unit for single-token entities, Outside elsewhere.
//! Provides derivation from character spans and decoding back to spans.

use std::fmt;

use crate::error::{CorpusError, Result};
use crate::labels::Label;
use crate::tokenizer::Token;
use crate::types::Span;

/// A BILOU tag over the canonical label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BilouTag {
    Begin(Label),
    Inside(Label),
    Last(Label),
    Unit(Label),
    Outside,
}

impl BilouTag {
    /// Total number of distinct tags (four positions per label, plus O).
    pub const NUM_TAGS: usize = Label::NUM_LABELS * 4 + 1;

    /// Tag index for weight-matrix addressing. Outside is the last index.
    pub fn index(&self) -> usize {
        match self {
            BilouTag::Begin(l) => l.index() * 4,
            BilouTag::Inside(l) => l.index() * 4 + 1,
            BilouTag::Last(l) => l.index() * 4 + 2,
            BilouTag::Unit(l) => l.index() * 4 + 3,
            BilouTag::Outside => Self::NUM_TAGS - 1,
        }
    }

    /// Get tag from index.
    pub fn from_index(idx: usize) -> Option<Self> {
        if idx == Self::NUM_TAGS - 1 {
            return Some(BilouTag::Outside);
        }
        let label = Label::from_index(idx / 4)?;
        Some(match idx % 4 {
            0 => BilouTag::Begin(label),
            1 => BilouTag::Inside(label),
            2 => BilouTag::Last(label),
            3 => BilouTag::Unit(label),
            _ => unreachable!(),
        })
    }

    /// The label this tag belongs to, `None` for Outside.
    pub fn label(&self) -> Option<Label> {
        match self {
            BilouTag::Begin(l)
            | BilouTag::Inside(l)
            | BilouTag::Last(l)
            | BilouTag::Unit(l) => Some(*l),
            BilouTag::Outside => None,
        }
    }

    /// Check if transitioning from `from` to `to` is structurally valid.
    ///
    /// Inside an entity (after B or I) only I or L of the same label may
    /// follow; outside an entity (after L, U, or O) only B, U, or O may
    /// start.
    pub fn is_valid_transition(from: BilouTag, to: BilouTag) -> bool {
        match from {
            BilouTag::Begin(l) | BilouTag::Inside(l) => matches!(
                to,
                BilouTag::Inside(l2) | BilouTag::Last(l2) if l2 == l
            ),
            BilouTag::Last(_) | BilouTag::Unit(_) | BilouTag::Outside => matches!(
                to,
                BilouTag::Begin(_) | BilouTag::Unit(_) | BilouTag::Outside
            ),
        }
    }
}

impl fmt::Display for BilouTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BilouTag::Begin(l) => write!(f, "B-{l}"),
            BilouTag::Inside(l) => write!(f, "I-{l}"),
            BilouTag::Last(l) => write!(f, "L-{l}"),
            BilouTag::Unit(l) => write!(f, "U-{l}"),
            BilouTag::Outside => write!(f, "O"),
        }
    }
}

/// Derive per-token BILOU tags from entity spans.
///
/// Every span must start on a token start and end on a token end, and no
/// two spans may claim the same token; otherwise the sentence is rejected
/// with [`CorpusError::Misaligned`].
pub fn tags_from_spans(tokens: &[Token], spans: &[Span]) -> Result<Vec<BilouTag>> {
    let mut tags = vec![BilouTag::Outside; tokens.len()];

    for span in spans {
        let first = tokens.iter().position(|t| t.start == span.start);
        let last = tokens.iter().position(|t| t.end == span.end);

        let (first, last) = match (first, last) {
            (Some(f), Some(l)) if f <= l => (f, l),
            _ => {
                return Err(CorpusError::Misaligned {
                    start: span.start,
                    end: span.end,
                });
            }
        };

        if tags[first..=last].iter().any(|t| *t != BilouTag::Outside) {
            return Err(CorpusError::Misaligned {
                start: span.start,
                end: span.end,
            });
        }

        if first == last {
            tags[first] = BilouTag::Unit(span.label);
        } else {
            tags[first] = BilouTag::Begin(span.label);
            for tag in &mut tags[first + 1..last] {
                *tag = BilouTag::Inside(span.label);
            }
            tags[last] = BilouTag::Last(span.label);
        }
    }

    Ok(tags)
}

/// Decode a BILOU tag sequence back into character spans.
///
/// Tolerant of ill-formed sequences: an entity that is cut off (B with no
/// closing L, or a label change mid-entity) is closed at the last token
/// that still carried its label.
pub fn spans_from_tags(tokens: &[Token], tags: &[BilouTag]) -> Vec<Span> {
    let mut spans = Vec::new();
    let mut open: Option<(usize, Label)> = None;

    for (i, tag) in tags.iter().enumerate().take(tokens.len()) {
        match tag {
            BilouTag::Unit(label) => {
                if let Some((start_idx, open_label)) = open.take() {
                    spans.push(Span::new(
                        tokens[start_idx].start,
                        tokens[i - 1].end,
                        open_label,
                    ));
                }
                spans.push(Span::new(tokens[i].start, tokens[i].end, *label));
            }
            BilouTag::Begin(label) => {
                if let Some((start_idx, open_label)) = open.take() {
                    spans.push(Span::new(
                        tokens[start_idx].start,
                        tokens[i - 1].end,
                        open_label,
                    ));
                }
                open = Some((i, *label));
            }
            BilouTag::Inside(label) => match open {
                Some((_, open_label)) if open_label == *label => {}
                _ => {
                    if let Some((start_idx, open_label)) = open.take() {
                        spans.push(Span::new(
                            tokens[start_idx].start,
                            tokens[i - 1].end,
                            open_label,
                        ));
                    }
                    open = Some((i, *label));
                }
            },
            BilouTag::Last(label) => {
                let start_idx = match open.take() {
                    Some((idx, open_label)) if open_label == *label => idx,
                    Some((idx, open_label)) => {
                        spans.push(Span::new(
                            tokens[idx].start,
                            tokens[i - 1].end,
                            open_label,
                        ));
                        i
                    }
                    None => i,
                };
                spans.push(Span::new(tokens[start_idx].start, tokens[i].end, *label));
            }
            BilouTag::Outside => {
                if let Some((start_idx, open_label)) = open.take() {
                    spans.push(Span::new(
                        tokens[start_idx].start,
                        tokens[i - 1].end,
                        open_label,
                    ));
                }
            }
        }
    }

    if let Some((start_idx, open_label)) = open {
        spans.push(Span::new(
            tokens[start_idx].start,
            tokens[tokens.len() - 1].end,
            open_label,
        ));
    }

    spans
}
