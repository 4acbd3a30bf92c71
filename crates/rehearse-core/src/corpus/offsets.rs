use crate::error::{CorpusError, Result};
use crate::labels::Label;
use crate::types::Span;

/// Re-locate extracted entities in the de-tagged sentence text.
///
/// Entities arrive in document order, so the search runs behind a cursor:
/// each entity is looked up at or after the end of the previous match.
/// This resolves the nth occurrence of a repeated entity string to its nth
/// position instead of always taking the first match.
///
/// # Errors
///
/// `CorpusError::OffsetNotFound` if an entity's text does not occur at or
/// after the cursor; the whole sentence is then unusable and the caller
/// should skip it.
pub fn resolve(text: &str, entities: &[(String, Label)]) -> Result<Vec<Span>> {
    let mut spans = Vec::with_capacity(entities.len());
    let mut cursor = 0usize;

    for (entity_text, label) in entities {
        let found = text
            .get(cursor..)
            .and_then(|rest| rest.find(entity_text.as_str()))
            .map(|pos| cursor + pos)
            .ok_or_else(|| CorpusError::OffsetNotFound {
                entity: entity_text.clone(),
                cursor,
            })?;

        let span = Span::new(found, found + entity_text.len(), *label);
        cursor = span.end;
        spans.push(span);
    }

    Ok(spans)
}
