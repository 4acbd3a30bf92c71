use regex::Regex;

use crate::error::{CorpusError, Result};

/// An entity extracted from inline markup, before label normalization and
/// offset resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedEntity {
    /// Entity text with markup removed and Treebank tokens cleaned.
    pub text: String,
    /// Raw label string as it appears in the TYPE attribute. May carry
    /// attribute suffixes (`GPE" S_OFF="1`) from the original scheme.
    pub raw_label: String,
}

/// Parser for `<ENAMEX TYPE="...">content</ENAMEX>` sentence markup.
pub struct MarkupParser {
    re_entity: Regex,
    re_type: Regex,
    re_open: Regex,
    re_close: Regex,
}

impl MarkupParser {
    /// Constructs a parser with pre-compiled patterns.
    ///
    /// # Errors
    ///
    /// Returns `CorpusError::RegexError` if any pattern fails to compile
    /// (should never happen with the static patterns defined here).
    pub fn new() -> Result<Self> {
        Ok(Self {
            re_entity: Regex::new(r"(?s)<ENAMEX\s+([^>]*)>(.*?)</ENAMEX>")?,
            re_type: Regex::new(r#"TYPE="(.*)""#)?,
            re_open: Regex::new(r"<ENAMEX[^>]*>")?,
            re_close: Regex::new(r"</ENAMEX>")?,
        })
    }

    /// Parses one sentence of markup into its de-tagged text and the
    /// entities in document order.
    ///
    /// # Errors
    ///
    /// - `CorpusError::EmptyInput` for blank input;
    /// - `CorpusError::MissingTypeAttr` when a tag has no TYPE attribute;
    /// - `CorpusError::MalformedMarkup` when tag markers remain after all
    ///   well-formed pairs are consumed (unterminated or stray tags).
    pub fn parse_sentence(&self, markup: &str) -> Result<(String, Vec<MarkedEntity>)> {
        let trimmed = markup.trim();
        if trimmed.is_empty() {
            return Err(CorpusError::EmptyInput);
        }

        let mut entities = Vec::new();
        for caps in self.re_entity.captures_iter(trimmed) {
            let attrs = &caps[1];
            let raw_label = match self.re_type.captures(attrs) {
                Some(type_caps) => type_caps[1].to_string(),
                None => {
                    return Err(CorpusError::MissingTypeAttr {
                        tag: attrs.to_string(),
                    });
                }
            };
            entities.push(MarkedEntity {
                text: clean_treebank(&caps[2]),
                raw_label,
            });
        }

        // Whatever the entity pattern did not consume must contain no tag
        // markers; leftovers mean an unterminated or stray tag.
        let stripped = self.re_entity.replace_all(trimmed, "");
        if stripped.contains("<ENAMEX") || stripped.contains("</ENAMEX>") {
            return Err(CorpusError::MalformedMarkup {
                context: trimmed.chars().take(80).collect(),
            });
        }

        let text = self.re_close.replace_all(trimmed, "");
        let text = self.re_open.replace_all(&text, "");
        Ok((clean_treebank(&text), entities))
    }
}

/// Replace Treebank bracket tokens with their literal characters. Applied
/// identically to entity text and de-tagged text so offsets agree.
pub fn clean_treebank(text: &str) -> String {
    text.replace("-LRB-", "(").replace("-RRB-", ")")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> MarkupParser {
        MarkupParser::new().unwrap()
    }

    #[test]
    fn blank_input_errors() {
        let p = parser();
        assert!(matches!(p.parse_sentence(""), Err(CorpusError::EmptyInput)));
        assert!(matches!(
            p.parse_sentence("   "),
            Err(CorpusError::EmptyInput)
        ));
    }

    #[test]
    fn single_entity_sentence() {
        let p = parser();
        let (text, entities) = p
            .parse_sentence("<ENAMEX TYPE=\"PERSON\">Shaka Khan</ENAMEX> called.")
            .unwrap();

        assert_eq!(text, "Shaka Khan called.");
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].text, "Shaka Khan");
        assert_eq!(entities[0].raw_label, "PERSON");
    }

    #[test]
    fn entity_count_matches_tag_pairs() {
        let p = parser();
        let markup = "<ENAMEX TYPE=\"ORG\">Reuters</ENAMEX> reported from \
                      <ENAMEX TYPE=\"GPE\">Cairo</ENAMEX> on Monday.";
        let (_, entities) = p.parse_sentence(markup).unwrap();
        assert_eq!(entities.len(), 2);
        assert_eq!(entities[0].text, "Reuters");
        assert_eq!(entities[1].text, "Cairo");
    }

    #[test]
    fn detagged_text_reconstructs_from_parts() {
        let p = parser();
        let markup = "<ENAMEX TYPE=\"ORG\">Reuters</ENAMEX> reported from \
                      <ENAMEX TYPE=\"GPE\">Cairo</ENAMEX>.";
        let (text, entities) = p.parse_sentence(markup).unwrap();

        // Outside-tag text plus entity texts, in order, is the raw text.
        let reconstructed = format!(
            "{} reported from {}.",
            entities[0].text, entities[1].text
        );
        assert_eq!(text, reconstructed);
    }

    #[test]
    fn suffixed_type_attribute_is_kept_raw() {
        let p = parser();
        let (_, entities) = p
            .parse_sentence("<ENAMEX TYPE=\"GPE\" S_OFF=\"1\">Cairo</ENAMEX> today")
            .unwrap();
        assert_eq!(entities[0].raw_label, "GPE\" S_OFF=\"1");
    }

    #[test]
    fn missing_type_attribute_errors() {
        let p = parser();
        let result = p.parse_sentence("<ENAMEX KIND=\"PERSON\">Khan</ENAMEX> spoke.");
        assert!(matches!(result, Err(CorpusError::MissingTypeAttr { .. })));
    }

    #[test]
    fn unterminated_tag_errors() {
        let p = parser();
        let result = p.parse_sentence("<ENAMEX TYPE=\"PERSON\">Khan spoke.");
        assert!(matches!(result, Err(CorpusError::MalformedMarkup { .. })));
    }

    #[test]
    fn stray_close_tag_errors() {
        let p = parser();
        let result = p.parse_sentence("Khan</ENAMEX> spoke.");
        assert!(matches!(result, Err(CorpusError::MalformedMarkup { .. })));
    }

    #[test]
    fn sentence_without_entities_is_fine() {
        let p = parser();
        let (text, entities) = p.parse_sentence("Nothing notable happened.").unwrap();
        assert_eq!(text, "Nothing notable happened.");
        assert!(entities.is_empty());
    }

    #[test]
    fn treebank_brackets_are_cleaned_everywhere() {
        let p = parser();
        let markup = "-LRB-<ENAMEX TYPE=\"ORG\">AP -RRB-</ENAMEX> wire";
        let (text, entities) = p.parse_sentence(markup).unwrap();
        assert_eq!(text, "(AP ) wire");
        assert_eq!(entities[0].text, "AP )");
    }
}
