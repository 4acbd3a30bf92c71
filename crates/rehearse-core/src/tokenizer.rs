//! # Sentence tokenizer
//!
//! Splits sentence text into tokens that keep their byte offsets, so that
//! entity spans can be aligned with token boundaries for BILOU derivation.
//! Whitespace separates tokens; punctuation characters stand alone.

/// A token with positional information into the original sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The token text, exactly as it appears in the sentence.
    pub text: String,
    /// Start byte offset in the original string.
    pub start: usize,
    /// End byte offset in the original string.
    pub end: usize,
    /// Token index in the sequence.
    pub index: usize,
}

/// Characters that always form single-character tokens.
fn is_token_punct(c: char) -> bool {
    matches!(
        c,
        '.' | ',' | '!' | '?' | ';' | ':' | '"' | '\'' | '(' | ')' | '[' | ']' | '{' | '}'
    )
}

/// Tokenize sentence text into offset-tracking tokens.
pub fn tokenize(input: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut current_start: Option<usize> = None;

    let mut push = |tokens: &mut Vec<Token>, start: usize, end: usize, input: &str| {
        let index = tokens.len();
        tokens.push(Token {
            text: input[start..end].to_string(),
            start,
            end,
            index,
        });
    };

    for (idx, c) in input.char_indices() {
        if c.is_whitespace() {
            if let Some(start) = current_start.take() {
                push(&mut tokens, start, idx, input);
            }
        } else if is_token_punct(c) {
            if let Some(start) = current_start.take() {
                push(&mut tokens, start, idx, input);
            }
            push(&mut tokens, idx, idx + c.len_utf8(), input);
        } else if current_start.is_none() {
            current_start = Some(idx);
        }
    }

    if let Some(start) = current_start {
        push(&mut tokens, start, input.len(), input);
    }

    tokens
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenize_basic_sentence() {
        let tokens = tokenize("Shaka Khan called.");
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(texts, vec!["Shaka", "Khan", "called", "."]);
        assert_eq!(tokens[0].start, 0);
        assert_eq!(tokens[0].end, 5);
        assert_eq!(tokens[1].start, 6);
        assert_eq!(tokens[1].end, 10);
    }

    #[test]
    fn tokens_keep_case_and_offsets() {
        let input = "I like London and Berlin.";
        for token in tokenize(input) {
            assert_eq!(&input[token.start..token.end], token.text);
        }
    }

    #[test]
    fn punctuation_stands_alone() {
        let tokens = tokenize("(al-Qaeda), reportedly.");
        let texts: Vec<_> = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(
            texts,
            vec!["(", "al-Qaeda", ")", ",", "reportedly", "."]
        );
    }

    #[test]
    fn tokenize_empty_input() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn indices_are_sequential() {
        let tokens = tokenize("a b c");
        for (i, token) in tokens.iter().enumerate() {
            assert_eq!(token.index, i);
        }
    }

    #[test]
    fn non_ascii_text_tokenizes_on_char_boundaries() {
        let input = "Zürich café";
        let tokens = tokenize(input);
        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0].text, "Zürich");
        assert_eq!(&input[tokens[1].start..tokens[1].end], "café");
    }
}
